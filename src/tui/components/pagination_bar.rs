//! One-line pagination bar: prev/next affordances and the range label.

use crate::core::{PageDir, Paginator};
use crate::tui::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

const PREV_LABEL: &str = "◀ Prev";
const NEXT_LABEL: &str = "Next ▶";

/// Stateless renderer for the pagination controls. Navigation state lives in
/// the [`Paginator`]; this only draws it.
pub struct PaginationBar;

impl PaginationBar {
    /// Render the bar. Draws nothing when the paginator is hidden.
    pub fn render(frame: &mut Frame, area: Rect, paginator: &Paginator, theme: &Theme) {
        let Some(info) = paginator.info() else {
            return;
        };
        if !paginator.visible() {
            return;
        }

        let enabled = Style::default().fg(theme.info).add_modifier(Modifier::BOLD);
        let disabled = Style::default()
            .fg(theme.placeholder_fg)
            .add_modifier(Modifier::DIM);

        let label = if paginator.loading() {
            "Loading…".to_string()
        } else {
            info.range_label()
        };

        let line = Line::from(vec![
            Span::styled(PREV_LABEL, Self::button_style(info.prev_enabled(), enabled, disabled)),
            Span::raw("  "),
            Span::styled(label, theme.normal_style()),
            Span::raw("  "),
            Span::styled(NEXT_LABEL, Self::button_style(info.next_enabled(), enabled, disabled)),
        ]);

        frame.render_widget(Paragraph::new(line).centered(), area);
    }

    fn button_style(enabled: bool, on: Style, off: Style) -> Style {
        if enabled { on } else { off }
    }

    /// Style-free label for the button in `dir`, for hit labelling and tests.
    pub fn label(dir: PageDir) -> &'static str {
        match dir {
            PageDir::Prev => PREV_LABEL,
            PageDir::Next => NEXT_LABEL,
        }
    }
}
