//! Filter toggle overlay wrapping the [`FilterController`].

use crate::services::FilterController;
use crate::tui::action::Action;
use crate::tui::component::{Component, Focusable};
use crate::tui::theme::Theme;
use color_eyre::Result;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Checkbox-list overlay for named filters. Owns the controller and the
/// active-filter list; what each filter does is the registrar's business.
pub struct FilterMenu {
    controller: FilterController,
    active: Vec<String>,
    cursor: usize,
    visible: bool,
    focused: bool,
    theme: Theme,
    supported_actions: Vec<Action>,
}

impl FilterMenu {
    pub fn new(controller: FilterController) -> Self {
        Self {
            controller,
            active: Vec::new(),
            cursor: 0,
            visible: false,
            focused: false,
            theme: Theme::default(),
            supported_actions: vec![
                Action::MoveUp,
                Action::MoveDown,
                Action::Confirm,
                Action::Cancel,
            ],
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Open the overlay; a menu with no registered filters stays closed.
    pub fn open(&mut self) {
        if !self.controller.is_empty() {
            self.visible = true;
            self.cursor = 0;
        }
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Names of the currently active filters, in activation order.
    pub fn active(&self) -> &[String] {
        &self.active
    }

    fn toggle_at_cursor(&mut self) -> Option<bool> {
        let name = self.controller.names().get(self.cursor)?.to_string();
        self.controller.toggle(&name, &mut self.active)
    }
}

impl Component for FilterMenu {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        if !self.visible {
            return Ok(false);
        }
        match action {
            Action::MoveUp => {
                self.cursor = self.cursor.saturating_sub(1);
                Ok(true)
            }
            Action::MoveDown => {
                if self.cursor + 1 < self.controller.names().len() {
                    self.cursor += 1;
                }
                Ok(true)
            }
            Action::Confirm => {
                self.toggle_at_cursor();
                Ok(true)
            }
            Action::Cancel => {
                self.close();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }
        let lines: Vec<Line> = self
            .controller
            .names()
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let on = self.active.iter().any(|a| a == name);
                let mark = if on { "[x]" } else { "[ ]" };
                let style = if i == self.cursor {
                    self.theme.selected_style()
                } else {
                    self.theme.normal_style()
                };
                Line::from(Span::styled(format!("{mark} {name}"), style))
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style())
            .title("Filters");
        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn supported_actions(&self) -> &[Action] {
        &self.supported_actions
    }

    fn name(&self) -> &str {
        "filter_menu"
    }
}

impl Focusable for FilterMenu {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
