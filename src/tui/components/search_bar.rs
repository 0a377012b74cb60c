//! Search input bar wrapping the debounced [`SearchController`].

use crate::services::SearchController;
use crate::tui::action::Action;
use crate::tui::component::{Component, Focusable};
use crate::tui::theme::Theme;
use color_eyre::Result;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Text input that feeds keystrokes into the search controller and polls the
/// debounce deadline on every tick.
pub struct SearchBar {
    controller: SearchController,
    theme: Theme,
    focused: bool,
    options_open: bool,
    option_cursor: usize,
    supported_actions: Vec<Action>,
}

impl SearchBar {
    pub fn new(controller: SearchController) -> Self {
        Self {
            controller,
            theme: Theme::default(),
            focused: false,
            options_open: false,
            option_cursor: 0,
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

    pub fn text(&self) -> &str {
        self.controller.text()
    }

    pub fn options_open(&self) -> bool {
        self.options_open
    }

    /// Append a typed character to the search text.
    pub fn insert_char(&mut self, c: char) {
        let mut text = self.controller.text().to_string();
        text.push(c);
        self.controller.input(text);
    }

    /// Remove the last character. Emptying the input fires the controller's
    /// reset rather than a search.
    pub fn backspace(&mut self) {
        let mut text = self.controller.text().to_string();
        text.pop();
        self.controller.input(text);
    }

    /// Clear the input outright (Escape while focused).
    pub fn clear(&mut self) {
        if !self.controller.text().is_empty() {
            self.controller.input("");
        }
    }

    pub fn open_options(&mut self) {
        if !self.controller.option_names().is_empty() {
            self.options_open = true;
            self.option_cursor = 0;
        }
    }

    fn confirm_option(&mut self) {
        // Trigger options fire and close; field options scope and close.
        self.controller.select_option(self.option_cursor);
        self.options_open = false;
    }
}

impl Component for SearchBar {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        if self.options_open {
            match action {
                Action::MoveUp => {
                    self.option_cursor = self.option_cursor.saturating_sub(1);
                    return Ok(true);
                }
                Action::MoveDown => {
                    let len = self.controller.option_names().len();
                    if self.option_cursor + 1 < len {
                        self.option_cursor += 1;
                    }
                    return Ok(true);
                }
                Action::Confirm => {
                    self.confirm_option();
                    return Ok(true);
                }
                Action::Cancel => {
                    self.options_open = false;
                    return Ok(true);
                }
                _ => return Ok(false),
            }
        }
        match action {
            Action::MoveDown => {
                self.open_options();
                Ok(self.options_open)
            }
            Action::Cancel => {
                self.clear();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            self.theme.focused_border_style()
        } else {
            self.theme.border_style()
        };

        let mut spans = vec![Span::styled(self.controller.text(), self.theme.normal_style())];
        if let Some(field) = self.controller.selected_option() {
            spans.push(Span::styled(
                format!("  [{field}]"),
                self.theme.info_style(),
            ));
        }
        if self.focused {
            spans.push(Span::styled("▏", self.theme.focused_border_style()));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Search");
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);

        if self.options_open {
            self.render_options(frame, area);
        }
    }

    fn supported_actions(&self) -> &[Action] {
        &self.supported_actions
    }

    fn name(&self) -> &str {
        "search_bar"
    }

    /// Fire the pending search once the debounce window elapses.
    fn update(&mut self) -> Result<()> {
        self.controller.poll();
        Ok(())
    }
}

impl SearchBar {
    fn render_options(&self, frame: &mut Frame, anchor: Rect) {
        let names = self.controller.option_names();
        let height = (names.len() as u16 + 2).min(10);
        let area = Rect {
            x: anchor.x,
            y: anchor.y.saturating_add(anchor.height),
            width: anchor.width.min(30),
            height,
        };

        let lines: Vec<Line> = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let style = if i == self.option_cursor {
                    self.theme.selected_style()
                } else {
                    self.theme.normal_style()
                };
                Line::from(Span::styled((*name).to_string(), style))
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style())
            .title("Search by");
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

impl Focusable for SearchBar {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.options_open = false;
        }
    }
}
