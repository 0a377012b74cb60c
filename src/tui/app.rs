use crate::tui::components::{FilterMenu, RecordTable, SearchBar};
use crate::tui::{Action, ActionCategory, Component, Focusable, KeyBindings, Theme};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Application state
///
/// Owns the console's components, routes key events to whichever has focus,
/// and draws the overall layout.
pub struct App {
    table: RecordTable,
    search: SearchBar,
    filters: FilterMenu,

    keybindings: KeyBindings,
    theme: Theme,

    help_visible: bool,
    should_quit: bool,
}

impl App {
    pub fn new(table: RecordTable, search: SearchBar, filters: FilterMenu) -> Self {
        let mut table = table;
        table.set_focused(true);
        Self {
            table,
            search,
            filters,
            keybindings: KeyBindings::default(),
            theme: Theme::default(),
            help_visible: false,
            should_quit: false,
        }
    }

    pub fn with_keybindings(mut self, keybindings: KeyBindings) -> Self {
        self.keybindings = keybindings;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut RecordTable {
        &mut self.table
    }

    pub fn search_mut(&mut self) -> &mut SearchBar {
        &mut self.search
    }

    /// Handle a key event
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // Only handle key press events, ignore release/repeat
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // The focused search bar takes raw character input before any
        // keybinding translation; otherwise typing "q" would quit.
        if self.search.is_focused() && !self.search.options_open() {
            match key.code {
                KeyCode::Char(c)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    self.search.insert_char(c);
                    return Ok(());
                }
                KeyCode::Backspace => {
                    self.search.backspace();
                    return Ok(());
                }
                KeyCode::Esc => {
                    self.search.clear();
                    self.focus_table();
                    return Ok(());
                }
                _ => {}
            }
        }

        if let Some(action) = self.keybindings.get_action(&key) {
            self.handle_action(action)?;
        }
        Ok(())
    }

    /// Handle an action
    fn handle_action(&mut self, action: Action) -> Result<()> {
        // App-level actions first
        match action {
            Action::Quit => {
                self.should_quit = true;
                return Ok(());
            }
            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
                return Ok(());
            }
            Action::Search => {
                self.focus_search();
                return Ok(());
            }
            Action::Filter => {
                self.filters.open();
                return Ok(());
            }
            _ => {}
        }

        if self.help_visible {
            if action == Action::Cancel {
                self.help_visible = false;
            }
            return Ok(());
        }

        // Overlays and focused components get the action before the table.
        if self.filters.is_visible() && self.filters.handle_action(action)? {
            return Ok(());
        }
        if self.search.is_focused() {
            if self.search.handle_action(action)? {
                return Ok(());
            }
            if action == Action::Cancel || action == Action::Confirm {
                self.focus_table();
                return Ok(());
            }
        }

        self.table.handle_action(action)?;
        Ok(())
    }

    fn focus_search(&mut self) {
        self.search.set_focused(true);
        self.table.set_focused(false);
    }

    fn focus_table(&mut self) {
        self.search.set_focused(false);
        self.table.set_focused(true);
    }

    /// Per-tick update: debounce polling and layout sync.
    pub fn update(&mut self) -> Result<()> {
        self.search.update()?;
        self.table.update()?;
        Ok(())
    }

    /// Render the application
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Fill(1)])
            .split(frame.area());

        self.search.render(frame, chunks[0]);
        self.table.render(frame, chunks[1]);

        if self.filters.is_visible() {
            let area = centered_rect(40, 40, frame.area());
            self.filters.render(frame, area);
        }
        if self.help_visible {
            self.render_help(frame);
        }
    }

    fn render_help(&self, frame: &mut Frame) {
        let area = centered_rect(60, 70, frame.area());
        let mut lines = Vec::new();

        for category in [
            ActionCategory::Navigation,
            ActionCategory::Selection,
            ActionCategory::Pagination,
            ActionCategory::Columns,
            ActionCategory::DataOps,
            ActionCategory::View,
            ActionCategory::Application,
        ] {
            lines.push(Line::from(Span::styled(
                category.to_string(),
                self.theme.header_style(),
            )));
            for action in Action::all().into_iter().filter(|a| a.category() == category) {
                let keys = self.keybindings.get_keys_for_action(action).join(", ");
                if keys.is_empty() {
                    continue;
                }
                lines.push(Line::from(vec![
                    Span::styled(format!("  {keys:<16}"), self.theme.info_style()),
                    Span::styled(action.description(), self.theme.normal_style()),
                ]));
            }
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style())
            .title("Help (Esc to close)");
        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Centered sub-rectangle taking `percent_x` by `percent_y` of `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
