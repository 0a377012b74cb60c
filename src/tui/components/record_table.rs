//! The record table: schema-driven rows, header gestures, selection,
//! pagination, and the loading/error/empty/populated panels.

use crate::core::{
    CellContent, ColumnLayout, MonoMeasure, PageDir, PageInfo, Paginator, Record, RecordSet,
    SelectionManager, TablePhase, TableSchema, table_phase,
};
use crate::tui::action::Action;
use crate::tui::component::{Component, Focusable};
use crate::tui::components::header::{HeaderMode, HeaderState, RESIZE_STEP};
use crate::tui::components::pagination_bar::PaginationBar;
use crate::tui::theme::Theme;
use color_eyre::Result;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use std::collections::BTreeMap;

/// Default copy for the empty panel.
pub const EMPTY_COPY: &str = "Table is empty";

/// Grid cells used by the selection checkbox column.
const CHECKBOX_WIDTH: u16 = 4;
/// Grid cells used by the row action affordance column.
const AFFORDANCE_WIDTH: u16 = 3;

/// Schema-driven table over an externally fetched record collection.
///
/// The caller owns fetching: it marks the set loading, delivers pages (rows
/// plus pagination metadata), and reads back page and navigation requests
/// the table queues in response to user input.
pub struct RecordTable {
    schema: TableSchema,
    records: RecordSet,
    selection: SelectionManager,
    paginator: Paginator,
    layout: ColumnLayout,
    measure: MonoMeasure,
    header: HeaderState,
    theme: Theme,

    title: String,
    empty_copy: String,
    /// Humanize camelCase/snake_case keys into header labels.
    humanize: bool,
    /// Caller-supplied error; shown over any load-state error.
    error: Option<String>,

    /// Route queued as a navigation request when the user creates a record.
    create_route: Option<String>,
    on_export: Option<Box<dyn FnMut()>>,
    toolbar_labels: Vec<String>,
    /// Drill-down breadcrumb: label plus the caller's reset.
    breadcrumb: Option<(String, Box<dyn FnMut()>)>,
    max_height: Option<u16>,
    /// Cursor into the open row action menu, if any.
    action_menu: Option<usize>,

    cursor: usize,
    offset: usize,
    viewport_rows: usize,
    header_focused: bool,
    focused: bool,

    query: BTreeMap<String, String>,
    page_request: Option<u64>,
    nav_request: Option<String>,

    supported_actions: Vec<Action>,
}

impl RecordTable {
    pub fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            records: RecordSet::new(),
            selection: SelectionManager::new(),
            paginator: Paginator::default(),
            layout: ColumnLayout::new(),
            measure: MonoMeasure::default(),
            header: HeaderState::new(),
            theme: Theme::default(),
            title: String::new(),
            empty_copy: EMPTY_COPY.to_string(),
            humanize: true,
            error: None,
            create_route: None,
            on_export: None,
            toolbar_labels: Vec::new(),
            breadcrumb: None,
            max_height: None,
            action_menu: None,
            cursor: 0,
            offset: 0,
            viewport_rows: 20,
            header_focused: false,
            focused: false,
            query: BTreeMap::new(),
            page_request: None,
            nav_request: None,
            supported_actions: vec![
                Action::MoveUp,
                Action::MoveDown,
                Action::PageUp,
                Action::PageDown,
                Action::GoToTop,
                Action::GoToBottom,
                Action::ToggleSelect,
                Action::SelectAll,
                Action::ClearSelection,
                Action::NextPage,
                Action::PrevPage,
                Action::FocusHeader,
                Action::ColumnLeft,
                Action::ColumnRight,
                Action::GrabColumn,
                Action::DropColumn,
                Action::WidenColumn,
                Action::NarrowColumn,
                Action::HideColumn,
                Action::ShowAllColumns,
                Action::Create,
                Action::Export,
                Action::OpenActions,
                Action::Refresh,
                Action::Confirm,
                Action::Cancel,
            ],
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_empty_copy(mut self, copy: impl Into<String>) -> Self {
        self.empty_copy = copy.into();
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_selection(mut self, selection: SelectionManager) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_humanize(mut self, humanize: bool) -> Self {
        self.humanize = humanize;
        self
    }

    /// Show the Create button; activating it queues `route` as a navigation
    /// request.
    pub fn with_create_route(mut self, route: impl Into<String>) -> Self {
        self.create_route = Some(route.into());
        self
    }

    pub fn with_export(mut self, on_export: Box<dyn FnMut()>) -> Self {
        self.on_export = Some(on_export);
        self
    }

    /// Extra caller-defined toolbar labels, rendered after the built-ins.
    pub fn with_toolbar_label(mut self, label: impl Into<String>) -> Self {
        self.toolbar_labels.push(label.into());
        self
    }

    /// Drill-down breadcrumb shown before the title. Escape in the body
    /// invokes `reset` and clears it.
    pub fn set_breadcrumb(&mut self, label: impl Into<String>, reset: Box<dyn FnMut()>) {
        self.breadcrumb = Some((label.into(), reset));
    }

    pub fn with_max_height(mut self, max_height: u16) -> Self {
        self.max_height = Some(max_height);
        self
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn schema_mut(&mut self) -> &mut TableSchema {
        &mut self.schema
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionManager {
        &mut self.selection
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// The query map the paginator writes page targets into. The caller
    /// forwards it to its fetch layer.
    pub fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn header_focused(&self) -> bool {
        self.header_focused
    }

    /// Display phase derived from the record set, pagination, and error.
    pub fn phase(&self) -> TablePhase {
        table_phase(&self.records, self.paginator.loading(), self.error.as_deref())
    }

    pub fn visible_columns(&self) -> Vec<String> {
        self.schema.visible_columns(&self.records.first_keys())
    }

    /// Mark a fetch as in flight; the table shows the loading panel until a
    /// page or an error lands.
    pub fn begin_loading(&mut self) {
        self.records.set_loading();
    }

    /// Deliver a fetched page. Clears the pagination loading flag, replaces
    /// the pagination metadata, and drops the selection; the snapshots refer
    /// to rows that are no longer on screen.
    pub fn deliver_page(&mut self, rows: Vec<Record>, info: Option<PageInfo>) {
        self.records.set_records(rows);
        self.paginator.set_info(info);
        self.paginator.data_ready();
        self.selection.remove_select_all();
        self.error = None;
        self.clamp_cursor();
    }

    /// Record a failed fetch.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.records.set_error(message);
        self.paginator.data_ready();
    }

    /// Caller-level error shown instead of the table body.
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Page number the user navigated to, if any. Consuming it is how the
    /// caller learns it should fetch.
    pub fn take_page_request(&mut self) -> Option<u64> {
        self.page_request.take()
    }

    /// Navigation target of an activated row, if any.
    pub fn take_nav_request(&mut self) -> Option<String> {
        self.nav_request.take()
    }

    fn clamp_cursor(&mut self) {
        let len = self.records.len();
        if len == 0 {
            self.cursor = 0;
            self.offset = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    fn ensure_cursor_visible(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.viewport_rows > 0 && self.cursor >= self.offset + self.viewport_rows {
            self.offset = self.cursor + 1 - self.viewport_rows;
        }
    }

    fn move_cursor(&mut self, delta: i64) {
        let len = self.records.len();
        if len == 0 {
            return;
        }
        let next = (self.cursor as i64 + delta).clamp(0, len as i64 - 1);
        self.cursor = next as usize;
        self.ensure_cursor_visible();
    }

    fn toggle_select_at_cursor(&mut self) {
        if let Some(record) = self.records.records().get(self.cursor) {
            let record = record.clone();
            self.selection.toggle(&record, self.cursor);
        }
    }

    fn toggle_select_all(&mut self) {
        if self.selection.all_selected() {
            self.selection.remove_select_all();
        } else {
            self.selection.select_all(self.records.records());
        }
    }

    fn navigate(&mut self, dir: PageDir) {
        if let Some(page) = self.paginator.navigate(dir, &mut self.query) {
            self.page_request = Some(page);
        }
    }

    fn activate_row(&mut self) {
        if let Some(record) = self.records.records().get(self.cursor) {
            let decor = self.schema.row_decor(record, self.cursor);
            if let Some(target) = decor.nav_target {
                self.nav_request = Some(target);
            }
        }
    }

    fn show_all_columns(&mut self) {
        let hidden: Vec<String> = self
            .records
            .first_keys()
            .into_iter()
            .filter(|k| self.schema.is_hidden(k))
            .collect();
        for key in hidden {
            self.schema.show_column(&key);
        }
    }

    fn handle_header_action(&mut self, action: Action) -> Result<bool> {
        let visible_len = self.visible_columns().len();
        match action {
            Action::ColumnLeft => {
                self.header.move_left();
                Ok(true)
            }
            Action::ColumnRight => {
                self.header.move_right(visible_len);
                Ok(true)
            }
            Action::GrabColumn => {
                self.header.grab(visible_len);
                Ok(true)
            }
            Action::DropColumn | Action::Confirm => {
                self.header.drop(&mut self.schema, &mut self.records)?;
                Ok(true)
            }
            Action::WidenColumn => {
                self.header.resize_by(
                    &self.schema,
                    &mut self.layout,
                    &self.records,
                    RESIZE_STEP as i32,
                );
                Ok(true)
            }
            Action::NarrowColumn => {
                self.header.resize_by(
                    &self.schema,
                    &mut self.layout,
                    &self.records,
                    -(RESIZE_STEP as i32),
                );
                Ok(true)
            }
            Action::HideColumn => {
                self.header.hide(&mut self.schema, &self.records);
                Ok(true)
            }
            Action::ShowAllColumns => {
                self.show_all_columns();
                Ok(true)
            }
            Action::SelectAll | Action::ToggleSelect => {
                self.toggle_select_all();
                Ok(true)
            }
            Action::Cancel => {
                if self.header.mode() == HeaderMode::Normal {
                    self.header_focused = false;
                } else {
                    self.header.cancel();
                }
                Ok(true)
            }
            Action::FocusHeader => {
                self.header_focused = false;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn handle_body_action(&mut self, action: Action) -> Result<bool> {
        match action {
            Action::MoveUp => {
                self.move_cursor(-1);
                Ok(true)
            }
            Action::MoveDown => {
                self.move_cursor(1);
                Ok(true)
            }
            Action::PageUp => {
                self.move_cursor(-(self.viewport_rows as i64));
                Ok(true)
            }
            Action::PageDown => {
                self.move_cursor(self.viewport_rows as i64);
                Ok(true)
            }
            Action::GoToTop => {
                self.move_cursor(i64::MIN / 2);
                Ok(true)
            }
            Action::GoToBottom => {
                self.move_cursor(i64::MAX / 2);
                Ok(true)
            }
            Action::ToggleSelect => {
                self.toggle_select_at_cursor();
                Ok(true)
            }
            Action::SelectAll => {
                self.toggle_select_all();
                Ok(true)
            }
            Action::ClearSelection => {
                self.selection.remove_select_all();
                Ok(true)
            }
            Action::NextPage => {
                self.navigate(PageDir::Next);
                Ok(true)
            }
            Action::PrevPage => {
                self.navigate(PageDir::Prev);
                Ok(true)
            }
            Action::FocusHeader => {
                self.header_focused = true;
                self.header.clamp(self.visible_columns().len());
                Ok(true)
            }
            Action::Confirm => {
                self.activate_row();
                Ok(true)
            }
            Action::Create => {
                if let Some(route) = &self.create_route {
                    self.nav_request = Some(route.clone());
                }
                Ok(self.create_route.is_some())
            }
            Action::Export => {
                if let Some(export) = &mut self.on_export {
                    export();
                    return Ok(true);
                }
                Ok(false)
            }
            Action::OpenActions => {
                self.open_action_menu();
                Ok(self.action_menu.is_some())
            }
            Action::Refresh => {
                if let Some(page) = self.paginator.refresh(&mut self.query) {
                    self.page_request = Some(page);
                    return Ok(true);
                }
                Ok(false)
            }
            Action::Cancel => {
                if let Some((_, mut reset)) = self.breadcrumb.take() {
                    reset();
                    return Ok(true);
                }
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    /// Menu entries for the cursor row: the labelled actions followed by the
    /// per-row custom actions.
    fn cursor_row_actions(&self) -> Vec<crate::core::RowAction> {
        match self.records.records().get(self.cursor) {
            Some(record) => {
                let mut actions = self.schema.row_actions(record, self.cursor);
                actions.extend(self.schema.custom_actions(record, self.cursor));
                actions
            }
            None => Vec::new(),
        }
    }

    fn open_action_menu(&mut self) {
        if !self.cursor_row_actions().is_empty() {
            self.action_menu = Some(0);
        }
    }

    fn handle_menu_action(&mut self, action: Action) -> Result<bool> {
        let Some(menu_cursor) = self.action_menu else {
            return Ok(false);
        };
        let actions = self.cursor_row_actions();
        match action {
            Action::MoveUp => {
                self.action_menu = Some(menu_cursor.saturating_sub(1));
                Ok(true)
            }
            Action::MoveDown => {
                if menu_cursor + 1 < actions.len() {
                    self.action_menu = Some(menu_cursor + 1);
                }
                Ok(true)
            }
            Action::Confirm => {
                self.action_menu = None;
                if let (Some(entry), Some(record)) =
                    (actions.get(menu_cursor), self.records.records().get(self.cursor))
                {
                    if let Some(on_select) = &entry.on_select {
                        on_select(record, self.cursor);
                    }
                }
                Ok(true)
            }
            Action::Cancel | Action::OpenActions => {
                self.action_menu = None;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn cell_style(&self, content: &CellContent, base: Style) -> Style {
        match content {
            CellContent::Placeholder => self.theme.placeholder_style(),
            CellContent::Glyph(true) => base.patch(self.theme.success_style()),
            CellContent::Glyph(false) => base.patch(self.theme.error_style()),
            _ => base,
        }
    }

    fn column_constraints(&self, columns: &[String]) -> Vec<Constraint> {
        let advance = self.measure.char_advance.max(1);
        let mut constraints = Vec::with_capacity(columns.len() + 2);
        constraints.push(Constraint::Length(CHECKBOX_WIDTH));
        for key in columns {
            let units = self.layout.width(key).unwrap_or(crate::core::MIN_WIDTH);
            constraints.push(Constraint::Length(units.div_ceil(advance)));
        }
        constraints.push(Constraint::Length(AFFORDANCE_WIDTH));
        constraints
    }

    fn header_row(&self, columns: &[String]) -> Row<'static> {
        let select_all_mark = if self.selection.all_selected() { "[x]" } else { "[ ]" };
        let mut cells = vec![Cell::from(select_all_mark).style(self.theme.header_style())];

        for (i, key) in columns.iter().enumerate() {
            let label = self.schema.display_name(key, self.humanize);
            let mut style = self.theme.header_style();
            if self.header_focused && i == self.header.cursor() {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let text = match self.header.mode() {
                HeaderMode::Grabbed { from } if from == i => format!("◆ {label}"),
                _ => label,
            };
            cells.push(Cell::from(text).style(style));
        }
        cells.push(Cell::from(""));
        Row::new(cells).height(1)
    }

    fn body_rows(&self, columns: &[String]) -> Vec<Row<'static>> {
        let visible = self
            .records
            .records()
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(self.viewport_rows.max(1));

        visible
            .map(|(index, record)| {
                let decor = self.schema.row_decor(record, index);
                let mut base = if index % 2 == 1 {
                    self.theme.alt_row_style()
                } else {
                    self.theme.normal_style()
                };
                if let Some(tone) = self.theme.tone_style(decor.tone) {
                    base = base.patch(tone);
                }
                if self.focused && !self.header_focused && index == self.cursor {
                    base = self.theme.selected_style();
                }

                let mark = if !self.selection.is_selectable(record, index) {
                    " - "
                } else if self.selection.is_selected(record) {
                    "[x]"
                } else {
                    "[ ]"
                };
                let mut cells = vec![Cell::from(mark).style(base)];

                for key in columns {
                    let content = self.schema.cell_content(key, record, index);
                    let style = self.cell_style(&content, base);
                    cells.push(Cell::from(content.display().to_string()).style(style));
                }

                let affordance = if self.schema.has_row_affordance(record, index) {
                    "⋯"
                } else {
                    ""
                };
                cells.push(Cell::from(affordance).style(base));
                Row::new(cells).height(1)
            })
            .collect()
    }

    fn render_toolbar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        if let Some((label, _)) = &self.breadcrumb {
            spans.push(Span::styled(format!("◂ {label}  "), self.theme.info_style()));
        }
        spans.push(Span::styled(self.title.clone(), self.theme.header_style()));

        let selected = self.selection.selected_count();
        if selected > 0 {
            spans.push(Span::styled(
                format!("  {selected} selected"),
                self.theme.info_style(),
            ));
        }
        if self.create_route.is_some() {
            spans.push(Span::styled("  + Create", self.theme.success_style()));
        }
        if self.on_export.is_some() {
            spans.push(Span::styled("  Export", self.theme.info_style()));
        }
        for label in &self.toolbar_labels {
            spans.push(Span::styled(format!("  {label}"), self.theme.normal_style()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_action_menu(&self, frame: &mut Frame, area: Rect) {
        let Some(menu_cursor) = self.action_menu else {
            return;
        };
        let actions = self.cursor_row_actions();
        if actions.is_empty() {
            return;
        }
        let width = actions
            .iter()
            .map(|a| a.label.chars().count() as u16)
            .max()
            .unwrap_or(0)
            + 4;
        let height = actions.len() as u16 + 2;
        let menu_area = Rect {
            x: area.x + area.width.saturating_sub(width + 2),
            y: area.y + 1,
            width: width.min(area.width),
            height: height.min(area.height),
        };

        let lines: Vec<Line> = actions
            .iter()
            .enumerate()
            .map(|(i, action)| {
                let style = if i == menu_cursor {
                    self.theme.selected_style()
                } else {
                    self.theme.normal_style()
                };
                Line::from(Span::styled(action.label.clone(), style))
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style())
            .title("Actions");
        frame.render_widget(ratatui::widgets::Clear, menu_area);
        frame.render_widget(Paragraph::new(lines).block(block), menu_area);
    }

    fn render_panel(&self, frame: &mut Frame, area: Rect, text: &str, style: Style) {
        let line = Line::from(Span::styled(text.to_string(), style));
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .split(area);
        frame.render_widget(Paragraph::new(line).centered(), vertical[1]);
    }

    fn render_body(&mut self, frame: &mut Frame, area: Rect) {
        self.viewport_rows = area.height.saturating_sub(1) as usize;
        self.ensure_cursor_visible();

        let columns = self.visible_columns();
        let constraints = self.column_constraints(&columns);
        let table = Table::new(self.body_rows(&columns), constraints)
            .header(self.header_row(&columns))
            .column_spacing(1);
        frame.render_widget(table, area);
    }
}

impl Component for RecordTable {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        if self.action_menu.is_some() {
            self.handle_menu_action(action)
        } else if self.header_focused {
            self.handle_header_action(action)
        } else {
            self.handle_body_action(action)
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let area = match self.max_height {
            Some(max) => Rect { height: area.height.min(max), ..area },
            None => area,
        };
        let border_style = if self.focused {
            self.theme.focused_border_style()
        } else {
            self.theme.border_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.title.clone());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(1),
            ])
            .split(inner);

        self.render_toolbar(frame, chunks[0]);

        match self.phase() {
            TablePhase::Loading => {
                self.render_panel(frame, chunks[1], "Loading…", self.theme.info_style());
            }
            TablePhase::Error => {
                let message = self
                    .error
                    .clone()
                    .or_else(|| match self.records.state() {
                        crate::core::LoadState::Error(m) => Some(m.clone()),
                        _ => None,
                    })
                    .unwrap_or_else(|| "Something went wrong".to_string());
                self.render_panel(frame, chunks[1], &message, self.theme.error_style());
            }
            TablePhase::Empty => {
                let copy = self.empty_copy.clone();
                self.render_panel(frame, chunks[1], &copy, self.theme.placeholder_style());
            }
            TablePhase::Populated => {
                self.render_body(frame, chunks[1]);
            }
        }

        PaginationBar::render(frame, chunks[2], &self.paginator, &self.theme);
        self.render_action_menu(frame, inner);
    }

    fn supported_actions(&self) -> &[Action] {
        &self.supported_actions
    }

    fn name(&self) -> &str {
        "record_table"
    }

    /// Rebuild the column layout when the schema or data changed.
    fn update(&mut self) -> Result<()> {
        if self.layout.sync(&self.schema, &self.records, self.humanize, &self.measure) {
            self.header.clamp(self.visible_columns().len());
            self.clamp_cursor();
        }
        Ok(())
    }
}

impl Focusable for RecordTable {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
