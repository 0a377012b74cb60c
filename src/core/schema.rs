//! Declarative per-column configuration: visibility, widths, display names,
//! render strategies, and row-level decoration and actions.

use crate::core::cell::{CellContent, fallback_cell};
use crate::core::record::Record;
use serde_json::Value;
use std::fmt;

use super::GridError;

/// Custom cell renderer: (value, full record, row index) to content.
pub type CellRenderFn = Box<dyn Fn(Option<&Value>, &Record, usize) -> CellContent>;

/// Row decoration: (record, row index) to styling and navigation intent.
pub type RowDecorFn = Box<dyn Fn(&Record, usize) -> RowDecor>;

/// Labelled row actions: (record, row index) to the menu entries for that row.
pub type RowActionsFn = Box<dyn Fn(&Record, usize) -> Vec<RowAction>>;

/// Inline custom action: (record, row index) to that row's extra menu entry,
/// or `None` to suppress it for the row.
pub type CustomActionFn = Box<dyn Fn(&Record, usize) -> Option<RowAction>>;

/// Callback invoked when a row action is chosen.
pub type RowActionCallback = Box<dyn Fn(&Record, usize)>;

/// Semantic tone for a decorated row; the theme maps tones to styles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowTone {
    #[default]
    Normal,
    Highlight,
    Success,
    Danger,
}

/// Result of the row-level render wrapper: conditional styling and an
/// optional navigation target the front-end fires on activation.
#[derive(Default)]
pub struct RowDecor {
    pub tone: RowTone,
    pub nav_target: Option<String>,
}

/// One entry in a row's labelled action menu. An entry whose callback is
/// `None` is suppressed entirely rather than rendered disabled.
pub struct RowAction {
    pub label: String,
    pub on_select: Option<RowActionCallback>,
}

impl RowAction {
    pub fn new(label: impl Into<String>, on_select: RowActionCallback) -> Self {
        Self { label: label.into(), on_select: Some(on_select) }
    }

    /// The "label: false" form of the source schema: named but suppressed.
    pub fn suppressed(label: impl Into<String>) -> Self {
        Self { label: label.into(), on_select: None }
    }
}

/// Directives for a single column.
#[derive(Default)]
pub struct ColumnSpec {
    /// Excluded from rendering and from column-order bookkeeping.
    pub hidden: bool,
    /// Fixed width in layout units; disables user resize.
    pub inline: Option<u16>,
    /// Display name override.
    pub name: Option<String>,
    /// Suppress the "None" placeholder for absent values.
    pub allow_null: bool,
    /// Custom cell renderer; absent columns fall back to type-directed rules.
    pub render: Option<CellRenderFn>,
}

impl fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("hidden", &self.hidden)
            .field("inline", &self.inline)
            .field("name", &self.name)
            .field("allow_null", &self.allow_null)
            .field("render", &self.render.is_some())
            .finish()
    }
}

/// Table-wide directives (the reserved `__root` key of the source schema).
#[derive(Default)]
pub struct RootSpec {
    /// Explicit ordered list of column keys. Replaced wholesale on reorder.
    pub columns_order: Option<Vec<String>>,
    /// Row wrapper applied around every rendered row.
    pub render: Option<RowDecorFn>,
    /// Labelled action menu per row.
    pub actions: Option<RowActionsFn>,
    /// Independent inline action affordances, each suppressible per row.
    pub custom_actions: Vec<CustomActionFn>,
}

/// Schema for one table: ordered column directives plus root directives.
///
/// `revision` increments on any structural change (visibility, order) so the
/// column layout store knows to rebuild.
#[derive(Default)]
pub struct TableSchema {
    columns: Vec<(String, ColumnSpec)>,
    pub root: RootSpec,
    revision: u64,
}

impl TableSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Insert or replace the directives for a column.
    pub fn set_column(&mut self, key: impl Into<String>, spec: ColumnSpec) -> &mut Self {
        let key = key.into();
        if let Some(entry) = self.columns.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = spec;
        } else {
            self.columns.push((key, spec));
        }
        self.revision += 1;
        self
    }

    pub fn column(&self, key: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|(k, _)| k == key).map(|(_, s)| s)
    }

    pub fn is_hidden(&self, key: &str) -> bool {
        self.column(key).map(|s| s.hidden).unwrap_or(false)
    }

    /// Soft-hide a column: the data is retained and the hide is undoable.
    pub fn hide_column(&mut self, key: &str) {
        self.set_hidden(key, true);
    }

    pub fn show_column(&mut self, key: &str) {
        self.set_hidden(key, false);
    }

    fn set_hidden(&mut self, key: &str, hidden: bool) {
        if let Some(entry) = self.columns.iter_mut().find(|(k, _)| k == key) {
            entry.1.hidden = hidden;
        } else {
            self.columns.push((key.to_string(), ColumnSpec { hidden, ..Default::default() }));
        }
        self.revision += 1;
    }

    /// Display label for a column: the `name` override if set, otherwise the
    /// key, humanized from camelCase/snake_case when `humanize` is on.
    pub fn display_name(&self, key: &str, humanize: bool) -> String {
        if let Some(name) = self.column(key).and_then(|s| s.name.clone()) {
            return name;
        }
        if humanize { humanize_key(key) } else { key.to_string() }
    }

    /// Visible columns in display order: the explicit `columns_order` if set,
    /// otherwise the first record's keys followed by schema-only columns, all
    /// minus hidden ones.
    pub fn visible_columns(&self, first_keys: &[String]) -> Vec<String> {
        let mut ordered: Vec<String> = match &self.root.columns_order {
            Some(order) => order.clone(),
            None => first_keys.to_vec(),
        };
        for (key, _) in &self.columns {
            if !ordered.contains(key) && !first_keys.contains(key) {
                ordered.push(key.clone());
            }
        }
        ordered.retain(|key| !self.is_hidden(key));
        ordered
    }

    /// Replace the explicit column order outright.
    pub fn set_columns_order(&mut self, order: Vec<String>) {
        self.root.columns_order = Some(order);
        self.revision += 1;
    }

    /// Complete a reorder gesture: move the visible column at `from` to `to`
    /// and replace `columns_order` with the new sequence. Returns the new
    /// order, plus whether a full column order was already in effect (in
    /// which case the caller also restructures the records to match).
    pub fn reorder_columns(
        &mut self,
        visible: &[String],
        from: usize,
        to: usize,
    ) -> Result<(Vec<String>, bool), GridError> {
        if from >= visible.len() || to >= visible.len() {
            return Err(GridError::ColumnOutOfRange { index: from.max(to), len: visible.len() });
        }
        let had_full_order = self.root.columns_order.is_some();
        let order = move_column(visible, from, to);
        self.root.columns_order = Some(order.clone());
        self.revision += 1;
        Ok((order, had_full_order))
    }

    /// Rendered content for one cell: the column's custom renderer if any,
    /// otherwise the generic fallback.
    pub fn cell_content(&self, key: &str, record: &Record, index: usize) -> CellContent {
        let value = record.get(key);
        match self.column(key) {
            Some(spec) => match &spec.render {
                Some(render) => render(value, record, index),
                None => fallback_cell(value, spec.allow_null),
            },
            None => fallback_cell(value, false),
        }
    }

    /// Row decoration from the root wrapper, defaulting to an undecorated row.
    pub fn row_decor(&self, record: &Record, index: usize) -> RowDecor {
        match &self.root.render {
            Some(render) => render(record, index),
            None => RowDecor::default(),
        }
    }

    /// Menu entries for a row, with suppressed entries already filtered out.
    pub fn row_actions(&self, record: &Record, index: usize) -> Vec<RowAction> {
        match &self.root.actions {
            Some(actions) => actions(record, index)
                .into_iter()
                .filter(|a| a.on_select.is_some())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Extra menu entries for a row from the custom action hooks, suppressed
    /// entries excluded.
    pub fn custom_actions(&self, record: &Record, index: usize) -> Vec<RowAction> {
        self.root
            .custom_actions
            .iter()
            .filter_map(|f| f(record, index))
            .filter(|a| a.on_select.is_some())
            .collect()
    }

    /// Whether any action affordance renders for this row.
    pub fn has_row_affordance(&self, record: &Record, index: usize) -> bool {
        !self.row_actions(record, index).is_empty()
            || !self.custom_actions(record, index).is_empty()
    }
}

/// Immutable single-element move: a new order with the element at `from`
/// placed at `to` and every other element's relative order preserved.
pub fn move_column(order: &[String], from: usize, to: usize) -> Vec<String> {
    let mut next = order.to_vec();
    let item = next.remove(from);
    next.insert(to, item);
    next
}

/// "firstName" -> "First Name", "quiz_score" -> "Quiz Score".
pub fn humanize_key(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    for ch in key.chars() {
        if ch == '_' || ch == '-' || ch == ' ' {
            if !current.is_empty() {
                words.push(current.clone());
                current.clear();
            }
        } else if ch.is_uppercase() && !current.is_empty() {
            words.push(current.clone());
            current.clear();
            current.push(ch);
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
