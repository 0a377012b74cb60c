//! Header row interaction: column cursor, keyboard reorder, resize, and hide.

use crate::core::{ColumnLayout, GridError, RecordSet, TableSchema};

/// Layout units added or removed per resize keypress (two characters at the
/// default monospace advance).
pub const RESIZE_STEP: u16 = 16;

/// What the header is currently doing with the focused column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMode {
    #[default]
    Normal,
    /// A column was grabbed at `from`; the cursor marks the drop target.
    Grabbed { from: usize },
}

/// Interaction state for the header row.
///
/// Holds only gesture state. The schema owns visibility and order, the
/// column layout owns widths; every gesture resolves into calls on those.
#[derive(Debug, Default)]
pub struct HeaderState {
    cursor: usize,
    mode: HeaderMode,
    /// Set when a resize happens mid-grab; the eventual drop is abandoned.
    resized_during_grab: bool,
}

impl HeaderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn mode(&self) -> HeaderMode {
        self.mode
    }

    /// Keep the cursor inside the visible column range after columns
    /// disappear (hide, data swap).
    pub fn clamp(&mut self, visible_len: usize) {
        if visible_len == 0 {
            self.cursor = 0;
        } else if self.cursor >= visible_len {
            self.cursor = visible_len - 1;
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self, visible_len: usize) {
        if self.cursor + 1 < visible_len {
            self.cursor += 1;
        }
    }

    /// Start a reorder gesture on the focused column. Refused outright when
    /// only one column is visible; there is nothing to reorder.
    pub fn grab(&mut self, visible_len: usize) -> bool {
        if visible_len <= 1 {
            return false;
        }
        self.mode = HeaderMode::Grabbed { from: self.cursor };
        self.resized_during_grab = false;
        true
    }

    /// Abandon any gesture in progress.
    pub fn cancel(&mut self) {
        self.mode = HeaderMode::Normal;
        self.resized_during_grab = false;
    }

    /// Complete a reorder gesture: move the grabbed column to the cursor and
    /// commit the new order to the schema. When a full column order was
    /// already in effect the records are restructured to match it.
    ///
    /// A resize that happened mid-grab abandons the reorder; the gesture was
    /// a width adjustment, not a move.
    pub fn drop(
        &mut self,
        schema: &mut TableSchema,
        records: &mut RecordSet,
    ) -> Result<bool, GridError> {
        let HeaderMode::Grabbed { from } = self.mode else {
            return Ok(false);
        };
        let to = self.cursor;
        let resized = self.resized_during_grab;
        self.cancel();

        if resized || from == to {
            return Ok(false);
        }
        let visible = schema.visible_columns(&records.first_keys());
        let (order, had_full_order) = schema.reorder_columns(&visible, from, to)?;
        if had_full_order {
            records.restructure(&order);
        }
        Ok(true)
    }

    /// Widen or narrow the focused column by [`RESIZE_STEP`] units. Inline
    /// columns are fixed and ignore the gesture.
    pub fn resize_by(
        &mut self,
        schema: &TableSchema,
        layout: &mut ColumnLayout,
        records: &RecordSet,
        delta: i32,
    ) -> Option<u16> {
        let visible = schema.visible_columns(&records.first_keys());
        let key = visible.get(self.cursor)?;
        if schema.column(key).and_then(|s| s.inline).is_some() {
            return None;
        }
        let start = layout.width(key)?;
        if matches!(self.mode, HeaderMode::Grabbed { .. }) {
            self.resized_during_grab = true;
        }
        layout.resize(key, start, delta).ok()
    }

    /// Soft-hide the focused column and clamp the cursor to what remains.
    pub fn hide(&mut self, schema: &mut TableSchema, records: &RecordSet) -> Option<String> {
        let visible = schema.visible_columns(&records.first_keys());
        let key = visible.get(self.cursor)?.clone();
        schema.hide_column(&key);
        self.cancel();
        self.clamp(visible.len().saturating_sub(1));
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MonoMeasure, Record};
    use serde_json::{Value, json};

    fn row(pairs: &[(&str, Value)]) -> Record {
        let mut r = Record::new();
        for (k, v) in pairs {
            r.insert((*k).to_string(), v.clone());
        }
        r
    }

    fn fixture() -> (TableSchema, RecordSet) {
        let schema = TableSchema::new();
        let records = RecordSet::from_records(vec![row(&[
            ("name", json!("Al")),
            ("email", json!("al@example.com")),
            ("score", json!(91)),
        ])]);
        (schema, records)
    }

    #[test]
    fn test_grab_move_drop_reorders() {
        let (mut schema, mut records) = fixture();
        let mut header = HeaderState::new();

        assert!(header.grab(3));
        header.move_right(3);
        header.move_right(3);
        assert!(header.drop(&mut schema, &mut records).unwrap());

        let visible = schema.visible_columns(&records.first_keys());
        assert_eq!(visible, vec!["email", "score", "name"]);
        assert_eq!(header.mode(), HeaderMode::Normal);
    }

    #[test]
    fn test_grab_refused_with_single_column() {
        let mut header = HeaderState::new();
        assert!(!header.grab(1));
        assert_eq!(header.mode(), HeaderMode::Normal);
    }

    #[test]
    fn test_drop_in_place_is_noop() {
        let (mut schema, mut records) = fixture();
        let mut header = HeaderState::new();

        header.grab(3);
        assert!(!header.drop(&mut schema, &mut records).unwrap());
        assert_eq!(
            schema.visible_columns(&records.first_keys()),
            vec!["name", "email", "score"]
        );
    }

    #[test]
    fn test_resize_during_grab_abandons_reorder() {
        let (mut schema, mut records) = fixture();
        let mut layout = ColumnLayout::new();
        layout.rebuild(&schema, &records, false, &MonoMeasure::default());
        let mut header = HeaderState::new();

        header.grab(3);
        header.move_right(3);
        assert!(header.resize_by(&schema, &mut layout, &records, RESIZE_STEP as i32).is_some());
        assert!(!header.drop(&mut schema, &mut records).unwrap());

        // Order unchanged; only the width moved.
        assert_eq!(
            schema.visible_columns(&records.first_keys()),
            vec!["name", "email", "score"]
        );
    }

    #[test]
    fn test_resize_ignores_inline_columns() {
        let (mut schema, records) = fixture();
        schema.set_column(
            "name",
            crate::core::ColumnSpec { inline: Some(90), ..Default::default() },
        );
        let mut layout = ColumnLayout::new();
        layout.rebuild(&schema, &records, false, &MonoMeasure::default());
        let mut header = HeaderState::new();

        assert!(header.resize_by(&schema, &mut layout, &records, 40).is_none());
        assert_eq!(layout.width("name"), Some(90));
    }

    #[test]
    fn test_hide_clamps_cursor() {
        let (mut schema, records) = fixture();
        let mut header = HeaderState::new();
        header.move_right(3);
        header.move_right(3);

        assert_eq!(header.hide(&mut schema, &records).as_deref(), Some("score"));
        let visible = schema.visible_columns(&records.first_keys());
        assert_eq!(visible, vec!["name", "email"]);
        assert!(header.cursor() < visible.len());
    }

    #[test]
    fn test_reorder_restructures_records_when_order_was_explicit() {
        let (mut schema, mut records) = fixture();
        schema.set_columns_order(vec![
            "name".to_string(),
            "email".to_string(),
            "score".to_string(),
        ]);
        let mut header = HeaderState::new();

        header.grab(3);
        header.move_right(3);
        assert!(header.drop(&mut schema, &mut records).unwrap());

        // Record keys now follow the committed order.
        let keys: Vec<&String> = records.records()[0].keys().collect();
        assert_eq!(keys, ["email", "name", "score"]);
    }
}
