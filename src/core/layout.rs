//! Per-column width and order state, derived from content and held only for
//! the table's lifetime.

use crate::core::record::RecordSet;
use crate::core::schema::TableSchema;
use std::collections::HashMap;

use super::GridError;

/// Width floor for every resizable column, in layout units.
pub const MIN_WIDTH: u16 = 75;

/// Measures the on-screen width of a piece of text, in layout units.
///
/// The seam between layout math and the rendering surface: the default
/// monospace measurer assumes a fixed per-character advance, a proportional
/// front-end can substitute real font metrics.
pub trait TextMeasure {
    fn width(&self, text: &str) -> u16;
}

/// Fixed-advance measurer for monospace surfaces.
#[derive(Debug, Clone, Copy)]
pub struct MonoMeasure {
    /// Layout units per character.
    pub char_advance: u16,
    /// Horizontal cell padding, both sides combined.
    pub padding: u16,
}

impl MonoMeasure {
    pub const fn new(char_advance: u16, padding: u16) -> Self {
        Self { char_advance, padding }
    }
}

impl Default for MonoMeasure {
    fn default() -> Self {
        Self::new(8, 16)
    }
}

impl TextMeasure for MonoMeasure {
    fn width(&self, text: &str) -> u16 {
        let chars = text.chars().count().min(u16::MAX as usize) as u16;
        chars.saturating_mul(self.char_advance).saturating_add(self.padding)
    }
}

/// Column width store, keyed by column key.
///
/// Rebuilt in full whenever the schema revision or record-set generation
/// changes; never patched incrementally, so stale keys cannot survive a data
/// or schema swap.
#[derive(Debug, Default)]
pub struct ColumnLayout {
    widths: HashMap<String, u16>,
    seen: Option<(u64, u64)>,
}

impl ColumnLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current width for a column, if the layout has been built.
    pub fn width(&self, key: &str) -> Option<u16> {
        self.widths.get(key).copied()
    }

    /// Rebuild if the schema or data changed since the last build.
    /// Returns true when a rebuild happened.
    pub fn sync(
        &mut self,
        schema: &TableSchema,
        records: &RecordSet,
        humanize: bool,
        measure: &dyn TextMeasure,
    ) -> bool {
        let stamp = (schema.revision(), records.generation());
        if self.seen == Some(stamp) {
            return false;
        }
        self.rebuild(schema, records, humanize, measure);
        self.seen = Some(stamp);
        true
    }

    /// Unconditional full rebuild.
    ///
    /// Each visible column is seeded from the measured width of its header
    /// label and every cell value, floored at [`MIN_WIDTH`]. A width the user
    /// set earlier survives only while it still covers the new seed, which
    /// keeps manual widths across refreshes without letting shrunken data
    /// leave an oversized ghost column floor in place.
    pub fn rebuild(
        &mut self,
        schema: &TableSchema,
        records: &RecordSet,
        humanize: bool,
        measure: &dyn TextMeasure,
    ) {
        let first_keys = records.first_keys();
        let columns = schema.visible_columns(&first_keys);
        let mut widths = HashMap::with_capacity(columns.len());

        for key in &columns {
            if let Some(inline) = schema.column(key).and_then(|s| s.inline) {
                widths.insert(key.clone(), inline);
                continue;
            }
            let mut measured = measure.width(&schema.display_name(key, humanize));
            for (index, record) in records.records().iter().enumerate() {
                let content = schema.cell_content(key, record, index);
                measured = measured.max(measure.width(content.display()));
            }
            let seed = measured.max(MIN_WIDTH);
            let width = match self.widths.get(key) {
                Some(&prev) if prev >= seed => prev,
                _ => seed,
            };
            widths.insert(key.clone(), width);
        }
        self.widths = widths;
    }

    /// Apply a resize gesture: `max(75, start_width + delta)`. Returns the
    /// resulting width, or an error for a column the layout does not track.
    /// Inline columns never reach here; the header gates the gesture.
    pub fn resize(&mut self, key: &str, start_width: u16, delta: i32) -> Result<u16, GridError> {
        if !self.widths.contains_key(key) {
            return Err(GridError::UnknownColumn(key.to_string()));
        }
        let next = (start_width as i32 + delta).max(MIN_WIDTH as i32) as u16;
        self.widths.insert(key.to_string(), next);
        Ok(next)
    }

    /// All tracked column keys (testing and diagnostics).
    pub fn keys(&self) -> Vec<&String> {
        self.widths.keys().collect()
    }
}
