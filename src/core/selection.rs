//! Row selection, tracked by record snapshot and row index.
//!
//! Instantiated by the calling screen against the same record collection the
//! table displays; the table only reads it to draw checkboxes and the header
//! select-all toggle.

use crate::core::record::Record;

/// Caller-supplied predicate deciding whether a row may be selected at all,
/// e.g. excluding already-failed rows in a bulk import review.
pub type SelectablePredicate = Box<dyn Fn(&Record, usize) -> bool>;

#[derive(Default)]
pub struct SelectionManager {
    selected: Vec<(usize, Record)>,
    all_selected: bool,
    selectable: Option<SelectablePredicate>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_predicate(predicate: SelectablePredicate) -> Self {
        Self { selectable: Some(predicate), ..Default::default() }
    }

    /// Selected record snapshots in selection order.
    pub fn selected(&self) -> Vec<&Record> {
        self.selected.iter().map(|(_, r)| r).collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Drives the header select-all checkbox. A plain boolean, no tri-state.
    pub fn all_selected(&self) -> bool {
        self.all_selected
    }

    pub fn is_selectable(&self, record: &Record, index: usize) -> bool {
        match &self.selectable {
            Some(predicate) => predicate(record, index),
            None => true,
        }
    }

    pub fn is_selected(&self, record: &Record) -> bool {
        self.selected.iter().any(|(_, r)| r == record)
    }

    /// Select one row, snapshotting the record as it is now.
    pub fn add_selection(&mut self, record: &Record, index: usize) {
        if !self.is_selectable(record, index) {
            return;
        }
        if !self.selected.iter().any(|(i, _)| *i == index) {
            self.selected.push((index, record.clone()));
        }
    }

    /// Deselect the row at `index`; clears the all-selected flag.
    pub fn remove_selection(&mut self, index: usize) {
        self.selected.retain(|(i, _)| *i != index);
        self.all_selected = false;
    }

    /// Select every selectable row and raise the all-selected flag.
    pub fn select_all(&mut self, records: &[Record]) {
        self.selected.clear();
        for (index, record) in records.iter().enumerate() {
            if self.is_selectable(record, index) {
                self.selected.push((index, record.clone()));
            }
        }
        self.all_selected = true;
    }

    /// Clear the selection entirely.
    pub fn remove_select_all(&mut self) {
        self.selected.clear();
        self.all_selected = false;
    }

    /// Convenience for the per-row checkbox: flip selection at `index`.
    pub fn toggle(&mut self, record: &Record, index: usize) {
        if self.selected.iter().any(|(i, _)| *i == index) {
            self.remove_selection(index);
        } else {
            self.add_selection(record, index);
        }
    }
}
