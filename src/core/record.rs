use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single row: an ordered map of column key to value.
///
/// Key order is display order, so serializing a record yields the same
/// column sequence the table shows. Uniqueness of any value is not enforced;
/// callers that need selection to survive mutation assign their own stable
/// identity column.
pub type Record = Map<String, Value>;

/// Load status for a record collection.
///
/// The table never infers fetch completion from collection identity; callers
/// state it explicitly through this enum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum LoadState {
    /// No fetch has been issued yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// Data is current.
    Ready,
    /// The last fetch failed; the message is shown verbatim.
    Error(String),
}

/// Ordered, observable collection of records plus its load status.
///
/// `generation` increments on every data delivery so derived state (column
/// layout) can detect "new data" without comparing contents.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Vec<Record>,
    state: LoadState,
    generation: u64,
}

impl RecordSet {
    /// Empty set in the `Idle` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ready set from existing rows.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            records,
            state: LoadState::Ready,
            generation: 1,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Keys of the first record, in record order. Visible columns are derived
    /// from these plus the schema.
    pub fn first_keys(&self) -> Vec<String> {
        self.records
            .first()
            .map(|r| r.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Mark a fetch as in flight.
    pub fn set_loading(&mut self) {
        self.state = LoadState::Loading;
    }

    /// Record a failed fetch.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state = LoadState::Error(message.into());
    }

    /// Deliver fetched rows, marking the set ready and bumping the generation.
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.state = LoadState::Ready;
        self.generation += 1;
    }

    /// Rebuild every record so its keys follow `order`, with keys not named
    /// in `order` (hidden columns and extras) trailing in their original
    /// relative order. Keeps serialized row shape aligned with display order
    /// after a column reorder.
    pub fn restructure(&mut self, order: &[String]) {
        for record in &mut self.records {
            let mut rebuilt = Map::with_capacity(record.len());
            for key in order {
                if let Some(value) = record.get(key) {
                    rebuilt.insert(key.clone(), value.clone());
                }
            }
            for (key, value) in record.iter() {
                if !rebuilt.contains_key(key) {
                    rebuilt.insert(key.clone(), value.clone());
                }
            }
            *record = rebuilt;
        }
        self.generation += 1;
    }
}

/// Display phase of a table as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum TablePhase {
    Loading,
    Error,
    Empty,
    Populated,
}

/// Derive the table phase from the record set, the pagination loading flag,
/// and the caller-supplied error string.
///
/// Loading wins while a fetch is outstanding; there is no timeout or retry
/// here, so a stuck fetch leaves the table loading until the caller delivers
/// data or an error.
pub fn table_phase(records: &RecordSet, paginating: bool, error: Option<&str>) -> TablePhase {
    if paginating || matches!(records.state(), LoadState::Idle | LoadState::Loading) {
        return TablePhase::Loading;
    }
    if error.is_some() || matches!(records.state(), LoadState::Error(_)) {
        return TablePhase::Error;
    }
    if records.is_empty() {
        TablePhase::Empty
    } else {
        TablePhase::Populated
    }
}
