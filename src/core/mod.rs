//! Headless table state: records, schema, column layout, selection, and
//! pagination. Nothing here touches the terminal; `crate::tui` renders it.

pub mod cell;
pub mod layout;
pub mod pagination;
pub mod record;
pub mod schema;
pub mod selection;

pub use cell::{CellContent, fallback_cell};
pub use layout::{ColumnLayout, MIN_WIDTH, MonoMeasure, TextMeasure};
pub use pagination::{PAGE_PARAM, PageDir, PageInfo, Paginator};
pub use record::{LoadState, Record, RecordSet, TablePhase, table_phase};
pub use schema::{
    ColumnSpec, RootSpec, RowAction, RowDecor, RowTone, TableSchema, humanize_key, move_column,
};
pub use selection::SelectionManager;

/// Errors from table state operations.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("column index {index} out of range for {len} visible columns")]
    ColumnOutOfRange { index: usize, len: usize },

    #[error("unknown column: {0}")]
    UnknownColumn(String),
}
