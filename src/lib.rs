//! gridtui: a schema-driven record table toolkit for terminal admin consoles.
//!
//! The crate splits into three layers:
//!
//! - [`core`]: headless table state. Records, load state, column schema,
//!   width layout, selection, and pagination; no terminal types anywhere.
//! - [`services`]: controllers that delegate to the caller, currently
//!   debounced search and named filter toggles.
//! - [`tui`]: the ratatui front-end. Components, action routing,
//!   keybindings, themes, and the application shell.

pub mod core;
pub mod logging;
pub mod services;
pub mod tui;

pub use crate::core::{GridError, Record, RecordSet, TableSchema};
pub use crate::tui::App;
