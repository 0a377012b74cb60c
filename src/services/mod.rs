//! Caller-delegating controllers: debounced search and named filter toggles.

pub mod filter;
pub mod search;

pub use filter::{FilterCallback, FilterController, FilterToggle};
pub use search::{
    SEARCH_DEBOUNCE, SearchBinding, SearchController, SearchFn, SearchOption,
};
