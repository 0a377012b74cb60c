pub mod filter_menu;
pub mod header;
pub mod pagination_bar;
pub mod record_table;
pub mod search_bar;

pub use filter_menu::FilterMenu;
pub use header::{HeaderMode, HeaderState, RESIZE_STEP};
pub use pagination_bar::PaginationBar;
pub use record_table::{EMPTY_COPY, RecordTable};
pub use search_bar::SearchBar;
