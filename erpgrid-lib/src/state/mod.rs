//! Grid state objects.
//!
//! Each table owns one of each, created empty and mutated only through the
//! grid's state transitions. All of them are serializable so a host can
//! save and restore them explicitly; the engine never persists anything.
//!
//! - [`FilterState`] - global filter text and per-column filters
//! - [`SortState`] - ordered `(column, direction)` keys
//! - [`GroupingState`] - ordered group-by columns
//! - [`PaginationState`] - page index, page size and total count

mod filter;
mod grouping;
mod page;
mod sort;

pub use filter::ColumnFilter;
pub use filter::FilterState;
pub use grouping::GroupingState;
pub use page::PaginationState;
pub use page::page_count;
pub use sort::Direction;
pub use sort::SortState;
