//! Processing stages.
//!
//! Each stage is a free function over borrowed rows, so hosts can run them
//! without a [`Grid`](crate::Grid):
//!
//! - [`apply_filters`] - global and per-column filtering
//! - [`apply_sort`] - stable multi-key sort
//! - [`apply_grouping`] - adjacency grouping into header and row nodes
//! - [`paginate`] - client-side page slicing

mod filter;
mod group;
mod paginate;
mod sort;

pub use filter::apply_filters;
pub use filter::distinct_values;
pub use filter::validate_column_filter;
pub use group::GroupHeader;
pub use group::GroupedIter;
pub use group::GroupedView;
pub use group::ViewNode;
pub use group::apply_grouping;
pub use paginate::page_range;
pub use paginate::paginate;
pub use sort::apply_sort;
pub use sort::compare_rows;
