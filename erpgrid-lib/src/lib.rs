//! ERP data grid engine
//!
//! A framework-agnostic, in-memory tabular data engine: column registry,
//! filtering, sorting, grouping, pagination and column ordering for
//! record tables.
//!
//! Data flows through the stages in a fixed order:
//!
//! ```text
//! rows + registry -> filter -> sort -> group -> paginate -> GridView
//! ```
//!
//! Most hosts only need [`Grid`], which owns the state of one table and
//! re-derives the view on demand. The individual stages are public under
//! [`engine`] for hosts that drive them directly.

pub mod column;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod state;

mod grid;
mod view;

pub use column::Capability;
pub use column::ColumnDescriptor;
pub use column::ColumnRegistry;
pub use column::FilterKind;
pub use config::GridConfig;
pub use config::PaginationMode;
pub use error::GridError;
pub use error::Result;
pub use grid::*;
pub use model::GridRow;
pub use model::Row;
pub use model::Value;
pub use view::*;
