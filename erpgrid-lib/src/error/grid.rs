//! Grid usage errors

use crate::column::Capability;
use crate::column::FilterKind;
use crate::config::PaginationMode;

/// Errors raised by grid operations.
///
/// Every variant describes malformed caller input. Nothing here is a
/// transient condition; retrying the same call fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Two column descriptors share a key.
    #[error("Duplicate column key '{0}'")]
    DuplicateColumnKey(String),

    /// A column key is not present in the registry.
    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    /// A column order is not a permutation of the registered keys.
    #[error("Invalid column permutation (missing: {missing:?}, unexpected: {unexpected:?}, duplicated: {duplicated:?})")]
    InvalidPermutation {
        /// Registered keys absent from the proposed order.
        missing: Vec<String>,
        /// Keys in the proposed order that are not registered.
        unexpected: Vec<String>,
        /// Keys appearing more than once in the proposed order.
        duplicated: Vec<String>,
    },

    /// A page index past the last page.
    #[error("Page {page_index} out of range ({page_count} pages)")]
    PageOutOfRange { page_index: usize, page_count: usize },

    /// The column does not declare the capability the operation needs.
    #[error("Column '{column}' is not {capability}")]
    Unsupported {
        column: String,
        capability: Capability,
    },

    /// The filter variant does not match the column's filter kind.
    #[error("Column '{column}' takes a {kind} filter")]
    FilterKindMismatch { column: String, kind: FilterKind },

    /// A custom filter was set on a column without a predicate.
    #[error("Column '{0}' has no custom filter predicate")]
    MissingPredicate(String),

    /// Page sizes must be at least one row.
    #[error("Page size must be greater than zero")]
    InvalidPageSize,

    /// A column move targeted a position outside the visible columns.
    #[error("Position {position} out of range ({len} visible columns)")]
    InvalidPosition { position: usize, len: usize },

    /// The operation only applies to the other pagination mode.
    #[error("Operation requires {expected} pagination")]
    PaginationMode { expected: PaginationMode },
}

impl GridError {
    /// Creates a new unknown column error.
    pub fn unknown_column(column: impl Into<String>) -> Self {
        Self::UnknownColumn(column.into())
    }

    /// Creates a new unsupported capability error.
    pub fn unsupported(column: impl Into<String>, capability: Capability) -> Self {
        Self::Unsupported {
            column: column.into(),
            capability,
        }
    }
}
