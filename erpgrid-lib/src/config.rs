//! Grid configuration

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Where pages are cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    /// The grid holds every row and slices pages in memory.
    #[default]
    Client,
    /// The host fetches each page; the grid only tracks offset and limit.
    Server,
}

impl fmt::Display for PaginationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaginationMode::Client => write!(f, "client"),
            PaginationMode::Server => write!(f, "server"),
        }
    }
}

/// Per-table grid configuration.
///
/// # Example
///
/// ```
/// use erpgrid_lib::{GridConfig, PaginationMode};
///
/// let config = GridConfig::default()
///     .with_page_size(25)
///     .with_pagination(PaginationMode::Server)
///     .with_multi_sort(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Pagination mode, fixed for the lifetime of a grid.
    ///
    /// Default: client
    pub pagination: PaginationMode,

    /// Initial rows per page.
    ///
    /// Default: 10
    pub page_size: usize,

    /// Whether toggling a column's sort keeps the other sorted columns.
    ///
    /// Default: false
    pub multi_sort: bool,

    /// Return to the first page when filters, sort or grouping change.
    ///
    /// Default: true
    pub reset_page_on_change: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            pagination: PaginationMode::Client,
            page_size: 10,
            multi_sort: false,
            reset_page_on_change: true,
        }
    }
}

impl GridConfig {
    /// Sets the pagination mode.
    pub fn with_pagination(mut self, mode: PaginationMode) -> Self {
        self.pagination = mode;
        self
    }

    /// Sets the initial page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Enables or disables multi-column sort toggling.
    pub fn with_multi_sort(mut self, multi_sort: bool) -> Self {
        self.multi_sort = multi_sort;
        self
    }

    /// Enables or disables resetting to the first page on state changes.
    pub fn with_reset_page_on_change(mut self, reset: bool) -> Self {
        self.reset_page_on_change = reset;
        self
    }
}
