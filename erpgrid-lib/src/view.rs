//! View model handed to the rendering layer, plus the server handshake and
//! export snapshot types.

use serde::Serialize;

use crate::column::ColumnDescriptor;
use crate::engine::ViewNode;
use crate::model::GridRow;
use crate::model::Value;
use crate::state::FilterState;
use crate::state::SortState;

/// Page position reported with every view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    /// Rows after filtering, across all pages.
    pub total_count: usize,
}

impl PageInfo {
    /// Returns `true` if there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.page_count
    }
}

/// Everything needed to render the current page.
#[derive(Debug)]
pub struct GridView<'a, R> {
    /// Displayed columns, left to right. Grouped columns are omitted.
    pub columns: Vec<&'a ColumnDescriptor>,
    /// Group headers and rows of the current page.
    pub nodes: Vec<ViewNode<'a, R>>,
    /// Grouping columns, outermost first.
    pub grouping: Vec<String>,
    pub page: PageInfo,
}

impl<'a, R: GridRow> GridView<'a, R> {
    /// Rows of the page, without group headers.
    pub fn rows(&self) -> impl Iterator<Item = &'a R> + '_ {
        self.nodes.iter().filter_map(ViewNode::row)
    }

    /// Row identifiers of the page, in order.
    pub fn row_ids(&self) -> Vec<&'a str> {
        self.rows().map(GridRow::id).collect()
    }

    /// Cell values of a row for the displayed columns.
    pub fn cells(&self, row: &'a R) -> Vec<&'a Value> {
        self.columns.iter().map(|c| row.value(&c.key)).collect()
    }
}

/// What a host needs to fetch one page from a remote source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchRequest {
    pub offset: usize,
    pub limit: usize,
    pub filters: FilterState,
    pub sort: SortState,
}

/// Column entry of a [`GridSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotColumn {
    pub key: String,
    pub label: String,
}

/// Row entry of a [`GridSnapshot`]; values follow the snapshot's columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotRow {
    pub id: String,
    pub values: Vec<Value>,
}

/// Owned copy of the processed rows for export.
///
/// Holds every filtered and sorted row (not just the current page) for the
/// displayed columns. Hosts serialize it however they export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSnapshot {
    pub columns: Vec<SnapshotColumn>,
    pub rows: Vec<SnapshotRow>,
}
