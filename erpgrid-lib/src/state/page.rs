//! Pagination state.

use std::ops::Range;

use serde::Deserialize;
use serde::Serialize;

use crate::error::GridError;
use crate::error::Result;

/// Current page position and the authoritative row count.
///
/// `total_count` is the number of rows after filtering. In client mode the
/// grid derives it from the filtered rows; in server mode the host supplies
/// it with each fetched page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    page_index: usize,
    page_size: usize,
    total_count: usize,
}

impl PaginationState {
    /// Creates a state positioned on the first page.
    ///
    /// Fails with [`GridError::InvalidPageSize`] if `page_size` is zero.
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(GridError::InvalidPageSize);
        }
        Ok(Self {
            page_index: 0,
            page_size,
            total_count: 0,
        })
    }

    /// Zero-based index of the current page.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Rows after filtering, across all pages.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Number of pages; at least one, even with no rows.
    pub fn page_count(&self) -> usize {
        page_count(self.total_count, self.page_size)
    }

    /// Offset of the first row of the current page.
    pub fn offset(&self) -> usize {
        self.page_index * self.page_size
    }

    /// Maximum number of rows on a page.
    pub fn limit(&self) -> usize {
        self.page_size
    }

    /// Row range of the current page, clipped to `total_count`.
    pub fn range(&self) -> Range<usize> {
        let start = self.offset().min(self.total_count);
        let end = (self.offset() + self.page_size).min(self.total_count);
        start..end
    }

    /// Moves to a page.
    ///
    /// Fails with [`GridError::PageOutOfRange`] past the last page.
    pub fn set_page_index(&mut self, page_index: usize) -> Result<()> {
        let page_count = self.page_count();
        if page_index >= page_count {
            return Err(GridError::PageOutOfRange {
                page_index,
                page_count,
            });
        }
        self.page_index = page_index;
        Ok(())
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if page_size == 0 {
            return Err(GridError::InvalidPageSize);
        }
        self.page_size = page_size;
        self.page_index = 0;
        Ok(())
    }

    /// Records a new total. The page index is left untouched; callers
    /// validate it when they read the page.
    pub fn set_total_count(&mut self, total_count: usize) {
        self.total_count = total_count;
    }

    /// Moves to the next page. Returns `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.page_index + 1 >= self.page_count() {
            return false;
        }
        self.page_index += 1;
        true
    }

    /// Moves to the previous page. Returns `false` on the first page.
    pub fn previous_page(&mut self) -> bool {
        if self.page_index == 0 {
            return false;
        }
        self.page_index -= 1;
        true
    }

    /// Returns to the first page.
    pub fn first_page(&mut self) {
        self.page_index = 0;
    }

    /// Returns an error if the current page no longer exists.
    pub fn validate(&self) -> Result<()> {
        let page_count = self.page_count();
        if self.page_index >= page_count {
            return Err(GridError::PageOutOfRange {
                page_index: self.page_index,
                page_count,
            });
        }
        Ok(())
    }
}

/// `ceil(total_count / page_size)`, minimum one.
pub fn page_count(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_count.div_ceil(page_size).max(1)
}
