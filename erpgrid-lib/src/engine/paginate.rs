//! Pagination engine (client-side slicing).

use std::ops::Range;

use crate::error::GridError;
use crate::error::Result;
use crate::state::page_count;

/// Row range of a page within `total_count` rows.
///
/// Fails with [`GridError::InvalidPageSize`] for a zero page size and
/// [`GridError::PageOutOfRange`] when `page_index >= page_count`.
pub fn page_range(total_count: usize, page_index: usize, page_size: usize) -> Result<Range<usize>> {
    if page_size == 0 {
        return Err(GridError::InvalidPageSize);
    }
    let page_count = page_count(total_count, page_size);
    if page_index >= page_count {
        return Err(GridError::PageOutOfRange {
            page_index,
            page_count,
        });
    }
    let start = page_index * page_size;
    let end = (start + page_size).min(total_count);
    Ok(start..end)
}

/// Slices one page out of processed rows.
///
/// Returns `rows[page_index * page_size .. page_index * page_size + page_size]`,
/// clipped to the end of `rows`. Page 0 of an empty slice is empty.
///
/// # Example
///
/// ```
/// use erpgrid_lib::engine::paginate;
///
/// let rows: Vec<u32> = (0..25).collect();
/// assert_eq!(paginate(&rows, 2, 10).unwrap().len(), 5);
/// assert!(paginate(&rows, 3, 10).is_err());
/// ```
pub fn paginate<T>(rows: &[T], page_index: usize, page_size: usize) -> Result<&[T]> {
    let range = page_range(rows.len(), page_index, page_size)?;
    Ok(&rows[range])
}
