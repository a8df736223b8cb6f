//! Sort engine.

use std::cmp::Ordering;

use crate::model::GridRow;
use crate::state::Direction;
use crate::state::SortState;

/// Orders rows by the sort keys, highest priority first.
///
/// The first key whose values differ decides. Rows equal on every key keep
/// their input order. Descending is the exact reversal of the ascending
/// comparison for that key, so nulls sort first ascending and last
/// descending. See [`Value::compare`](crate::Value::compare) for the value
/// order.
///
/// Unknown keys read as null for every row and therefore never reorder.
pub fn apply_sort<'a, R, I>(rows: I, sort: &SortState) -> Vec<&'a R>
where
    R: GridRow + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut rows: Vec<&'a R> = rows.into_iter().collect();
    if sort.is_empty() {
        return rows;
    }
    // slice::sort_by is stable
    rows.sort_by(|a, b| compare_rows(*a, *b, sort));
    rows
}

/// Compares two rows under the sort keys.
pub fn compare_rows<R: GridRow>(a: &R, b: &R, sort: &SortState) -> Ordering {
    for (key, direction) in sort.keys() {
        let ordering = a.value(key).compare(b.value(key));
        let ordering = match direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}
