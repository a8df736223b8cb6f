//! Grouping engine.
//!
//! Groups are runs of adjacent rows sharing key values, taken from the
//! already-sorted order. Equal keys separated by other rows form separate
//! groups; sorting by the grouping column first is what brings them
//! together.

use std::collections::VecDeque;
use std::ops::Range;

use serde::Serialize;

use crate::model::GridRow;
use crate::model::Value;
use crate::state::GroupingState;

/// Header introducing one group run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupHeader {
    /// Nesting level, 0 for the outermost grouping column.
    pub depth: usize,
    /// `(column, value)` pairs from the outermost level down to this one.
    pub path: Vec<(String, Value)>,
    /// Rows in the whole run, including rows outside the current window.
    pub member_count: usize,
    /// Position of the run's first row in the grouped sequence.
    pub first_index: usize,
}

impl GroupHeader {
    /// Column this header groups by.
    pub fn column(&self) -> &str {
        self.path.last().map(|(k, _)| k.as_str()).unwrap_or_default()
    }

    /// Value shared by every member at this level.
    pub fn value(&self) -> &Value {
        static NULL: Value = Value::Null;
        self.path.last().map(|(_, v)| v).unwrap_or(&NULL)
    }
}

/// One node of the grouped sequence.
#[derive(Debug)]
pub enum ViewNode<'a, R> {
    /// Group header, emitted before the first member row it covers.
    GroupHeader(GroupHeader),
    /// A data row and its position in the grouped sequence.
    Row { index: usize, row: &'a R },
}

impl<'a, R> ViewNode<'a, R> {
    /// Returns the row, if this node is one.
    pub fn row(&self) -> Option<&'a R> {
        match self {
            ViewNode::Row { row, .. } => Some(*row),
            ViewNode::GroupHeader(_) => None,
        }
    }

    /// Returns the header, if this node is one.
    pub fn header(&self) -> Option<&GroupHeader> {
        match self {
            ViewNode::GroupHeader(header) => Some(header),
            ViewNode::Row { .. } => None,
        }
    }
}

/// Sorted rows plus the columns they are grouped by.
///
/// Nodes are produced lazily by [`GroupedView::iter`] and
/// [`GroupedView::window`].
#[derive(Debug)]
pub struct GroupedView<'a, R> {
    rows: Vec<&'a R>,
    keys: Vec<String>,
}

/// Groups already-filtered and sorted rows.
///
/// Grouping by `[a, b]` nests `b` runs inside each `a` run. Empty grouping
/// yields every row as a [`ViewNode::Row`].
pub fn apply_grouping<'a, R, I>(rows: I, grouping: &GroupingState) -> GroupedView<'a, R>
where
    R: GridRow + 'a,
    I: IntoIterator<Item = &'a R>,
{
    GroupedView {
        rows: rows.into_iter().collect(),
        keys: grouping.keys().to_vec(),
    }
}

impl<'a, R: GridRow> GroupedView<'a, R> {
    /// The rows in grouped order.
    pub fn rows(&self) -> &[&'a R] {
        &self.rows
    }

    /// The grouping columns, outermost first.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Iterates over every node.
    pub fn iter(&self) -> GroupedIter<'_, 'a, R> {
        self.window(0..self.rows.len())
    }

    /// Iterates over the nodes covering a row range.
    ///
    /// Headers of runs that start before the range are repeated at its
    /// start, so each page of a grouped table carries its own headers.
    pub fn window(&self, range: Range<usize>) -> GroupedIter<'_, 'a, R> {
        let end = range.end.min(self.rows.len());
        let start = range.start.min(end);
        GroupedIter {
            view: self,
            start,
            next: start,
            end,
            pending: VecDeque::new(),
            headed: None,
        }
    }

    /// Top-level runs as `(value, member_count)` pairs, in order.
    pub fn top_level_groups(&self) -> Vec<(Value, usize)> {
        self.iter()
            .filter_map(|node| match node {
                ViewNode::GroupHeader(h) if h.depth == 0 => {
                    Some((h.value().clone(), h.member_count))
                }
                _ => None,
            })
            .collect()
    }

    /// Returns `true` if rows `a` and `b` share values for levels `0..=level`.
    fn same_group(&self, a: usize, b: usize, level: usize) -> bool {
        self.keys[..=level]
            .iter()
            .all(|key| self.rows[a].value(key).matches(self.rows[b].value(key)))
    }

    /// First level at which row `i` starts a new run inside the window.
    fn first_break(&self, i: usize, window_start: usize) -> Option<usize> {
        if self.keys.is_empty() {
            return None;
        }
        if i == window_start {
            return Some(0);
        }
        (0..self.keys.len()).find(|&level| !self.same_group(i - 1, i, level))
    }

    fn header(&self, i: usize, level: usize) -> GroupHeader {
        let mut first = i;
        while first > 0 && self.same_group(first - 1, i, level) {
            first -= 1;
        }
        let mut last = i + 1;
        while last < self.rows.len() && self.same_group(last, i, level) {
            last += 1;
        }
        let path = self.keys[..=level]
            .iter()
            .map(|key| (key.clone(), self.rows[i].value(key).clone()))
            .collect();
        GroupHeader {
            depth: level,
            path,
            member_count: last - first,
            first_index: first,
        }
    }
}

/// Lazy iterator over grouped nodes.
#[derive(Debug)]
pub struct GroupedIter<'v, 'a, R> {
    view: &'v GroupedView<'a, R>,
    start: usize,
    next: usize,
    end: usize,
    pending: VecDeque<GroupHeader>,
    /// Row whose headers were already queued.
    headed: Option<usize>,
}

impl<'v, 'a, R: GridRow> Iterator for GroupedIter<'v, 'a, R> {
    type Item = ViewNode<'a, R>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(header) = self.pending.pop_front() {
            return Some(ViewNode::GroupHeader(header));
        }
        if self.next >= self.end {
            return None;
        }

        let i = self.next;
        if self.headed != Some(i)
            && let Some(level) = self.view.first_break(i, self.start)
        {
            self.pending
                .extend((level..self.view.keys.len()).map(|l| self.view.header(i, l)));
            self.headed = Some(i);
            return self.pending.pop_front().map(ViewNode::GroupHeader);
        }

        self.next += 1;
        Some(ViewNode::Row {
            index: i,
            row: self.view.rows[i],
        })
    }
}
