//! Sort state.

use serde::Deserialize;
use serde::Serialize;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

/// Ordered sort keys, highest priority first.
///
/// A column appears at most once. Setting the direction of a column that is
/// already sorted updates it in place and keeps its priority.
///
/// # Example
///
/// ```
/// use erpgrid_lib::state::{Direction, SortState};
///
/// let sort = SortState::asc("clientName").then_desc("orderDate");
/// assert_eq!(sort.direction("orderDate"), Some(Direction::Desc));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    keys: Vec<(String, Direction)>,
}

impl SortState {
    /// Creates an empty sort state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an ascending sort on a column.
    pub fn asc(key: impl Into<String>) -> Self {
        Self::new().then(key, Direction::Asc)
    }

    /// Creates a descending sort on a column.
    pub fn desc(key: impl Into<String>) -> Self {
        Self::new().then(key, Direction::Desc)
    }

    /// Adds a lower-priority key (builder pattern).
    pub fn then(mut self, key: impl Into<String>, direction: Direction) -> Self {
        self.set(key, direction);
        self
    }

    /// Adds a lower-priority ascending key.
    pub fn then_asc(self, key: impl Into<String>) -> Self {
        self.then(key, Direction::Asc)
    }

    /// Adds a lower-priority descending key.
    pub fn then_desc(self, key: impl Into<String>) -> Self {
        self.then(key, Direction::Desc)
    }

    /// Sorts by a column. Last write for a key wins.
    pub fn set(&mut self, key: impl Into<String>, direction: Direction) {
        let key = key.into();
        match self.keys.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = direction,
            None => self.keys.push((key, direction)),
        }
    }

    /// Replaces all keys with a single one.
    pub fn set_only(&mut self, key: impl Into<String>, direction: Direction) {
        self.keys.clear();
        self.keys.push((key.into(), direction));
    }

    /// Cycles a column through ascending, descending and unsorted.
    ///
    /// With `multi` unset, other keys are dropped when the column becomes
    /// sorted. Returns the column's new direction.
    pub fn toggle(&mut self, key: &str, multi: bool) -> Option<Direction> {
        let next = match self.direction(key) {
            None => Some(Direction::Asc),
            Some(Direction::Asc) => Some(Direction::Desc),
            Some(Direction::Desc) => None,
        };
        match next {
            Some(direction) if multi => self.set(key, direction),
            Some(direction) => {
                self.keys.retain(|(k, _)| k == key);
                self.set(key, direction);
            }
            None => self.remove(key),
        }
        next
    }

    /// Removes a column from the sort.
    pub fn remove(&mut self, key: &str) {
        self.keys.retain(|(k, _)| k != key);
    }

    /// Clears all keys.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Returns the direction a column is sorted in.
    pub fn direction(&self, key: &str) -> Option<Direction> {
        self.keys.iter().find(|(k, _)| k == key).map(|(_, d)| *d)
    }

    /// Returns the keys with their directions, highest priority first.
    pub fn keys(&self) -> &[(String, Direction)] {
        &self.keys
    }

    /// Returns `true` if nothing is sorted.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Drops keys whose column fails the predicate.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.keys.retain(|(k, _)| keep(k));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins_in_place() {
        let mut sort = SortState::asc("a").then_asc("b");
        sort.set("a", Direction::Desc);
        assert_eq!(
            sort.keys(),
            &[("a".to_string(), Direction::Desc), ("b".to_string(), Direction::Asc)]
        );
    }

    #[test]
    fn test_toggle_cycles() {
        let mut sort = SortState::new();
        assert_eq!(sort.toggle("name", false), Some(Direction::Asc));
        assert_eq!(sort.toggle("name", false), Some(Direction::Desc));
        assert_eq!(sort.toggle("name", false), None);
        assert!(sort.is_empty());
    }

    #[test]
    fn test_toggle_single_replaces_other_keys() {
        let mut sort = SortState::asc("a").then_desc("b");
        sort.toggle("c", false);
        assert_eq!(sort.keys(), &[("c".to_string(), Direction::Asc)]);

        let mut sort = SortState::asc("a");
        sort.toggle("c", true);
        assert_eq!(sort.keys().len(), 2);
    }
}
