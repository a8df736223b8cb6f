//! Grouping state.

use serde::Deserialize;
use serde::Serialize;

/// Ordered column keys rows are grouped by, outermost first.
///
/// Empty means no grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingState {
    keys: Vec<String>,
}

impl GroupingState {
    /// Creates an empty grouping state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a grouping state from keys (duplicates are dropped).
    pub fn from_keys<K: Into<String>>(keys: impl IntoIterator<Item = K>) -> Self {
        let mut state = Self::new();
        for key in keys {
            state.push(key);
        }
        state
    }

    /// Appends a key. Returns `false` if it was already present.
    pub fn push(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        if self.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Removes a key. Returns `false` if it was not present.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.keys.len();
        self.keys.retain(|k| k != key);
        self.keys.len() != before
    }

    /// Returns `true` if rows are grouped by the key.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Returns the keys, outermost first.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns `true` if there is no grouping.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of grouping levels.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn clear(&mut self) {
        self.keys.clear();
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.keys.retain(|k| keep(k));
    }
}
