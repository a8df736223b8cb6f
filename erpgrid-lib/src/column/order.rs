//! Column order controller.

use std::collections::HashSet;

use log::debug;
use log::warn;

use super::Capability;
use super::ColumnRegistry;
use crate::error::GridError;
use crate::error::Result;
use crate::state::GroupingState;

/// Left-to-right column order and the grouping zone of one table.
///
/// The full order is always a permutation of the registry's keys. Columns
/// in the grouping zone keep their slot in the full order but are left out
/// of [`visible_keys`](Self::visible_keys); ungrouping a column puts it
/// back where it was.
///
/// A column is either ungrouped (displayed) or grouped (a group-by
/// dimension). It only changes state through an explicit call.
#[derive(Debug, Clone)]
pub struct ColumnOrder {
    registry: ColumnRegistry,
    order: Vec<String>,
    grouping: GroupingState,
}

impl ColumnOrder {
    /// Creates a controller in registry declaration order, ungrouped.
    pub fn new(registry: &ColumnRegistry) -> Self {
        Self {
            registry: registry.clone(),
            order: registry.keys().map(str::to_string).collect(),
            grouping: GroupingState::new(),
        }
    }

    /// The registry this controller orders.
    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    /// Full order, grouped columns included.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Displayed columns in order: the full order minus grouped columns.
    pub fn visible_keys(&self) -> impl Iterator<Item = &str> {
        self.order
            .iter()
            .map(String::as_str)
            .filter(|k| !self.grouping.contains(k))
    }

    /// Current grouping zone.
    pub fn grouping(&self) -> &GroupingState {
        &self.grouping
    }

    /// Returns `true` if the column is in the grouping zone.
    pub fn is_grouped(&self, key: &str) -> bool {
        self.grouping.contains(key)
    }

    /// Replaces the full order.
    ///
    /// `order` must contain every registered key exactly once, otherwise
    /// this fails with [`GridError::InvalidPermutation`] and nothing changes.
    pub fn reorder<S: AsRef<str>>(&mut self, order: &[S]) -> Result<()> {
        let mut seen = HashSet::with_capacity(order.len());
        let mut duplicated = Vec::new();
        let mut unexpected = Vec::new();
        for key in order.iter().map(AsRef::as_ref) {
            if !self.registry.contains(key) {
                unexpected.push(key.to_string());
            } else if !seen.insert(key) && !duplicated.iter().any(|d| d == key) {
                duplicated.push(key.to_string());
            }
        }
        let missing: Vec<String> = self
            .registry
            .keys()
            .filter(|k| !seen.contains(k))
            .map(str::to_string)
            .collect();

        if !missing.is_empty() || !unexpected.is_empty() || !duplicated.is_empty() {
            return Err(GridError::InvalidPermutation {
                missing,
                unexpected,
                duplicated,
            });
        }

        self.order = order.iter().map(|k| k.as_ref().to_string()).collect();
        debug!("Column order set to {:?}", self.order);
        Ok(())
    }

    /// Moves one column to a position among the displayed columns.
    ///
    /// `position` counts displayed columns without the moved one;
    /// `position == len` appends. Moving a grouped column takes it out of
    /// the grouping zone. Fails with [`GridError::InvalidPosition`] past the
    /// end.
    pub fn move_column(&mut self, key: &str, position: usize) -> Result<()> {
        self.registry.get(key)?;
        let len = self.visible_keys().filter(|k| *k != key).count();
        if position > len {
            return Err(GridError::InvalidPosition { position, len });
        }

        self.order.retain(|k| k != key);
        self.grouping.remove(key);

        let visible: Vec<usize> = self
            .order
            .iter()
            .enumerate()
            .filter(|(_, k)| !self.grouping.contains(k))
            .map(|(i, _)| i)
            .collect();
        let at = match visible.get(position) {
            Some(&i) => i,
            None => visible.last().map_or(self.order.len(), |&i| i + 1),
        };
        self.order.insert(at, key.to_string());
        debug!("Moved column '{}' to position {}", key, position);
        Ok(())
    }

    /// Moves a column into the grouping zone.
    ///
    /// The column stops being displayed and becomes the innermost grouping
    /// level. Returns `false` (no-op) if it was already grouped. Fails with
    /// [`GridError::Unsupported`] for columns that are not groupable.
    pub fn move_to_grouping_zone(&mut self, key: &str) -> Result<bool> {
        self.registry.require(key, Capability::Group)?;
        let added = self.grouping.push(key);
        if added {
            debug!("Grouping by {:?}", self.grouping.keys());
        }
        Ok(added)
    }

    /// Takes a column out of the grouping zone, displaying it again in its
    /// previous slot. Returns `false` if it was not grouped.
    pub fn remove_from_grouping_zone(&mut self, key: &str) -> Result<bool> {
        self.registry.get(key)?;
        let removed = self.grouping.remove(key);
        if removed {
            debug!("Grouping by {:?}", self.grouping.keys());
        }
        Ok(removed)
    }

    /// Restores declaration order and clears the grouping zone.
    pub fn reset(&mut self) {
        self.order = self.registry.keys().map(str::to_string).collect();
        self.grouping.clear();
        debug!("Column order reset");
    }

    /// Switches to a new registry.
    ///
    /// If the current order is no longer a permutation of the registry's
    /// keys, it is reset to declaration order. Grouped columns that are gone
    /// or no longer groupable leave the grouping zone. Returns `true` if the
    /// order was reset.
    pub fn reconcile(&mut self, registry: &ColumnRegistry) -> bool {
        self.registry = registry.clone();

        let is_permutation = self.order.len() == registry.len()
            && self.order.iter().all(|k| registry.contains(k))
            && self.order.iter().collect::<HashSet<_>>().len() == self.order.len();
        if !is_permutation {
            warn!(
                "Column order {:?} does not match registry, resetting",
                self.order
            );
            self.order = registry.keys().map(str::to_string).collect();
        }

        self.grouping.retain(|k| {
            registry
                .get(k)
                .is_ok_and(|column| column.has(Capability::Group))
        });
        !is_permutation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnDescriptor;

    fn registry() -> ColumnRegistry {
        ColumnRegistry::new(vec![
            ColumnDescriptor::new("a", "A").groupable(),
            ColumnDescriptor::new("b", "B").groupable(),
            ColumnDescriptor::new("c", "C"),
        ])
        .unwrap()
    }

    #[test]
    fn test_move_column_in_visible_space() {
        let mut order = ColumnOrder::new(&registry());
        order.move_column("a", 2).unwrap();
        assert_eq!(order.order(), &["b", "c", "a"]);

        order.move_column("a", 0).unwrap();
        assert_eq!(order.order(), &["a", "b", "c"]);

        assert_eq!(
            order.move_column("a", 3).unwrap_err(),
            GridError::InvalidPosition { position: 3, len: 2 }
        );
    }

    #[test]
    fn test_move_grouped_column_ungroups_it() {
        let mut order = ColumnOrder::new(&registry());
        order.move_to_grouping_zone("a").unwrap();
        assert_eq!(order.visible_keys().collect::<Vec<_>>(), vec!["b", "c"]);

        order.move_column("a", 1).unwrap();
        assert!(!order.is_grouped("a"));
        assert_eq!(order.visible_keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_ungroup_restores_slot() {
        let mut order = ColumnOrder::new(&registry());
        order.move_to_grouping_zone("b").unwrap();
        assert_eq!(order.visible_keys().collect::<Vec<_>>(), vec!["a", "c"]);
        assert!(order.remove_from_grouping_zone("b").unwrap());
        assert_eq!(order.visible_keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert!(!order.remove_from_grouping_zone("b").unwrap());
    }

    #[test]
    fn test_reconcile_resets_on_changed_keys() {
        let mut order = ColumnOrder::new(&registry());
        order.reorder(&["c", "b", "a"]).unwrap();
        order.move_to_grouping_zone("a").unwrap();

        let changed = ColumnRegistry::new(vec![
            ColumnDescriptor::new("a", "A"),
            ColumnDescriptor::new("c", "C"),
            ColumnDescriptor::new("d", "D"),
        ])
        .unwrap();
        assert!(order.reconcile(&changed));
        assert_eq!(order.order(), &["a", "c", "d"]);
        // "a" is no longer groupable
        assert!(order.grouping().is_empty());

        let same_keys = ColumnRegistry::new(vec![
            ColumnDescriptor::new("d", "D"),
            ColumnDescriptor::new("c", "C"),
            ColumnDescriptor::new("a", "A"),
        ])
        .unwrap();
        assert!(!order.reconcile(&same_keys));
        assert_eq!(order.order(), &["a", "c", "d"]);
    }
}
