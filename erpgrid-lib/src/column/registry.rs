//! Immutable column registry.

use std::collections::HashMap;
use std::sync::Arc;

use super::Capability;
use super::ColumnDescriptor;
use crate::error::GridError;
use crate::error::Result;

/// Validated, read-only set of column descriptors for one table.
///
/// Cloning is cheap; clones share the same descriptors. Changing columns
/// means building a new registry.
#[derive(Debug, Clone)]
pub struct ColumnRegistry {
    columns: Arc<[ColumnDescriptor]>,
    index: Arc<HashMap<String, usize>>,
}

impl ColumnRegistry {
    /// Registers columns in declaration order.
    ///
    /// Fails with [`GridError::DuplicateColumnKey`] if two columns share a key.
    pub fn new(columns: Vec<ColumnDescriptor>) -> Result<Self> {
        let mut index = HashMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            if index.insert(column.key.clone(), i).is_some() {
                return Err(GridError::DuplicateColumnKey(column.key.clone()));
            }
        }
        Ok(Self {
            columns: columns.into(),
            index: Arc::new(index),
        })
    }

    /// Returns the descriptor for a key.
    pub fn get(&self, key: &str) -> Result<&ColumnDescriptor> {
        self.index
            .get(key)
            .map(|&i| &self.columns[i])
            .ok_or_else(|| GridError::unknown_column(key))
    }

    /// Returns the descriptor for a key if it declares the capability.
    pub fn require(&self, key: &str, capability: Capability) -> Result<&ColumnDescriptor> {
        let column = self.get(key)?;
        if !column.has(capability) {
            return Err(GridError::unsupported(key, capability));
        }
        Ok(column)
    }

    /// Returns `true` if the key is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Iterates descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter()
    }

    /// Iterates keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.key.as_str())
    }

    /// Number of registered columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if no columns are registered.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
