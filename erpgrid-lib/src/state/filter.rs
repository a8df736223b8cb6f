//! Filter state.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Value;

/// A filter applied to a single column.
///
/// # Example
///
/// ```
/// use erpgrid_lib::state::ColumnFilter;
///
/// // Substring match on the cell text
/// let filter = ColumnFilter::text("textile");
///
/// // Accept only these statuses
/// let filter = ColumnFilter::values(["Pending", "Shipped"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum ColumnFilter {
    /// Case-insensitive substring match. Empty text accepts everything.
    Text(String),
    /// Set membership. An empty set accepts everything.
    Values(Vec<Value>),
    /// Argument handed to the column's custom predicate.
    Custom(Value),
}

impl ColumnFilter {
    /// Creates a substring filter.
    pub fn text(text: impl Into<String>) -> Self {
        ColumnFilter::Text(text.into())
    }

    /// Creates a set-membership filter.
    pub fn values<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        ColumnFilter::Values(values.into_iter().map(Into::into).collect())
    }

    /// Creates a custom predicate filter.
    pub fn custom(value: impl Into<Value>) -> Self {
        ColumnFilter::Custom(value.into())
    }

    /// Returns `true` if this filter accepts every row.
    pub fn is_unrestricted(&self) -> bool {
        match self {
            ColumnFilter::Text(text) => text.is_empty(),
            ColumnFilter::Values(values) => values.is_empty(),
            ColumnFilter::Custom(_) => false,
        }
    }
}

/// Global filter text plus per-column filters.
///
/// A column without an entry is unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    #[serde(default)]
    global: String,
    #[serde(default)]
    columns: BTreeMap<String, ColumnFilter>,
}

impl FilterState {
    /// Creates an empty filter state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the global filter (builder pattern).
    pub fn with_global(mut self, text: impl Into<String>) -> Self {
        self.global = text.into();
        self
    }

    /// Sets a column filter (builder pattern).
    pub fn with_column(mut self, key: impl Into<String>, filter: ColumnFilter) -> Self {
        self.columns.insert(key.into(), filter);
        self
    }

    /// Returns the global filter text.
    pub fn global(&self) -> &str {
        &self.global
    }

    /// Sets the global filter text.
    pub fn set_global(&mut self, text: impl Into<String>) {
        self.global = text.into();
    }

    /// Returns the filter for a column, if any.
    pub fn column(&self, key: &str) -> Option<&ColumnFilter> {
        self.columns.get(key)
    }

    /// Iterates over column filters ordered by column key.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &ColumnFilter)> {
        self.columns.iter().map(|(k, f)| (k.as_str(), f))
    }

    /// Sets the filter for a column, replacing any previous one.
    pub fn set_column(&mut self, key: impl Into<String>, filter: ColumnFilter) {
        self.columns.insert(key.into(), filter);
    }

    /// Removes the filter for a column.
    pub fn remove_column(&mut self, key: &str) -> Option<ColumnFilter> {
        self.columns.remove(key)
    }

    /// Drops column filters that fail the predicate.
    pub(crate) fn retain_columns(&mut self, mut keep: impl FnMut(&str, &ColumnFilter) -> bool) {
        self.columns.retain(|k, filter| keep(k, filter));
    }

    /// Clears the global filter and all column filters.
    pub fn clear(&mut self) {
        self.global.clear();
        self.columns.clear();
    }

    /// Returns `true` if no filter restricts any row.
    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.columns.values().all(ColumnFilter::is_unrestricted)
    }
}
