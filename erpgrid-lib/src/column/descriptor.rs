//! Column descriptors and capabilities.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Value;

/// Operations a column can opt into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Sort,
    Filter,
    Group,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Sort => write!(f, "sortable"),
            Capability::Filter => write!(f, "filterable"),
            Capability::Group => write!(f, "groupable"),
        }
    }
}

/// How a column's per-column filter is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    /// Case-insensitive substring match on the cell text.
    #[default]
    TextSubstring,
    /// The cell value must be one of a set of accepted values.
    SetMembership,
    /// A caller-supplied predicate decides.
    Custom,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKind::TextSubstring => write!(f, "text-substring"),
            FilterKind::SetMembership => write!(f, "set-membership"),
            FilterKind::Custom => write!(f, "custom"),
        }
    }
}

/// Caller-supplied filter predicate: `(row_value, filter_value) -> bool`.
///
/// Panics raised by the predicate are not caught by the engine.
#[derive(Clone)]
pub struct FilterPredicate(Arc<dyn Fn(&Value, &Value) -> bool + Send + Sync>);

impl FilterPredicate {
    /// Wraps a predicate function.
    pub fn new(f: impl Fn(&Value, &Value) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Invokes the predicate.
    pub fn test(&self, row_value: &Value, filter_value: &Value) -> bool {
        (self.0)(row_value, filter_value)
    }
}

impl fmt::Debug for FilterPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FilterPredicate(..)")
    }
}

/// Static metadata describing one table column.
///
/// Columns are opt-in: a new descriptor has no capabilities until they are
/// enabled with the builder methods.
///
/// # Examples
///
/// ```
/// use erpgrid_lib::{ColumnDescriptor, FilterKind};
///
/// let columns = vec![
///     ColumnDescriptor::new("orderNo", "Order #").width(10).sortable(),
///     ColumnDescriptor::new("clientName", "Client").sortable().filterable(),
///     ColumnDescriptor::new("status", "Status")
///         .filter_kind(FilterKind::SetMembership)
///         .groupable(),
/// ];
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// Unique key within one table.
    pub key: String,
    /// Header text.
    pub label: String,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub filterable: bool,
    #[serde(default)]
    pub groupable: bool,
    #[serde(default)]
    pub filter_kind: FilterKind,
    /// Opaque rendering hint for the presentation layer (e.g. "currency").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_hint: Option<String>,
    /// Opaque preferred width for the presentation layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u16>,
    /// Predicate for [`FilterKind::Custom`] columns.
    #[serde(skip)]
    pub predicate: Option<FilterPredicate>,
}

impl ColumnDescriptor {
    /// Create a new column with the given key and label.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            filterable: false,
            groupable: false,
            filter_kind: FilterKind::TextSubstring,
            render_hint: None,
            width: None,
            predicate: None,
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Make the column filterable (global filter and per-column filter).
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Allow the column to be moved into the grouping zone.
    pub fn groupable(mut self) -> Self {
        self.groupable = true;
        self
    }

    /// Set the filter kind. Implies `filterable`.
    pub fn filter_kind(mut self, kind: FilterKind) -> Self {
        self.filter_kind = kind;
        self.filterable = true;
        self
    }

    /// Use a custom predicate for this column's filter.
    ///
    /// Sets the filter kind to [`FilterKind::Custom`].
    pub fn custom_filter(
        mut self,
        predicate: impl Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.predicate = Some(FilterPredicate::new(predicate));
        self.filter_kind(FilterKind::Custom)
    }

    /// Set the render hint.
    pub fn render_hint(mut self, hint: impl Into<String>) -> Self {
        self.render_hint = Some(hint.into());
        self
    }

    /// Set the preferred width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Returns `true` if the column declares the capability.
    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::Sort => self.sortable,
            Capability::Filter => self.filterable,
            Capability::Group => self.groupable,
        }
    }
}
