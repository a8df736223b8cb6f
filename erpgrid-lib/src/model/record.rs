//! Rows and the GridRow trait

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::Value;

/// Shared null returned for missing cells.
static NULL: Value = Value::Null;

/// Trait for records that can be processed by the grid engine.
///
/// The engine only reads rows. Hosts with their own record types implement
/// this trait instead of converting into [`Row`].
///
/// # Example
///
/// ```ignore
/// struct Order {
///     id: String,
///     client: Value,
///     amount: Value,
/// }
///
/// impl GridRow for Order {
///     fn id(&self) -> &str {
///         &self.id
///     }
///
///     fn value(&self, column: &str) -> &Value {
///         match column {
///             "client" => &self.client,
///             "amount" => &self.amount,
///             _ => &Value::Null,
///         }
///     }
/// }
/// ```
pub trait GridRow {
    /// Stable identifier for this row.
    ///
    /// Used by hosts to key UI state; the engine never interprets it.
    fn id(&self) -> &str;

    /// Value of the given column. Missing columns read as `Value::Null`.
    fn value(&self, column: &str) -> &Value;
}

impl<T: GridRow + ?Sized> GridRow for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn value(&self, column: &str) -> &Value {
        (**self).value(column)
    }
}

/// A dynamic row: an identifier and a map of column key to value.
///
/// # Example
///
/// ```
/// use erpgrid_lib::{GridRow, Row, Value};
///
/// let row = Row::new("ord-1")
///     .set("clientName", "JAIPUR SYNTEX LIMITED")
///     .set("quantity", 120i64);
///
/// assert_eq!(row.id(), "ord-1");
/// assert_eq!(row.value("quantity"), &Value::Long(120));
/// assert!(row.value("missing").is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    /// The caller-supplied identifier.
    pub(crate) id: String,

    /// The cell values.
    #[serde(default)]
    pub(crate) fields: HashMap<String, Value>,
}

impl Row {
    /// Creates a new empty row with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: HashMap::new(),
        }
    }

    /// Creates a row from an identifier and prepared fields.
    pub fn with_fields(id: impl Into<String>, fields: HashMap<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }
}

impl GridRow for Row {
    fn id(&self) -> &str {
        &self.id
    }

    fn value(&self, column: &str) -> &Value {
        self.fields.get(column).unwrap_or(&NULL)
    }
}
