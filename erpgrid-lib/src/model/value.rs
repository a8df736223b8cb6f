//! Value enum for dynamic cell values

use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use uuid::Uuid;

/// A dynamic value held by one cell of a row.
///
/// The engine never validates values against a column type. Any value can
/// appear in any column; [`Value::compare`] gives every pair of values a
/// consistent order, and [`Value::to_text`] gives every value a searchable
/// text form.
///
/// # Type Mapping
///
/// | JSON | Rust Variant |
/// |------|--------------|
/// | null | `Null` |
/// | true / false | `Bool` |
/// | integer | `Long` |
/// | other number | `Float` |
/// | string | `String` |
/// | array / object | `Json` |
///
/// `Int`, `Decimal`, `Guid` and `DateTime` are only produced by hosts that
/// build rows in code.
///
/// # Example
///
/// ```
/// use erpgrid_lib::Value;
///
/// let name = Value::from("JAIPUR SYNTEX LIMITED");
/// let quantity = Value::from(120i64);
/// let paid = Value::from(true);
/// let empty = Value::Null;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    Long(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal, used for prices and amounts.
    Decimal(Decimal),
    /// String value. Date strings are kept as strings.
    String(String),
    /// GUID/UUID value.
    Guid(Uuid),
    /// Date and time with timezone.
    DateTime(DateTime<Utc>),
    /// Nested or unrecognized JSON. Never comparable.
    Json(serde_json::Value),
}

/// Numeric view of a value, used to compare across numeric variants.
#[derive(Clone, Copy)]
enum Number {
    Integer(i64),
    Float(f64),
    Decimal(Decimal),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this value takes part in ordering.
    ///
    /// Nested JSON and NaN floats are incomparable; they sort after every
    /// comparable value and tie with each other.
    pub fn is_comparable(&self) -> bool {
        match self {
            Value::Json(_) => false,
            Value::Float(f) => !f.is_nan(),
            _ => true,
        }
    }

    /// Returns the text form used by substring filters.
    ///
    /// Null renders as the empty string.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed(""),
            Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Value::Int(i) => Cow::Owned(i.to_string()),
            Value::Long(l) => Cow::Owned(l.to_string()),
            Value::Float(f) => Cow::Owned(f.to_string()),
            Value::Decimal(d) => Cow::Owned(d.to_string()),
            Value::String(s) => Cow::Borrowed(s),
            Value::Guid(g) => Cow::Owned(g.hyphenated().to_string()),
            Value::DateTime(dt) => Cow::Owned(dt.to_rfc3339()),
            Value::Json(json) => Cow::Owned(json.to_string()),
        }
    }

    /// Case-insensitive substring test against [`Value::to_text`].
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn contains_lowercase(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.to_text().to_lowercase().contains(needle)
    }

    /// Total natural order over all values.
    ///
    /// `Null` sorts first, then comparable values, then incomparable ones.
    /// Numbers compare by numeric value across `Int`, `Long`, `Float` and
    /// `Decimal`. Strings compare ordinally. Comparable values of different
    /// kinds order by kind: bool, number, datetime, string, guid.
    pub fn compare(&self, other: &Value) -> Ordering {
        let class = self.class().cmp(&other.class());
        if class != Ordering::Equal {
            return class;
        }
        if !self.is_comparable() || self.is_null() {
            return Ordering::Equal;
        }

        let rank = self.kind_rank().cmp(&other.kind_rank());
        if rank != Ordering::Equal {
            return rank;
        }

        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.as_bytes().cmp(b.as_bytes()),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::Guid(a), Value::Guid(b)) => a.as_bytes().cmp(b.as_bytes()),
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => compare_numbers(a, b),
                _ => Ordering::Equal,
            },
        }
    }

    /// Equality used for set membership and grouping.
    ///
    /// Comparable values are equal when [`Value::compare`] says so, which
    /// makes `Int(1)` equal to `Long(1)`. Incomparable values fall back to
    /// structural equality.
    pub fn matches(&self, other: &Value) -> bool {
        if self.is_comparable() && other.is_comparable() {
            self.compare(other) == Ordering::Equal
        } else {
            self == other
        }
    }

    fn class(&self) -> u8 {
        match self {
            Value::Null => 0,
            v if v.is_comparable() => 1,
            _ => 2,
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Value::Null | Value::Json(_) => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Long(_) | Value::Float(_) | Value::Decimal(_) => 2,
            Value::DateTime(_) => 3,
            Value::String(_) => 4,
            Value::Guid(_) => 5,
        }
    }

    fn as_number(&self) -> Option<Number> {
        match self {
            Value::Int(i) => Some(Number::Integer(i64::from(*i))),
            Value::Long(l) => Some(Number::Integer(*l)),
            Value::Float(f) => Some(Number::Float(*f)),
            Value::Decimal(d) => Some(Number::Decimal(*d)),
            _ => None,
        }
    }
}

fn compare_numbers(a: Number, b: Number) -> Ordering {
    match (a, b) {
        (Number::Integer(a), Number::Integer(b)) => a.cmp(&b),
        (Number::Float(a), Number::Float(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Number::Decimal(a), Number::Decimal(b)) => a.cmp(&b),
        (Number::Integer(a), Number::Decimal(b)) => Decimal::from(a).cmp(&b),
        (Number::Decimal(a), Number::Integer(b)) => a.cmp(&Decimal::from(b)),
        (Number::Integer(a), Number::Float(b)) => compare_integer_float(a, b),
        (Number::Float(a), Number::Integer(b)) => compare_integer_float(b, a).reverse(),
        (Number::Decimal(a), Number::Float(b)) => compare_decimal_float(a, b),
        (Number::Float(a), Number::Decimal(b)) => compare_decimal_float(b, a).reverse(),
    }
}

/// 2^63, exactly representable as `f64`.
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

/// Exact comparison of an integer with a non-NaN float.
fn compare_integer_float(i: i64, f: f64) -> Ordering {
    if f >= TWO_POW_63 {
        return Ordering::Less;
    }
    if f < -TWO_POW_63 {
        return Ordering::Greater;
    }
    // In range, so the truncated float converts to i64 without loss
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => whole.partial_cmp(&f).unwrap_or(Ordering::Equal),
        unequal => unequal,
    }
}

/// Comparison of a decimal with a non-NaN float, using the float's full
/// binary value.
fn compare_decimal_float(d: Decimal, f: f64) -> Ordering {
    match Decimal::from_f64_retain(f) {
        Some(converted) => d.cmp(&converted),
        // Outside the decimal range
        None if f > 0.0 => Ordering::Less,
        None => Ordering::Greater,
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Guid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Long(i),
                None => n
                    .as_f64()
                    .map(Value::Float)
                    .unwrap_or(Value::Json(serde_json::Value::Number(n))),
            },
            serde_json::Value::String(s) => Value::String(s),
            other => Value::Json(other),
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}
