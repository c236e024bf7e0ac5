//! Value enum for dynamic field values

use std::cmp::Ordering;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// A dynamic value that can hold any field a portal screen receives.
///
/// Records coming back from a service collaborator are semi-structured, so
/// every field is stored as a `Value` inside a [`Record`](super::Record).
///
/// # Type Mapping
///
/// | JSON | Rust Variant |
/// |------|--------------|
/// | null | `Null` |
/// | true/false | `Bool` |
/// | integer (32-bit range) | `Int` |
/// | integer (wider) | `Long` |
/// | other number | `Float` |
/// | string | `String` |
/// | object | `Record` |
/// | array | `List` |
///
/// `Decimal`, `DateTime` and `Date` are never produced by deserialization;
/// hosts construct them directly when they already hold typed data.
///
/// # Example
///
/// ```
/// use ledgerview_lib::model::Value;
///
/// let name = Value::from("Acme Clearing");
/// let volume = Value::from(1_000_000i64);
/// let active = Value::from(true);
/// let empty = Value::Null;
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
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
    /// Arbitrary precision decimal (balances, invoice amounts).
    Decimal(Decimal),
    /// String value.
    String(String),
    /// Date and time with timezone.
    DateTime(DateTime<Utc>),
    /// Calendar date.
    Date(NaiveDate),
    /// Nested mapping (e.g. a populated `user_id` reference).
    Record(Box<super::Record>),
    /// Ordered collection of values.
    List(Vec<Value>),
    /// Fallback for values with no better representation.
    Json(serde_json::Value),
}

/// String layouts accepted by [`Value::as_date`] besides RFC 3339.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for null, blank strings and empty collections.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            Value::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::Date(_) => "date",
            Value::Record(_) => "record",
            Value::List(_) => "list",
            Value::Json(_) => "json",
        }
    }

    /// Coerces a scalar value to text.
    ///
    /// Returns `None` for null and blank strings. Nested records and lists have
    /// no single textual form and also return `None`; predicates walk into
    /// lists themselves.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(n) => Some(n.to_string()),
            Value::Long(n) => Some(n.to_string()),
            Value::Float(n) => Some(n.to_string()),
            Value::Decimal(d) => Some(d.normalize().to_string()),
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::DateTime(dt) => Some(dt.to_rfc3339()),
            Value::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            Value::Record(_) | Value::List(_) => None,
            Value::Json(serde_json::Value::Null) => None,
            Value::Json(serde_json::Value::String(s)) => Some(s.clone()),
            Value::Json(other) => Some(other.to_string()),
        }
    }

    /// Interprets the value as a calendar date.
    ///
    /// Strings are tried as RFC 3339 first, then as a handful of common
    /// date/datetime layouts. Anything else yields `None`.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            Value::DateTime(dt) => Some(dt.date_naive()),
            Value::String(s) => parse_date(s),
            Value::Json(serde_json::Value::String(s)) => parse_date(s),
            _ => None,
        }
    }

    /// Returns the value as a decimal if it is numeric.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Int(n) => Some(Decimal::from(*n)),
            Value::Long(n) => Some(Decimal::from(*n)),
            Value::Float(n) => Decimal::from_f64(*n),
            Value::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Total order used when sorting table rows.
    ///
    /// Delegates to [`Value::sort_key`], so mixed kinds in one column (a
    /// number in one row, numeric text in the next) still order
    /// consistently.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }

    /// Reduces the value to a key with a fixed order between kinds.
    ///
    /// Booleans rank first, then numbers (numeric strings included), then
    /// dates, then text. Null, blank strings and values with no textual
    /// form (records, lists) rank last.
    pub fn sort_key(&self) -> SortKey {
        if let Value::Bool(b) = self {
            return SortKey::Bool(*b);
        }
        if let Some(d) = self.as_decimal() {
            return SortKey::Number(d.normalize());
        }
        let Some(text) = self.to_text() else {
            return SortKey::Empty;
        };
        if let Ok(d) = text.trim().parse::<Decimal>() {
            return SortKey::Number(d.normalize());
        }
        if let Some(date) = self.as_date() {
            return SortKey::Date(date);
        }
        SortKey::Text(text.to_lowercase(), text)
    }
}

/// Precomputed ordering key for one cell value.
///
/// Variant order is the order between kinds; the derived `Ord` makes the
/// comparison total.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Bool(bool),
    Number(Decimal),
    Date(NaiveDate),
    /// Case-folded text, then the exact text as tie-break.
    Text(String, String),
    Empty,
}

impl SortKey {
    pub fn is_empty(&self) -> bool {
        matches!(self, SortKey::Empty)
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Some(d) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Some(d);
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
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

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<super::Record> for Value {
    fn from(v: super::Record) -> Self {
        Value::Record(Box::new(v))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    #[test]
    fn test_to_text_coerces_scalars() {
        assert_eq!(Value::from(10i32).to_text(), Some("10".to_string()));
        assert_eq!(Value::from(true).to_text(), Some("true".to_string()));
        assert_eq!(Value::from("  ").to_text(), None);
        assert_eq!(Value::Null.to_text(), None);
        assert_eq!(
            Value::from(Decimal::new(1050, 2)).to_text(),
            Some("10.5".to_string())
        );
    }

    #[test]
    fn test_as_date_accepts_common_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        assert_eq!(Value::from("2024-02-10").as_date(), Some(expected));
        assert_eq!(Value::from("10/02/2024").as_date(), Some(expected));
        assert_eq!(Value::from("2024-02-10 13:45:00").as_date(), Some(expected));
        assert_eq!(
            Value::from("2024-02-10T23:59:59.000Z").as_date(),
            Some(expected)
        );
        assert_eq!(Value::from("not a date").as_date(), None);
        assert_eq!(Value::from(20240210i64).as_date(), None);
    }

    #[test]
    fn test_sort_cmp_numbers_across_variants() {
        assert_eq!(
            Value::from(2i32).sort_cmp(&Value::from(10i64)),
            Ordering::Less
        );
        assert_eq!(
            Value::from(2.5f64).sort_cmp(&Value::from(Decimal::new(25, 1))),
            Ordering::Equal
        );
    }

    #[test]
    fn test_sort_cmp_nulls_last() {
        assert_eq!(Value::Null.sort_cmp(&Value::from("a")), Ordering::Greater);
        assert_eq!(Value::from("a").sort_cmp(&Value::Null), Ordering::Less);
    }

    #[test]
    fn test_sort_cmp_is_consistent_across_kinds() {
        // Number vs numeric text vs number must not form a cycle
        let nine = Value::from(9i32);
        let ten = Value::from(10i32);
        let fifty = Value::from("50");
        assert_eq!(nine.sort_cmp(&ten), Ordering::Less);
        assert_eq!(ten.sort_cmp(&fifty), Ordering::Less);
        assert_eq!(nine.sort_cmp(&fifty), Ordering::Less);

        assert_eq!(Value::from(10i32).sort_cmp(&Value::from("10")), Ordering::Equal);
        assert_eq!(
            Value::from(99i32).sort_cmp(&Value::from("2024-01-05")),
            Ordering::Less
        );
        assert_eq!(
            Value::from("2024-01-05").sort_cmp(&Value::from("alpha")),
            Ordering::Less
        );
        assert_eq!(
            Value::from(Record::new()).sort_key(),
            SortKey::Empty
        );
    }

    #[test]
    fn test_sort_cmp_text_case_insensitive() {
        assert_eq!(
            Value::from("alpha").sort_cmp(&Value::from("Beta")),
            Ordering::Less
        );
        assert_eq!(
            Value::from("2024-01-05").sort_cmp(&Value::from("2023-12-31")),
            Ordering::Greater
        );
    }
}
