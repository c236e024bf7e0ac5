//! Dynamic portal record

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::Value;
use crate::error::FieldError;

/// One row of domain data flowing into a table.
///
/// Records hold field values as a `HashMap<String, Value>`, so any shape a
/// service returns (users, firms, invoices, order-book snapshots) can be
/// presented without a dedicated struct. Nested objects are stored as
/// [`Value::Record`] and reached with dot paths via [`Record::resolve`].
///
/// The engine never mutates a record it has been handed. Hosts that want to
/// edit a row should clone it first.
///
/// # Example
///
/// ```
/// use ledgerview_lib::model::Record;
///
/// let user = Record::new().set("email", "ops@example.com");
/// let balance = Record::new()
///     .set("amount", 250i32)
///     .set("user_id", user);
///
/// assert_eq!(balance.get_long("amount").unwrap(), Some(250));
/// assert!(balance.resolve("user_id.email").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    /// The field values.
    pub(crate) fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Returns the number of top-level fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // =========================================================================
    // Dot-path resolution
    // =========================================================================

    /// Resolves a dot-delimited path such as `"user_id.email"`.
    ///
    /// A field literally named with dots wins over a nested walk. A missing
    /// segment, or a segment that lands on a non-record value before the path
    /// ends, resolves to `None`.
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.fields.get(path) {
            return Some(value);
        }

        let (head, rest) = path.split_once('.')?;
        match self.fields.get(head)? {
            Value::Record(inner) => inner.resolve(rest),
            _ => None,
        }
    }

    /// Resolves a dot path, fanning out through lists.
    ///
    /// `"roles.name"` over a record whose `roles` field is a list of records
    /// yields every role's `name`. A terminal list is flattened into its
    /// elements. Missing segments simply contribute nothing.
    pub fn resolve_all(&self, path: &str) -> Vec<&Value> {
        let mut out = Vec::new();
        self.collect_path(path, &mut out);
        out
    }

    fn collect_path<'a>(&'a self, path: &str, out: &mut Vec<&'a Value>) {
        if let Some(value) = self.fields.get(path) {
            flatten_into(value, out);
            return;
        }

        let Some((head, rest)) = path.split_once('.') else {
            return;
        };
        if let Some(value) = self.fields.get(head) {
            collect_value_path(value, rest, out);
        }
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "string",
                other.type_name(),
            )),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    /// Gets an i64 field value.
    pub fn get_long(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Long(n)) => Ok(Some(*n)),
            Some(Value::Int(n)) => Ok(Some(*n as i64)), // Allow widening
            Some(other) => Err(FieldError::type_mismatch(field, "long", other.type_name())),
        }
    }

    /// Gets an f64 field value.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Float(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(field, "float", other.type_name())),
        }
    }

    /// Gets a Decimal field value, widening integers.
    pub fn get_decimal(&self, field: &str) -> Result<Option<Decimal>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Decimal(d)) => Ok(Some(*d)),
            Some(Value::Int(n)) => Ok(Some(Decimal::from(*n))),
            Some(Value::Long(n)) => Ok(Some(Decimal::from(*n))),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "decimal",
                other.type_name(),
            )),
        }
    }

    /// Gets a nested Record field value.
    pub fn get_record(&self, field: &str) -> Result<Option<&Record>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Record(r)) => Ok(Some(r.as_ref())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "record",
                other.type_name(),
            )),
        }
    }

    /// Gets a list field value.
    pub fn get_list(&self, field: &str) -> Result<Option<&[Value]>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::List(items)) => Ok(Some(items.as_slice())),
            Some(other) => Err(FieldError::type_mismatch(field, "list", other.type_name())),
        }
    }
}

fn flatten_into<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::List(items) => items.iter().for_each(|item| flatten_into(item, out)),
        other => out.push(other),
    }
}

fn collect_value_path<'a>(value: &'a Value, path: &str, out: &mut Vec<&'a Value>) {
    match value {
        Value::Record(inner) => inner.collect_path(path, out),
        Value::List(items) => items
            .iter()
            .for_each(|item| collect_value_path(item, path, out)),
        _ => {}
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
