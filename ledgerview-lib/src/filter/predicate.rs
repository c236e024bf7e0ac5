//! Predicate evaluation over a dataset.

use crate::column::ColumnSpec;
use crate::model::{Record, Value};

use super::state::{FilterState, SEARCH_KEY};
use super::value::{DateRange, FilterValue};

/// Which fields free-text search looks at.
#[derive(Debug, Clone, Default)]
pub enum SearchScope<'c> {
    /// Every field of the record, nested records and lists included.
    #[default]
    AllFields,
    /// Only the given columns (read through their accessors).
    Columns(Vec<&'c ColumnSpec>),
}

/// Returns the records that satisfy every active constraint, in order.
///
/// Search (if set) spans all fields. Use [`filter_data_in`] to restrict it
/// to searchable columns.
pub fn filter_data<'a>(state: &FilterState, records: &'a [Record]) -> Vec<&'a Record> {
    filter_data_in(state, records, &SearchScope::AllFields)
}

/// Like [`filter_data`], with an explicit search scope.
pub fn filter_data_in<'a>(
    state: &FilterState,
    records: &'a [Record],
    scope: &SearchScope<'_>,
) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|record| record_matches(state, record, scope))
        .collect()
}

/// Positions (into `records`) of the rows that pass every constraint.
pub fn matching_indices(
    state: &FilterState,
    records: &[Record],
    scope: &SearchScope<'_>,
) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record_matches(state, record, scope))
        .map(|(index, _)| index)
        .collect()
}

/// Evaluates every active key against one record (logical AND).
pub fn record_matches(state: &FilterState, record: &Record, scope: &SearchScope<'_>) -> bool {
    state.iter().all(|(key, value)| {
        if key == SEARCH_KEY {
            match value {
                FilterValue::Scalar(needle) => search_matches(needle, record, scope),
                _ => false,
            }
        } else {
            value_matches(value, &record.resolve_all(key))
        }
    })
}

fn value_matches(filter: &FilterValue, resolved: &[&Value]) -> bool {
    match filter {
        FilterValue::Scalar(expected) => {
            let expected = expected.trim().to_lowercase();
            resolved
                .iter()
                .filter_map(|v| v.to_text())
                .any(|text| text.trim().to_lowercase() == expected)
        }
        FilterValue::Range(range) => range_matches(range, resolved),
        FilterValue::MultiSelect(selected) => resolved
            .iter()
            .filter_map(|v| v.to_text())
            .any(|text| selected.iter().any(|s| *s == text)),
    }
}

fn range_matches(range: &DateRange, resolved: &[&Value]) -> bool {
    resolved
        .iter()
        .filter_map(|v| v.as_date())
        .any(|date| range.contains(date))
}

fn search_matches(needle: &str, record: &Record, scope: &SearchScope<'_>) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let hit = |text: &String| text.to_lowercase().contains(&needle);
    match scope {
        SearchScope::AllFields => all_texts(record).iter().any(hit),
        SearchScope::Columns(columns) => columns
            .iter()
            .any(|column| column.accessor.texts(record).iter().any(hit)),
    }
}

fn all_texts(record: &Record) -> Vec<String> {
    let mut out = Vec::new();
    for value in record.fields().values() {
        collect_texts(value, &mut out);
    }
    out
}

fn collect_texts(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Record(inner) => inner
            .fields()
            .values()
            .for_each(|v| collect_texts(v, out)),
        Value::List(items) => items.iter().for_each(|v| collect_texts(v, out)),
        other => out.extend(other.to_text()),
    }
}
