//! Option builder for select and multi-select filter controls.

use std::collections::HashSet;

use serde::Serialize;

use crate::filter::{FilterState, FilterValue};
use crate::model::Record;

/// A selectable choice for a filter control.
///
/// Options built from data always have `value == label`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    /// Creates an option whose label is its value.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Derives the distinct choices for `key` from a dataset.
///
/// Every record's value at `key` is resolved (fanning out through lists),
/// null and blank values are skipped, duplicates are dropped and the result
/// is sorted case-insensitively with the exact text as tie-breaker.
pub fn build_options(key: &str, records: &[Record]) -> Vec<FilterOption> {
    let mut seen = HashSet::new();
    let mut values: Vec<String> = records
        .iter()
        .flat_map(|record| record.resolve_all(key))
        .filter_map(|value| value.to_text())
        .filter(|text| seen.insert(text.clone()))
        .collect();

    values.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    values.into_iter().map(FilterOption::new).collect()
}

/// Returns the option currently selected for `key`.
///
/// A scalar yields its value; a multi-select yields its first selection.
/// Ranges have no option form and yield `None`, as does an unset key.
pub fn set_value(key: &str, state: &FilterState) -> Option<FilterOption> {
    match state.get(key)? {
        FilterValue::Scalar(value) => Some(FilterOption::new(value.clone())),
        FilterValue::MultiSelect(values) => values.first().cloned().map(FilterOption::new),
        FilterValue::Range(_) => None,
    }
}

/// Returns every option selected for `key`, in selection order.
pub fn selected_options(key: &str, state: &FilterState) -> Vec<FilterOption> {
    match state.get(key) {
        Some(FilterValue::Scalar(value)) => vec![FilterOption::new(value.clone())],
        Some(FilterValue::MultiSelect(values)) => {
            values.iter().cloned().map(FilterOption::new).collect()
        }
        Some(FilterValue::Range(_)) | None => Vec::new(),
    }
}

/// Display icon identifiers the engine hands to hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconToken {
    /// The "clear all filters" affordance.
    FilterReset,
}

impl IconToken {
    /// Stable name hosts map to an icon asset.
    pub fn as_str(&self) -> &'static str {
        match self {
            IconToken::FilterReset => "filter-reset",
        }
    }
}

impl std::fmt::Display for IconToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Icon for the reset-filters control.
pub fn reset_icon() -> IconToken {
    IconToken::FilterReset
}
