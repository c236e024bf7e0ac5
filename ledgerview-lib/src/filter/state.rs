//! FilterState - the active constraints of one table.

use std::collections::BTreeMap;
use std::collections::btree_map;

use super::value::FilterValue;

/// Reserved key under which free-text search is stored.
pub const SEARCH_KEY: &str = "$search";

/// Mapping from filter key to its active constraint.
///
/// A key that is absent imposes no constraint. Empty values are never
/// stored: [`FilterState::set`] removes the key instead, so every entry in
/// the map is an active constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    entries: BTreeMap<String, FilterValue>,
}

impl FilterState {
    /// Creates an empty filter state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the constraint for `key`, or removes it when `value` is empty.
    ///
    /// Returns `true` if the state changed.
    pub fn set(&mut self, key: impl Into<String>, value: FilterValue) -> bool {
        let key = key.into();
        if value.is_empty() {
            return self.entries.remove(&key).is_some();
        }
        match self.entries.get(&key) {
            Some(existing) if *existing == value => false,
            _ => {
                self.entries.insert(key, value);
                true
            }
        }
    }

    /// Sets the constraint for `key` (builder pattern).
    pub fn with(mut self, key: impl Into<String>, value: FilterValue) -> Self {
        self.set(key, value);
        self
    }

    /// Removes the constraint for `key`.
    pub fn remove(&mut self, key: &str) -> Option<FilterValue> {
        self.entries.remove(key)
    }

    /// Returns the constraint for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.entries.get(key)
    }

    /// Sets or clears the free-text search.
    pub fn set_search(&mut self, text: impl Into<String>) -> bool {
        self.set(SEARCH_KEY, FilterValue::Scalar(text.into()))
    }

    /// Returns the active search text.
    pub fn search(&self) -> Option<&str> {
        match self.entries.get(SEARCH_KEY) {
            Some(FilterValue::Scalar(text)) => Some(text),
            _ => None,
        }
    }

    /// Adds every constraint of `other`, overwriting shared keys.
    pub fn merge(&mut self, other: &FilterState) {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    /// Removes all constraints.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns `true` if no constraint is active.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of active keys, search included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Active keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates the active constraints in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, FilterValue> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a FilterState {
    type Item = (&'a String, &'a FilterValue);
    type IntoIter = btree_map::Iter<'a, String, FilterValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, FilterValue)> for FilterState {
    fn from_iter<I: IntoIterator<Item = (K, FilterValue)>>(iter: I) -> Self {
        let mut state = FilterState::new();
        for (key, value) in iter {
            state.set(key, value);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value_removes_key() {
        let mut state = FilterState::new().with("status", FilterValue::scalar("approved"));
        assert_eq!(state.len(), 1);

        assert!(state.set("status", FilterValue::scalar("")));
        assert!(state.is_empty());
        // Removing an absent key is not a change
        assert!(!state.set("status", FilterValue::scalar("")));
    }

    #[test]
    fn test_set_reports_changes() {
        let mut state = FilterState::new();
        assert!(state.set("firm", FilterValue::scalar("acme")));
        assert!(!state.set("firm", FilterValue::scalar("acme")));
        assert!(state.set("firm", FilterValue::scalar("globex")));
    }

    #[test]
    fn test_search_uses_reserved_key() {
        let mut state = FilterState::new();
        state.set_search("acme");
        assert_eq!(state.search(), Some("acme"));
        assert!(state.get(SEARCH_KEY).is_some());

        state.set_search("   ");
        assert_eq!(state.search(), None);
    }

    #[test]
    fn test_from_iter_skips_empty_values() {
        let state: FilterState = [
            ("a", FilterValue::scalar("1")),
            ("b", FilterValue::multi(Vec::<String>::new())),
        ]
        .into_iter()
        .collect();
        assert_eq!(state.keys().collect::<Vec<_>>(), vec!["a"]);
    }
}
