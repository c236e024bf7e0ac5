//! Validated, ordered column collection.

use std::collections::HashSet;

use super::spec::ColumnSpec;
use crate::error::ConfigError;

/// The columns of one table instance.
///
/// Building a `Columns` is the only place duplicate ids are checked; once
/// built the set is immutable. Each table owns its own instance.
#[derive(Debug, Clone, Default)]
pub struct Columns {
    columns: Vec<ColumnSpec>,
}

impl Columns {
    /// Validates and wraps a list of column specs.
    pub fn new(columns: Vec<ColumnSpec>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.id.as_str()) {
                return Err(ConfigError::duplicate_column(&column.id));
            }
        }
        Ok(Self { columns })
    }

    /// Returns the column with the given id.
    pub fn get(&self, id: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Returns the position of the column with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    /// Columns that take part in free-text search.
    pub fn searchable(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|c| c.searchable)
    }

    /// Iterates the columns in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, ColumnSpec> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<'a> IntoIterator for &'a Columns {
    type Item = &'a ColumnSpec;
    type IntoIter = std::slice::Iter<'a, ColumnSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Columns::new(vec![
            ColumnSpec::path("email", "email"),
            ColumnSpec::path("email", "user_id.email"),
        ]);
        assert_eq!(result.unwrap_err(), ConfigError::duplicate_column("email"));
    }

    #[test]
    fn test_lookup_and_searchable() {
        let columns = Columns::new(vec![
            ColumnSpec::path("email", "email").searchable(),
            ColumnSpec::path("amount", "amt"),
            ColumnSpec::path("firm", "firm.name").searchable(),
        ])
        .unwrap();

        assert_eq!(columns.position("firm"), Some(2));
        assert!(columns.get("missing").is_none());
        let ids: Vec<_> = columns.searchable().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["email", "firm"]);
    }
}
