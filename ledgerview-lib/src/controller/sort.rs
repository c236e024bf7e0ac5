//! Sort state for the table controller.

use std::cmp::Ordering;

use crate::model::SortKey;

/// Sort direction for ordering rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    /// Parses `asc`/`desc` (case-insensitive).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "asc" => Some(Direction::Asc),
            "desc" => Some(Direction::Desc),
            _ => None,
        }
    }
}

/// The active sort: one column and a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub column: String,
    pub direction: Direction,
}

impl Sort {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Desc,
        }
    }

    /// Next sort state when a header is clicked.
    ///
    /// The same column flips direction; a different column starts ascending.
    pub fn toggled(current: Option<&Sort>, column: &str) -> Sort {
        match current {
            Some(sort) if sort.column == column => Sort {
                column: sort.column.clone(),
                direction: sort.direction.flipped(),
            },
            _ => Sort::asc(column),
        }
    }
}

/// Compares two precomputed sort keys for the given direction.
///
/// Empty values stay at the bottom in both directions.
pub(crate) fn compare(a: &SortKey, b: &SortKey, direction: Direction) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match direction {
            Direction::Asc => a.cmp(b),
            Direction::Desc => b.cmp(a),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;

    #[test]
    fn test_toggle() {
        let first = Sort::toggled(None, "amount");
        assert_eq!(first, Sort::asc("amount"));

        let second = Sort::toggled(Some(&first), "amount");
        assert_eq!(second, Sort::desc("amount"));

        let other = Sort::toggled(Some(&second), "date");
        assert_eq!(other, Sort::asc("date"));
    }

    #[test]
    fn test_empty_values_last_both_ways() {
        let a = Value::from(1i32).sort_key();
        let empty = Value::Null.sort_key();
        assert_eq!(compare(&empty, &a, Direction::Asc), Ordering::Greater);
        assert_eq!(compare(&empty, &a, Direction::Desc), Ordering::Greater);
        assert_eq!(
            compare(&Value::from(2i32).sort_key(), &a, Direction::Desc),
            Ordering::Less
        );
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!(Direction::parse("DESC"), Some(Direction::Desc));
        assert_eq!(Direction::parse("up"), None);
    }
}
