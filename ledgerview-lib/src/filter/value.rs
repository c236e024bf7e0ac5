//! Filter values held per key.

use chrono::NaiveDate;

use crate::model::Value;

/// One end of a date range.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RangeBound {
    /// No constraint on this side.
    #[default]
    Unbounded,
    /// Inclusive bound.
    Date(NaiveDate),
    /// Text the host passed that is not a date; the range matches nothing.
    Invalid(String),
}

impl RangeBound {
    /// Parses host input. Blank text is unbounded.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return RangeBound::Unbounded;
        }
        match Value::from(raw).as_date() {
            Some(date) => RangeBound::Date(date),
            None => RangeBound::Invalid(raw.to_string()),
        }
    }

    fn is_unbounded(&self) -> bool {
        matches!(self, RangeBound::Unbounded)
    }
}

impl From<Option<NaiveDate>> for RangeBound {
    fn from(date: Option<NaiveDate>) -> Self {
        date.map_or(RangeBound::Unbounded, RangeBound::Date)
    }
}

/// Inclusive date range. Either side may be open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: RangeBound,
    pub end: RangeBound,
}

impl DateRange {
    /// Creates a range from optional dates.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Parses a range from the strings a date picker hands back.
    pub fn parse(start: &str, end: &str) -> Self {
        Self {
            start: RangeBound::parse(start),
            end: RangeBound::parse(end),
        }
    }

    /// Returns `true` when neither side constrains anything.
    pub fn is_open(&self) -> bool {
        self.start.is_unbounded() && self.end.is_unbounded()
    }

    /// Inclusive containment check.
    ///
    /// Invalid bounds and inverted ranges contain nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let after_start = match &self.start {
            RangeBound::Unbounded => true,
            RangeBound::Date(start) => date >= *start,
            RangeBound::Invalid(_) => false,
        };
        let before_end = match &self.end {
            RangeBound::Unbounded => true,
            RangeBound::Date(end) => date <= *end,
            RangeBound::Invalid(_) => false,
        };
        after_start && before_end
    }
}

/// The constraint stored for one filter key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// Case-insensitive equality (substring for the search key).
    Scalar(String),
    /// Inclusive date range.
    Range(DateRange),
    /// Any of the selected values.
    MultiSelect(Vec<String>),
}

impl FilterValue {
    /// Creates a scalar filter value.
    pub fn scalar(value: impl Into<String>) -> Self {
        FilterValue::Scalar(value.into())
    }

    /// Creates a range filter value from optional dates.
    pub fn range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        FilterValue::Range(DateRange::new(start, end))
    }

    /// Creates a multi-select filter value.
    pub fn multi<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterValue::MultiSelect(values.into_iter().map(Into::into).collect())
    }

    /// Returns `true` if this value imposes no constraint.
    ///
    /// Writing an empty value into a [`FilterState`](super::FilterState)
    /// removes the key instead.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Scalar(s) => s.trim().is_empty(),
            FilterValue::Range(range) => range.is_open(),
            FilterValue::MultiSelect(values) => values.iter().all(|v| v.trim().is_empty()),
        }
    }
}

impl From<DateRange> for FilterValue {
    fn from(range: DateRange) -> Self {
        FilterValue::Range(range)
    }
}
