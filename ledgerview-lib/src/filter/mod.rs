//! Filter predicate engine.
//!
//! Pure functions evaluating a [`FilterState`] against an in-memory dataset.
//! A record is kept iff every active key passes:
//!
//! - [`FilterValue::Scalar`] - case-insensitive equality on the text of the
//!   value at the key's dot path; for [`SEARCH_KEY`] a substring match OR-ed
//!   across the [`SearchScope`]
//! - [`FilterValue::Range`] - inclusive date containment; values that do not
//!   parse as dates are excluded
//! - [`FilterValue::MultiSelect`] - the value (or any element, for lists) is
//!   one of the selected options
//!
//! Nothing here returns an error. Paths that do not resolve and values that
//! do not parse simply fail the predicate.

mod predicate;
mod state;
mod value;

pub use predicate::{SearchScope, filter_data, filter_data_in, matching_indices, record_matches};
pub use state::{FilterState, SEARCH_KEY};
pub use value::{DateRange, FilterValue, RangeBound};
