//! Column model - declarative column definitions.
//!
//! A column is an id, an [`Accessor`] that reads a value out of a
//! [`Record`](crate::model::Record) and a [`Renderer`] that turns the value
//! into a [`Cell`]. Accessors never fail: a missing path reads as
//! [`Value::Null`](crate::model::Value::Null) and renders as an empty cell.

mod cell;
mod columns;
mod spec;

pub use cell::{Cell, Renderer, Tone, amount, badge, date, text, yes_no};
pub use columns::Columns;
pub use spec::{Accessor, Alignment, ColumnSpec};
