//! Declarative data presentation and filtering engine
//!
//! The recurring table pattern of an administrative portal: take a dataset a
//! service returned, expose per-column filters and free-text search, page
//! and sort the result, render typed columns and route row actions back to
//! the owning screen. Everything runs over an in-memory snapshot; fetching,
//! exporting and drawing are left to the host.

pub mod actions;
pub mod column;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod model;
pub mod options;

pub use actions::{ActionConfig, ActionHost, ActionMode, ActionRequest, RowActions};
pub use column::{ColumnSpec, Columns};
pub use config::TableConfig;
pub use controller::TableController;
pub use filter::{FilterState, FilterValue, filter_data};
pub use model::{Record, Value};
pub use options::{FilterOption, build_options, reset_icon, set_value};
