//! ColumnSpec and accessor types.

use std::fmt;
use std::sync::Arc;

use super::cell::{self, Cell, Renderer};
use crate::model::{Record, Value};

/// Horizontal alignment hint for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// How a column reads its value from a record.
#[derive(Clone)]
pub enum Accessor {
    /// Dot path resolved against the record (`"user_id.email"`).
    Path(String),
    /// Derived value, e.g. `bid - ask` on an order-book snapshot.
    ///
    /// The closure must be total over the table's records: return
    /// [`Value::Null`] for shapes it cannot handle instead of panicking.
    Computed(Arc<dyn Fn(&Record) -> Value + Send + Sync>),
}

impl Accessor {
    /// Reads the value for a record. Absent paths read as [`Value::Null`].
    pub fn read(&self, record: &Record) -> Value {
        match self {
            Accessor::Path(path) => record.resolve(path).cloned().unwrap_or_default(),
            Accessor::Computed(f) => f(record),
        }
    }

    /// Every text fragment the record exposes through this accessor.
    ///
    /// Path accessors fan out through lists, so a search over `roles.name`
    /// sees each role.
    pub(crate) fn texts(&self, record: &Record) -> Vec<String> {
        match self {
            Accessor::Path(path) => record
                .resolve_all(path)
                .into_iter()
                .filter_map(Value::to_text)
                .collect(),
            Accessor::Computed(f) => match f(record) {
                Value::List(items) => items.iter().filter_map(Value::to_text).collect(),
                other => other.to_text().into_iter().collect(),
            },
        }
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Accessor::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Column configuration.
///
/// A column pairs an id with an accessor (how to read the value) and a
/// renderer (how to draw it). Columns are declared once per table and are
/// read-only afterwards.
///
/// # Examples
///
/// ```
/// use ledgerview_lib::column::{ColumnSpec, Alignment, amount};
///
/// let columns = vec![
///     ColumnSpec::path("email", "user_id.email").header("Email").searchable(),
///     ColumnSpec::path("amount", "amt").render(amount(2)).align(Alignment::Right).sortable(),
/// ];
/// ```
#[derive(Clone)]
pub struct ColumnSpec {
    /// Unique id within the table.
    pub id: String,
    /// Header label.
    pub header: String,
    /// Value accessor.
    pub accessor: Accessor,
    /// Cell renderer.
    pub renderer: Renderer,
    /// Horizontal alignment
    pub align: Alignment,
    /// Whether free-text search looks at this column
    pub searchable: bool,
    /// Whether the column can be sorted
    pub sortable: bool,
}

impl ColumnSpec {
    /// Create a column reading a dot path. The header defaults to the id.
    pub fn path(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self::with_accessor(id, Accessor::Path(path.into()))
    }

    /// Create a column whose value is computed from the whole record.
    pub fn computed<F>(id: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Record) -> Value + Send + Sync + 'static,
    {
        Self::with_accessor(id, Accessor::Computed(Arc::new(f)))
    }

    fn with_accessor(id: impl Into<String>, accessor: Accessor) -> Self {
        let id = id.into();
        Self {
            header: id.clone(),
            id,
            accessor,
            renderer: cell::text(),
            align: Alignment::Left,
            searchable: false,
            sortable: false,
        }
    }

    /// Set the header label.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Set the cell renderer.
    pub fn render(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Include this column in free-text search.
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Read this column's value from a record.
    pub fn value(&self, record: &Record) -> Value {
        self.accessor.read(record)
    }

    /// Read and render this column's cell for a record.
    pub fn cell(&self, record: &Record) -> Cell {
        (self.renderer)(&self.value(record))
    }
}

impl fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("align", &self.align)
            .field("searchable", &self.searchable)
            .field("sortable", &self.sortable)
            .finish_non_exhaustive()
    }
}
