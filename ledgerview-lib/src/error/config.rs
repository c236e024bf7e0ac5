//! ConfigError for table declarations

/// Error type for table configuration faults.
///
/// These are integration errors in the hosting screen's declaration. They
/// are raised once, when columns, filters or actions are built, never while
/// filtering or paging data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Two columns share the same id.
    #[error("Duplicate column id '{id}'")]
    DuplicateColumn { id: String },

    /// Two filter declarations share the same key.
    #[error("Duplicate filter key '{key}'")]
    DuplicateFilter { key: String },

    /// A filter was declared on a key the engine reserves for itself.
    #[error("Filter key '{key}' is reserved")]
    ReservedKey { key: String },

    /// Page length must be at least one row.
    #[error("Page length must be greater than zero")]
    ZeroPageLength,

    /// Two custom buttons share the same callback token.
    #[error("Duplicate action token '{token}'")]
    DuplicateAction { token: String },

    /// A custom button token collides with a built-in action mode.
    #[error("Action token '{token}' shadows a built-in action")]
    ReservedAction { token: String },

    /// A column declaration names a renderer that does not exist.
    #[error("Unknown format '{format}' for column '{column}'")]
    UnknownFormat { column: String, format: String },

    /// A renderer argument cannot be used (e.g. a non-numeric scale).
    #[error("Invalid format argument '{arg}' for column '{column}'")]
    InvalidFormatArg { column: String, arg: String },
}

impl ConfigError {
    /// Creates a new duplicate column error.
    pub fn duplicate_column(id: impl Into<String>) -> Self {
        Self::DuplicateColumn { id: id.into() }
    }

    /// Creates a new duplicate filter error.
    pub fn duplicate_filter(key: impl Into<String>) -> Self {
        Self::DuplicateFilter { key: key.into() }
    }
}
