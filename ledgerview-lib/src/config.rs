//! Table configuration
//!
//! Everything here is fixed for the lifetime of a table instance. Hosts can
//! build a [`TableConfig`] in code or deserialize one from a declaration file.

use std::collections::HashMap;
use std::collections::HashSet;

use serde::Deserialize;

use crate::actions::ActionConfig;
use crate::column::{self, Alignment, ColumnSpec, Columns, Tone};
use crate::error::ConfigError;
use crate::filter::SEARCH_KEY;

/// Default number of rows per page.
pub const DEFAULT_PAGE_LENGTH: usize = 10;

/// Which control a filter declaration renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Free text, matched as case-insensitive equality.
    #[default]
    Scalar,
    /// Single choice from options built from the data.
    Select,
    /// Any number of choices from options built from the data.
    MultiSelect,
    /// Start/end date picker.
    DateRange,
}

impl FilterKind {
    /// Whether the control needs options from the option builder.
    pub fn uses_options(&self) -> bool {
        matches!(self, FilterKind::Select | FilterKind::MultiSelect)
    }
}

/// A filter control declared by a screen.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FilterDecl {
    /// Dot path the filter applies to.
    pub key: String,
    /// Placeholder text for the control.
    #[serde(default)]
    pub placeholder: String,
    #[serde(default, rename = "type")]
    pub kind: FilterKind,
}

impl FilterDecl {
    pub fn new(key: impl Into<String>, kind: FilterKind) -> Self {
        let key = key.into();
        Self {
            placeholder: key.clone(),
            key,
            kind,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}

/// A column declared in a table file rather than in code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnDecl {
    pub id: String,
    #[serde(default)]
    pub header: Option<String>,
    /// Dot path to read; defaults to the id.
    #[serde(default)]
    pub path: Option<String>,
    /// Renderer name: `text`, `amount`, `date`, `yes_no` or `badge`.
    #[serde(default)]
    pub format: Option<String>,
    /// Decimal places for `amount`, strftime pattern for `date`.
    #[serde(default)]
    pub format_arg: Option<String>,
    /// Value → tone map for `badge` (`success`, `warning`, `danger`, `info`).
    #[serde(default)]
    pub tones: HashMap<String, String>,
    #[serde(default)]
    pub searchable: bool,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub align: Alignment,
}

impl ColumnDecl {
    /// Builds the column, resolving `format` to a built-in renderer.
    pub fn into_spec(self) -> Result<ColumnSpec, ConfigError> {
        let renderer = match self.format.as_deref().unwrap_or("text") {
            "text" => column::text(),
            "amount" => column::amount(match self.format_arg.as_deref() {
                None => 2,
                Some(arg) => arg.trim().parse().map_err(|_| ConfigError::InvalidFormatArg {
                    column: self.id.clone(),
                    arg: arg.to_string(),
                })?,
            }),
            "date" => column::date(self.format_arg.as_deref().unwrap_or("%Y-%m-%d")),
            "yes_no" => column::yes_no(),
            "badge" => column::badge(
                self.tones
                    .iter()
                    .map(|(value, tone)| (value.clone(), parse_tone(tone)))
                    .collect(),
            ),
            other => {
                return Err(ConfigError::UnknownFormat {
                    column: self.id,
                    format: other.to_string(),
                });
            }
        };

        let path = self.path.unwrap_or_else(|| self.id.clone());
        let mut spec = ColumnSpec::path(self.id, path)
            .render(renderer)
            .align(self.align);
        if let Some(header) = self.header {
            spec = spec.header(header);
        }
        if self.searchable {
            spec = spec.searchable();
        }
        if self.sortable {
            spec = spec.sortable();
        }
        Ok(spec)
    }
}

fn parse_tone(name: &str) -> Tone {
    match name.to_ascii_lowercase().as_str() {
        "success" => Tone::Success,
        "warning" => Tone::Warning,
        "danger" => Tone::Danger,
        "info" => Tone::Info,
        _ => Tone::Neutral,
    }
}

/// Configuration for one table instance.
///
/// # Example
///
/// ```
/// use ledgerview_lib::config::{FilterDecl, FilterKind, TableConfig};
///
/// let config = TableConfig::default()
///     .with_page_length(25)
///     .with_filter(FilterDecl::new("status", FilterKind::MultiSelect));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Rows per page.
    ///
    /// Default: 10
    pub page_length: usize,

    /// Filter controls shown above the table.
    pub filters: Vec<FilterDecl>,

    /// Row action buttons.
    pub actions: ActionConfig,

    /// Declarative columns, for hosts that load tables from files.
    pub columns: Vec<ColumnDecl>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_length: DEFAULT_PAGE_LENGTH,
            filters: Vec::new(),
            actions: ActionConfig::default(),
            columns: Vec::new(),
        }
    }
}

impl TableConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page length.
    pub fn with_page_length(mut self, page_length: usize) -> Self {
        self.page_length = page_length;
        self
    }

    /// Adds a filter declaration.
    pub fn with_filter(mut self, filter: FilterDecl) -> Self {
        self.filters.push(filter);
        self
    }

    /// Sets the row actions.
    pub fn with_actions(mut self, actions: ActionConfig) -> Self {
        self.actions = actions;
        self
    }

    /// Returns the declaration for a filter key.
    pub fn filter(&self, key: &str) -> Option<&FilterDecl> {
        self.filters.iter().find(|f| f.key == key)
    }

    /// Checks the configuration for integration errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_length == 0 {
            return Err(ConfigError::ZeroPageLength);
        }

        let mut keys = HashSet::new();
        for filter in &self.filters {
            if filter.key == SEARCH_KEY {
                return Err(ConfigError::ReservedKey {
                    key: filter.key.clone(),
                });
            }
            if !keys.insert(filter.key.as_str()) {
                return Err(ConfigError::duplicate_filter(&filter.key));
            }
        }

        self.actions.validate()
    }

    /// Builds the declared columns.
    pub fn build_columns(&self) -> Result<Columns, ConfigError> {
        let specs = self
            .columns
            .iter()
            .cloned()
            .map(ColumnDecl::into_spec)
            .collect::<Result<Vec<_>, _>>()?;
        Columns::new(specs)
    }
}
