//! Row action dispatcher.
//!
//! Maps the action buttons a screen enables (view/edit/delete plus any
//! custom buttons) to requests delivered to the hosting screen. The
//! dispatcher holds no state: binding is a pure function of configuration
//! and row.

use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::model::Record;

/// What the host is asked to do with a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionMode {
    View,
    Edit,
    Delete,
    /// A screen-specific action identified by its callback token.
    Custom(String),
}

impl ActionMode {
    /// Parses a mode name; anything other than the built-ins is custom.
    pub fn parse(name: &str) -> Self {
        match name {
            "view" => ActionMode::View,
            "edit" => ActionMode::Edit,
            "delete" => ActionMode::Delete,
            other => ActionMode::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ActionMode::View => "view",
            ActionMode::Edit => "edit",
            ActionMode::Delete => "delete",
            ActionMode::Custom(token) => token,
        }
    }
}

impl fmt::Display for ActionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row-action notification sent to the host.
///
/// `row` borrows the record straight out of the dataset; hosts that need to
/// modify it must clone first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionRequest<'r> {
    pub mode: &'r ActionMode,
    pub row: &'r Record,
}

/// Receiver of row actions (the hosting screen).
pub trait ActionHost {
    fn dispatch(&mut self, request: ActionRequest<'_>);
}

impl<F> ActionHost for F
where
    F: FnMut(ActionRequest<'_>),
{
    fn dispatch(&mut self, request: ActionRequest<'_>) {
        self(request)
    }
}

/// A custom button declared by a screen (e.g. "Approve", "Resend invoice").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomButton {
    pub label: String,
    pub token: String,
}

impl CustomButton {
    pub fn new(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: token.into(),
        }
    }
}

/// Which action buttons a table shows on each row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    pub view_btn: bool,
    pub edit_btn: bool,
    pub delete_btn: bool,
    pub custom_buttons: Vec<CustomButton>,
}

impl ActionConfig {
    /// Creates a config with no buttons.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the view button.
    pub fn with_view(mut self) -> Self {
        self.view_btn = true;
        self
    }

    /// Shows the edit button.
    pub fn with_edit(mut self) -> Self {
        self.edit_btn = true;
        self
    }

    /// Shows the delete button.
    pub fn with_delete(mut self) -> Self {
        self.delete_btn = true;
        self
    }

    /// Adds a custom button.
    pub fn with_custom(mut self, label: impl Into<String>, token: impl Into<String>) -> Self {
        self.custom_buttons.push(CustomButton::new(label, token));
        self
    }

    /// Checks that custom tokens are unique and do not shadow built-ins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for button in &self.custom_buttons {
            if !matches!(ActionMode::parse(&button.token), ActionMode::Custom(_)) {
                return Err(ConfigError::ReservedAction {
                    token: button.token.clone(),
                });
            }
            if !seen.insert(button.token.as_str()) {
                return Err(ConfigError::DuplicateAction {
                    token: button.token.clone(),
                });
            }
        }
        Ok(())
    }

    /// Returns `true` if no button is enabled.
    pub fn is_empty(&self) -> bool {
        !self.view_btn && !self.edit_btn && !self.delete_btn && self.custom_buttons.is_empty()
    }
}

/// An action button bound to one row.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundAction<'r> {
    pub label: String,
    pub mode: ActionMode,
    pub row: &'r Record,
}

impl BoundAction<'_> {
    /// Notifies the host. Each call is exactly one dispatch.
    pub fn activate(&self, host: &mut dyn ActionHost) {
        log::debug!("Row action activated: {}", self.mode);
        host.dispatch(ActionRequest {
            mode: &self.mode,
            row: self.row,
        });
    }
}

/// Binds action configurations to rows.
pub struct RowActions;

impl RowActions {
    /// Binds every enabled action to `row`.
    ///
    /// Order is fixed: view, edit, delete, then custom buttons as declared.
    pub fn bind<'r>(config: &ActionConfig, row: &'r Record) -> Vec<BoundAction<'r>> {
        let builtins = [
            (config.view_btn, "View", ActionMode::View),
            (config.edit_btn, "Edit", ActionMode::Edit),
            (config.delete_btn, "Delete", ActionMode::Delete),
        ];

        builtins
            .into_iter()
            .filter(|(enabled, _, _)| *enabled)
            .map(|(_, label, mode)| BoundAction {
                label: label.to_string(),
                mode,
                row,
            })
            .chain(config.custom_buttons.iter().map(|button| BoundAction {
                label: button.label.clone(),
                mode: ActionMode::Custom(button.token.clone()),
                row,
            }))
            .collect()
    }

    /// Binds and activates the action matching `mode`, if it is enabled.
    ///
    /// Returns `false` when the row has no such action.
    pub fn dispatch(
        config: &ActionConfig,
        row: &Record,
        mode: &ActionMode,
        host: &mut dyn ActionHost,
    ) -> bool {
        match Self::bind(config, row).into_iter().find(|a| a.mode == *mode) {
            Some(action) => {
                action.activate(host);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingHost {
        seen: Vec<(ActionMode, Record)>,
    }

    impl ActionHost for RecordingHost {
        fn dispatch(&mut self, request: ActionRequest<'_>) {
            self.seen.push((request.mode.clone(), request.row.clone()));
        }
    }

    fn invoice() -> Record {
        Record::new().set("invoice_no", "INV-7").set("amount", 120i32)
    }

    #[test]
    fn test_bind_order() {
        let config = ActionConfig::new()
            .with_delete()
            .with_view()
            .with_custom("Approve", "approve")
            .with_custom("Resend", "resend");
        let row = invoice();

        let modes: Vec<_> = RowActions::bind(&config, &row)
            .into_iter()
            .map(|a| a.mode.to_string())
            .collect();
        assert_eq!(modes, vec!["view", "delete", "approve", "resend"]);
    }

    #[test]
    fn test_activate_dispatches_once_with_same_row() {
        let config = ActionConfig::new().with_edit();
        let row = invoice();
        let mut host = RecordingHost::default();

        let actions = RowActions::bind(&config, &row);
        actions[0].activate(&mut host);

        assert_eq!(host.seen.len(), 1);
        assert_eq!(host.seen[0].0, ActionMode::Edit);
        assert_eq!(host.seen[0].1, row);
        assert!(std::ptr::eq(actions[0].row, &row));
    }

    #[test]
    fn test_dispatch_disabled_mode_is_noop() {
        let config = ActionConfig::new().with_view();
        let row = invoice();
        let mut calls = 0;
        let mut host = |_: ActionRequest<'_>| calls += 1;

        assert!(!RowActions::dispatch(&config, &row, &ActionMode::Delete, &mut host));
        assert!(RowActions::dispatch(&config, &row, &ActionMode::View, &mut host));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_validate_tokens() {
        let dup = ActionConfig::new()
            .with_custom("Approve", "approve")
            .with_custom("Approve again", "approve");
        assert!(matches!(dup.validate(), Err(ConfigError::DuplicateAction { .. })));

        let shadow = ActionConfig::new().with_custom("Remove", "delete");
        assert!(matches!(shadow.validate(), Err(ConfigError::ReservedAction { .. })));

        assert!(ActionConfig::new().with_custom("Approve", "approve").validate().is_ok());
    }
}
