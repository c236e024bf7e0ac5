//! Reset contract between the controller and externally-owned controls.

/// A filter control that keeps its own display state.
///
/// Date-range pickers and multi-selects remember what they show
/// independently of the controller's filter state, so clearing the filters
/// alone leaves them displaying stale values. Hosts pair
/// [`TableController::on_reset`](super::TableController::on_reset) with a
/// `reset` on every such control, or call
/// [`TableController::reset_with`](super::TableController::reset_with) to do
/// both.
pub trait FilterControl {
    /// The filter key this control edits.
    fn key(&self) -> &str;

    /// Clears the control's displayed value.
    fn reset(&mut self);
}

/// What a reset cleared.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResetNotice {
    /// Keys that held a constraint before the reset.
    pub cleared: Vec<String>,
    /// Declared keys whose controls keep their own display state and must
    /// be told to clear.
    pub controls: Vec<String>,
}

impl ResetNotice {
    /// Returns `true` if `key` names a control the host must reset.
    pub fn requires_reset(&self, key: &str) -> bool {
        self.controls.iter().any(|k| k == key)
    }
}
