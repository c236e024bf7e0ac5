//! Table controller state machine.

use std::sync::Arc;

use log::{debug, trace};

use super::paging::PageState;
use super::reset::{FilterControl, ResetNotice};
use super::sort::{self, Direction, Sort};
use crate::actions::{BoundAction, RowActions};
use crate::column::{Cell, ColumnSpec, Columns};
use crate::config::{FilterKind, TableConfig};
use crate::error::ConfigError;
use crate::filter::{FilterState, FilterValue, SearchScope, matching_indices};
use crate::model::{Record, SortKey};
use crate::options::{self, FilterOption};

/// Coarse controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No active constraint.
    Idle,
    /// One or more filter keys (or search) active.
    Filtered,
}

/// A row of the current page, rendered through the column model.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow<'a> {
    /// Position within the visible (filtered) sequence.
    pub position: usize,
    /// The record as stored in the dataset.
    pub record: &'a Record,
    /// One cell per column, in column order.
    pub cells: Vec<Cell>,
}

/// Owns paging, search, per-column filters and sort for one table.
///
/// The full dataset is shared with the host as an `Arc<[Record]>`; the
/// visible sequence is a list of positions into it, so every visible row is
/// the very record the host supplied. Filter state survives dataset
/// replacement: a background refresh re-applies the active filters to the
/// new data instead of dropping them.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ledgerview_lib::column::{ColumnSpec, Columns};
/// use ledgerview_lib::config::TableConfig;
/// use ledgerview_lib::controller::TableController;
/// use ledgerview_lib::filter::FilterValue;
/// use ledgerview_lib::model::Record;
///
/// let columns = Columns::new(vec![ColumnSpec::path("user", "user").searchable()]).unwrap();
/// let mut table = TableController::new(columns, TableConfig::default()).unwrap();
///
/// let data: Arc<[Record]> = vec![
///     Record::new().set("user", "a"),
///     Record::new().set("user", "b"),
/// ].into();
/// table.on_dataset_replaced(data);
/// table.on_filter_change("user", FilterValue::scalar("a"));
/// assert_eq!(table.visible_len(), 1);
/// ```
#[derive(Debug)]
pub struct TableController {
    columns: Columns,
    config: TableConfig,
    full: Arc<[Record]>,
    visible: Vec<usize>,
    filters: FilterState,
    sort: Option<Sort>,
    page: PageState,
    generation: Option<u64>,
}

impl TableController {
    /// Creates a controller with an empty dataset.
    ///
    /// Fails if the configuration is invalid.
    pub fn new(columns: Columns, config: TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let page = PageState::new(config.page_length);
        Ok(Self {
            columns,
            config,
            full: Arc::from(Vec::new()),
            visible: Vec::new(),
            filters: FilterState::new(),
            sort: None,
            page,
            generation: None,
        })
    }

    /// Creates a controller whose columns are declared in the config.
    pub fn from_config(config: TableConfig) -> Result<Self, ConfigError> {
        let columns = config.build_columns()?;
        Self::new(columns, config)
    }

    // -------------------------------------------------------------------------
    // Configuration access
    // -------------------------------------------------------------------------

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // State queries
    // -------------------------------------------------------------------------

    /// Returns `Idle` when no constraint is active, `Filtered` otherwise.
    pub fn state(&self) -> ControllerState {
        if self.filters.is_empty() {
            ControllerState::Idle
        } else {
            ControllerState::Filtered
        }
    }

    /// The active filter state.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// The active sort, if any.
    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    /// The full dataset as last supplied by the host.
    pub fn full(&self) -> &Arc<[Record]> {
        &self.full
    }

    pub fn full_len(&self) -> usize {
        self.full.len()
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// The visible (filtered, sorted) records.
    ///
    /// This is what an export of "what the user sees" should receive.
    pub fn visible(&self) -> Vec<&Record> {
        self.visible.iter().map(|&i| &self.full[i]).collect()
    }

    /// Generation of the dataset last accepted by
    /// [`replace_if_newer`](Self::replace_if_newer).
    pub fn generation(&self) -> Option<u64> {
        self.generation
    }

    // -------------------------------------------------------------------------
    // Paging
    // -------------------------------------------------------------------------

    pub fn page_state(&self) -> PageState {
        self.page
    }

    pub fn page_index(&self) -> usize {
        self.page.page_index
    }

    pub fn page_length(&self) -> usize {
        self.page.page_length
    }

    /// `ceil(visible / page_length)`.
    pub fn page_count(&self) -> usize {
        self.page.page_count(self.visible.len())
    }

    /// Moves to `index`, clamped to the last page. Returns the new index.
    pub fn set_page(&mut self, index: usize) -> usize {
        self.page.page_index = index;
        self.page.clamp(self.visible.len());
        debug!("Table page set to {}", self.page.page_index);
        self.page.page_index
    }

    /// Advances one page. Returns `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        let before = self.page.page_index;
        self.set_page(before.saturating_add(1)) != before
    }

    /// Goes back one page. Returns `false` on the first page.
    pub fn prev_page(&mut self) -> bool {
        let before = self.page.page_index;
        self.set_page(before.saturating_sub(1)) != before
    }

    /// Records of the current page.
    pub fn page(&self) -> Vec<&Record> {
        self.visible[self.page.bounds(self.visible.len())]
            .iter()
            .map(|&i| &self.full[i])
            .collect()
    }

    /// The current page rendered through the column model.
    pub fn page_rows(&self) -> Vec<RenderedRow<'_>> {
        let bounds = self.page.bounds(self.visible.len());
        let start = bounds.start;
        self.visible[bounds]
            .iter()
            .enumerate()
            .map(|(offset, &i)| {
                let record = &self.full[i];
                RenderedRow {
                    position: start + offset,
                    record,
                    cells: self.columns.iter().map(|c| c.cell(record)).collect(),
                }
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Merges a filter value (an empty value clears the key), recomputes
    /// the visible rows and returns to the first page.
    pub fn on_filter_change(&mut self, key: impl Into<String>, value: FilterValue) {
        let key = key.into();
        let changed = self.filters.set(key.as_str(), value);
        debug!("Filter '{}' changed (effective: {})", key, changed);
        self.recompute();
        self.page.page_index = 0;
    }

    /// Sets the free-text search and returns to the first page.
    pub fn on_search_change(&mut self, text: impl Into<String>) {
        let changed = self.filters.set_search(text);
        debug!("Search changed (effective: {})", changed);
        self.recompute();
        self.page.page_index = 0;
    }

    /// Clears every constraint and returns to the first page.
    ///
    /// The returned notice names the declared controls that hold their own
    /// display state; the host must reset those as well.
    pub fn on_reset(&mut self) -> ResetNotice {
        let cleared: Vec<String> = self.filters.keys().map(str::to_string).collect();
        let controls = self
            .config
            .filters
            .iter()
            .filter(|f| matches!(f.kind, FilterKind::DateRange | FilterKind::MultiSelect))
            .map(|f| f.key.clone())
            .collect();

        self.filters.clear();
        self.recompute();
        self.page.page_index = 0;
        debug!("Filters reset ({} keys cleared)", cleared.len());

        ResetNotice { cleared, controls }
    }

    /// Resets the controller and every given control together.
    pub fn reset_with(&mut self, controls: &mut [&mut dyn FilterControl]) -> ResetNotice {
        let notice = self.on_reset();
        for control in controls.iter_mut() {
            trace!("Resetting control for '{}'", control.key());
            control.reset();
        }
        notice
    }

    /// Swaps in a new dataset, re-applying the retained filters and sort.
    ///
    /// Safe to call at any time; filter state is never touched and the page
    /// index is only clamped.
    pub fn on_dataset_replaced(&mut self, full: impl Into<Arc<[Record]>>) {
        self.full = full.into();
        debug!("Dataset replaced ({} records)", self.full.len());
        self.recompute();
    }

    /// Applies `full` only if `generation` is newer than the last one
    /// applied (last write wins). Returns `true` if it was applied.
    pub fn replace_if_newer(&mut self, generation: u64, full: impl Into<Arc<[Record]>>) -> bool {
        if self.generation.is_some_and(|current| generation <= current) {
            debug!(
                "Ignoring stale dataset generation {} (current {:?})",
                generation, self.generation
            );
            return false;
        }
        self.generation = Some(generation);
        self.on_dataset_replaced(full);
        true
    }

    /// Sorts the visible rows by a column.
    ///
    /// The sort is stable and is kept across later recomputes. Returns
    /// `false` (and changes nothing) if the column is unknown or not
    /// sortable.
    pub fn on_sort(&mut self, column_id: &str, direction: Direction) -> bool {
        match self.columns.get(column_id) {
            Some(column) if column.sortable => {}
            _ => {
                debug!("Ignoring sort on non-sortable column '{}'", column_id);
                return false;
            }
        }
        self.sort = Some(Sort {
            column: column_id.to_string(),
            direction,
        });
        debug!("Sorting by '{}' {:?}", column_id, direction);
        self.apply_sort();
        true
    }

    /// Header-click sort: same column flips, new column starts ascending.
    pub fn toggle_sort(&mut self, column_id: &str) -> Option<&Sort> {
        let next = Sort::toggled(self.sort.as_ref(), column_id);
        if self.on_sort(&next.column, next.direction) {
            self.sort.as_ref()
        } else {
            None
        }
    }

    /// Drops the sort, restoring dataset order.
    pub fn clear_sort(&mut self) {
        if self.sort.take().is_some() {
            self.recompute();
        }
    }

    // -------------------------------------------------------------------------
    // Options and actions
    // -------------------------------------------------------------------------

    /// Choices for a select control, built from the full dataset.
    pub fn filter_options(&self, key: &str) -> Vec<FilterOption> {
        options::build_options(key, &self.full)
    }

    /// The currently selected option for a select control.
    pub fn selected_option(&self, key: &str) -> Option<FilterOption> {
        options::set_value(key, &self.filters)
    }

    /// Binds the configured row actions to the row at `position` in the
    /// visible sequence.
    pub fn bind_actions(&self, position: usize) -> Vec<BoundAction<'_>> {
        match self.visible.get(position) {
            Some(&i) => RowActions::bind(&self.config.actions, &self.full[i]),
            None => Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn search_scope(&self) -> SearchScope<'_> {
        let searchable: Vec<&ColumnSpec> = self.columns.searchable().collect();
        if !searchable.is_empty() {
            SearchScope::Columns(searchable)
        } else if !self.columns.is_empty() {
            SearchScope::Columns(self.columns.iter().collect())
        } else {
            SearchScope::AllFields
        }
    }

    fn recompute(&mut self) {
        let visible = {
            let scope = self.search_scope();
            matching_indices(&self.filters, &self.full, &scope)
        };
        self.visible = visible;
        self.apply_sort();
        if self.page.clamp(self.visible.len()) {
            debug!("Page index clamped to {}", self.page.page_index);
        }
        trace!(
            "Recomputed visible rows: {}/{} ({} active keys)",
            self.visible.len(),
            self.full.len(),
            self.filters.len()
        );
    }

    fn apply_sort(&mut self) {
        let Some(active) = &self.sort else {
            return;
        };
        let Some(column) = self.columns.get(&active.column) else {
            return;
        };

        let mut keyed: Vec<(usize, SortKey)> = self
            .visible
            .iter()
            .map(|&i| (i, column.value(&self.full[i]).sort_key()))
            .collect();
        // sort_by is stable, ties keep their prior order
        keyed.sort_by(|(_, a), (_, b)| sort::compare(a, b, active.direction));
        self.visible = keyed.into_iter().map(|(i, _)| i).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionConfig;
    use crate::config::FilterDecl;
    use crate::model::Value;

    fn controller(page_length: usize) -> TableController {
        let columns = Columns::new(vec![
            ColumnSpec::path("user", "user").searchable().sortable(),
            ColumnSpec::path("amt", "amt").sortable(),
            ColumnSpec::path("date", "date"),
        ])
        .unwrap();
        let config = TableConfig::new()
            .with_page_length(page_length)
            .with_filter(FilterDecl::new("user", FilterKind::Select))
            .with_filter(FilterDecl::new("date", FilterKind::DateRange))
            .with_actions(ActionConfig::new().with_view());
        TableController::new(columns, config).unwrap()
    }

    fn rows(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| {
                Record::new()
                    .set("user", format!("user{}", i % 3))
                    .set("amt", (i as i32) * 10)
            })
            .collect()
    }

    #[test]
    fn test_idle_and_filtered_states() {
        let mut table = controller(10);
        table.on_dataset_replaced(rows(6));
        assert_eq!(table.state(), ControllerState::Idle);

        table.on_filter_change("user", FilterValue::scalar("user1"));
        assert_eq!(table.state(), ControllerState::Filtered);
        assert_eq!(table.visible_len(), 2);

        table.on_filter_change("user", FilterValue::scalar(""));
        assert_eq!(table.state(), ControllerState::Idle);
        assert_eq!(table.visible_len(), 6);
    }

    #[test]
    fn test_filter_change_returns_to_first_page() {
        let mut table = controller(2);
        table.on_dataset_replaced(rows(9));
        table.set_page(3);
        assert_eq!(table.page_index(), 3);

        table.on_filter_change("user", FilterValue::multi(["user0", "user2"]));
        assert_eq!(table.page_index(), 0);
        assert_eq!(table.visible_len(), 6);
    }

    #[test]
    fn test_set_page_clamps() {
        let mut table = controller(4);
        table.on_dataset_replaced(rows(10));
        assert_eq!(table.page_count(), 3);
        assert_eq!(table.set_page(99), 2);
        assert_eq!(table.page().len(), 2);
        assert!(!table.next_page());
        assert!(table.prev_page());
        assert_eq!(table.page_index(), 1);
    }

    #[test]
    fn test_dataset_shrink_clamps_page() {
        let mut table = controller(2);
        table.on_dataset_replaced(rows(10));
        table.set_page(4);

        table.on_dataset_replaced(rows(3));
        assert_eq!(table.page_index(), 1);

        table.on_dataset_replaced(Vec::new());
        assert_eq!(table.page_index(), 0);
        assert_eq!(table.page_count(), 0);
        assert!(table.page().is_empty());
    }

    #[test]
    fn test_sort_is_stable_and_retained() {
        let mut table = controller(10);
        table.on_dataset_replaced(rows(6));

        assert!(table.on_sort("user", Direction::Desc));
        let amts: Vec<_> = table
            .visible()
            .iter()
            .map(|r| r.get_long("amt").unwrap().unwrap())
            .collect();
        // user2 rows first, ties in dataset order
        assert_eq!(amts, vec![20, 50, 10, 40, 0, 30]);

        table.on_filter_change("user", FilterValue::multi(["user0", "user1"]));
        let users: Vec<_> = table
            .visible()
            .iter()
            .map(|r| r.get_string("user").unwrap().unwrap().to_string())
            .collect();
        assert_eq!(users, vec!["user1", "user1", "user0", "user0"]);
    }

    #[test]
    fn test_sort_rejects_unsortable_columns() {
        let mut table = controller(10);
        table.on_dataset_replaced(rows(3));
        assert!(!table.on_sort("date", Direction::Asc));
        assert!(!table.on_sort("nope", Direction::Asc));
        assert!(table.sort().is_none());
    }

    #[test]
    fn test_sort_loosely_typed_column() {
        let mut table = controller(10);
        let data: Vec<Record> = (0..300i64)
            .map(|i| {
                let amt = match i % 5 {
                    0 => Value::from(i),
                    1 => Value::from(i.to_string()),
                    2 => Value::from(format!("2024-01-{:02}", i % 28 + 1)),
                    3 => Value::from(format!("note {}", i)),
                    _ => Value::Null,
                };
                Record::new().set("user", format!("user{}", i)).set("amt", amt)
            })
            .collect();
        table.on_dataset_replaced(data);

        assert!(table.on_sort("amt", Direction::Asc));
        let keys: Vec<SortKey> = table
            .visible()
            .iter()
            .map(|r| r.get("amt").cloned().unwrap_or_default().sort_key())
            .collect();
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(keys[0], SortKey::Number(rust_decimal::Decimal::from(0i64)));
        assert_eq!(keys[1], SortKey::Number(rust_decimal::Decimal::from(1i64)));

        assert!(table.on_sort("amt", Direction::Desc));
        let last = table.visible()[table.visible_len() - 1];
        assert!(last.get("amt").is_some_and(Value::is_null));
    }

    #[test]
    fn test_toggle_and_clear_sort() {
        let mut table = controller(10);
        table.on_dataset_replaced(rows(4));

        assert_eq!(table.toggle_sort("amt"), Some(&Sort::asc("amt")));
        assert_eq!(table.toggle_sort("amt"), Some(&Sort::desc("amt")));
        assert_eq!(
            table.visible()[0].get_long("amt").unwrap(),
            Some(30)
        );

        table.clear_sort();
        assert_eq!(table.visible()[0].get_long("amt").unwrap(), Some(0));
    }

    #[test]
    fn test_search_scoped_to_searchable_columns() {
        let mut table = controller(10);
        table.on_dataset_replaced(rows(6));

        table.on_search_change("USER2");
        assert_eq!(table.visible_len(), 2);

        // amt is not searchable
        table.on_search_change("50");
        assert_eq!(table.visible_len(), 0);
    }

    #[test]
    fn test_reset_notice_names_composite_controls() {
        let mut table = controller(10);
        table.on_dataset_replaced(rows(6));
        table.on_filter_change("user", FilterValue::scalar("user0"));

        let notice = table.on_reset();
        assert_eq!(notice.cleared, vec!["user"]);
        assert!(notice.requires_reset("date"));
        assert!(!notice.requires_reset("user"));
        assert_eq!(table.state(), ControllerState::Idle);
    }

    #[test]
    fn test_replace_if_newer_is_last_write_wins() {
        let mut table = controller(10);
        assert!(table.replace_if_newer(2, rows(5)));
        assert!(!table.replace_if_newer(1, rows(1)));
        assert!(!table.replace_if_newer(2, rows(1)));
        assert_eq!(table.full_len(), 5);
        assert!(table.replace_if_newer(3, rows(2)));
        assert_eq!(table.generation(), Some(3));
    }

    #[test]
    fn test_page_rows_render_cells() {
        let mut table = controller(2);
        table.on_dataset_replaced(rows(3));
        table.set_page(1);

        let page = table.page_rows();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].position, 2);
        assert_eq!(page[0].cells[0], Cell::Text("user2".into()));
        assert_eq!(page[0].cells[2], Cell::Empty);
    }

    #[test]
    fn test_bind_actions_uses_visible_position() {
        let mut table = controller(10);
        table.on_dataset_replaced(rows(6));
        table.on_filter_change("user", FilterValue::scalar("user2"));

        let actions = table.bind_actions(1);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].row.get_long("amt").unwrap(), Some(50));
        assert!(table.bind_actions(2).is_empty());
    }
}
