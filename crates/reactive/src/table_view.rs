//! The table view controller.
//!
//! `TableView` owns the rows, the reset snapshot of the normalized columns
//! and the live `ViewState`. Every operation builds the next state, reruns
//! the pipeline stages that depend on what changed, clamps the page index
//! and swaps the result in before any subscriber is notified.
//!
//! The transformed and sorted rows are cached together with their distinct
//! values. A new row set, a new sort key or a change in which columns are
//! filterable rebuilds that cache; search, filter and paging transitions
//! rerun the filter and page stages only.

use crate::change::{ChangeKind, ViewChange};
use crate::options::ViewOptions;
use crate::state::ViewState;
use crate::subscription::{SubscriptionId, SubscriptionManager};
use alloc::string::String;
use alloc::vec::Vec;
use tabula_core::schema::{Column, ColumnSet};
use tabula_core::{FilterType, Result, Row, Value};
use tabula_query::executor::{
    clamp_page_index, total_pages, AggregateResult, DistinctValues, Page, PageInfo,
    PaginateExecutor,
};
use tabula_query::pipeline::{DerivedView, Filtered, PipelineRunner, Prepared};

/// A stateful, presentation-ready view over a row collection.
pub struct TableView {
    rows: Vec<Row>,
    options: ViewOptions,
    /// Normalized columns restored by `reset`.
    snapshot: ColumnSet,
    state: ViewState,
    prepared: Prepared,
    filtered: Filtered,
    page: Page,
    subscriptions: SubscriptionManager,
}

impl TableView {
    /// Creates a view over `rows`.
    ///
    /// Fails when two visible columns share a key or the configured page
    /// size is zero.
    pub fn new(rows: Vec<Row>, columns: &[Column], options: ViewOptions) -> Result<Self> {
        options.validate()?;
        let snapshot = ColumnSet::normalize(columns)?;
        let page_size = initial_page_size(&options, rows.len());
        let state = ViewState::new(snapshot.clone(), page_size);

        let mut view = Self {
            rows,
            options,
            snapshot,
            state,
            prepared: Prepared::default(),
            filtered: Filtered::default(),
            page: Page::default(),
            subscriptions: SubscriptionManager::new(),
        };
        view.refresh(true);

        tracing::debug!(
            rows = view.rows.len(),
            columns = view.state.columns.len(),
            page_size,
            "created table view"
        );
        Ok(view)
    }

    /// Creates a view with the default options.
    pub fn with_defaults(rows: Vec<Row>, columns: &[Column]) -> Result<Self> {
        Self::new(rows, columns, ViewOptions::default())
    }

    // ---------------------------------------------------------------------
    // Read side
    // ---------------------------------------------------------------------

    /// Returns the visible columns in schema order.
    #[inline]
    pub fn visible_columns(&self) -> &[Column] {
        self.state.columns.columns()
    }

    /// Returns the display rows of the current page.
    #[inline]
    pub fn page_rows(&self) -> &[Row] {
        &self.page.rows
    }

    #[inline]
    pub fn page(&self) -> &Page {
        &self.page
    }

    #[inline]
    pub fn page_info(&self) -> PageInfo {
        self.page.info()
    }

    /// Number of rows surviving filters and search.
    #[inline]
    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    #[inline]
    pub fn total_pages(&self) -> usize {
        self.page.total_pages
    }

    /// Distinct display values of every filterable column, taken from the
    /// sorted rows before filtering.
    #[inline]
    pub fn distinct_values(&self) -> &DistinctValues {
        self.prepared.distinct()
    }

    /// Filter options of `key` whose text contains `needle`, ignoring case.
    pub fn filter_options(&self, key: &str, needle: &str) -> Vec<Value> {
        self.prepared.distinct().options(key, needle)
    }

    /// Footer aggregates over the filtered rows.
    #[inline]
    pub fn footer(&self) -> &[AggregateResult] {
        self.filtered.footer()
    }

    #[inline]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    #[inline]
    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    /// Returns the raw rows the view was built from.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns an owned copy of everything the UI reads.
    pub fn view(&self) -> DerivedView {
        DerivedView {
            page: self.page.clone(),
            distinct: self.prepared.distinct().clone(),
            footer: self.filtered.footer().to_vec(),
        }
    }

    // ---------------------------------------------------------------------
    // Subscriptions
    // ---------------------------------------------------------------------

    /// Registers a callback invoked after every state-changing operation.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&ViewChange) + 'static,
    {
        self.subscriptions.subscribe(callback)
    }

    /// Removes a subscription. Returns true if it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.unsubscribe(id)
    }

    /// Pauses or resumes a subscription. A paused callback stays registered
    /// but misses every change until resumed. Returns false for unknown ids.
    pub fn set_subscription_paused(&mut self, id: SubscriptionId, paused: bool) -> bool {
        self.subscriptions.set_paused(id, paused)
    }

    #[inline]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    // ---------------------------------------------------------------------
    // Search and paging
    // ---------------------------------------------------------------------

    /// Sets the free-text search term. Ignored when the view is not
    /// searchable.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        if !self.options.searchable {
            tracing::warn!("search is disabled for this view");
            return false;
        }
        let next = ViewState {
            search_term: term.into(),
            ..self.state.clone()
        };
        self.commit(ChangeKind::Search, next)
    }

    /// Sets the page size. Zero is ignored, as is any size while paging is
    /// disabled.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if page_size == 0 {
            tracing::warn!("ignoring page size 0");
            return false;
        }
        if !self.options.paging {
            tracing::warn!(page_size, "paging is disabled for this view");
            return false;
        }
        let next = ViewState {
            page_size,
            ..self.state.clone()
        };
        self.commit(ChangeKind::PageSize, next)
    }

    /// Moves to `page_index`, clamped to the last page.
    pub fn set_page_index(&mut self, page_index: usize) -> bool {
        let page_index = clamp_page_index(page_index, self.filtered.len(), self.state.page_size);
        let next = ViewState {
            page_index,
            ..self.state.clone()
        };
        self.commit(ChangeKind::PageIndex, next)
    }

    pub fn first_page(&mut self) -> bool {
        self.set_page_index(0)
    }

    pub fn previous_page(&mut self) -> bool {
        self.set_page_index(self.state.page_index.saturating_sub(1))
    }

    pub fn next_page(&mut self) -> bool {
        self.set_page_index(self.state.page_index.saturating_add(1))
    }

    pub fn last_page(&mut self) -> bool {
        let last = total_pages(self.filtered.len(), self.state.page_size).saturating_sub(1);
        self.set_page_index(last)
    }

    // ---------------------------------------------------------------------
    // Sort and filters
    // ---------------------------------------------------------------------

    /// Cycles the sort of `key`: a new column sorts ascending, the sorted
    /// column flips direction. Non-sortable and unknown columns are ignored.
    pub fn toggle_sort(&mut self, key: &str) -> bool {
        let Some(columns) = self.columns_or_warn(key, |c| c.with_sort_toggled(key)) else {
            return false;
        };
        self.commit_columns(ChangeKind::Sort, columns)
    }

    /// Replaces the selected values and mode of the filter on `key`.
    pub fn set_column_filter(&mut self, key: &str, values: Vec<Value>, filter_type: FilterType) -> bool {
        let Some(columns) = self.columns_or_warn(key, |c| c.with_filter(key, values, filter_type)) else {
            return false;
        };
        self.commit_columns(ChangeKind::Filter, columns)
    }

    /// Empties the selected values of the filter on `key`, keeping its mode.
    pub fn clear_column_filter(&mut self, key: &str) -> bool {
        let Some(columns) = self.columns_or_warn(key, |c| c.with_filter_cleared(key)) else {
            return false;
        };
        self.commit_columns(ChangeKind::Filter, columns)
    }

    /// Selects `value` in the filter on `key`, or deselects it if selected.
    pub fn toggle_filter_value(&mut self, key: &str, value: &Value) -> bool {
        let Some(columns) = self.columns_or_warn(key, |c| c.with_filter_value_toggled(key, value)) else {
            return false;
        };
        self.commit_columns(ChangeKind::Filter, columns)
    }

    /// Flips the filter on `key` between `equal` and `not-equal`.
    pub fn toggle_filter_mode(&mut self, key: &str) -> bool {
        let Some(columns) = self.columns_or_warn(key, |c| c.with_filter_mode_toggled(key)) else {
            return false;
        };
        self.commit_columns(ChangeKind::Filter, columns)
    }

    // ---------------------------------------------------------------------
    // Reset and data
    // ---------------------------------------------------------------------

    /// Restores the empty search, the first page, the initial page size and
    /// the normalized columns. Ignored when the view is not resettable.
    pub fn reset(&mut self) -> bool {
        if !self.options.resettable {
            tracing::warn!("reset is disabled for this view");
            return false;
        }
        let next = ViewState::new(
            self.snapshot.clone(),
            initial_page_size(&self.options, self.rows.len()),
        );
        self.commit(ChangeKind::Reset, next)
    }

    /// Replaces the row collection and recomputes every derived value.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        if !self.options.paging {
            self.state.page_size = initial_page_size(&self.options, self.rows.len());
        }
        self.refresh(true);
        tracing::debug!(rows = self.rows.len(), "replaced rows");
        self.notify(ChangeKind::Rows);
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn columns_or_warn<F>(&self, key: &str, transition: F) -> Option<ColumnSet>
    where
        F: FnOnce(&ColumnSet) -> Option<ColumnSet>,
    {
        if self.state.columns.get(key).is_none() {
            tracing::warn!(column = key, "unknown column");
            return None;
        }
        transition(&self.state.columns)
    }

    fn commit_columns(&mut self, kind: ChangeKind, columns: ColumnSet) -> bool {
        let next = ViewState {
            columns,
            ..self.state.clone()
        };
        self.commit(kind, next)
    }

    /// Swaps in `next` and notifies subscribers. Returns false, notifying
    /// nobody, when `next` equals the current state.
    fn commit(&mut self, kind: ChangeKind, next: ViewState) -> bool {
        if next == self.state {
            tracing::trace!(%kind, "transition left the state unchanged");
            return false;
        }

        let rebuild = needs_rebuild(&self.state.columns, &next.columns);
        self.state = next;
        self.refresh(rebuild);

        tracing::debug!(
            %kind,
            filtered = self.filtered.len(),
            page = self.state.page_index,
            rebuilt = rebuild,
            "view transition"
        );
        self.notify(kind);
        true
    }

    /// Reruns the pipeline. `rebuild` also reruns transform, sort and
    /// distinct extraction; otherwise the cached prepared rows are reused.
    fn refresh(&mut self, rebuild: bool) {
        let runner = PipelineRunner::new(&self.state.columns);
        if rebuild {
            self.prepared = runner.prepare(&self.rows);
        }
        self.filtered = runner.filter(&self.prepared, &self.state.search_term);

        self.state.page_index =
            clamp_page_index(self.state.page_index, self.filtered.len(), self.state.page_size);
        self.page = PaginateExecutor::new(self.state.page_index, self.state.page_size)
            .execute(self.filtered.rows());
    }

    fn notify(&self, kind: ChangeKind) {
        if self.subscriptions.is_empty() {
            return;
        }
        let change = ViewChange {
            kind,
            state: self.state.clone(),
            filtered_count: self.filtered.len(),
            total_pages: self.page.total_pages,
        };
        self.subscriptions.notify_all(&change);
    }
}

/// True when moving from `current` to `next` invalidates the prepared rows:
/// the sort key or the set of columns carrying distinct values changed.
fn needs_rebuild(current: &ColumnSet, next: &ColumnSet) -> bool {
    current.sort_key() != next.sort_key()
        || !current.filterable().map(Column::key).eq(next.filterable().map(Column::key))
}

/// Page size a view starts with and returns to on reset.
fn initial_page_size(options: &ViewOptions, row_count: usize) -> usize {
    if options.paging {
        options.page_size
    } else {
        row_count.max(1)
    }
}
