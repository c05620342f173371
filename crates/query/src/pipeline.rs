//! Pipeline runner - chains the stage executors into a derived view.
//!
//! Rows flow through transform, sort, filter/search and pagination. Distinct
//! values branch off the sorted rows, the footer branches off the filtered
//! rows. The runner is split into a `prepare` half that depends only on the
//! rows and the sort, and a `filter` half that depends on the filter and
//! search state, so callers can cache the first half across transitions
//! that only touch the second.

use crate::executor::{
    clamp_page_index, sort_rows, AggregateExecutor, AggregateResult, DistinctExecutor,
    DistinctValues, FilterExecutor, Page, PaginateExecutor, TransformExecutor,
};
use alloc::vec::Vec;
use tabula_core::schema::ColumnSet;
use tabula_core::Row;

/// Transformed and sorted rows with the distinct values extracted from them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Prepared {
    rows: Vec<Row>,
    distinct: DistinctValues,
}

impl Prepared {
    /// Returns the display rows in sort order.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[inline]
    pub fn distinct(&self) -> &DistinctValues {
        &self.distinct
    }
}

/// Rows surviving the filter and search, with their footer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filtered {
    rows: Vec<Row>,
    footer: Vec<AggregateResult>,
}

impl Filtered {
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[inline]
    pub fn footer(&self) -> &[AggregateResult] {
        &self.footer
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Search and paging input of a pipeline run.
#[derive(Clone, Copy, Debug)]
pub struct ViewQuery<'a> {
    pub search_term: &'a str,
    pub page_index: usize,
    pub page_size: usize,
}

impl<'a> ViewQuery<'a> {
    /// Creates a query for the first page without a search term.
    pub fn new(page_size: usize) -> Self {
        Self {
            search_term: "",
            page_index: 0,
            page_size,
        }
    }

    pub fn search(mut self, term: &'a str) -> Self {
        self.search_term = term;
        self
    }

    pub fn page(mut self, page_index: usize) -> Self {
        self.page_index = page_index;
        self
    }
}

/// Everything the UI layer reads after a pipeline run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DerivedView {
    /// The current page window. Its `total_rows` is the filtered count.
    pub page: Page,
    pub distinct: DistinctValues,
    pub footer: Vec<AggregateResult>,
}

impl DerivedView {
    /// Number of rows surviving filter and search.
    #[inline]
    pub fn filtered_count(&self) -> usize {
        self.page.total_rows
    }

    #[inline]
    pub fn total_pages(&self) -> usize {
        self.page.total_pages
    }
}

/// Runs the view pipeline for one column set.
pub struct PipelineRunner<'a> {
    columns: &'a ColumnSet,
}

impl<'a> PipelineRunner<'a> {
    /// Creates a new pipeline runner.
    pub fn new(columns: &'a ColumnSet) -> Self {
        Self { columns }
    }

    /// Transforms and sorts `rows`, then extracts the distinct values.
    pub fn prepare(&self, rows: &[Row]) -> Prepared {
        let transformed = TransformExecutor::new(self.columns).execute(rows);
        tracing::trace!(rows = transformed.len(), "transform stage");

        let sorted = sort_rows(transformed, self.columns);
        tracing::trace!(rows = sorted.len(), sorted = self.columns.sort_key().is_some(), "sort stage");

        let distinct = DistinctExecutor::new(self.columns).execute(&sorted);
        tracing::trace!(columns = distinct.len(), "distinct stage");

        Prepared {
            rows: sorted,
            distinct,
        }
    }

    /// Applies column filters and the search term, then computes the footer.
    pub fn filter(&self, prepared: &Prepared, search_term: &str) -> Filtered {
        let rows = FilterExecutor::new(self.columns, search_term).execute(&prepared.rows);
        tracing::trace!(input = prepared.rows.len(), output = rows.len(), "filter stage");

        let footer = AggregateExecutor::new(self.columns).execute(&rows);
        tracing::trace!(aggregates = footer.len(), "aggregate stage");

        Filtered { rows, footer }
    }

    /// Finishes a run from prepared rows. The page index is clamped to the
    /// last page of the filtered rows.
    pub fn finish(&self, prepared: &Prepared, query: &ViewQuery<'_>) -> DerivedView {
        let filtered = self.filter(prepared, query.search_term);
        let page_index = clamp_page_index(query.page_index, filtered.len(), query.page_size);
        let page = PaginateExecutor::new(page_index, query.page_size).execute(&filtered.rows);
        tracing::trace!(page = page_index, rows = page.rows.len(), "paginate stage");

        DerivedView {
            page,
            distinct: prepared.distinct.clone(),
            footer: filtered.footer,
        }
    }

    /// Runs the whole pipeline over raw rows.
    pub fn run(&self, rows: &[Row], query: &ViewQuery<'_>) -> DerivedView {
        let prepared = self.prepare(rows);
        self.finish(&prepared, query)
    }
}
