//! Filter executor.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use tabula_core::schema::ColumnSet;
use tabula_core::{Row, Value};

/// Filter executor - applies column filters and the free-text search.
///
/// A row survives when every column filter accepts its display value and,
/// for a non-empty search term, at least one visible column contains the
/// term case-insensitively.
pub struct FilterExecutor<'a> {
    columns: &'a ColumnSet,
    needle: String,
}

impl<'a> FilterExecutor<'a> {
    /// Creates a new filter executor.
    pub fn new(columns: &'a ColumnSet, search_term: &str) -> Self {
        Self {
            columns,
            needle: search_term.to_lowercase(),
        }
    }

    /// Executes the filter on the input rows.
    pub fn execute(&self, input: &[Row]) -> Vec<Row> {
        filter_rows(input, |row| self.matches(row))
    }

    /// Returns true if `row` passes every column filter and the search.
    pub fn matches(&self, row: &Row) -> bool {
        self.matches_filters(row) && self.matches_search(row)
    }

    fn matches_filters(&self, row: &Row) -> bool {
        self.columns.filterable().all(|column| match column.filter() {
            Some(spec) => spec.accepts(row.get(column.key()).unwrap_or(&Value::Null)),
            None => true,
        })
    }

    fn matches_search(&self, row: &Row) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        self.columns.columns().iter().any(|column| match row.get(column.key()) {
            Some(Value::String(s)) => s.to_lowercase().contains(&self.needle),
            Some(value) => value.to_string().to_lowercase().contains(&self.needle),
            None => false,
        })
    }
}

/// Filters rows using a closure.
pub fn filter_rows<F>(input: &[Row], predicate: F) -> Vec<Row>
where
    F: Fn(&Row) -> bool,
{
    input.iter().filter(|row| predicate(row)).cloned().collect()
}
