//! Transform executor.

use alloc::vec::Vec;
use tabula_core::schema::{Column, ColumnSet, CELL_PLACEHOLDER};
use tabula_core::{Row, Value};

/// Transform executor - maps raw rows to display rows.
///
/// For every visible column the display value replaces the raw field.
/// Fields outside the visible columns are carried over verbatim, and row
/// order, count and ids are preserved.
pub struct TransformExecutor<'a> {
    columns: &'a ColumnSet,
}

impl<'a> TransformExecutor<'a> {
    /// Creates a new transform executor.
    pub fn new(columns: &'a ColumnSet) -> Self {
        Self { columns }
    }

    /// Executes the transform on the input rows.
    pub fn execute(&self, input: &[Row]) -> Vec<Row> {
        input.iter().map(|row| self.transform_row(row)).collect()
    }

    fn transform_row(&self, row: &Row) -> Row {
        let mut out = row.clone();
        for column in self.columns.columns() {
            out.set(column.key(), display_value(column, row));
        }
        out
    }
}

/// Computes the display value of `column` for a raw row.
pub fn display_value(column: &Column, row: &Row) -> Value {
    let raw = row.get(column.key());

    let display = match column.transform() {
        Some(transform) => transform
            .apply(raw.unwrap_or(&Value::Null), row)
            .filter(|v| !v.is_null()),
        None => raw.filter(|v| !v.is_blank()).cloned(),
    };

    display.unwrap_or_else(placeholder)
}

#[inline]
fn placeholder() -> Value {
    Value::from(CELL_PLACEHOLDER)
}
