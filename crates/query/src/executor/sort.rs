//! Sort executor.

use crate::compare::compare;
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use tabula_core::schema::ColumnSet;
use tabula_core::{Direction, Row, SortType};

/// Sort executor - orders rows by a single column.
///
/// The sort is stable: rows with equal keys keep their input order in both
/// directions.
pub struct SortExecutor {
    key: String,
    sort_type: SortType,
    direction: Direction,
}

impl SortExecutor {
    /// Creates a new sort executor.
    pub fn new(key: impl Into<String>, sort_type: SortType, direction: Direction) -> Self {
        Self {
            key: key.into(),
            sort_type,
            direction,
        }
    }

    /// Creates a sort executor for the active sort of a column set.
    ///
    /// Returns `None` when nothing is sorted.
    pub fn from_columns(columns: &ColumnSet) -> Option<Self> {
        let (column, direction) = columns.sort_column()?;
        Some(Self::new(column.key(), column.sort_type(), direction))
    }

    /// Executes the sort on the input rows.
    pub fn execute(&self, mut input: Vec<Row>) -> Vec<Row> {
        input.sort_by(|a, b| self.compare_rows(a, b));
        input
    }

    fn compare_rows(&self, a: &Row, b: &Row) -> Ordering {
        let cmp = compare(a.get(&self.key), b.get(&self.key), self.sort_type);
        match self.direction {
            Direction::Asc => cmp,
            Direction::Desc => cmp.reverse(),
        }
    }
}

/// Sorts rows by the active sort of `columns`, passing them through when
/// nothing is sorted.
pub fn sort_rows(input: Vec<Row>, columns: &ColumnSet) -> Vec<Row> {
    match SortExecutor::from_columns(columns) {
        Some(executor) => executor.execute(input),
        None => input,
    }
}
