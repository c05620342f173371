//! Aggregate executor.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use libm::trunc;
use tabula_core::schema::ColumnSet;
use tabula_core::{AggregateOp, Row};

/// The computed value of a footer aggregate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AggregateValue {
    /// Nothing to aggregate.
    Empty,
    /// Row count.
    Count(usize),
    /// Numeric result, unrounded. `Display` applies the footer precision.
    Number(f64),
}

/// A footer aggregate of one column.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregateResult {
    /// Key of the aggregated column.
    pub key: String,
    pub op: AggregateOp,
    pub value: AggregateValue,
}

impl fmt::Display for AggregateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.op.label();
        match self.value {
            AggregateValue::Empty => Ok(()),
            AggregateValue::Count(n) => write!(f, "{}: {}", label, n),
            AggregateValue::Number(x) => match self.op {
                AggregateOp::Avg => write!(f, "{}: {:.3}", label, x),
                AggregateOp::Sum if is_fractional(x) => write!(f, "{}: {:.3}", label, x),
                _ => write!(f, "{}: {}", label, x),
            },
        }
    }
}

/// Aggregate executor - computes the footer over the filtered rows.
pub struct AggregateExecutor<'a> {
    columns: &'a ColumnSet,
}

impl<'a> AggregateExecutor<'a> {
    /// Creates a new aggregate executor.
    pub fn new(columns: &'a ColumnSet) -> Self {
        Self { columns }
    }

    /// Executes the aggregation, one result per aggregated column in schema
    /// order.
    pub fn execute(&self, input: &[Row]) -> Vec<AggregateResult> {
        self.columns
            .aggregated()
            .filter_map(|column| {
                let op = column.aggregate()?;
                Some(AggregateResult {
                    key: column.key().into(),
                    op,
                    value: compute_aggregate(op, column.key(), input),
                })
            })
            .collect()
    }
}

/// Computes a single aggregate over the display values of `key`.
///
/// Non-numeric values are skipped by every numeric operator. Any operator
/// over an empty input is `Empty`.
pub fn compute_aggregate(op: AggregateOp, key: &str, rows: &[Row]) -> AggregateValue {
    if rows.is_empty() {
        return AggregateValue::Empty;
    }

    let numbers = || rows.iter().filter_map(move |row| row.get(key)?.as_number());

    match op {
        AggregateOp::Count => AggregateValue::Count(rows.len()),
        AggregateOp::Sum => AggregateValue::Number(numbers().sum()),
        AggregateOp::Avg => {
            // Divided by every filtered row, numeric or not.
            let sum: f64 = numbers().sum();
            AggregateValue::Number(sum / rows.len() as f64)
        }
        AggregateOp::Min => numbers()
            .fold(None, |acc: Option<f64>, x| Some(acc.map_or(x, |m| m.min(x))))
            .map_or(AggregateValue::Empty, AggregateValue::Number),
        AggregateOp::Max => numbers()
            .fold(None, |acc: Option<f64>, x| Some(acc.map_or(x, |m| m.max(x))))
            .map_or(AggregateValue::Empty, AggregateValue::Number),
    }
}

#[inline]
fn is_fractional(x: f64) -> bool {
    x.is_finite() && x - trunc(x) != 0.0
}
