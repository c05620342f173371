//! Tabula Query - the derived-view pipeline for Tabula.
//!
//! This crate turns raw rows and a normalized column set into a
//! presentation-ready view:
//!
//! - `compare`: Type-aware value comparison driving the sort stage
//! - `parse`: Duration and formatted-date parsers used by the comparator
//! - `transformers`: Built-in column transforms for ISO dates and durations
//! - `executor`: Stage executors (transform, sort, distinct, filter, paginate, aggregate)
//! - `pipeline`: The runner chaining the stages into a `DerivedView`
//!
//! # Example
//!
//! ```
//! use tabula_core::schema::{Column, ColumnSet};
//! use tabula_core::{Direction, Row, SortType, Value};
//! use tabula_query::pipeline::{PipelineRunner, ViewQuery};
//!
//! let columns = ColumnSet::normalize(&[
//!     Column::new("n", "N").with_sort_type(SortType::Number).with_sorted(Direction::Asc),
//! ]).unwrap();
//! let rows = vec![
//!     Row::from_pairs(1, [("n", Value::Int64(3))]),
//!     Row::from_pairs(2, [("n", Value::Int64(1))]),
//! ];
//!
//! let view = PipelineRunner::new(&columns).run(&rows, &ViewQuery::new(10));
//! assert_eq!(view.page.rows[0].id(), 2);
//! ```

#![no_std]

extern crate alloc;

pub mod compare;
pub mod executor;
pub mod parse;
pub mod pipeline;
pub mod transformers;

pub use compare::compare;
pub use executor::{AggregateResult, AggregateValue, DistinctValues, Page, PageInfo};
pub use pipeline::{DerivedView, PipelineRunner, ViewQuery};
