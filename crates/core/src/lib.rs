//! Tabula Core - Core types and schema definitions for the Tabula view engine.
//!
//! This crate provides the foundational types shared by every pipeline stage:
//!
//! - `Value`: Field values (Null, Boolean, Int64, Float64, String)
//! - `Row`: A keyed record with a unique identifier
//! - `SortType`, `Direction`, `FilterType`, `AggregateOp`: Schema enumerations
//! - `schema`: Column descriptors and the normalized `ColumnSet`
//! - `Error`: Errors reported while building a view
//!
//! # Example
//!
//! ```rust
//! use tabula_core::{Direction, Row, SortType, Value};
//! use tabula_core::schema::{Column, ColumnSet};
//!
//! let columns = vec![
//!     Column::new("n", "Number").with_sort_type(SortType::Number),
//!     Column::new("note", "Note").visible(false),
//! ];
//! let set = ColumnSet::normalize(&columns).unwrap();
//! assert_eq!(set.len(), 1);
//!
//! let sorted = set.with_sort_toggled("n").unwrap();
//! assert_eq!(sorted.direction_of("n"), Some(Direction::Asc));
//!
//! let row = Row::from_pairs(1, [("n", Value::Int64(3))]);
//! assert_eq!(row.get("n"), Some(&Value::Int64(3)));
//! ```

#![no_std]

extern crate alloc;

mod error;
mod row;
pub mod schema;
mod types;
mod value;

pub use error::{Error, Result};
pub use row::{next_row_id, set_next_row_id, Row, RowId};
pub use types::{AggregateOp, Direction, FilterType, SortType};
pub use value::Value;
