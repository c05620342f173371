//! Schema module for Tabula.
//!
//! This module contains the column schema: column descriptors with their
//! optional filter, aggregate, transform and render capabilities, and the
//! normalized column set consumed by the view pipeline.

mod column;
mod column_set;

pub use column::{Column, FilterSpec, Render, Transform, CELL_PLACEHOLDER};
pub use column_set::{ColumnSet, SortKey};
