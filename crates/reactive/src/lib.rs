//! Tabula Reactive - the view state controller for Tabula.
//!
//! `TableView` owns a row collection and the session state of a table
//! (sort, column filters, search term, page size and page index). Each
//! operation is a transition from one `ViewState` to the next; after a
//! transition the derived view is recomputed and subscribers receive a
//! `ViewChange`.
//!
//! - `options`: `ViewOptions`, the configuration a view is created with
//! - `state`: `ViewState`, the session state swapped in on every transition
//! - `change`: `ViewChange` notifications
//! - `subscription`: Callback registry
//! - `table_view`: The controller
//!
//! # Example
//!
//! ```
//! use tabula_core::schema::{Column, FilterSpec};
//! use tabula_core::{FilterType, Row, Value};
//! use tabula_reactive::{TableView, ViewOptions};
//!
//! let rows = vec![
//!     Row::from_pairs(1, [("done", Value::Boolean(true))]),
//!     Row::from_pairs(2, [("done", Value::Boolean(false))]),
//!     Row::from_pairs(3, [("done", Value::Boolean(true))]),
//! ];
//! let columns = [Column::new("done", "Done").with_filter(FilterSpec::new())];
//! let mut view = TableView::new(rows, &columns, ViewOptions::default()).unwrap();
//!
//! view.set_column_filter("done", vec![Value::Boolean(true)], FilterType::Equal);
//! assert_eq!(view.filtered_count(), 2);
//!
//! view.toggle_filter_mode("done");
//! assert_eq!(view.filtered_count(), 1);
//! ```

#![no_std]

extern crate alloc;

pub mod change;
pub mod options;
pub mod state;
pub mod subscription;
pub mod table_view;

pub use change::{ChangeKind, ViewChange};
pub use options::{ViewOptions, DEFAULT_PAGE_SIZE_OPTIONS};
pub use state::ViewState;
pub use subscription::{ChangeCallback, Subscription, SubscriptionId, SubscriptionManager};
pub use table_view::TableView;
