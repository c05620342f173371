//! Pipeline stage executors.

mod aggregate;
mod distinct;
mod filter;
mod paginate;
mod sort;
mod transform;

pub use aggregate::{compute_aggregate, AggregateExecutor, AggregateResult, AggregateValue};
pub use distinct::{DistinctExecutor, DistinctValues};
pub use filter::{filter_rows, FilterExecutor};
pub use paginate::{clamp_page_index, total_pages, Page, PageInfo, PaginateExecutor};
pub use sort::{sort_rows, SortExecutor};
pub use transform::{display_value, TransformExecutor};
