//! View state owned by the controller.

use alloc::string::String;
use tabula_core::schema::ColumnSet;
use tabula_core::Direction;

/// The mutable session state of a table view.
///
/// Sort and filter state live inside `columns`; every transition builds a
/// new `ViewState` and swaps it in whole.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    pub search_term: String,
    pub page_index: usize,
    pub page_size: usize,
    pub columns: ColumnSet,
}

impl ViewState {
    /// Creates the state for a fresh view on the first page.
    pub fn new(columns: ColumnSet, page_size: usize) -> Self {
        Self {
            search_term: String::new(),
            page_index: 0,
            page_size,
            columns,
        }
    }

    /// Returns the sort direction of `key`, if it is the sorted column.
    #[inline]
    pub fn sort_direction(&self, key: &str) -> Option<Direction> {
        self.columns.direction_of(key)
    }

    /// Returns true if any column filter restricts rows or a search is set.
    pub fn is_filtered(&self) -> bool {
        !self.search_term.is_empty()
            || self
                .columns
                .filterable()
                .any(|c| c.filter().map_or(false, |f| f.is_active()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use tabula_core::schema::{Column, FilterSpec};
    use tabula_core::{FilterType, Value};

    #[test]
    fn test_view_state_new() {
        let columns = ColumnSet::normalize(&[Column::new("a", "A").with_sorted(Direction::Desc)]).unwrap();
        let state = ViewState::new(columns, 20);
        assert_eq!(state.search_term, "");
        assert_eq!(state.page_index, 0);
        assert_eq!(state.page_size, 20);
        assert_eq!(state.sort_direction("a"), Some(Direction::Desc));
        assert!(!state.is_filtered());
    }

    #[test]
    fn test_is_filtered() {
        let columns = ColumnSet::normalize(&[Column::new("a", "A").with_filter(FilterSpec::new())]).unwrap();
        let mut state = ViewState::new(columns.clone(), 10);
        state.search_term = "x".into();
        assert!(state.is_filtered());

        let filtered = columns
            .with_filter("a", vec![Value::Int64(1)], FilterType::Equal)
            .unwrap();
        assert!(ViewState::new(filtered, 10).is_filtered());
    }
}
