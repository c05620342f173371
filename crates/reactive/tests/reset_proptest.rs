//! Property-based tests for view transitions.
//!
//! Random operation sequences are applied to a view; reset must always land
//! on the baseline state and paging must stay in range after every step.

use proptest::prelude::*;
use tabula_core::schema::{Column, FilterSpec};
use tabula_core::{AggregateOp, Direction, FilterType, Row, SortType, Value};
use tabula_reactive::TableView;

#[derive(Clone, Debug)]
enum Op {
    ToggleSort(&'static str),
    SetFilter(&'static str, Vec<i64>, FilterType),
    ClearFilter(&'static str),
    ToggleMode(&'static str),
    Search(String),
    PageSize(usize),
    PageIndex(usize),
    Next,
    Previous,
    Last,
}

const KEYS: [&str; 3] = ["a", "b", "missing"];

fn key_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(&KEYS[..])
}

fn filter_type_strategy() -> impl Strategy<Value = FilterType> {
    prop_oneof![Just(FilterType::Equal), Just(FilterType::NotEqual)]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        key_strategy().prop_map(Op::ToggleSort),
        (key_strategy(), prop::collection::vec(0i64..5, 0..3), filter_type_strategy())
            .prop_map(|(k, v, t)| Op::SetFilter(k, v, t)),
        key_strategy().prop_map(Op::ClearFilter),
        key_strategy().prop_map(Op::ToggleMode),
        "[0-9]{0,2}".prop_map(Op::Search),
        (0usize..8).prop_map(Op::PageSize),
        (0usize..20).prop_map(Op::PageIndex),
        Just(Op::Next),
        Just(Op::Previous),
        Just(Op::Last),
    ]
}

fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec((0i64..5, 0i64..50), 0..40).prop_map(|cells| {
        cells
            .into_iter()
            .enumerate()
            .map(|(i, (a, b))| Row::from_pairs(i as u64, [("a", a), ("b", b)]))
            .collect()
    })
}

fn columns() -> Vec<Column> {
    vec![
        Column::new("a", "A")
            .with_sort_type(SortType::Number)
            .with_sorted(Direction::Asc)
            .with_filter(FilterSpec::new()),
        Column::new("b", "B")
            .with_sort_type(SortType::Number)
            .with_filter(FilterSpec::new())
            .with_aggregate(AggregateOp::Sum),
    ]
}

fn apply(view: &mut TableView, op: &Op) {
    match op {
        Op::ToggleSort(k) => {
            view.toggle_sort(k);
        }
        Op::SetFilter(k, values, t) => {
            let values = values.iter().copied().map(Value::Int64).collect();
            view.set_column_filter(k, values, *t);
        }
        Op::ClearFilter(k) => {
            view.clear_column_filter(k);
        }
        Op::ToggleMode(k) => {
            view.toggle_filter_mode(k);
        }
        Op::Search(term) => {
            view.set_search_term(term.clone());
        }
        Op::PageSize(n) => {
            view.set_page_size(*n);
        }
        Op::PageIndex(i) => {
            view.set_page_index(*i);
        }
        Op::Next => {
            view.next_page();
        }
        Op::Previous => {
            view.previous_page();
        }
        Op::Last => {
            view.last_page();
        }
    }
}

proptest! {
    /// Reset restores the baseline regardless of the preceding operations.
    #[test]
    fn prop_reset_restores_baseline(
        rows in rows_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..25)
    ) {
        let mut view = TableView::with_defaults(rows, &columns()).unwrap();
        let baseline = view.state().clone();
        let baseline_ids: Vec<_> = view.page_rows().iter().map(Row::id).collect();

        for op in &ops {
            apply(&mut view, op);
        }
        view.reset();

        prop_assert_eq!(view.state(), &baseline);
        let ids: Vec<_> = view.page_rows().iter().map(Row::id).collect();
        prop_assert_eq!(ids, baseline_ids);
    }

    /// The page index never points past the last page.
    #[test]
    fn prop_page_index_in_range(
        rows in rows_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..25)
    ) {
        let mut view = TableView::with_defaults(rows, &columns()).unwrap();
        for op in &ops {
            apply(&mut view, op);
            let state = view.state();
            prop_assert!(state.page_size > 0);
            prop_assert!(state.page_index < view.total_pages().max(1));
            prop_assert!(view.page_rows().len() <= state.page_size);
            prop_assert!(view.filtered_count() <= view.rows().len());
        }
    }

    /// At most one column is sorted at any time.
    #[test]
    fn prop_single_sort_column(ops in prop::collection::vec(op_strategy(), 0..25)) {
        let rows: Vec<Row> = (0..10u64)
            .map(|i| Row::from_pairs(i, [("a", i as i64), ("b", 10 - i as i64)]))
            .collect();
        let mut view = TableView::with_defaults(rows, &columns()).unwrap();
        for op in &ops {
            apply(&mut view, op);
            let sorted = ["a", "b"]
                .iter()
                .filter(|k| view.state().sort_direction(k).is_some())
                .count();
            prop_assert_eq!(sorted, 1);
        }
    }
}
