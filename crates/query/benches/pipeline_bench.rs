//! Benchmarks for the view pipeline.
//!
//! These benchmarks measure pure execution time by:
//! 1. Using iter_batched to exclude setup from measurement
//! 2. Using shuffled data to avoid sorted-input optimizations
//!
//! End-to-end benchmarks use PipelineRunner to measure a full recompute,
//! and the `finish` benchmarks measure a search/page transition that reuses
//! prepared rows.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use tabula_core::schema::{Column, ColumnSet, FilterSpec};
use tabula_core::{AggregateOp, Direction, Row, SortType, Value};
use tabula_query::executor::{FilterExecutor, SortExecutor};
use tabula_query::pipeline::{PipelineRunner, ViewQuery};

// ============================================================================
// Data Generation Utilities
// ============================================================================

/// Simple LCG for reproducible pseudo-random shuffling
fn shuffle_indices(count: usize, seed: u64) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..count).collect();
    let mut s = seed;
    for i in (1..count).rev() {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        let j = (s as usize) % (i + 1);
        indices.swap(i, j);
    }
    indices
}

/// Creates rows with shuffled order for realistic sort benchmarks
fn create_shuffled_rows(count: usize) -> Vec<Row> {
    shuffle_indices(count, 12345)
        .into_iter()
        .map(|i| {
            Row::from_pairs(
                i as u64,
                [
                    ("id", Value::Int64(i as i64)),
                    ("name", Value::String(format!("name_{}", i))),
                    ("group", Value::Int64((i % 100) as i64)),
                    ("runtime", Value::String(format!("{} d, {} h", i % 30, i % 24))),
                    ("day", Value::String(format!("{:02}.{:02}.{}", i % 28 + 1, i % 12 + 1, 2000 + i % 25))),
                ],
            )
        })
        .collect()
}

fn create_columns() -> ColumnSet {
    ColumnSet::normalize(&[
        Column::new("id", "ID").with_sort_type(SortType::Number),
        Column::new("name", "Name").with_sorted(Direction::Asc),
        Column::new("group", "Group")
            .with_sort_type(SortType::Number)
            .with_filter(FilterSpec::new())
            .with_aggregate(AggregateOp::Avg),
        Column::new("runtime", "Runtime").with_sort_type(SortType::Duration),
        Column::new("day", "Day").with_sort_type(SortType::DayMonthYear),
    ])
    .expect("valid bench schema")
}

// ============================================================================
// Executor Benchmarks
// ============================================================================

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");

    for &(key, sort_type) in &[
        ("id", SortType::Number),
        ("name", SortType::String),
        ("runtime", SortType::Duration),
        ("day", SortType::DayMonthYear),
    ] {
        for &size in &[1_000usize, 10_000] {
            let rows = create_shuffled_rows(size);
            let executor = SortExecutor::new(key, sort_type, Direction::Asc);
            group.bench_with_input(BenchmarkId::new(key, size), &size, |b, _| {
                b.iter_batched(
                    || rows.clone(),
                    |input| black_box(executor.execute(input)),
                    BatchSize::LargeInput,
                )
            });
        }
    }

    group.finish();
}

fn bench_filter_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_search");
    let columns = create_columns()
        .with_filter("group", (0..10).map(Value::Int64).collect(), Default::default())
        .expect("group is a column");

    for &size in &[1_000usize, 10_000] {
        let rows = create_shuffled_rows(size);
        group.bench_with_input(BenchmarkId::new("filter_and_search", size), &size, |b, _| {
            let executor = FilterExecutor::new(&columns, "name_1");
            b.iter(|| black_box(executor.execute(&rows)))
        });
    }

    group.finish();
}

// ============================================================================
// End-to-End Benchmarks
// ============================================================================

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let columns = create_columns();
    let runner = PipelineRunner::new(&columns);

    for &size in &[1_000usize, 10_000] {
        let rows = create_shuffled_rows(size);

        group.bench_with_input(BenchmarkId::new("run", size), &size, |b, _| {
            b.iter(|| black_box(runner.run(&rows, &ViewQuery::new(20).page(3))))
        });

        let prepared = runner.prepare(&rows);
        group.bench_with_input(BenchmarkId::new("finish_search", size), &size, |b, _| {
            b.iter(|| black_box(runner.finish(&prepared, &ViewQuery::new(20).search("name_4"))))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_sort,
    bench_filter_search,
    bench_pipeline,
);
criterion_main!(benches);
