//! Benchmarks for the compound-engine pipeline and query path.
//!
//! Run with: cargo bench -p compound-engine

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use compound_core::CellValue;
use compound_engine::{
    compound, extract, query, ColumnMap, DateSystem, NormalizedPoint, PageRequest, QueryParams,
    SeriesStore,
};
use compound_traits::TableRow;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

/// First serial is 1990-01-02 in the 1900 date system.
const FIRST_SERIAL: f64 = 32_875.0;

fn daily_return(i: usize) -> f64 {
    // Deterministic values in roughly [-2.5, 2.5).
    ((i * 7919) % 5000) as f64 / 1000.0 - 2.5
}

fn raw_rows(n: usize) -> Vec<TableRow> {
    (0..n)
        .map(|i| {
            let date = match i % 3 {
                0 => CellValue::Number(FIRST_SERIAL + i as f64),
                1 => CellValue::Number(FIRST_SERIAL + i as f64 + 0.5),
                _ => CellValue::Text(format!("{}/{}/{}", (i % 12) + 1, (i % 28) + 1, 1990 + i / 336)),
            };
            TableRow::new()
                .with_cell("ReferenceDate", date)
                .with_cell("DailyReturn", daily_return(i))
        })
        .collect()
}

fn normalized(n: usize) -> Vec<NormalizedPoint> {
    extract(&raw_rows(n), &ColumnMap::default(), DateSystem::Excel1900)
}

// =============================================================================
// PIPELINE BENCHMARKS
// =============================================================================

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    for size in [1_000usize, 10_000] {
        let rows = raw_rows(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| extract(black_box(rows), &ColumnMap::default(), DateSystem::Excel1900));
        });
    }

    group.finish();
}

fn bench_compound(c: &mut Criterion) {
    let mut group = c.benchmark_group("compound");

    for size in [1_000usize, 10_000] {
        let points = normalized(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &points, |b, points| {
            b.iter(|| compound(black_box(points)));
        });
    }

    group.finish();
}

// =============================================================================
// QUERY BENCHMARKS
// =============================================================================

fn bench_query(c: &mut Criterion) {
    let store = SeriesStore::from_points(normalized(10_000));
    let series = store.series();
    let start = series.points()[2_000].date.as_str().to_string();
    let end = series.points()[8_000].date.as_str().to_string();

    let mut group = c.benchmark_group("query");

    group.bench_function("first_page", |b| {
        let request = PageRequest::default();
        b.iter(|| query(black_box(series), black_box(&request)).points.len());
    });

    group.bench_function("date_range_deep_page", |b| {
        let request = PageRequest::new(25, 3_000).with_range(Some(&start), Some(&end));
        b.iter(|| query(black_box(series), black_box(&request)).total_count);
    });

    group.bench_function("raw_params_to_response", |b| {
        let params = QueryParams::new()
            .with_limit("100")
            .with_offset("50")
            .with_start(start.clone());
        b.iter(|| store.get_series(black_box(&params)).to_response());
    });

    group.finish();
}

// =============================================================================
// CRITERION GROUPS
// =============================================================================

criterion_group!(pipeline, bench_extract, bench_compound);
criterion_group!(queries, bench_query);

criterion_main!(pipeline, queries);
