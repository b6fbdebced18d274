//! Property-based tests for series invariants.
//!
//! These tests verify properties that must hold for any input:
//! - Extracted and compounded dates never decrease
//! - Rebuilding from identical rows is bit-identical
//! - Page sizes follow `min(limit, max(0, total - offset))`
//! - Single-day ranges select exactly that day

use proptest::prelude::*;

use compound_core::CellValue;
use compound_engine::{
    compound, extract, query, ColumnMap, DateSystem, PageRequest, QueryParams, Series,
    SeriesStore,
};
use compound_traits::TableRow;

// =============================================================================
// STRATEGIES
// =============================================================================

/// A date cell in one of the shapes a workbook produces, or garbage.
fn date_cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        (32_875u32..33_240).prop_map(|s| CellValue::Number(f64::from(s))),
        (32_875u32..33_240, 0.0f64..1.0).prop_map(|(s, f)| CellValue::Number(f64::from(s) + f)),
        (1u32..=12, 1u32..=28, 1990i32..1992)
            .prop_map(|(m, d, y)| CellValue::Text(format!("{m}/{d}/{y}"))),
        Just(CellValue::Empty),
        "[a-z ]{0,8}".prop_map(CellValue::Text),
    ]
}

/// A return cell: mostly numbers, sometimes text or blanks.
fn return_cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        4 => (-10.0f64..10.0).prop_map(CellValue::Number),
        1 => (-10.0f64..10.0).prop_map(|r| CellValue::Text(format!("{r}"))),
        1 => Just(CellValue::Text("n/a".to_string())),
        1 => Just(CellValue::Empty),
    ]
}

fn raw_rows() -> impl Strategy<Value = Vec<TableRow>> {
    prop::collection::vec(
        (date_cell(), return_cell()).prop_map(|(date, ret)| {
            TableRow::new()
                .with_cell("ReferenceDate", date)
                .with_cell("DailyReturn", ret)
        }),
        0..120,
    )
}

fn build(rows: &[TableRow]) -> Series {
    compound(&extract(rows, &ColumnMap::default(), DateSystem::Excel1900))
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn dates_are_monotonic(rows in raw_rows()) {
        let series = build(&rows);
        for pair in series.points().windows(2) {
            prop_assert!(pair[0].date <= pair[1].date);
        }
    }

    #[test]
    fn compound_orders_reversed_points(rows in raw_rows()) {
        let mut points = extract(&rows, &ColumnMap::default(), DateSystem::Excel1900);
        points.reverse();
        let series = compound(&points);
        prop_assert_eq!(series.len(), points.len());
        for pair in series.points().windows(2) {
            prop_assert!(pair[0].date <= pair[1].date);
        }
    }

    #[test]
    fn rebuild_is_bit_identical(rows in raw_rows()) {
        let a = build(&rows);
        let b = build(&rows);
        prop_assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            prop_assert_eq!(&x.date, &y.date);
            prop_assert_eq!(x.total_return.to_bits(), y.total_return.to_bits());
        }
    }

    #[test]
    fn retained_returns_are_finite(rows in raw_rows()) {
        let series = build(&rows);
        prop_assert!(series.len() <= rows.len());
        prop_assert!(series.iter().all(|p| p.daily_return_percent.is_finite()));
    }

    #[test]
    fn page_length_matches_window(rows in raw_rows(), limit in 0usize..60, offset in 0usize..150) {
        let series = build(&rows);
        let page = query(&series, &PageRequest::new(limit, offset));
        let expected = limit.min(page.total_count.saturating_sub(offset));
        prop_assert_eq!(page.points.len(), expected);
        prop_assert_eq!(page.total_count, series.len());
    }

    #[test]
    fn single_day_range_selects_that_day(rows in raw_rows(), pick in any::<prop::sample::Index>()) {
        let series = build(&rows);
        prop_assume!(!series.is_empty());

        let date = series.points()[pick.index(series.len())].date.clone();
        let request = PageRequest::new(usize::MAX, 0).with_range(Some(date.as_str()), Some(date.as_str()));
        let page = query(&series, &request);

        let expected = series.iter().filter(|p| p.date == date).count();
        prop_assert_eq!(page.total_count, expected);
        prop_assert!(page.points.iter().all(|p| p.date == date));
        prop_assert_eq!(page.start_date, Some(&date));
        prop_assert_eq!(page.end_date, Some(&date));
    }

    #[test]
    fn filtered_range_is_a_subset(rows in raw_rows(), a in 32_875u32..33_240, b in 32_875u32..33_240) {
        let series = build(&rows);
        let (lo, hi) = (a.min(b), a.max(b));
        let bound = |s: u32| {
            DateSystem::Excel1900
                .decode_serial(f64::from(s))
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        };
        let (start, end) = (bound(lo), bound(hi));

        let page = query(&series, &PageRequest::new(usize::MAX, 0).with_range(Some(&start), Some(&end)));
        let expected = series
            .iter()
            .filter(|p| p.date.as_str() >= start.as_str() && p.date.as_str() <= end.as_str())
            .count();
        prop_assert_eq!(page.total_count, expected);
        if expected == 0 {
            prop_assert!(page.start_date.is_none() && page.end_date.is_none());
        }
    }

    #[test]
    fn raw_params_never_fail(limit in ".{0,6}", offset in ".{0,6}", start in ".{0,12}") {
        let store = SeriesStore::from_points(Vec::new());
        let params = QueryParams::new()
            .with_limit(limit)
            .with_offset(offset)
            .with_start(start);
        let page = store.get_series(&params);
        prop_assert_eq!(page.total_count, 0);
    }
}
