//! Compounding Engine.

use std::borrow::Cow;

use compound_core::{NormalizedPoint, SeriesPoint};

use crate::series::Series;

/// Folds daily returns into a cumulative total-return series.
///
/// Points are folded in date order. Input that is not already sorted is
/// stable-sorted on a copy first, so equal dates keep their relative order.
///
/// A growth multiplier starts at `1.0`; for each point it is multiplied by
/// `1 + r / 100` and the point's `total_return` is `growth - 1`. The fold is
/// strictly left to right, and floating-point rounding accumulates across it
/// without correction.
///
/// Output length equals input length. An empty input yields an empty series.
///
/// # Example
///
/// ```
/// use compound_engine::{compound, CanonicalDate, NormalizedPoint};
///
/// let points = vec![
///     NormalizedPoint::new(CanonicalDate::parse("2020-01-01").unwrap(), 10.0),
///     NormalizedPoint::new(CanonicalDate::parse("2020-01-02").unwrap(), -5.0),
/// ];
/// let series = compound(&points);
///
/// assert!((series.points()[1].total_return - 0.045).abs() < 1e-12);
/// ```
pub fn compound(points: &[NormalizedPoint]) -> Series {
    let points: Cow<'_, [NormalizedPoint]> =
        if points.windows(2).all(|w| w[0].date <= w[1].date) {
            Cow::Borrowed(points)
        } else {
            let mut sorted = points.to_vec();
            sorted.sort_by(|a, b| a.date.cmp(&b.date));
            Cow::Owned(sorted)
        };

    let mut growth = 1.0_f64;
    let compounded = points
        .iter()
        .map(|point| {
            growth *= 1.0 + point.daily_return_percent / 100.0;
            SeriesPoint {
                date: point.date.clone(),
                daily_return_percent: point.daily_return_percent,
                total_return: growth - 1.0,
            }
        })
        .collect();

    Series::from_compounded(compounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use compound_core::CanonicalDate;

    fn point(date: &str, r: f64) -> NormalizedPoint {
        NormalizedPoint::new(CanonicalDate::parse(date).unwrap(), r)
    }

    #[test]
    fn test_two_point_fold() {
        let series = compound(&[point("2020-01-01", 10.0), point("2020-01-02", -5.0)]);

        assert_eq!(series.len(), 2);
        assert_abs_diff_eq!(series.points()[0].total_return, 0.10, epsilon = 1e-12);
        assert_abs_diff_eq!(series.points()[1].total_return, 0.045, epsilon = 1e-12);
        assert_abs_diff_eq!(series.points()[1].growth(), 1.045, epsilon = 1e-12);
    }

    #[test]
    fn test_unsorted_input_is_folded_in_date_order() {
        let series = compound(&[
            point("2020-01-03", 1.0),
            point("2020-01-01", 10.0),
            point("2020-01-02", -5.0),
        ]);

        let dates: Vec<&str> = series.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, ["2020-01-01", "2020-01-02", "2020-01-03"]);
        assert_abs_diff_eq!(series.points()[1].total_return, 0.045, epsilon = 1e-12);

        let page = crate::query::query(
            &series,
            &crate::query::PageRequest::default().with_range(Some("2020-01-02"), None),
        );
        assert_eq!(page.total_count, 2);
        assert_eq!(page.start_date.unwrap(), "2020-01-02");
    }

    #[test]
    fn test_unsorted_duplicates_keep_source_order() {
        let series = compound(&[
            point("2020-01-02", 3.0),
            point("2020-01-01", 1.0),
            point("2020-01-02", 2.0),
        ]);
        let returns: Vec<f64> = series.iter().map(|p| p.daily_return_percent).collect();
        assert_eq!(returns, [1.0, 3.0, 2.0]);
    }

    #[test]
    fn test_empty_input() {
        assert!(compound(&[]).is_empty());
    }

    #[test]
    fn test_carries_inputs_through() {
        let series = compound(&[point("2020-01-01", 1.5)]);
        let first = &series.points()[0];
        assert_eq!(first.date, "2020-01-01");
        assert_eq!(first.daily_return_percent, 1.5);
        assert_abs_diff_eq!(first.total_return, 0.015, epsilon = 1e-15);
    }

    #[test]
    fn test_zero_returns_stay_flat() {
        let series = compound(&[
            point("2020-01-01", 0.0),
            point("2020-01-02", 0.0),
            point("2020-01-03", 0.0),
        ]);
        assert!(series.iter().all(|p| p.total_return == 0.0));
    }

    #[test]
    fn test_total_loss_is_absorbing() {
        let series = compound(&[
            point("2020-01-01", -100.0),
            point("2020-01-02", 50.0),
        ]);
        assert_eq!(series.points()[0].total_return, -1.0);
        assert_eq!(series.points()[1].total_return, -1.0);
    }

    #[test]
    fn test_rebuild_is_bit_identical() {
        let points: Vec<_> = (1..=28)
            .map(|day| point(&format!("2021-02-{day:02}"), f64::from(day) * 0.137 - 2.0))
            .collect();
        let a = compound(&points);
        let b = compound(&points);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.total_return.to_bits(), y.total_return.to_bits());
        }
    }
}
