//! The ordered total-return series.

use serde::Serialize;

use compound_core::{CanonicalDate, SeriesPoint};

/// An ordered, read-only sequence of [`SeriesPoint`]s.
///
/// Dates are non-decreasing. A `Series` can only be produced by the
/// compounding fold, so every `total_return` is the running value implied by
/// the points before it; there is no API to append or edit points.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Series {
    points: Vec<SeriesPoint>,
}

impl Series {
    pub(crate) fn from_compounded(points: Vec<SeriesPoint>) -> Self {
        Self { points }
    }

    /// An empty series.
    pub fn empty() -> Self {
        Self::default()
    }

    /// All points in date order.
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the points in date order.
    pub fn iter(&self) -> std::slice::Iter<'_, SeriesPoint> {
        self.points.iter()
    }

    /// First date, if any.
    pub fn start_date(&self) -> Option<&CanonicalDate> {
        self.points.first().map(|p| &p.date)
    }

    /// Last date, if any.
    pub fn end_date(&self) -> Option<&CanonicalDate> {
        self.points.last().map(|p| &p.date)
    }

    /// Cumulative total return at the end of the series.
    pub fn final_total_return(&self) -> Option<f64> {
        self.points.last().map(|p| p.total_return)
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a SeriesPoint;
    type IntoIter = std::slice::Iter<'a, SeriesPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
