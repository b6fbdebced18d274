//! Query Processor.
//!
//! A query narrows the series to an inclusive date range and then pages
//! through the result with `offset`/`limit`. Nothing here can fail: raw
//! parameters that do not parse fall back to defaults, and windows past the
//! end of the data are simply empty.
//!
//! Because a [`Series`] is sorted by canonical date, the filtered range is a
//! contiguous sub-slice. It is located by binary search and borrowed, never
//! copied, until a [`SeriesResponse`] is built for the wire.

use serde::{Deserialize, Serialize};

use compound_core::{CanonicalDate, SeriesPoint};

use crate::series::Series;

/// Page size used when `limit` is absent or invalid.
pub const DEFAULT_LIMIT: usize = 25;

/// Offset used when `offset` is absent or invalid.
pub const DEFAULT_OFFSET: usize = 0;

// =============================================================================
// Raw parameters
// =============================================================================

/// Query parameters exactly as received from a caller.
///
/// Every field is an uninterpreted string; see [`PageRequest`] for how they
/// are coerced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    /// Requested page size.
    pub limit: Option<String>,
    /// Requested number of points to skip.
    pub offset: Option<String>,
    /// Inclusive lower date bound (`YYYY-MM-DD`).
    pub start: Option<String>,
    /// Inclusive upper date bound (`YYYY-MM-DD`).
    pub end: Option<String>,
}

impl QueryParams {
    /// Creates an empty parameter set (all defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the raw `limit`.
    #[must_use]
    pub fn with_limit(mut self, limit: impl ToString) -> Self {
        self.limit = Some(limit.to_string());
        self
    }

    /// Sets the raw `offset`.
    #[must_use]
    pub fn with_offset(mut self, offset: impl ToString) -> Self {
        self.offset = Some(offset.to_string());
        self
    }

    /// Sets the raw `start` bound.
    #[must_use]
    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Sets the raw `end` bound.
    #[must_use]
    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Collects parameters from decoded `key=value` pairs.
    ///
    /// Unknown keys are ignored. When a key repeats, the first occurrence
    /// wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "limit" => &mut params.limit,
                "offset" => &mut params.offset,
                "start" => &mut params.start,
                "end" => &mut params.end,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }
}

// =============================================================================
// Coerced request
// =============================================================================

/// A fully coerced query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum number of points in the page.
    pub limit: usize,
    /// Number of filtered points to skip.
    pub offset: usize,
    /// Inclusive lower bound, compared as a string against canonical dates.
    pub start: Option<String>,
    /// Inclusive upper bound, compared as a string against canonical dates.
    pub end: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
            start: None,
            end: None,
        }
    }
}

impl PageRequest {
    /// Creates an unfiltered request for one page.
    pub fn new(limit: usize, offset: usize) -> Self {
        Self {
            limit,
            offset,
            ..Self::default()
        }
    }

    /// Restricts the request to an inclusive date range.
    #[must_use]
    pub fn with_range(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        self.start = start.map(str::to_string);
        self.end = end.map(str::to_string);
        self
    }
}

impl From<&QueryParams> for PageRequest {
    fn from(params: &QueryParams) -> Self {
        Self {
            limit: coerce_count(params.limit.as_deref(), DEFAULT_LIMIT),
            offset: coerce_count(params.offset.as_deref(), DEFAULT_OFFSET),
            start: coerce_bound(params.start.as_deref()),
            end: coerce_bound(params.end.as_deref()),
        }
    }
}

impl From<QueryParams> for PageRequest {
    fn from(params: QueryParams) -> Self {
        Self::from(&params)
    }
}

fn coerce_count(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn coerce_bound(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// =============================================================================
// Result
// =============================================================================

/// One page of a filtered series, borrowed from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<'a> {
    /// The points in the requested window.
    pub points: &'a [SeriesPoint],
    /// Number of points matching the date filter, before pagination.
    pub total_count: usize,
    /// Page size actually used.
    pub effective_limit: usize,
    /// Offset actually used.
    pub effective_offset: usize,
    /// Lower bound as requested (after coercion).
    pub start: Option<String>,
    /// Upper bound as requested (after coercion).
    pub end: Option<String>,
    /// First date of the filtered sequence (not of the page).
    pub start_date: Option<&'a CanonicalDate>,
    /// Last date of the filtered sequence (not of the page).
    pub end_date: Option<&'a CanonicalDate>,
}

impl QueryResult<'_> {
    /// Builds the owned wire representation of this page.
    pub fn to_response(&self) -> SeriesResponse {
        SeriesResponse {
            meta: SeriesMeta {
                total_count: self.total_count,
                limit: self.effective_limit,
                offset: self.effective_offset,
                start: self.start.clone(),
                end: self.end.clone(),
                start_date: self.start_date.cloned(),
                end_date: self.end_date.cloned(),
            },
            data: self.points.to_vec(),
        }
    }
}

/// Pagination and range metadata of a [`SeriesResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesMeta {
    /// Number of points matching the date filter.
    pub total_count: usize,
    /// Effective page size.
    pub limit: usize,
    /// Effective offset.
    pub offset: usize,
    /// Requested lower bound, or `null`.
    pub start: Option<String>,
    /// Requested upper bound, or `null`.
    pub end: Option<String>,
    /// First date of the filtered data, or `null` when nothing matched.
    pub start_date: Option<CanonicalDate>,
    /// Last date of the filtered data, or `null` when nothing matched.
    pub end_date: Option<CanonicalDate>,
}

/// Wire shape of a series query: `{meta, data}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesResponse {
    /// Pagination and range metadata.
    pub meta: SeriesMeta,
    /// The page of points, in date order.
    pub data: Vec<SeriesPoint>,
}

// =============================================================================
// Processing
// =============================================================================

/// Returns the contiguous run of points with `start <= date <= end`.
///
/// Absent bounds are open. Bounds are compared as strings, so callers should
/// pass canonical `YYYY-MM-DD` dates.
pub fn filter_range<'a>(
    points: &'a [SeriesPoint],
    start: Option<&str>,
    end: Option<&str>,
) -> &'a [SeriesPoint] {
    let lower = start.map_or(0, |s| points.partition_point(|p| p.date.as_str() < s));
    let upper = end.map_or(points.len(), |e| {
        points.partition_point(|p| p.date.as_str() <= e)
    });
    &points[lower..upper.max(lower)]
}

/// Runs a query against a series.
///
/// Pure and allocation-free apart from echoing the bounds; safe to call from
/// any number of threads against the same series.
///
/// # Example
///
/// ```
/// use compound_engine::{compound, query, CanonicalDate, NormalizedPoint, PageRequest};
///
/// let points: Vec<_> = ["2020-01-01", "2020-01-02", "2020-01-03"]
///     .iter()
///     .map(|d| NormalizedPoint::new(CanonicalDate::parse(d).unwrap(), 1.0))
///     .collect();
/// let series = compound(&points);
///
/// let page = query(&series, &PageRequest::new(1, 1).with_range(Some("2020-01-02"), None));
/// assert_eq!(page.total_count, 2);
/// assert_eq!(page.points[0].date.as_str(), "2020-01-03");
/// assert_eq!(page.start_date.unwrap().as_str(), "2020-01-02");
/// ```
pub fn query<'a>(series: &'a Series, request: &PageRequest) -> QueryResult<'a> {
    let filtered = filter_range(
        series.points(),
        request.start.as_deref(),
        request.end.as_deref(),
    );
    let total_count = filtered.len();

    let begin = request.offset.min(total_count);
    let finish = request.offset.saturating_add(request.limit).min(total_count);

    QueryResult {
        points: &filtered[begin..finish],
        total_count,
        effective_limit: request.limit,
        effective_offset: request.offset,
        start: request.start.clone(),
        end: request.end.clone(),
        start_date: filtered.first().map(|p| &p.date),
        end_date: filtered.last().map(|p| &p.date),
    }
}
