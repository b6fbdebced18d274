//! Row Extractor.
//!
//! Projects raw tabular rows onto [`NormalizedPoint`]s. Each row is judged on
//! its own by [`normalize_row`], which yields either a point or the reason it
//! was rejected; [`extract`] keeps the points, drops the rejections, and
//! stable-sorts the survivors by canonical date.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use compound_core::{normalize_date, CellValue, DateSystem, NormalizedPoint};
use compound_traits::RawRow;

/// Default name of the date column.
pub const DEFAULT_DATE_COLUMN: &str = "ReferenceDate";

/// Default name of the daily-return column.
pub const DEFAULT_RETURN_COLUMN: &str = "DailyReturn";

/// Names of the fields read from each raw row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    /// Column holding the observation date.
    pub date: String,
    /// Column holding the daily return, in percent.
    pub daily_return: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            date: DEFAULT_DATE_COLUMN.to_string(),
            daily_return: DEFAULT_RETURN_COLUMN.to_string(),
        }
    }
}

impl ColumnMap {
    /// Creates a column map with explicit field names.
    pub fn new(date: impl Into<String>, daily_return: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            daily_return: daily_return.into(),
        }
    }
}

/// Why a raw row was excluded from the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum RejectionReason {
    /// The date cell is missing or not a recognized date shape
    #[error("date cell is missing or unrecognized")]
    InvalidDate,

    /// The return cell is missing or blank
    #[error("return cell is missing")]
    MissingReturn,

    /// The return cell holds something that is not a number
    #[error("return cell is not numeric")]
    NonNumericReturn,

    /// The return cell parsed to NaN or an infinity
    #[error("return value is not finite")]
    NonFiniteReturn,
}

/// A rejected row and the reason for its rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection {
    /// Zero-based position of the row in the source.
    pub row: usize,
    /// Why the row was dropped.
    pub reason: RejectionReason,
}

/// The outcome of extracting a batch of rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Extraction {
    /// Retained points, sorted by date.
    pub points: Vec<NormalizedPoint>,
    /// Dropped rows, in source order.
    pub rejections: Vec<Rejection>,
}

impl Extraction {
    /// Number of rows that were examined.
    pub fn rows_read(&self) -> usize {
        self.points.len() + self.rejections.len()
    }
}

/// Validates one raw row.
///
/// The date is checked first, so a row with both a bad date and a bad return
/// is reported as [`RejectionReason::InvalidDate`].
pub fn normalize_row<R: RawRow + ?Sized>(
    row: &R,
    columns: &ColumnMap,
    system: DateSystem,
) -> Result<NormalizedPoint, RejectionReason> {
    let date =
        normalize_date(row.cell(&columns.date), system).ok_or(RejectionReason::InvalidDate)?;
    let daily_return_percent = coerce_number(row.cell(&columns.daily_return))?;
    Ok(NormalizedPoint::new(date, daily_return_percent))
}

/// Coerces a cell to a finite `f64`.
pub(crate) fn coerce_number(cell: &CellValue) -> Result<f64, RejectionReason> {
    let value = match cell {
        CellValue::Number(n) => *n,
        CellValue::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(RejectionReason::MissingReturn);
            }
            text.parse::<f64>()
                .map_err(|_| RejectionReason::NonNumericReturn)?
        }
        CellValue::Date(_) => return Err(RejectionReason::NonNumericReturn),
        CellValue::Empty => return Err(RejectionReason::MissingReturn),
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(RejectionReason::NonFiniteReturn)
    }
}

/// Extracts the date-sorted points of a batch, recording every rejection.
pub fn extract_with_rejections<I>(rows: I, columns: &ColumnMap, system: DateSystem) -> Extraction
where
    I: IntoIterator,
    I::Item: RawRow,
{
    let mut extraction = Extraction::default();

    for (index, row) in rows.into_iter().enumerate() {
        match normalize_row(&row, columns, system) {
            Ok(point) => extraction.points.push(point),
            Err(reason) => extraction.rejections.push(Rejection { row: index, reason }),
        }
    }

    // Stable: duplicate dates keep their source order.
    extraction.points.sort_by(|a, b| a.date.cmp(&b.date));
    extraction
}

/// Extracts the date-sorted points of a batch, silently dropping bad rows.
///
/// # Example
///
/// ```
/// use compound_engine::{extract, ColumnMap, DateSystem};
/// use compound_traits::TableRow;
///
/// let rows = vec![
///     TableRow::new().with_cell("ReferenceDate", "1/3/1990").with_cell("DailyReturn", 0.5),
///     TableRow::new().with_cell("ReferenceDate", "1/2/1990").with_cell("DailyReturn", "n/a"),
/// ];
///
/// let points = extract(&rows, &ColumnMap::default(), DateSystem::Excel1900);
/// assert_eq!(points.len(), 1);
/// assert_eq!(points[0].date.as_str(), "1990-01-03");
/// ```
pub fn extract<I>(rows: I, columns: &ColumnMap, system: DateSystem) -> Vec<NormalizedPoint>
where
    I: IntoIterator,
    I::Item: RawRow,
{
    extract_with_rejections(rows, columns, system).points
}

#[cfg(test)]
mod tests {
    use super::*;
    use compound_traits::TableRow;

    fn row(date: impl Into<CellValue>, ret: impl Into<CellValue>) -> TableRow {
        TableRow::new()
            .with_cell("ReferenceDate", date)
            .with_cell("DailyReturn", ret)
    }

    fn extract_default(rows: &[TableRow]) -> Extraction {
        extract_with_rejections(rows, &ColumnMap::default(), DateSystem::Excel1900)
    }

    #[test]
    fn test_number_coercion() {
        assert_eq!(coerce_number(&CellValue::Number(1.5)), Ok(1.5));
        assert_eq!(coerce_number(&CellValue::Text(" -0.25 ".into())), Ok(-0.25));
        assert_eq!(coerce_number(&CellValue::Text("1e-3".into())), Ok(0.001));
        assert_eq!(
            coerce_number(&CellValue::Text("n/a".into())),
            Err(RejectionReason::NonNumericReturn)
        );
        assert_eq!(
            coerce_number(&CellValue::Text("   ".into())),
            Err(RejectionReason::MissingReturn)
        );
        assert_eq!(
            coerce_number(&CellValue::Empty),
            Err(RejectionReason::MissingReturn)
        );
        assert_eq!(
            coerce_number(&CellValue::Number(f64::NAN)),
            Err(RejectionReason::NonFiniteReturn)
        );
        assert_eq!(
            coerce_number(&CellValue::Text("NaN".into())),
            Err(RejectionReason::NonFiniteReturn)
        );
        assert_eq!(
            coerce_number(&CellValue::Text("inf".into())),
            Err(RejectionReason::NonFiniteReturn)
        );
    }

    #[test]
    fn test_date_checked_before_return() {
        let bad = row("not a date", "n/a");
        assert_eq!(
            normalize_row(&bad, &ColumnMap::default(), DateSystem::Excel1900),
            Err(RejectionReason::InvalidDate)
        );
    }

    #[test]
    fn test_non_numeric_return_is_dropped_in_place() {
        let rows = vec![
            row("1/2/1990", 0.5),
            row("1/3/1990", "n/a"),
            row("1/4/1990", -0.25),
        ];
        let extraction = extract_default(&rows);

        let dates: Vec<&str> = extraction.points.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, ["1990-01-02", "1990-01-04"]);
        assert_eq!(
            extraction.rejections,
            vec![Rejection {
                row: 1,
                reason: RejectionReason::NonNumericReturn
            }]
        );
        assert_eq!(extraction.rows_read(), 3);
    }

    #[test]
    fn test_sorted_by_canonical_date() {
        let rows = vec![
            row("12/31/1999", 1.0),
            row(36526.0, 2.0), // 2000-01-01
            row("1/2/1990", 3.0),
        ];
        let points = extract(&rows, &ColumnMap::default(), DateSystem::Excel1900);
        let returns: Vec<f64> = points.iter().map(|p| p.daily_return_percent).collect();
        assert_eq!(returns, [3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_duplicate_dates_keep_source_order() {
        let rows = vec![
            row("1/3/1990", 1.0),
            row("1/2/1990", 2.0),
            row("1/2/1990", 3.0),
        ];
        let points = extract(&rows, &ColumnMap::default(), DateSystem::Excel1900);
        let returns: Vec<f64> = points.iter().map(|p| p.daily_return_percent).collect();
        assert_eq!(returns, [2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_custom_columns() {
        let rows = vec![TableRow::new().with_cell("Day", "2/1/2021").with_cell("Pct", "0.1")];
        let points = extract(&rows, &ColumnMap::new("Day", "Pct"), DateSystem::Excel1900);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date, "2021-02-01");

        let missing = extract(&rows, &ColumnMap::default(), DateSystem::Excel1900);
        assert!(missing.is_empty());
    }

    #[test]
    fn test_every_reason_is_reported() {
        let rows = vec![
            row(CellValue::Empty, 1.0),
            row("1/2/1990", CellValue::Empty),
            row("1/2/1990", chrono::NaiveDate::from_ymd_opt(1990, 1, 2).unwrap()),
            row("1/2/1990", f64::INFINITY),
        ];
        let reasons: Vec<RejectionReason> = extract_default(&rows)
            .rejections
            .into_iter()
            .map(|r| r.reason)
            .collect();
        assert_eq!(
            reasons,
            [
                RejectionReason::InvalidDate,
                RejectionReason::MissingReturn,
                RejectionReason::NonNumericReturn,
                RejectionReason::NonFiniteReturn,
            ]
        );
    }

    #[test]
    fn test_column_map_serde_defaults() {
        let map: ColumnMap = serde_json::from_str(r#"{"date": "Day"}"#).unwrap();
        assert_eq!(map.date, "Day");
        assert_eq!(map.daily_return, DEFAULT_RETURN_COLUMN);
    }
}
