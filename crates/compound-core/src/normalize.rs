//! Date normalization.
//!
//! Spreadsheet exports carry dates in several shapes. [`normalize_date`]
//! maps each supported shape onto a [`CanonicalDate`] and returns `None` for
//! everything else:
//!
//! | Cell | Interpretation |
//! |------|----------------|
//! | `Date` | calendar fields taken as-is (no time zone shift) |
//! | `Number` | serial day count under the workbook's [`DateSystem`] |
//! | `Text` containing `/` | `month/day/year` (US order) |
//! | anything else | `None` |

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::{CanonicalDate, CellValue};

/// Day-count epoch used by a workbook for serial dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DateSystem {
    /// The default 1900 system. Serial 1 is 1900-01-01 and serial 60 is the
    /// non-existent 1900-02-29 kept for Lotus 1-2-3 compatibility.
    #[default]
    #[serde(rename = "1900", alias = "excel1900")]
    Excel1900,
    /// The 1904 system used by older Mac workbooks. Serial 0 is 1904-01-01.
    #[serde(rename = "1904", alias = "excel1904")]
    Excel1904,
}

/// Serial number of the phantom 1900-02-29.
const PHANTOM_LEAP_DAY: i64 = 60;

/// Largest serial a spreadsheet can display (9999-12-31 in the 1900 system).
const MAX_SERIAL: f64 = 2_958_465.0;

impl DateSystem {
    /// Decodes a serial day count into a calendar date.
    ///
    /// The fractional part (time of day) is discarded. Returns `None` for
    /// non-finite serials, serials before the epoch, the 1900 phantom leap
    /// day, and serials past 9999-12-31.
    #[must_use]
    pub fn decode_serial(self, serial: f64) -> Option<NaiveDate> {
        if !serial.is_finite() || serial < 0.0 || serial > MAX_SERIAL {
            return None;
        }
        let days = serial.floor() as i64;

        let (epoch, offset) = match self {
            DateSystem::Excel1900 => match days {
                0 | PHANTOM_LEAP_DAY => return None,
                d if d < PHANTOM_LEAP_DAY => (NaiveDate::from_ymd_opt(1899, 12, 31)?, d),
                d => (NaiveDate::from_ymd_opt(1899, 12, 30)?, d),
            },
            DateSystem::Excel1904 => (NaiveDate::from_ymd_opt(1904, 1, 1)?, days),
        };

        epoch.checked_add_signed(Duration::days(offset))
    }
}

/// Normalizes a date cell into its canonical `YYYY-MM-DD` form.
///
/// Never panics; an unusable cell yields `None`.
///
/// # Example
///
/// ```rust
/// use compound_core::{normalize_date, CellValue, DateSystem};
///
/// let date = normalize_date(&CellValue::Number(43831.0), DateSystem::Excel1900);
/// assert_eq!(date.unwrap().as_str(), "2020-01-01");
///
/// assert!(normalize_date(&CellValue::Text("2020-01-01".into()), DateSystem::Excel1900).is_none());
/// ```
#[must_use]
pub fn normalize_date(cell: &CellValue, system: DateSystem) -> Option<CanonicalDate> {
    match cell {
        CellValue::Date(datetime) => {
            let date = datetime.date();
            CanonicalDate::from_ymd(date.year(), date.month(), date.day()).ok()
        }
        CellValue::Number(serial) => system
            .decode_serial(*serial)
            .and_then(|d| CanonicalDate::from_naive(d).ok()),
        CellValue::Text(text) if text.contains('/') => parse_month_day_year(text),
        CellValue::Text(_) | CellValue::Empty => None,
    }
}

/// Parses `month/day/year`, each part an integer.
fn parse_month_day_year(text: &str) -> Option<CanonicalDate> {
    let mut parts = text.split('/').map(str::trim);
    let month = parts.next()?.parse::<u32>().ok()?;
    let day = parts.next()?.parse::<u32>().ok()?;
    let year = parts.next()?.parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    CanonicalDate::from_ymd(year, month, day).ok()
}
