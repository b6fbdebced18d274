//! Cell typing for text-based exports.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use compound_core::CellValue;

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Type a raw text field the way a spreadsheet reader would.
///
/// - blank → `Empty`
/// - anything `f64` accepts → `Number` (serial dates included)
/// - ISO date or date-time → `Date`
/// - otherwise → `Text`
pub fn infer_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    if let Ok(number) = trimmed.parse::<f64>() {
        return CellValue::Number(number);
    }
    infer_text_cell(trimmed)
}

/// Type a string cell that is already known not to be numeric.
///
/// Used for JSON strings, where `"1.5"` must stay text.
pub fn infer_text_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    match parse_iso_datetime(trimmed) {
        Some(datetime) => CellValue::Date(datetime),
        None => CellValue::Text(trimmed.to_string()),
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}
