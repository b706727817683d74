//! Turning raw editor text into cell values.

use crate::types::{CellValue, ColumnType, DateValue};

/// Interpret text typed into a cell editor.
///
/// With a column type, text that fits the type is converted and anything else
/// stays text (the validator decides whether that is acceptable). Without one
/// the type is detected:
/// - Empty string → Null
/// - "true"/"false" (case-insensitive) → Boolean
/// - Parseable as f64 → Number
/// - Otherwise → Text
pub fn parse_draft(text: &str, column_type: Option<ColumnType>) -> CellValue {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return CellValue::Null;
    }

    match column_type {
        Some(ColumnType::Text) => CellValue::Text(text.to_string()),
        Some(ColumnType::Number) => trimmed
            .parse::<f64>()
            .map_or_else(|_| CellValue::Text(text.to_string()), CellValue::Number),
        Some(ColumnType::Boolean) => {
            parse_bool(trimmed).map_or_else(|| CellValue::Text(text.to_string()), CellValue::Boolean)
        }
        Some(ColumnType::Date) => {
            parse_iso_date(trimmed).map_or_else(|| CellValue::Text(text.to_string()), CellValue::Date)
        }
        None => detect(trimmed, text),
    }
}

fn detect(trimmed: &str, text: &str) -> CellValue {
    if let Some(b) = parse_bool(trimmed) {
        return CellValue::Boolean(b);
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        return CellValue::Number(n);
    }
    CellValue::Text(text.to_string())
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Years accepted from typed input; wider years would not round-trip
/// through the `YYYY-MM-DD` display form.
const MAX_TYPED_YEAR: i64 = 9999;

/// `YYYY-MM-DD`
fn parse_iso_date(value: &str) -> Option<DateValue> {
    let mut parts = value.splitn(3, '-');
    let year: i64 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    if !(0..=MAX_TYPED_YEAR).contains(&year)
        || !(1..=12).contains(&month)
        || !(1..=31).contains(&day)
    {
        return None;
    }
    let date = DateValue::from_ymd(year, month, day)?;
    // Reject days that roll over into the next month (e.g. 2023-02-30)
    let (_, m, d) = date.to_ymd()?;
    (m == i64::from(month) && d == i64::from(day)).then_some(date)
}
