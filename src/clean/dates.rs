//! Date coercion: parse what can be parsed, null out the rest

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::model::{CellValue, Table};

/// Formats carrying a time of day, tried in order
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only formats, tried in order
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%d-%b-%Y",
];

/// Outcome of coercing one column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateCoercion {
    /// Cells now holding a date
    pub converted: usize,
    /// Cells that held a value but could not be parsed and are now null
    pub unparsed: usize,
}

/// Parse a date or date-time string. Date-only input lands on midnight;
/// input with a UTC offset is shifted to UTC.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// Interpret a cell as a date-time; numbers and booleans do not qualify
fn cell_datetime(cell: &CellValue) -> Option<NaiveDateTime> {
    match cell {
        CellValue::Date(d) => Some(d.and_time(NaiveTime::MIN)),
        CellValue::DateTime(dt) => Some(*dt),
        CellValue::String(s) => parse_datetime(s),
        _ => None,
    }
}

/// Coerce every cell of `column` to a date, nulling cells that fail.
///
/// Returns `None` when the column is absent. The column is stored as
/// `DateTime` if any parsed value has a time of day, otherwise as `Date`.
pub fn coerce_dates(table: &mut Table, column: &str) -> Option<DateCoercion> {
    let index = table.column_index(column)?;

    let parsed: Vec<Option<NaiveDateTime>> = table.column_values(index).map(cell_datetime).collect();
    let keep_time = parsed.iter().flatten().any(|dt| dt.time() != NaiveTime::MIN);

    let mut outcome = DateCoercion::default();
    for (cell, value) in table.column_values_mut(index).zip(parsed) {
        *cell = match value {
            Some(dt) if keep_time => CellValue::DateTime(dt),
            Some(dt) => CellValue::Date(dt.date()),
            None => {
                if !cell.is_null() {
                    outcome.unparsed += 1;
                }
                CellValue::Null
            }
        };
        if !cell.is_null() {
            outcome.converted += 1;
        }
    }

    table.refresh_column_type(index);
    debug!(
        column,
        converted = outcome.converted,
        unparsed = outcome.unparsed,
        "coerced dates"
    );

    Some(outcome)
}
