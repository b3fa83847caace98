//! Table, Row, and Cell data structures

use std::borrow::Cow;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::schema::{CellType, Column};

/// Textual form of a missing value when a cell is forced to a string
pub const MISSING_TEXT: &str = "nan";

/// A cell value with type information
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(Cow<'static, str>),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

/// The `i64` an integral float represents, if it fits
fn integral_value(f: f64) -> Option<i64> {
    // 2^63 is exactly representable; i64::MAX is not
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.fract() == 0.0 && f >= -LIMIT && f < LIMIT {
        Some(f as i64)
    } else {
        None
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => {
                // Handle NaN comparison
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::String(a), CellValue::String(b)) => a == b,
            (CellValue::Date(a), CellValue::Date(b)) => a == b,
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a == b,
            // Cross-type numeric comparison
            (CellValue::Int(a), CellValue::Float(b)) => integral_value(*b) == Some(*a),
            (CellValue::Float(a), CellValue::Int(b)) => integral_value(*a) == Some(*b),
            _ => false,
        }
    }
}

impl Eq for CellValue {}

// Must agree with `PartialEq`: integral floats hash like the matching Int,
// every NaN hashes alike, and 0.0 / -0.0 collapse through the integral path.
impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            CellValue::Null => 0u8.hash(state),
            CellValue::Bool(b) => {
                1u8.hash(state);
                b.hash(state);
            }
            CellValue::Int(i) => {
                2u8.hash(state);
                i.hash(state);
            }
            CellValue::Float(f) => match integral_value(*f) {
                Some(i) => {
                    2u8.hash(state);
                    i.hash(state);
                }
                None => {
                    3u8.hash(state);
                    let bits = if f.is_nan() { f64::NAN.to_bits() } else { f.to_bits() };
                    bits.hash(state);
                }
            },
            CellValue::String(s) => {
                4u8.hash(state);
                s.hash(state);
            }
            CellValue::Date(d) => {
                5u8.hash(state);
                d.hash(state);
            }
            CellValue::DateTime(dt) => {
                6u8.hash(state);
                dt.hash(state);
            }
        }
    }
}

impl CellValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Type of this single value
    pub fn cell_type(&self) -> CellType {
        match self {
            CellValue::Null => CellType::Null,
            CellValue::Bool(_) => CellType::Bool,
            CellValue::Int(_) => CellType::Int,
            CellValue::Float(_) => CellType::Float,
            CellValue::String(_) => CellType::String,
            CellValue::Date(_) => CellType::Date,
            CellValue::DateTime(_) => CellType::DateTime,
        }
    }

    /// Field text as written to a delimited file; missing values are empty
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed(""),
            _ => self.to_text(),
        }
    }

    /// Forced string conversion; missing values become [`MISSING_TEXT`]
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed(MISSING_TEXT),
            CellValue::Bool(true) => Cow::Borrowed("True"),
            CellValue::Bool(false) => Cow::Borrowed("False"),
            CellValue::Int(i) => Cow::Owned(i.to_string()),
            CellValue::Float(f) => Cow::Owned(format_float(*f)),
            CellValue::String(s) => Cow::Borrowed(s.as_ref()),
            CellValue::Date(d) => Cow::Owned(d.format("%Y-%m-%d").to_string()),
            // Sub-second digits only appear when present, in groups of 3/6/9
            CellValue::DateTime(dt) => Cow::Owned(dt.format("%Y-%m-%d %H:%M:%S%.f").to_string()),
        }
    }
}

/// Format a float so integral values keep a trailing `.0`
fn format_float(f: f64) -> String {
    let s = f.to_string();
    if f.is_finite() && !s.contains(['.', 'e', 'E']) {
        format!("{s}.0")
    } else {
        s
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(Cow::Owned(s.to_string()))
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(Cow::Owned(s))
    }
}

/// A row in the table
#[derive(Debug, Clone)]
pub struct Row {
    /// Cell values in column order
    pub cells: Vec<CellValue>,
    /// Original line/row number in source file (1-indexed)
    pub source_line: usize,
}

impl Row {
    pub fn new(cells: Vec<CellValue>, source_line: usize) -> Self {
        Self { cells, source_line }
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }
}

/// A table containing columns and rows
#[derive(Debug, Default)]
pub struct Table {
    /// Column definitions
    pub columns: Vec<Column>,
    /// All rows in the table
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table with column definitions
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Add a row to the table
    pub fn add_row(&mut self, cells: Vec<CellValue>, source_line: usize) {
        self.rows.push(Row::new(cells, source_line));
    }

    /// Get column index by name (first match)
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Values of one column, top to bottom
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    /// Mutable access to one column's cells, top to bottom
    pub fn column_values_mut(&mut self, index: usize) -> impl Iterator<Item = &mut CellValue> + '_ {
        self.rows
            .iter_mut()
            .filter_map(move |row| row.cells.get_mut(index))
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Recompute a column's type from the values it currently holds
    pub fn refresh_column_type(&mut self, index: usize) {
        let inferred = self
            .column_values(index)
            .fold(CellType::Null, |acc, cell| acc.widen(cell.cell_type()));

        if let Some(col) = self.columns.get_mut(index) {
            col.value_type = inferred;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(value: &CellValue) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_hash_agrees_with_eq() {
        let pairs = [
            (CellValue::Int(3), CellValue::Float(3.0)),
            (CellValue::Float(0.0), CellValue::Float(-0.0)),
            (CellValue::Float(f64::NAN), CellValue::Float(-f64::NAN)),
        ];
        for (a, b) in &pairs {
            assert_eq!(a, b);
            assert_eq!(hash_of(a), hash_of(b));
        }
        assert_ne!(CellValue::Int(3), CellValue::Float(3.5));
        assert_ne!(CellValue::from("1"), CellValue::Int(1));
    }

    #[test]
    fn test_text_forms() {
        assert_eq!(CellValue::Null.display(), "");
        assert_eq!(CellValue::Null.to_text(), "nan");
        assert_eq!(CellValue::Float(2.0).to_text(), "2.0");
        assert_eq!(CellValue::Float(9.99).to_text(), "9.99");
        assert_eq!(CellValue::Bool(true).to_text(), "True");
        assert_eq!(CellValue::Int(-4).display(), "-4");

        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(CellValue::Date(date).display(), "2024-01-02");
        let dt = date.and_hms_opt(10, 30, 0).unwrap();
        assert_eq!(CellValue::DateTime(dt).display(), "2024-01-02 10:30:00");
    }

    #[test]
    fn test_datetime_text_keeps_fractional_seconds() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let millis = date.and_hms_milli_opt(10, 30, 0, 250).unwrap();
        assert_eq!(CellValue::DateTime(millis).to_text(), "2024-01-01 10:30:00.250");

        let half = date.and_hms_milli_opt(0, 0, 0, 500).unwrap();
        assert_eq!(CellValue::DateTime(half).display(), "2024-01-01 00:00:00.500");

        let micros = date.and_hms_micro_opt(0, 0, 1, 123_456).unwrap();
        assert_eq!(CellValue::DateTime(micros).display(), "2024-01-01 00:00:01.123456");
    }

    #[test]
    fn test_column_lookup_and_refresh() {
        let mut table = Table::new(vec![Column::new("a"), Column::new("b")]);
        table.add_row(vec![CellValue::Int(1), CellValue::Null], 2);
        table.add_row(vec![CellValue::Float(1.5), CellValue::from("x")], 3);

        assert_eq!(table.column_index("b"), Some(1));
        assert_eq!(table.column_index("c"), None);

        table.refresh_column_type(0);
        table.refresh_column_type(1);
        assert_eq!(table.columns[0].value_type, CellType::Float);
        assert_eq!(table.columns[1].value_type, CellType::String);

        for cell in table.column_values_mut(1) {
            *cell = CellValue::Null;
        }
        assert!(table.column_values(1).all(CellValue::is_null));
    }
}
