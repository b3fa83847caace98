//! Delimited file parser

use std::borrow::Cow;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rustc_hash::FxHashSet;

use crate::error::{CleanError, Result};
use crate::model::{CellType, CellValue, Column, Table};

use super::{is_null_marker, Parser};

/// Parser for comma- or tab-separated files with a header row
pub struct CsvParser {
    delimiter: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new(b',')
    }
}

impl CsvParser {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl Parser for CsvParser {
    fn parse(&self, path: &Path) -> Result<Table> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(reader);

        let parse_err = |source: csv::Error| CleanError::Parse {
            path: path.to_path_buf(),
            source,
        };

        // Read headers
        let headers = csv_reader.headers().map_err(parse_err)?.clone();
        let names = header_names(headers.iter());
        let width = names.len();

        // Raw fields first; types are decided per column once everything is read
        let mut raw_rows: Vec<(Vec<Option<String>>, usize)> = Vec::new();
        for (idx, result) in csv_reader.records().enumerate() {
            let record = result.map_err(parse_err)?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 2); // +2 for 1-indexing and header

            if record.len() > width {
                return Err(CleanError::MalformedRow {
                    line,
                    expected: width,
                    found: record.len(),
                });
            }

            // Pad with nulls if row has fewer columns
            let mut fields: Vec<Option<String>> = record
                .iter()
                .map(|s| (!is_null_marker(s)).then(|| s.to_string()))
                .collect();
            fields.resize(width, None);

            raw_rows.push((fields, line));
        }

        let column_types: Vec<CellType> = (0..width)
            .map(|col| infer_column_type(raw_rows.iter().map(|(fields, _)| &fields[col])))
            .collect();

        let columns = names
            .into_iter()
            .zip(&column_types)
            .map(|(name, &cell_type)| Column::with_type(name, cell_type))
            .collect();
        let mut table = Table::new(columns);

        for (fields, line) in raw_rows {
            let cells = fields
                .into_iter()
                .zip(&column_types)
                .map(|(field, &cell_type)| convert_field(field, cell_type))
                .collect();
            table.add_row(cells, line);
        }

        Ok(table)
    }
}

/// Fill blank headers and suffix repeated ones so every column name is unique
fn header_names<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut used: FxHashSet<String> = FxHashSet::default();
    let mut names = Vec::new();

    for (i, name) in raw.enumerate() {
        let base = if name.is_empty() {
            format!("Unnamed: {i}")
        } else {
            name.to_string()
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while used.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }

        used.insert(candidate.clone());
        names.push(candidate);
    }

    names
}

/// Structural type of a single non-missing field
fn classify_field(s: &str) -> CellType {
    if parse_bool(s).is_some() {
        CellType::Bool
    } else if s.parse::<i64>().is_ok() {
        CellType::Int
    } else if s.parse::<f64>().is_ok() {
        CellType::Float
    } else {
        CellType::String
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "True" | "TRUE" | "true" => Some(true),
        "False" | "FALSE" | "false" => Some(false),
        _ => None,
    }
}

/// Infer a column type from its raw fields
fn infer_column_type<'a>(fields: impl Iterator<Item = &'a Option<String>>) -> CellType {
    fields
        .flatten()
        .map(|s| classify_field(s))
        .fold(CellType::Null, CellType::widen)
}

/// Convert a raw field to a value of the column's type
fn convert_field(field: Option<String>, cell_type: CellType) -> CellValue {
    let Some(s) = field else {
        return CellValue::Null;
    };

    let converted = match cell_type {
        CellType::Bool => parse_bool(&s).map(CellValue::Bool),
        CellType::Int => s.parse::<i64>().ok().map(CellValue::Int),
        CellType::Float => s.parse::<f64>().ok().map(CellValue::Float),
        _ => None,
    };

    converted.unwrap_or_else(|| CellValue::String(Cow::Owned(s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse_str(content: &str) -> Table {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        CsvParser::default().parse(file.path()).unwrap()
    }

    #[test]
    fn test_classify_field() {
        assert_eq!(classify_field("true"), CellType::Bool);
        assert_eq!(classify_field("42"), CellType::Int);
        assert_eq!(classify_field("3.14"), CellType::Float);
        assert_eq!(classify_field("hello"), CellType::String);
        assert_eq!(classify_field("2024-01-01"), CellType::String);
    }

    #[test]
    fn test_column_level_inference() {
        let table = parse_str("id,price,label\n1,9.99,a\n2,3,1.50\n,,\n");

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.columns[0].value_type, CellType::Int);
        assert_eq!(table.columns[1].value_type, CellType::Float);
        assert_eq!(table.columns[2].value_type, CellType::String);

        assert_eq!(table.rows[1].cells[1], CellValue::Float(3.0));
        // Columns mixing numbers and text keep the original text
        assert_eq!(table.rows[1].cells[2], CellValue::from("1.50"));
        assert!(table.rows[2].cells.iter().all(CellValue::is_null));
    }

    #[test]
    fn test_empty_and_header_only_files() {
        let empty = parse_str("");
        assert_eq!(empty.row_count(), 0);
        assert_eq!(empty.column_count(), 0);

        let header_only = parse_str("a,b\n");
        assert_eq!(header_only.row_count(), 0);
        assert_eq!(header_only.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = parse_str("a,b,c\n1,2\n");
        assert_eq!(table.rows[0].cells.len(), 3);
        assert!(table.rows[0].cells[2].is_null());
        assert_eq!(table.rows[0].source_line, 2);
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"a,b\n1,2\n1,2,3\n").unwrap();
        let err = CsvParser::default().parse(file.path()).unwrap_err();

        match err {
            CleanError::MalformedRow {
                line,
                expected,
                found,
            } => {
                assert_eq!((line, expected, found), (3, 2, 3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_names() {
        let names = header_names(["a", "", "a", "a"].into_iter());
        assert_eq!(names, vec!["a", "Unnamed: 1", "a.1", "a.2"]);
    }

    #[test]
    fn test_none_text_is_not_missing() {
        let table = parse_str("promotion\nNone\nNA\n");
        assert_eq!(table.rows[0].cells[0], CellValue::from("None"));
        assert!(table.rows[1].cells[0].is_null());
    }

    #[test]
    fn test_tab_delimiter() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"a\tb\nx y\t2\n").unwrap();
        let table = CsvParser::new(b'\t').parse(file.path()).unwrap();
        assert_eq!(table.rows[0].cells[0], CellValue::from("x y"));
        assert_eq!(table.rows[0].cells[1], CellValue::Int(2));
    }
}
