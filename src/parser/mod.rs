//! Loader for delimited tabular files

mod csv;

use std::path::Path;

use tracing::debug;

use crate::config::Config;
use crate::error::{CleanError, Result};
use crate::model::Table;

pub use self::csv::CsvParser;

/// Cell texts read as missing values. `None` is intentionally absent so
/// already-imputed cells survive a second pass untouched.
pub const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "n/a", "nan", "null",
];

/// Whether a raw field is a missing-value marker
pub fn is_null_marker(raw: &str) -> bool {
    NULL_MARKERS.contains(&raw)
}

/// Trait for parsing tabular data files
pub trait Parser {
    /// Parse a file and return a Table
    fn parse(&self, path: &Path) -> Result<Table>;
}

/// Load the configured input file.
///
/// Fails with [`CleanError::InputNotFound`] before touching anything else
/// when the path is not an existing file.
pub fn load_table(path: &Path, config: &Config) -> Result<Table> {
    if !path.is_file() {
        return Err(CleanError::InputNotFound(path.to_path_buf()));
    }

    let parser = CsvParser::new(config.delimiter_for(path));
    let table = parser.parse(path)?;

    debug!(
        rows = table.row_count(),
        columns = table.column_count(),
        "loaded {}",
        path.display()
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_is_reported() {
        let config = Config::default();
        let err = load_table(Path::new("definitely/not/here.csv"), &config).unwrap_err();
        assert!(err.is_input_not_found());
    }

    #[test]
    fn test_delimiter_follows_config() {
        let dir = tempfile::tempdir().unwrap();
        let tsv = dir.path().join("input.tsv");
        std::fs::write(&tsv, "a\tb\n1\t2\n").unwrap();

        let table = load_table(&tsv, &Config::default()).unwrap();
        assert_eq!(table.column_names(), vec!["a", "b"]);

        // An explicit delimiter wins over the extension
        let config = Config::default().with_delimiter(b',');
        let table = load_table(&tsv, &config).unwrap();
        assert_eq!(table.column_names(), vec!["a\tb"]);
    }

    #[test]
    fn test_null_markers() {
        assert!(is_null_marker(""));
        assert!(is_null_marker("NA"));
        assert!(is_null_marker("NaN"));
        assert!(!is_null_marker("None"));
        assert!(!is_null_marker(" "));
    }
}
