//! Persisting the cleaned table and rendering run summaries

mod csv;
mod json;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{CleanError, Result};
use crate::model::Table;

pub use self::csv::CsvWriter;
pub use self::json::JsonOutput;

/// Trait for table serializers
pub trait TableWriter {
    /// Serialize the whole table to a writer
    fn write_table(&self, table: &Table, writer: &mut dyn Write) -> std::result::Result<(), ::csv::Error>;
}

/// Write `table` to `path`, creating parent directories as needed.
///
/// A failure part-way through may leave a truncated file behind.
pub fn write_table_to_path(table: &Table, path: &Path, delimiter: u8) -> Result<()> {
    let write_err = |source: ::csv::Error| CleanError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| write_err(e.into()))?;
    }

    let file = File::create(path).map_err(|e| write_err(e.into()))?;
    let mut writer = BufWriter::new(file);
    CsvWriter::new(delimiter)
        .write_table(table, &mut writer)
        .map_err(write_err)?;

    debug!(rows = table.row_count(), "wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellValue, Column};

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed/deeper/clean.csv");

        let mut table = Table::new(vec![Column::new("a")]);
        table.add_row(vec![CellValue::Int(1)], 2);

        write_table_to_path(&table, &path, b',').unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\n1\n");
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clean.csv");
        fs::write(&path, "stale,content\n1,2\n3,4\n").unwrap();

        let table = Table::new(vec![Column::new("a")]);
        write_table_to_path(&table, &path, b',').unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\n");
    }

    #[test]
    fn test_unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let err = write_table_to_path(&Table::default(), &blocker.join("out.csv"), b',').unwrap_err();
        assert!(matches!(err, CleanError::Write { .. }));
    }
}
