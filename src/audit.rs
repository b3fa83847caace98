//! Append-only audit trail of pipeline steps

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};

use crate::error::{CleanError, Result};

/// Line written after the last entry of a run
pub const SEPARATOR: &str = "------------------------------";

/// Render one audit entry as `[YYYY-MM-DD HH:MM:SS] message`
pub fn format_entry(timestamp: NaiveDateTime, message: &str) -> String {
    format!("[{}] {}", timestamp.format("%Y-%m-%d %H:%M:%S"), message)
}

/// Audit log writer.
///
/// The file is opened, appended and closed for every entry, so no handle
/// is held between steps and each entry lands as a single write.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
    echo: bool,
}

impl AuditLog {
    /// Create a logger appending to `path`; `echo` mirrors entries to stdout
    pub fn new(path: impl Into<PathBuf>, echo: bool) -> Self {
        Self {
            path: path.into(),
            echo,
        }
    }

    /// Append a timestamped entry and mirror it to stdout
    pub fn log_step(&self, message: &str) -> Result<()> {
        let line = format_entry(Local::now().naive_local(), message);
        self.append(&line)?;

        if self.echo {
            println!("{line}");
        }

        Ok(())
    }

    /// Close a run with the dash separator
    pub fn log_separator(&self) -> Result<()> {
        self.log_step(SEPARATOR)
    }

    fn append(&self, line: &str) -> Result<()> {
        let io_err = |source: std::io::Error| CleanError::AuditLog {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;

        file.write_all(format!("{line}\n").as_bytes())
            .map_err(io_err)
    }
}
