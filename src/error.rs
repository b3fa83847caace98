//! Error types for the cleaning pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, cleaning or persisting a table
#[derive(Error, Debug)]
pub enum CleanError {
    /// The input path does not point at an existing file.
    #[error("File not found at {}", .0.display())]
    InputNotFound(PathBuf),

    /// The delimited reader could not decode the input.
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A data row carries more fields than the header declares.
    #[error("Malformed row at line {line}: expected {expected} fields, saw {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Writing the cleaned table failed.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The audit log could not be created or appended to.
    #[error("Failed to append to audit log {}: {source}", .path.display())]
    AuditLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CleanError {
    /// Whether this is the soft "input missing" failure rather than a fatal one.
    pub fn is_input_not_found(&self) -> bool {
        matches!(self, CleanError::InputNotFound(_))
    }
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, CleanError>;
