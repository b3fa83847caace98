//! Configuration handling for dataclean

use std::path::{Path, PathBuf};

/// Default location of the raw input file
pub const DEFAULT_INPUT_PATH: &str = "data/raw/dirty_data.csv";
/// Default location of the cleaned output file
pub const DEFAULT_OUTPUT_PATH: &str = "data/processed/clean_data.csv";
/// Default location of the audit log
pub const DEFAULT_LOG_PATH: &str = "logs/audit_log.txt";

/// Configuration for a pipeline run
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the raw delimited input
    pub input_path: PathBuf,
    /// Path the cleaned table is written to
    pub output_path: PathBuf,
    /// Path of the append-only audit log
    pub log_path: PathBuf,
    /// Field delimiter override; inferred from the file extension when unset
    pub delimiter: Option<u8>,
    /// Mirror audit lines to stdout
    pub echo_audit: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            delimiter: None,
            echo_audit: true,
        }
    }
}

impl Config {
    /// Create a new Config with the three file locations
    pub fn new(input_path: PathBuf, output_path: PathBuf, log_path: PathBuf) -> Self {
        Self {
            input_path,
            output_path,
            log_path,
            ..Default::default()
        }
    }

    /// Set the input path
    pub fn with_input_path(mut self, path: PathBuf) -> Self {
        self.input_path = path;
        self
    }

    /// Set the output path
    pub fn with_output_path(mut self, path: PathBuf) -> Self {
        self.output_path = path;
        self
    }

    /// Set the audit log path
    pub fn with_log_path(mut self, path: PathBuf) -> Self {
        self.log_path = path;
        self
    }

    /// Force a field delimiter for both input and output
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Enable or disable mirroring audit lines to stdout
    pub fn with_echo_audit(mut self, echo: bool) -> Self {
        self.echo_audit = echo;
        self
    }

    /// Delimiter to use for `path`: the override if set, otherwise by extension
    pub fn delimiter_for(&self, path: &Path) -> u8 {
        self.delimiter.unwrap_or_else(|| delimiter_from_extension(path))
    }
}

/// Pick a delimiter from a file extension (`tsv`/`tab` are tab-separated)
pub fn delimiter_from_extension(path: &Path) -> u8 {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "tsv" | "tab" => b'\t',
        _ => b',',
    }
}
