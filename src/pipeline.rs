//! The cleaning pipeline: load, clean, persist, audit

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::audit::AuditLog;
use crate::clean::{
    clean_text_column, coerce_dates, impute_missing, normalize_column_names, remove_duplicates,
    DATE_COLUMN, MISSING_FILL, PRODUCT_COLUMN, PROMOTION_COLUMN,
};
use crate::config::Config;
use crate::error::Result;
use crate::output::write_table_to_path;
use crate::parser::load_table;

/// Counts describing what one run changed
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub log_path: PathBuf,
    pub rows_loaded: usize,
    pub duplicates_removed: usize,
    pub promotions_imputed: usize,
    /// Whether a `date` column was found and converted
    pub dates_converted: bool,
    /// Date cells that held text but could not be parsed
    pub dates_unparsed: usize,
    /// Whether a `product` column was found and cleaned
    pub products_cleaned: bool,
    /// Product cells that lost at least one character
    pub product_cells_changed: usize,
    pub rows_written: usize,
    /// Column names as written
    pub columns: Vec<String>,
}

impl RunSummary {
    fn new(config: &Config) -> Self {
        Self {
            input_path: config.input_path.clone(),
            output_path: config.output_path.clone(),
            log_path: config.log_path.clone(),
            ..Default::default()
        }
    }

    /// Rows dropped between load and write
    pub fn rows_dropped(&self) -> usize {
        self.rows_loaded.saturating_sub(self.rows_written)
    }
}

/// Runs the fixed sequence of cleaning steps for one configuration
pub struct Pipeline {
    config: Config,
    audit: AuditLog,
}

impl Pipeline {
    /// Create a new pipeline with configuration
    pub fn new(config: Config) -> Self {
        let audit = AuditLog::new(config.log_path.clone(), config.echo_audit);
        Self { config, audit }
    }

    /// Run every step in order.
    ///
    /// A missing input file is reported before anything is logged or
    /// written. Every other failure aborts the run where it happens.
    pub fn run(&self) -> Result<RunSummary> {
        let config = &self.config;
        let mut summary = RunSummary::new(config);

        // 1. Load
        let mut table = load_table(&config.input_path, config)?;
        summary.rows_loaded = table.row_count();
        self.audit.log_step(&format!(
            "PIPELINE STARTED. Loaded {} rows.",
            summary.rows_loaded
        ))?;

        // 2. Deduplicate
        summary.duplicates_removed = remove_duplicates(&mut table);
        if summary.duplicates_removed > 0 {
            self.audit.log_step(&format!(
                "Removed {} duplicate rows.",
                summary.duplicates_removed
            ))?;
        }

        // 3. Column names
        normalize_column_names(&mut table);
        self.audit.log_step("Standardized column names to snake_case.")?;

        // 4. Missing promotions
        if let Some(filled) = impute_missing(&mut table, PROMOTION_COLUMN, MISSING_FILL) {
            summary.promotions_imputed = filled;
            if filled > 0 {
                self.audit.log_step(&format!(
                    "Imputed {filled} missing '{PROMOTION_COLUMN}' values with '{MISSING_FILL}'."
                ))?;
            }
        }

        // 5. Dates
        if let Some(coercion) = coerce_dates(&mut table, DATE_COLUMN) {
            summary.dates_converted = true;
            summary.dates_unparsed = coercion.unparsed;
            self.audit
                .log_step(&format!("Converted '{DATE_COLUMN}' column to datetime objects."))?;
        }

        // 6. Product text
        if let Some(changed) = clean_text_column(&mut table, PRODUCT_COLUMN) {
            summary.products_cleaned = true;
            summary.product_cells_changed = changed;
            self.audit.log_step(&format!(
                "Cleaned special characters from '{PRODUCT_COLUMN}' column."
            ))?;
        }

        // 7. Persist
        let output_path = &config.output_path;
        write_table_to_path(&table, output_path, config.delimiter_for(output_path))?;
        summary.rows_written = table.row_count();
        summary.columns = table.column_names();

        self.audit.log_step(&format!(
            "SUCCESS: Saved clean data to {}",
            output_path.display()
        ))?;
        self.audit
            .log_step(&format!("Final Row Count: {}", summary.rows_written))?;
        self.audit.log_separator()?;

        info!(
            rows_loaded = summary.rows_loaded,
            rows_written = summary.rows_written,
            "pipeline finished"
        );

        Ok(summary)
    }
}

/// Convenience function to run the pipeline once
pub fn run_pipeline(config: &Config) -> Result<RunSummary> {
    Pipeline::new(config.clone()).run()
}
