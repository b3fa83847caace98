//! dataclean - single-pass cleaning pipeline for tabular data
//!
//! Loads a delimited file, removes duplicate rows, standardizes column
//! names, fills missing promotions, coerces dates, strips list syntax from
//! product names, writes the result and appends an audit trail.

pub mod audit;
pub mod clean;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod pipeline;

pub use config::Config;
pub use error::{CleanError, Result};
pub use model::Table;
pub use pipeline::{run_pipeline, Pipeline, RunSummary};
