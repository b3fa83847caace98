//! Cleaning steps applied to a loaded table
//!
//! Each targeted step looks its column up by exact name and returns `None`
//! when the column is absent, so callers can tell "skipped" apart from
//! "ran and changed nothing".

pub mod columns;
pub mod dates;
pub mod dedupe;
pub mod impute;
pub mod text;

pub use columns::{normalize_column_name, normalize_column_names};
pub use dates::{coerce_dates, parse_datetime, DateCoercion};
pub use dedupe::remove_duplicates;
pub use impute::{impute_missing, MISSING_FILL};
pub use text::{clean_text_column, strip_disallowed_chars};

/// Column whose missing values are imputed
pub const PROMOTION_COLUMN: &str = "promotion";
/// Column coerced to dates
pub const DATE_COLUMN: &str = "date";
/// Column stripped of brackets and quotes
pub const PRODUCT_COLUMN: &str = "product";
