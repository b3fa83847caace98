//! Text sanitization for list-like product strings such as `['Widget']`

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{CellValue, Table};

static DISALLOWED_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\[\]']").expect("Invalid regex: disallowed characters"));

/// Remove every `[`, `]` and `'`; borrows when there is nothing to remove
pub fn strip_disallowed_chars(s: &str) -> Cow<'_, str> {
    DISALLOWED_CHARS.replace_all(s, "")
}

/// Force every cell of `column` to text and strip disallowed characters.
///
/// Missing values become their textual placeholder first. Returns `None`
/// when the column is absent, otherwise the number of cells whose text lost
/// at least one character.
pub fn clean_text_column(table: &mut Table, column: &str) -> Option<usize> {
    let index = table.column_index(column)?;

    let mut changed = 0;
    for cell in table.column_values_mut(index) {
        let cleaned = match strip_disallowed_chars(&cell.to_text()) {
            Cow::Borrowed(unchanged) => unchanged.to_string(),
            Cow::Owned(stripped) => {
                changed += 1;
                stripped
            }
        };
        *cell = CellValue::from(cleaned);
    }

    table.refresh_column_type(index);
    Some(changed)
}
