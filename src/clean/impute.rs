//! Missing-value imputation

use crate::model::{CellValue, Table};

/// Replacement written into missing cells
pub const MISSING_FILL: &str = "None";

/// Replace every missing cell of `column` with `fill`.
///
/// Returns `None` when the column is absent, otherwise the number of cells
/// filled. Present values, including ones already equal to `fill`, are left
/// alone and not counted.
pub fn impute_missing(table: &mut Table, column: &str, fill: &str) -> Option<usize> {
    let index = table.column_index(column)?;

    let mut filled = 0;
    for cell in table.column_values_mut(index) {
        if cell.is_null() {
            *cell = CellValue::from(fill);
            filled += 1;
        }
    }

    if filled > 0 {
        table.refresh_column_type(index);
    }

    Some(filled)
}
