//! Exact duplicate row removal

use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};
use tracing::debug;

use crate::model::{CellValue, Row, Table};

fn row_hash(cells: &[CellValue]) -> u64 {
    let mut hasher = FxHasher::default();
    cells.hash(&mut hasher);
    hasher.finish()
}

/// Drop every row equal in all columns to an earlier row.
///
/// Survivors keep their relative order. Returns the number of rows removed.
pub fn remove_duplicates(table: &mut Table) -> usize {
    let rows = std::mem::take(&mut table.rows);
    let total = rows.len();

    // hash -> positions in `kept` sharing that hash
    let mut buckets: FxHashMap<u64, Vec<usize>> = FxHashMap::default();
    let mut kept: Vec<Row> = Vec::with_capacity(total);

    for row in rows {
        let bucket = buckets.entry(row_hash(&row.cells)).or_default();

        if let Some(&first) = bucket.iter().find(|&&i| kept[i].cells == row.cells) {
            debug!(
                line = row.source_line,
                first_seen = kept[first].source_line,
                "dropping duplicate row"
            );
            continue;
        }

        bucket.push(kept.len());
        kept.push(row);
    }

    table.rows = kept;
    total - table.row_count()
}
