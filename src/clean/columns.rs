//! Column name standardization

use rustc_hash::FxHashSet;
use tracing::warn;

use crate::model::Table;

/// Lowercase, trim, then turn spaces and slashes into underscores.
///
/// Total and idempotent: the output holds no spaces, slashes, uppercase or
/// outer whitespace, so a second pass changes nothing.
pub fn normalize_column_name(name: &str) -> String {
    name.to_lowercase().trim().replace(' ', "_").replace('/', "_")
}

/// Rename every column of `table` in place.
///
/// Returns the names that ended up shared by more than one column. Lookups
/// by name resolve to the first such column.
pub fn normalize_column_names(table: &mut Table) -> Vec<String> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut collisions = Vec::new();

    for column in &mut table.columns {
        column.name = normalize_column_name(&column.name);

        if !seen.insert(column.name.clone()) && !collisions.contains(&column.name) {
            warn!(column = %column.name, "several columns normalize to the same name");
            collisions.push(column.name.clone());
        }
    }

    collisions
}
