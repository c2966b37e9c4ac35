//! Per-table status counts, for reporting.

use crate::core::{StatusCounts, StatusMarkers};
use crate::error::LocResult;
use crate::locales::LocaleInfo;
use crate::store::{TableStore, load_table};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCounts {
    pub counts: StatusCounts,
    /// Rows with a key; placeholders are not included.
    pub entries: usize,
    pub duplicate_keys: usize,
}

#[derive(Debug)]
pub struct TableStats {
    pub info: LocaleInfo,
    pub result: LocResult<TableCounts>,
}

/// Load each table and count its entries per status.
pub fn collect_stats<S: TableStore + ?Sized>(
    store: &S,
    locales: &[LocaleInfo],
    markers: &StatusMarkers,
) -> Vec<TableStats> {
    locales
        .iter()
        .map(|info| {
            let result = load_table(store, &info.file_path, markers).map(|table| TableCounts {
                entries: table.entries().iter().filter(|e| !e.is_placeholder()).count(),
                duplicate_keys: table.duplicates().len(),
                counts: table.status_counts(),
            });
            if let Err(e) = &result {
                tracing::warn!(path = %info.file_path.display(), error = %e, "Failed to read table");
            }
            TableStats {
                info: info.clone(),
                result,
            }
        })
        .collect()
}
