//! Reconciliation of a secondary table against the primary table.
//!
//! The result always follows the primary's row order. For each primary row
//! the matching secondary row (by key) is classified as new, modified
//! upstream or unchanged. Secondary rows whose key left the primary are kept
//! at the end, marked deprecated, so no translator work is thrown away.

use super::entry::{EntryStatus, LocalizationEntry};
use super::pseudo::{is_bracketed, pseudo_translate};
use super::table::LocaleTable;

/// Metadata key holding the author of a table. Its primary text is never
/// copied into other languages.
pub const AUTHOR_KEY: &str = "_LocMeta_Author";

/// Translation written for [`AUTHOR_KEY`] when it is first added.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Locale code of the secondary table, used in log output.
    pub culture: String,
    /// Generate pseudo-localized text instead of copying primary text.
    pub debug: bool,
}

impl MergeOptions {
    pub fn translation(culture: impl Into<String>) -> Self {
        Self {
            culture: culture.into(),
            debug: false,
        }
    }

    pub fn debug(culture: impl Into<String>) -> Self {
        Self {
            culture: culture.into(),
            debug: true,
        }
    }
}

/// What a single merge changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub added: usize,
    pub modified: usize,
    pub deprecated: usize,
}

impl MergeStats {
    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.modified == 0 && self.deprecated == 0
    }
}

impl std::ops::AddAssign for MergeStats {
    fn add_assign(&mut self, other: Self) {
        self.added += other.added;
        self.modified += other.modified;
        self.deprecated += other.deprecated;
    }
}

#[derive(Debug, Clone)]
pub struct Merged {
    pub table: LocaleTable,
    pub stats: MergeStats,
}

/// Bring `secondary` in line with `primary`.
///
/// Neither input is modified. The returned table holds one row per primary
/// row, in primary order, followed by the deprecated leftovers of
/// `secondary` in their original order.
pub fn merge(primary: &LocaleTable, secondary: &LocaleTable, options: &MergeOptions) -> Merged {
    let culture = options.culture.as_str();
    let mut stats = MergeStats::default();
    let mut entries = Vec::with_capacity(primary.len());

    if secondary.is_empty() {
        tracing::debug!(culture, "Secondary table is empty, every key will be added");
    }

    for source in primary.entries() {
        let old = secondary.get(&source.key).cloned().unwrap_or_default();

        let mut entry = if old.translation.is_empty() && !source.translation.is_empty() {
            tracing::info!(culture, key = %source.key, "Missing key, adding");
            stats.added += 1;

            let translation = if options.debug {
                pseudo_translate(&source.translation)
            } else if source.key == AUTHOR_KEY {
                UNKNOWN_AUTHOR.to_string()
            } else {
                // Show primary text until someone translates it.
                source.translation.clone()
            };
            LocalizationEntry {
                translation,
                status: EntryStatus::New,
                ..Default::default()
            }
        } else if old.primary != source.translation {
            let was = old.primary.clone();
            let mut entry = old;
            if !was.is_empty() {
                tracing::info!(
                    culture,
                    key = %source.key,
                    was = %was,
                    now = %source.translation,
                    "Modified key"
                );
                stats.modified += 1;
                entry = entry.modified_from(was);
                if options.debug {
                    entry.translation = pseudo_translate(&source.translation);
                }
            }
            entry
        } else {
            let mut entry = old;
            if options.debug && !is_bracketed(&entry.translation) {
                entry.translation = pseudo_translate(&entry.translation);
            }
            entry
        };

        entry.key = source.key.clone();
        entry.primary = source.translation.clone();
        entry.comment = source.comment.clone();
        entries.push(entry);
    }

    for old in secondary.entries() {
        if old.is_placeholder() || primary.contains_key(&old.key) {
            continue;
        }
        tracing::info!(culture, key = %old.key, "Unused key, marking deprecated");
        stats.deprecated += 1;
        entries.push(old.clone().with_status(EntryStatus::Deprecated));
    }

    Merged {
        table: LocaleTable::new(entries),
        stats,
    }
}
