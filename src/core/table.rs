//! In-memory locale table: rows in file order plus a key index.

use std::collections::{BTreeMap, HashMap};

use super::entry::{EntryStatus, LocalizationEntry};

/// A key that appeared more than once while building a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey {
    pub key: String,
    /// Row position of the occurrence that was kept.
    pub first_index: usize,
    /// Row position of the occurrence left out of the index.
    pub index: usize,
}

pub type StatusCounts = BTreeMap<EntryStatus, usize>;

/// One language's table for one category.
///
/// Built once from a row list and never mutated; reconciliation produces a
/// new table instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleTable {
    entries: Vec<LocalizationEntry>,
    key_to_index: HashMap<String, usize>,
    duplicates: Vec<DuplicateKey>,
}

impl LocaleTable {
    /// Build the key index. The first occurrence of a key wins; later ones
    /// stay in `entries` but are reported as duplicates.
    pub fn new(entries: Vec<LocalizationEntry>) -> Self {
        let mut key_to_index = HashMap::with_capacity(entries.len());
        let mut duplicates = Vec::new();

        for (index, entry) in entries.iter().enumerate() {
            if entry.is_placeholder() {
                continue;
            }
            match key_to_index.get(&entry.key) {
                Some(&first_index) => {
                    tracing::warn!(
                        line = index,
                        key = %entry.key,
                        "Duplicate key found, keeping first occurrence"
                    );
                    duplicates.push(DuplicateKey {
                        key: entry.key.clone(),
                        first_index,
                        index,
                    });
                }
                None => {
                    key_to_index.insert(entry.key.clone(), index);
                }
            }
        }

        Self {
            entries,
            key_to_index,
            duplicates,
        }
    }

    pub fn entries(&self) -> &[LocalizationEntry] {
        &self.entries
    }

    pub fn key_to_index(&self) -> &HashMap<String, usize> {
        &self.key_to_index
    }

    pub fn duplicates(&self) -> &[DuplicateKey] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.key_to_index.contains_key(key)
    }

    /// Entry for `key`, if the index points inside the table.
    pub fn get(&self, key: &str) -> Option<&LocalizationEntry> {
        self.key_to_index
            .get(key)
            .and_then(|&index| self.entries.get(index))
    }

    /// Count entries per status. Every status is present in the result.
    /// Placeholders are not counted.
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts: StatusCounts = EntryStatus::ALL.iter().map(|&s| (s, 0)).collect();
        for entry in self.entries.iter().filter(|e| !e.is_placeholder()) {
            *counts.entry(entry.status).or_default() += 1;
        }
        counts
    }
}
