//! A single translatable row.

use std::fmt;

/// Lifecycle marker recorded on each entry by reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryStatus {
    #[default]
    None,
    /// Key was added to the primary and still shows primary text.
    New,
    /// Primary text changed since this translation was last synced.
    Modified,
    /// Key no longer exists in the primary.
    Deprecated,
}

impl EntryStatus {
    pub const ALL: [EntryStatus; 4] = [
        EntryStatus::None,
        EntryStatus::New,
        EntryStatus::Modified,
        EntryStatus::Deprecated,
    ];
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::None => write!(f, "ok"),
            EntryStatus::New => write!(f, "new"),
            EntryStatus::Modified => write!(f, "modified"),
            EntryStatus::Deprecated => write!(f, "deprecated"),
        }
    }
}

/// One row of a locale table.
///
/// An entry with an empty `key` is a placeholder: it stands in for a blank or
/// malformed row so the remaining rows keep their position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizationEntry {
    pub key: String,
    /// Text shown to the user in this locale (the `SourceString` column).
    pub translation: String,
    pub comment: String,
    /// Primary-language text this translation was last synced against.
    pub primary: String,
    /// Primary text before the last detected change. Only set when `Modified`.
    pub old_primary: String,
    pub status: EntryStatus,
}

impl LocalizationEntry {
    pub fn new(
        key: impl Into<String>,
        translation: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            translation: translation.into(),
            comment: comment.into(),
            ..Default::default()
        }
    }

    pub fn with_primary(mut self, primary: impl Into<String>) -> Self {
        self.primary = primary.into();
        self
    }

    /// Set the status, clearing `old_primary` unless the status is `Modified`.
    pub fn with_status(mut self, status: EntryStatus) -> Self {
        self.set_status(status);
        self
    }

    pub fn modified_from(mut self, old_primary: impl Into<String>) -> Self {
        self.status = EntryStatus::Modified;
        self.old_primary = old_primary.into();
        self
    }

    pub fn set_status(&mut self, status: EntryStatus) {
        self.status = status;
        if status != EntryStatus::Modified {
            self.old_primary.clear();
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.key.is_empty()
    }
}
