//! File access used by the orchestrator.
//!
//! [`TableStore`] is the seam between the engine and the filesystem. The
//! real implementation is [`FsStore`]; tests can swap in an in-memory one.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use glob::Pattern;
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::core::{LocaleTable, StatusMarkers, csv};
use crate::error::{LocError, LocResult};

/// Filters applied when enumerating candidate table files.
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    /// Accepted extensions without the dot, compared case-insensitively.
    pub extensions: Vec<String>,
    pub prefix: String,
    pub suffix: String,
}

impl FileFilter {
    pub fn matches(&self, path: &Path) -> bool {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            return false;
        };
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        self.extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
            && stem.starts_with(self.prefix.as_str())
            && stem.ends_with(self.suffix.as_str())
    }
}

pub trait TableStore: Sync {
    /// All files under `dirs` (recursively) accepted by `filter`.
    fn list_candidate_files(&self, dirs: &[PathBuf], filter: &FileFilter) -> Vec<PathBuf>;

    fn read_text(&self, path: &Path) -> LocResult<String>;

    /// Replace the whole file. Either the new content is fully written or
    /// the previous file is left in place.
    fn write_text(&self, path: &Path, text: &str) -> LocResult<()>;

    /// True when `path` exists and cannot be written.
    fn is_read_only(&self, path: &Path) -> bool;

    fn exists(&self, path: &Path) -> bool;
}

/// Read and parse a table file.
pub fn load_table<S: TableStore + ?Sized>(
    store: &S,
    path: &Path,
    markers: &StatusMarkers,
) -> LocResult<LocaleTable> {
    let text = store.read_text(path)?;
    let table = csv::parse_table(&text, markers)?;
    if table.is_empty() {
        tracing::debug!(path = %path.display(), "No entries found");
    }
    Ok(table)
}

/// [`TableStore`] backed by the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsStore {
    ignores: Vec<Pattern>,
}

impl FsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip files whose path matches any of the glob patterns.
    pub fn with_ignores(patterns: &[String]) -> Self {
        let ignores = patterns
            .iter()
            .filter_map(|p| match Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    tracing::warn!(pattern = %p, error = %e, "Invalid ignore pattern");
                    None
                }
            })
            .collect();
        Self { ignores }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        self.ignores.iter().any(|p| p.matches_path(path))
    }
}

impl TableStore for FsStore {
    fn list_candidate_files(&self, dirs: &[PathBuf], filter: &FileFilter) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for dir in dirs {
            if !dir.is_dir() {
                tracing::debug!(dir = %dir.display(), "Localization directory does not exist");
                continue;
            }
            for entry in WalkDir::new(dir).sort_by_file_name() {
                let entry = match entry {
                    Ok(e) => e,
                    Err(e) => {
                        tracing::warn!(error = %e, "Skipping unreadable directory entry");
                        continue;
                    }
                };
                let path = entry.path();
                if entry.file_type().is_file() && filter.matches(path) && !self.is_ignored(path) {
                    files.push(path.to_path_buf());
                }
            }
        }

        files.sort();
        files.dedup();
        files
    }

    fn read_text(&self, path: &Path) -> LocResult<String> {
        fs::read_to_string(path).map_err(|e| LocError::io(path, e))
    }

    fn write_text(&self, path: &Path, text: &str) -> LocResult<()> {
        if self.is_read_only(path) {
            return Err(LocError::ReadOnly(path.to_path_buf()));
        }

        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|e| LocError::io(dir, e))?;

        let mut file = NamedTempFile::new_in(dir).map_err(|e| LocError::io(dir, e))?;
        file.write_all(text.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| LocError::io(path, e))?;
        file.persist(path).map_err(|e| LocError::io(path, e.error))?;

        tracing::debug!(path = %path.display(), bytes = text.len(), "Wrote table");
        Ok(())
    }

    fn is_read_only(&self, path: &Path) -> bool {
        fs::metadata(path)
            .map(|m| m.permissions().readonly())
            .unwrap_or(false)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
