//! Error types for table loading and writing.
//!
//! Every error here is local to a single table file. The orchestrator
//! records them per file and keeps going.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocError {
    /// Header row does not start with `Key,SourceString`.
    #[error("Column {column} in header must be '{expected}', found '{found}'")]
    InvalidHeader {
        column: usize,
        expected: &'static str,
        found: String,
    },

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Destination exists but is not writable. The file is left untouched.
    #[error("Cannot write to read-only file: {}", .0.display())]
    ReadOnly(PathBuf),

    /// A table sits where a new one would be created, but discovery skipped
    /// it (ignore pattern or extension filter). It is never overwritten.
    #[error("Table exists but is excluded from discovery: {}", .0.display())]
    Excluded(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LocError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            std::io::ErrorKind::PermissionDenied => Self::ReadOnly(path),
            _ => Self::Io { path, source },
        }
    }

    /// Short machine-friendly name, used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            LocError::InvalidHeader { .. } => "invalid-header",
            LocError::NotFound(_) => "not-found",
            LocError::ReadOnly(_) => "read-only",
            LocError::Excluded(_) => "excluded",
            LocError::Io { .. } => "io-error",
        }
    }
}

pub type LocResult<T> = std::result::Result<T, LocError>;
