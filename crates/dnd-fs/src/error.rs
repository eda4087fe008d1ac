//! Error types for dnd-fs

use std::path::PathBuf;

/// Result type for dnd-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dnd-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{operation} is not supported on this platform ({path})")]
    Unsupported {
        operation: &'static str,
        path: PathBuf,
    },

    #[error("Lock acquisition failed for {path}, is another commit running?")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the underlying I/O error reports a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
