//! # Store Errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for workspace store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Workspace store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// File could not be read, written or removed
    #[error("Workspace I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File exists but does not hold the expected JSON
    #[error("Corrupt workspace file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Corrupt {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
