//! Error types for the diff crate.

use std::io;
use std::path::PathBuf;

/// Errors that can occur during diff operations.
///
/// Comparing two `&str` values never fails; these only surface from the
/// byte and file entry points.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// Input handed to a byte-level entry point was not UTF-8 text.
    #[error("invalid input for {label}: {reason}")]
    InvalidInput { label: String, reason: String },

    /// Reading an input file failed.
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DiffError {
    /// The underlying I/O error kind, if this is a filesystem failure.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
