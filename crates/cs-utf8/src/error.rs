use std::io;
use std::path::PathBuf;

/// Errors produced by the UTF-8 checker.
///
/// Buffer content never causes an error; only the file wrappers fail.
#[derive(Debug, thiserror::Error)]
pub enum Utf8CheckError {
    /// Reading or writing a file failed.
    #[error("io error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Utf8CheckError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The underlying I/O error kind.
    pub fn io_kind(&self) -> io::ErrorKind {
        match self {
            Self::Io { source, .. } => source.kind(),
        }
    }
}

/// Convenience alias used throughout the checker crate.
pub type Result<T> = std::result::Result<T, Utf8CheckError>;
