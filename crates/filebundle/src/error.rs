//! Bundle error types.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Error returned by every fallible bundle operation.
#[derive(Debug, Error)]
pub enum BundleError {
    /// No entry with this path or name in either backend.
    #[error("not found: {0}")]
    NotFound(String),

    /// Expected a directory.
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// Expected a file.
    #[error("is a directory: {0}")]
    IsADirectory(String),

    /// Malformed path (no directory separator, empty leaf name).
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Relative path climbs out of the data root.
    #[error("path escapes data root: {0}")]
    PathEscapesRoot(String),

    /// Caller broke an open precondition (e.g. decompress and compress together).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Inflate did not end cleanly or did not produce the expected size.
    #[error("decompression failed: {0}")]
    Decompress(String),

    /// Deflate did not end cleanly or produced no output.
    #[error("compression failed: {0}")]
    Compress(String),

    /// Settings could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl BundleError {
    /// Create a NotFound error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound(path.into())
    }

    /// Create a NotADirectory error.
    pub fn not_a_directory(path: impl Into<String>) -> Self {
        Self::NotADirectory(path.into())
    }

    /// Create an IsADirectory error.
    pub fn is_a_directory(path: impl Into<String>) -> Self {
        Self::IsADirectory(path.into())
    }

    /// Create an InvalidPath error.
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath(path.into())
    }

    /// Create a PathEscapesRoot error.
    pub fn path_escapes_root(path: impl Into<String>) -> Self {
        Self::PathEscapesRoot(path.into())
    }

    /// Create an InvalidRequest error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a Decompress error.
    pub fn decompress(msg: impl Into<String>) -> Self {
        Self::Decompress(msg.into())
    }

    /// Create a Compress error.
    pub fn compress(msg: impl Into<String>) -> Self {
        Self::Compress(msg.into())
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Attach a path to an OS error, promoting the kinds we model directly.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let shown = path.display().to_string();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(shown),
            io::ErrorKind::NotADirectory => Self::NotADirectory(shown),
            io::ErrorKind::IsADirectory => Self::IsADirectory(shown),
            _ => Self::Io(err),
        }
    }

    /// Returns true for the NotFound variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Convert BundleError to std::io::Error for `Read` compatibility.
impl From<BundleError> for io::Error {
    fn from(e: BundleError) -> Self {
        match e {
            BundleError::NotFound(msg) => io::Error::new(io::ErrorKind::NotFound, msg),
            BundleError::NotADirectory(msg) => io::Error::new(io::ErrorKind::NotADirectory, msg),
            BundleError::IsADirectory(msg) => io::Error::new(io::ErrorKind::IsADirectory, msg),
            BundleError::InvalidPath(msg) => io::Error::new(io::ErrorKind::InvalidInput, msg),
            BundleError::PathEscapesRoot(msg) => {
                io::Error::new(io::ErrorKind::PermissionDenied, msg)
            }
            BundleError::InvalidRequest(msg) => io::Error::new(io::ErrorKind::InvalidInput, msg),
            BundleError::Decompress(msg) | BundleError::Compress(msg) => {
                io::Error::new(io::ErrorKind::InvalidData, msg)
            }
            BundleError::Config(msg) => io::Error::other(msg),
            BundleError::Io(e) => e,
        }
    }
}

/// Bundle result type.
pub type BundleResult<T> = Result<T, BundleError>;
