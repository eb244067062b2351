//! Error types for resource tree operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving, listing, reading or writing resources.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The logical path escapes the configured root or is malformed.
    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    /// Nothing exists at the resolved location.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// A directory was required.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// A plain file was required.
    #[error("Not a file: {path}")]
    NotAFile { path: PathBuf },

    /// Generic I/O error, including failures writing to the output sink.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl TreeError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create an invalid path error.
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    /// Check whether this error means the target does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_error_io_not_found() {
        let err = TreeError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_tree_error_io_other() {
        let err = TreeError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"),
        );
        assert!(matches!(err, TreeError::Io { .. }));
        assert!(err.to_string().contains("/test/path"));
    }
}
