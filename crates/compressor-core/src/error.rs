//! Error types for archive creation and extraction.

use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while creating or extracting an archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O operation failed without a specific path.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O operation failed on a known path.
    #[error("I/O error at {path}: {source}")]
    PathIo {
        /// The path being read or written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Source file or directory does not exist.
    #[error("source not found: {path}")]
    SourceNotFound {
        /// The missing source path.
        path: PathBuf,
    },

    /// Archive is corrupted or not a ZIP archive at all.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Archive entry would resolve outside the extraction directory.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending entry name.
        path: PathBuf,
    },

    /// Operation not permitted by the extraction policy.
    #[error("operation denied by security policy: {reason}")]
    SecurityViolation {
        /// Reason for the violation.
        reason: String,
    },

    /// Source path cannot be represented as a ZIP entry name.
    #[error("path is not valid UTF-8: {path}")]
    InvalidEntryName {
        /// The source path.
        path: PathBuf,
    },
}

impl ArchiveError {
    /// Wraps an I/O error with the path it occurred on.
    ///
    /// # Examples
    ///
    /// ```
    /// use compressor_core::ArchiveError;
    ///
    /// let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    /// let err = ArchiveError::io_at("secret.txt", io);
    /// assert!(err.to_string().contains("secret.txt"));
    /// ```
    pub fn io_at(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::PathIo {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns `true` if this error was raised by path validation during
    /// extraction.
    ///
    /// # Examples
    ///
    /// ```
    /// use compressor_core::ArchiveError;
    /// use std::path::PathBuf;
    ///
    /// let err = ArchiveError::PathTraversal {
    ///     path: PathBuf::from("../etc/passwd"),
    /// };
    /// assert!(err.is_security_violation());
    ///
    /// let err = ArchiveError::InvalidArchive("bad".into());
    /// assert!(!err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(
            self,
            Self::PathTraversal { .. } | Self::SecurityViolation { .. }
        )
    }

    /// Returns `true` if the error means a path did not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::SourceNotFound { .. } => true,
            Self::Io(e) | Self::PathIo { source: e, .. } => {
                e.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }

    /// Returns the path the error is about, if it carries one.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::PathIo { path, .. }
            | Self::SourceNotFound { path }
            | Self::PathTraversal { path }
            | Self::InvalidEntryName { path } => Some(path),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for ArchiveError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Self::Io(e),
            other => Self::InvalidArchive(other.to_string()),
        }
    }
}

impl From<walkdir::Error> for ArchiveError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf);
        match (path, err.into_io_error()) {
            (Some(path), Some(source)) => Self::PathIo { path, source },
            (None, Some(source)) => Self::Io(source),
            (path, None) => Self::Io(std::io::Error::other(format!(
                "filesystem loop detected at {}",
                path.unwrap_or_default().display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_traversal_error() {
        let err = ArchiveError::PathTraversal {
            path: PathBuf::from("../etc/passwd"),
        };
        assert!(err.to_string().contains("path traversal"));
        assert!(err.to_string().contains("../etc/passwd"));
        assert!(err.is_security_violation());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ArchiveError = io_err.into();
        assert!(matches!(err, ArchiveError::Io(_)));
        assert!(err.is_not_found());
        assert!(err.path().is_none());
    }

    #[test]
    fn test_path_io_names_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ArchiveError::io_at("dir/locked.txt", io_err);
        let display = err.to_string();
        assert!(display.contains("dir/locked.txt"));
        assert!(display.contains("denied"));
        assert!(!err.is_not_found());
        assert_eq!(err.path(), Some(Path::new("dir/locked.txt")));
    }

    #[test]
    fn test_source_not_found() {
        let err = ArchiveError::SourceNotFound {
            path: PathBuf::from("missing"),
        };
        assert!(err.is_not_found());
        assert!(!err.is_security_violation());
        assert_eq!(err.to_string(), "source not found: missing");
    }

    #[test]
    fn test_zip_error_conversion() {
        let err: ArchiveError = zip::result::ZipError::InvalidArchive("bad magic".into()).into();
        assert!(matches!(err, ArchiveError::InvalidArchive(_)));

        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: ArchiveError = zip::result::ZipError::Io(io).into();
        assert!(matches!(err, ArchiveError::Io(_)));
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "inner error");
        let err = ArchiveError::io_at("a.txt", io_err);
        assert!(err.source().is_some());
    }
}
