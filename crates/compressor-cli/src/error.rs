//! Error conversion utilities for CLI.
//!
//! Converts compressor-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use compressor_core::ArchiveError;
use std::io::ErrorKind;
use std::path::Path;

/// Converts an error raised while archiving `source`.
pub fn convert_creation_error(err: ArchiveError, source: &Path) -> anyhow::Error {
    match err {
        ArchiveError::SourceNotFound { path } => {
            anyhow!(
                "Source not found: '{}'\n\
                 HINT: Check the path for typos; nothing was written.",
                path.display()
            )
        }
        ArchiveError::InvalidEntryName { path } => {
            anyhow!(
                "Cannot archive '{}': path is not valid UTF-8\n\
                 HINT: ZIP entry names must be UTF-8. Rename the file and try again.",
                path.display()
            )
        }
        ArchiveError::PathIo { path, source: io } => io_error(&path, &io, source),
        ArchiveError::Io(io) => {
            anyhow!("I/O error while archiving '{}': {}", source.display(), io)
        }
        _ => anyhow::Error::from(err).context(format!("Error archiving '{}'", source.display())),
    }
}

/// Converts an error raised while extracting `archive`.
pub fn convert_extraction_error(err: ArchiveError, archive: &Path) -> anyhow::Error {
    match err {
        ArchiveError::PathTraversal { path } => {
            anyhow!(
                "Security violation: Archive '{}' attempted path traversal with '{}'\n\
                 HINT: This archive may be malicious. Do not extract from untrusted sources.",
                archive.display(),
                path.display()
            )
        }
        ArchiveError::SecurityViolation { reason } => {
            anyhow!(
                "Security violation in '{}': {}\n\
                 HINT: This archive may be malicious. Do not extract from untrusted sources.",
                archive.display(),
                reason
            )
        }
        ArchiveError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: The file may be corrupted or may not be a ZIP archive.",
                archive.display(),
                reason
            )
        }
        ArchiveError::PathIo { ref path, source: ref io }
            if path.as_path() == archive && io.kind() == ErrorKind::NotFound =>
        {
            anyhow!("Archive not found: '{}'", archive.display())
        }
        ArchiveError::PathIo { path, source: io } => io_error(&path, &io, archive),
        ArchiveError::Io(io) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io
            )
        }
        _ => anyhow::Error::from(err)
            .context(format!("Error processing archive '{}'", archive.display())),
    }
}

fn io_error(path: &Path, io: &std::io::Error, operand: &Path) -> anyhow::Error {
    if io.kind() == ErrorKind::PermissionDenied {
        anyhow!(
            "Permission denied at '{}' while processing '{}'\n\
             HINT: Check that you can read the source and write the destination.",
            path.display(),
            operand.display()
        )
    } else {
        anyhow!(
            "I/O error at '{}' while processing '{}': {}",
            path.display(),
            operand.display(),
            io
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_path_traversal_error() {
        let err = ArchiveError::PathTraversal {
            path: PathBuf::from("../../../etc/passwd"),
        };
        let converted = convert_extraction_error(err, Path::new("malicious.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("path traversal"));
        assert!(msg.contains("malicious.zip"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_invalid_archive_error() {
        let err = ArchiveError::InvalidArchive("invalid Zip archive".into());
        let converted = convert_extraction_error(err, Path::new("notes.txt"));
        let msg = converted.to_string();
        assert!(msg.contains("Invalid archive 'notes.txt'"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_missing_archive() {
        let err = ArchiveError::io_at(
            "gone.zip",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        let converted = convert_extraction_error(err, Path::new("gone.zip"));
        assert_eq!(converted.to_string(), "Archive not found: 'gone.zip'");
    }

    #[test]
    fn test_convert_source_not_found() {
        let err = ArchiveError::SourceNotFound {
            path: PathBuf::from("nope"),
        };
        let converted = convert_creation_error(err, Path::new("nope"));
        let msg = converted.to_string();
        assert!(msg.contains("Source not found: 'nope'"));
        assert!(msg.contains("nothing was written"));
    }

    #[test]
    fn test_convert_permission_denied_names_path() {
        let err = ArchiveError::io_at(
            "project/secret.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let converted = convert_creation_error(err, Path::new("project"));
        let msg = converted.to_string();
        assert!(msg.contains("project/secret.txt"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_io_error() {
        let io_err = io::Error::other("disk full");
        let converted = convert_extraction_error(ArchiveError::Io(io_err), Path::new("a.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("disk full"));
    }
}
