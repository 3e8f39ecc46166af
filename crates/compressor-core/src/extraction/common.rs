//! Filesystem writes used by the extractor.
//!
//! Every function takes a destination that has already been validated
//! through `SafePath`, and every handle it opens is dropped before it
//! returns.

use std::fs::File;
use std::fs::create_dir_all;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use crate::ArchiveError;
use crate::ProgressCallback;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;

/// Writes one file entry to `output_path`, truncating anything already there.
///
/// Parent directories are created when the archive has no explicit entry
/// for them. `mode` is applied once the content is flushed, so read-only
/// modes do not block the write itself.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns an error naming `output_path` if a parent cannot be created, the
/// file cannot be opened, or the copy fails (including a CRC mismatch in the
/// entry stream).
pub fn extract_file<R: Read + ?Sized>(
    reader: &mut R,
    output_path: &Path,
    mode: Option<u32>,
    buffer: &mut CopyBuffer,
    progress: &mut dyn ProgressCallback,
) -> Result<u64> {
    if let Some(parent) = output_path.parent() {
        create_dir_all(parent).map_err(|e| ArchiveError::io_at(parent, e))?;
    }

    let bytes_written = {
        let output_file =
            File::create(output_path).map_err(|e| ArchiveError::io_at(output_path, e))?;
        let mut writer = BufWriter::with_capacity(64 * 1024, output_file);
        let written = copy_with_buffer(reader, &mut writer, buffer, progress)
            .map_err(|e| ArchiveError::io_at(output_path, e))?;
        writer
            .flush()
            .map_err(|e| ArchiveError::io_at(output_path, e))?;
        written
    };

    if let Some(mode) = mode {
        set_mode(output_path, mode)?;
    }

    Ok(bytes_written)
}

/// Creates a directory and its parents. Existing directories are fine.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, for example because
/// a file already occupies the path.
pub fn create_directory(dir_path: &Path) -> Result<()> {
    create_dir_all(dir_path).map_err(|e| ArchiveError::io_at(dir_path, e))
}

/// Applies the permission bits of an entry mode.
///
/// File-type bits and setuid/setgid/sticky are dropped; only `0o777` is
/// applied. A no-op on platforms without unix permissions.
///
/// # Errors
///
/// Returns an error if the permissions cannot be changed.
#[cfg(unix)]
pub fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let permissions = std::fs::Permissions::from_mode(mode & 0o777);
    std::fs::set_permissions(path, permissions).map_err(|e| ArchiveError::io_at(path, e))
}

/// Applies the permission bits of an entry mode.
///
/// A no-op on platforms without unix permissions.
///
/// # Errors
///
/// Never fails on this platform.
#[cfg(not(unix))]
pub fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::NoopProgress;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_extract_file_creates_parents() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let output = temp.path().join("a/b/c.txt");
        let mut buffer = CopyBuffer::new();

        let written = extract_file(
            &mut Cursor::new(b"nested"),
            &output,
            None,
            &mut buffer,
            &mut NoopProgress,
        )
        .unwrap();

        assert_eq!(written, 6);
        assert_eq!(fs::read_to_string(&output).unwrap(), "nested");
    }

    #[test]
    fn test_extract_file_truncates_existing() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let output = temp.path().join("file.txt");
        fs::write(&output, "much longer previous content").unwrap();
        let mut buffer = CopyBuffer::new();

        extract_file(
            &mut Cursor::new(b"short"),
            &output,
            None,
            &mut buffer,
            &mut NoopProgress,
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "short");
    }

    #[test]
    fn test_extract_file_over_directory_fails() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let output = temp.path().join("occupied");
        fs::create_dir(&output).unwrap();
        let mut buffer = CopyBuffer::new();

        let result = extract_file(
            &mut Cursor::new(b"x"),
            &output,
            None,
            &mut buffer,
            &mut NoopProgress,
        );

        let err = result.unwrap_err();
        assert_eq!(err.path(), Some(output.as_path()));
    }

    #[test]
    fn test_create_directory_idempotent() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let dir = temp.path().join("x/y");

        create_directory(&dir).unwrap();
        create_directory(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    #[cfg(unix)]
    fn test_mode_applied_after_write() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("failed to create temp dir");
        let output = temp.path().join("readonly.txt");
        let mut buffer = CopyBuffer::new();

        extract_file(
            &mut Cursor::new(b"locked"),
            &output,
            Some(0o100_444),
            &mut buffer,
            &mut NoopProgress,
        )
        .unwrap();

        let mode = fs::metadata(&output).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o444);
        assert_eq!(fs::read_to_string(&output).unwrap(), "locked");
    }

    #[test]
    #[cfg(unix)]
    fn test_set_mode_strips_special_bits() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("failed to create temp dir");
        let output = temp.path().join("tool");
        fs::write(&output, "bin").unwrap();

        set_mode(&output, 0o4755).unwrap();

        let mode = fs::metadata(&output).unwrap().permissions().mode();
        assert_eq!(mode & 0o7777, 0o755);
    }
}
