//! Validated destination directory type.

use crate::ArchiveError;
use crate::Result;
use std::path::Path;
use std::path::PathBuf;

/// The root directory an archive is extracted into.
///
/// A `DestDir` always names an existing directory by its absolute canonical
/// path, so entry paths can be checked against it with a plain prefix
/// comparison.
///
/// # Examples
///
/// ```no_run
/// use compressor_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::create("/tmp/extraction/nested")?;
/// println!("Extracting to: {}", dest.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Creates the directory (and any missing parents) and canonicalizes it.
    ///
    /// Existing directories are accepted as they are; nothing inside them is
    /// touched.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path exists but is not a directory
    /// - A directory along the path cannot be created
    /// - The path cannot be canonicalized
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() && !path.is_dir() {
            return Err(ArchiveError::io_at(
                path,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "destination exists and is not a directory",
                ),
            ));
        }

        std::fs::create_dir_all(path).map_err(|e| ArchiveError::io_at(path, e))?;

        let canonical = path
            .canonicalize()
            .map_err(|e| ArchiveError::io_at(path, e))?;

        Ok(Self(canonical))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins a validated entry path to this destination directory.
    #[inline]
    #[must_use]
    pub fn join(&self, safe_path: &super::SafePath) -> PathBuf {
        self.0.join(safe_path.as_path())
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}
