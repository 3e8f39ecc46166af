//! Validated entry path type for archive extraction.

use crate::ArchiveError;
use crate::ExtractionConfig;
use crate::Result;
use std::path::Path;
use std::path::PathBuf;

use super::DestDir;

/// An archive entry name that has been checked to stay inside a `DestDir`.
///
/// `SafePath` holds a relative path built only from normal components:
/// no `..`, no root, no drive prefix, no NUL bytes. On top of the lexical
/// checks, the deepest part of the destination that already exists on disk is
/// canonicalized, so a symlink planted inside the destination cannot redirect
/// a write outside of it.
///
/// There is no `From<PathBuf>`; validation is the only constructor.
///
/// # Examples
///
/// ```no_run
/// use compressor_core::ExtractionConfig;
/// use compressor_core::types::DestDir;
/// use compressor_core::types::SafePath;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::create("/tmp/out")?;
/// let config = ExtractionConfig::default();
///
/// let safe = SafePath::validate("project/src/main.rs", &dest, &config)?;
/// assert!(SafePath::validate("../etc/passwd", &dest, &config).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafePath(PathBuf);

impl SafePath {
    /// Validates an archive entry name against `dest`.
    ///
    /// Backslashes are treated as separators so names written by Windows
    /// tools resolve the same way everywhere. Empty and `.` segments (for
    /// example the trailing slash of a directory entry) are dropped.
    ///
    /// # Errors
    ///
    /// - `ArchiveError::SecurityViolation` for NUL bytes or excessive depth
    /// - `ArchiveError::PathTraversal` for `..`, absolute names, drive
    ///   prefixes, empty names, or names resolving outside `dest`
    pub fn validate(name: &str, dest: &DestDir, config: &ExtractionConfig) -> Result<Self> {
        if name.contains('\0') {
            return Err(ArchiveError::SecurityViolation {
                reason: format!("entry name contains null bytes: {name:?}"),
            });
        }

        let normalized = name.replace('\\', "/");
        if normalized.starts_with('/') || has_drive_prefix(&normalized) {
            return Err(traversal(name));
        }

        let mut relative = PathBuf::new();
        let mut depth = 0;
        for segment in normalized.split('/') {
            match segment {
                "" | "." => {}
                ".." => return Err(traversal(name)),
                _ => {
                    depth += 1;
                    relative.push(segment);
                }
            }
        }

        if relative.as_os_str().is_empty() {
            return Err(traversal(name));
        }

        if depth > config.max_path_depth {
            return Err(ArchiveError::SecurityViolation {
                reason: format!(
                    "entry depth {depth} exceeds maximum {}",
                    config.max_path_depth
                ),
            });
        }

        verify_within(&dest.as_path().join(&relative), dest, name)?;

        Ok(Self(relative))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

fn traversal(name: &str) -> ArchiveError {
    ArchiveError::PathTraversal {
        path: PathBuf::from(name),
    }
}

fn has_drive_prefix(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic()
}

/// Resolves the deepest existing ancestor of `resolved` and checks it is
/// still under `dest`. A dangling symlink on the way is rejected, since
/// creating the entry would follow it.
fn verify_within(resolved: &Path, dest: &DestDir, name: &str) -> Result<()> {
    for ancestor in resolved.ancestors() {
        match std::fs::symlink_metadata(ancestor) {
            Ok(_) => {
                return match ancestor.canonicalize() {
                    Ok(canonical) if canonical.starts_with(dest.as_path()) => Ok(()),
                    Ok(_) => Err(traversal(name)),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(traversal(name)),
                    Err(e) => Err(ArchiveError::io_at(ancestor, e)),
                };
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(ArchiveError::io_at(ancestor, e)),
        }
    }

    Err(traversal(name))
}
