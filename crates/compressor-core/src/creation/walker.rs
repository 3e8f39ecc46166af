//! Source tree traversal and entry naming.
//!
//! The walker turns a source path into the ordered list of entries the ZIP
//! writer consumes. A directory source contributes its own base name as the
//! root prefix of every entry, so extracting the archive recreates the
//! top-level folder. A single file becomes one entry named after the file.

use crate::ArchiveError;
use crate::Result;
use crate::creation::config::CreationConfig;
use std::fs::Metadata;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// A visited source node with its computed archive name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Full filesystem path to the entry.
    pub path: PathBuf,

    /// Slash-separated name inside the archive, without the trailing slash
    /// of directory entries.
    pub archive_name: String,

    /// Type of entry.
    pub entry_type: EntryType,

    /// Size in bytes (0 for directories).
    pub size: u64,

    /// Unix permission bits, when the platform has them.
    pub mode: Option<u32>,
}

/// Type of source entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryType {
    /// Regular file.
    File,

    /// Directory.
    Directory,

    /// Symbolic link that was not followed.
    Symlink {
        /// Target of the symlink.
        target: PathBuf,
    },
}

/// Collects every entry under `source`, depth-first with siblings sorted by
/// file name.
///
/// `exclude` is a path relative to `source` that must not be archived (the
/// output archive, when it already lives inside the source tree).
///
/// # Examples
///
/// ```no_run
/// use compressor_core::creation::CreationConfig;
/// use compressor_core::creation::walker::collect_entries;
/// use std::path::Path;
///
/// let entries = collect_entries(Path::new("project"), &CreationConfig::default(), None)?;
/// for entry in &entries {
///     println!("{}", entry.archive_name);
/// }
/// # Ok::<(), compressor_core::ArchiveError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - Source path does not exist
/// - Directory traversal or metadata access fails
/// - A path is not valid UTF-8
pub fn collect_entries(
    source: &Path,
    config: &CreationConfig,
    exclude: Option<&Path>,
) -> Result<Vec<SourceEntry>> {
    let metadata = match std::fs::metadata(source) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ArchiveError::SourceNotFound {
                path: source.to_path_buf(),
            });
        }
        Err(e) => return Err(ArchiveError::io_at(source, e)),
    };

    if !metadata.is_dir() {
        let name = base_name(source)?.ok_or_else(|| ArchiveError::InvalidEntryName {
            path: source.to_path_buf(),
        })?;
        return Ok(vec![SourceEntry {
            path: source.to_path_buf(),
            archive_name: name,
            entry_type: EntryType::File,
            size: metadata.len(),
            mode: unix_mode(&metadata),
        }]);
    }

    let prefix = base_name(source)?;
    let mut entries = Vec::new();

    let walker = WalkDir::new(source)
        .follow_links(config.follow_symlinks)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        let relative = path
            .strip_prefix(source)
            .map_err(|_| ArchiveError::InvalidEntryName {
                path: path.to_path_buf(),
            })?;

        if exclude.is_some_and(|excluded| excluded == relative) {
            continue;
        }

        let archive_name = entry_name(prefix.as_deref(), relative)?;
        if archive_name.is_empty() {
            // Root of a source without a usable name, e.g. `/`
            continue;
        }

        let metadata = entry.metadata()?;
        let entry_type = if entry.file_type().is_symlink() {
            let target =
                std::fs::read_link(path).map_err(|e| ArchiveError::io_at(path, e))?;
            EntryType::Symlink { target }
        } else if metadata.is_dir() {
            EntryType::Directory
        } else {
            EntryType::File
        };

        let size = if entry_type == EntryType::File {
            metadata.len()
        } else {
            0
        };

        entries.push(SourceEntry {
            path: path.to_path_buf(),
            archive_name,
            entry_type,
            size,
            mode: unix_mode(&metadata),
        });
    }

    Ok(entries)
}

/// Returns the final component of `path` as UTF-8.
///
/// Paths ending in `.` or `..` have no file name of their own, so the
/// canonical path is consulted. The filesystem root has no name at all.
fn base_name(path: &Path) -> Result<Option<String>> {
    let name = match path.file_name() {
        Some(name) => Some(name.to_os_string()),
        None => path
            .canonicalize()
            .map_err(|e| ArchiveError::io_at(path, e))?
            .file_name()
            .map(std::ffi::OsStr::to_os_string),
    };

    name.map(|name| {
        name.into_string()
            .map_err(|_| ArchiveError::InvalidEntryName {
                path: path.to_path_buf(),
            })
    })
    .transpose()
}

/// Joins the root prefix and a relative path with forward slashes.
///
/// # Examples
///
/// ```
/// use compressor_core::creation::walker::entry_name;
/// use std::path::Path;
///
/// assert_eq!(entry_name(Some("project"), Path::new("sub/b.txt"))?, "project/sub/b.txt");
/// assert_eq!(entry_name(Some("project"), Path::new(""))?, "project");
/// assert_eq!(entry_name(None, Path::new("a.txt"))?, "a.txt");
/// # Ok::<(), compressor_core::ArchiveError>(())
/// ```
pub fn entry_name(prefix: Option<&str>, relative: &Path) -> Result<String> {
    let mut parts: Vec<&str> = prefix.into_iter().collect();

    for component in relative.components() {
        let part = component
            .as_os_str()
            .to_str()
            .ok_or_else(|| ArchiveError::InvalidEntryName {
                path: relative.to_path_buf(),
            })?;
        parts.push(part);
    }

    Ok(parts.join("/"))
}

#[cfg(unix)]
fn unix_mode(metadata: &Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    Some(metadata.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
fn unix_mode(_metadata: &Metadata) -> Option<u32> {
    None
}
