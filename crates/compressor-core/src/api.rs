//! High-level public API for archive creation and extraction.

use std::path::Path;

use crate::ExtractionConfig;
use crate::ExtractionReport;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::creation::CreationConfig;
use crate::creation::CreationReport;

/// Archives `source` into a new ZIP file at `target` with default settings.
///
/// A directory source is stored under its own base name, so
/// `archive("project", "out.zip")` produces entries like `project/a.txt`.
/// A file source produces a single entry named after the file.
///
/// # Errors
///
/// Returns an error if the source does not exist, the target cannot be
/// created, or any source file cannot be read.
///
/// # Examples
///
/// ```no_run
/// use compressor_core::archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = archive("project", "project.zip")?;
/// println!("Archived {} files", report.files_added);
/// # Ok(())
/// # }
/// ```
pub fn archive<P: AsRef<Path>, Q: AsRef<Path>>(source: P, target: Q) -> Result<CreationReport> {
    create_archive(source, target, &CreationConfig::default())
}

/// Extracts the ZIP file at `archive_path` into `target_dir` with default
/// settings.
///
/// The target directory is created if needed. Entries overwrite files of the
/// same name; everything else already in the directory is left alone.
///
/// # Errors
///
/// Returns an error if the archive cannot be opened or is not a ZIP file, an
/// entry name escapes `target_dir`, or any entry cannot be written.
///
/// # Examples
///
/// ```no_run
/// use compressor_core::extract;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = extract("project.zip", "restored")?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    target_dir: Q,
) -> Result<ExtractionReport> {
    extract_archive(archive_path, target_dir, &ExtractionConfig::default())
}

/// Creates a ZIP archive from `source`.
///
/// # Arguments
///
/// * `source` - File or directory to archive
/// * `output_path` - Path of the archive to write (overwritten if present)
/// * `config` - Creation configuration
///
/// # Errors
///
/// Same as [`archive`].
///
/// # Examples
///
/// ```no_run
/// use compressor_core::create_archive;
/// use compressor_core::creation::CreationConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CreationConfig::default().with_follow_symlinks(true);
/// let report = create_archive("src", "src.zip", &config)?;
/// println!("Created archive with {} files", report.files_added);
/// # Ok(())
/// # }
/// ```
pub fn create_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    output_path: Q,
    config: &CreationConfig,
) -> Result<CreationReport> {
    create_archive_with_progress(source, output_path, config, &mut NoopProgress)
}

/// Creates a ZIP archive with progress reporting.
///
/// # Errors
///
/// Same as [`archive`].
pub fn create_archive_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    output_path: Q,
    config: &CreationConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<CreationReport> {
    crate::creation::zip::create_zip_with_progress(source, output_path, config, progress)
}

/// Extracts a ZIP archive to the specified output directory.
///
/// # Arguments
///
/// * `archive_path` - Path to the archive file
/// * `output_dir` - Directory where entries will be written
/// * `config` - Extraction configuration
///
/// # Errors
///
/// Same as [`extract`].
///
/// # Examples
///
/// ```no_run
/// use compressor_core::ExtractionConfig;
/// use compressor_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ExtractionConfig::default().with_preserve_permissions(false);
/// let report = extract_archive("archive.zip", "/tmp/output", &config)?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractionConfig,
) -> Result<ExtractionReport> {
    extract_archive_with_progress(archive_path, output_dir, config, &mut NoopProgress)
}

/// Extracts a ZIP archive with progress reporting.
///
/// # Errors
///
/// Same as [`extract`].
pub fn extract_archive_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractionConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    crate::extraction::zip::extract_zip_with_progress(archive_path, output_dir, config, progress)
}
