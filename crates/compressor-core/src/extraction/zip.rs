//! ZIP archive extraction.
//!
//! Entries are processed in central-directory order. Each name is validated
//! with [`SafePath`] before anything touches the disk, and the first failure
//! aborts the whole extraction. Directory permissions are applied last so a
//! read-only directory does not block the files written into it.

use crate::ArchiveError;
use crate::ExtractionConfig;
use crate::ExtractionReport;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::extraction::common::create_directory;
use crate::extraction::common::extract_file;
use crate::extraction::common::set_mode;
use crate::types::DestDir;
use crate::types::SafePath;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;
use zip::ZipArchive;
use zip::result::ZipError;

/// Extracts the ZIP archive at `archive_path` into `output_dir`.
///
/// # Examples
///
/// ```no_run
/// use compressor_core::ExtractionConfig;
/// use compressor_core::extraction::zip::extract_zip;
///
/// let report = extract_zip("project.zip", "restored", &ExtractionConfig::default())?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok::<(), compressor_core::ArchiveError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - Archive file cannot be opened or is not a ZIP archive (the output
///   directory is not created)
/// - An entry name escapes the output directory
/// - Any entry cannot be written, naming the failing path
pub fn extract_zip<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractionConfig,
) -> Result<ExtractionReport> {
    extract_zip_with_progress(archive_path, output_dir, config, &mut NoopProgress)
}

/// Extracts a ZIP archive with progress reporting.
///
/// # Errors
///
/// Same as [`extract_zip`].
pub fn extract_zip_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractionConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    let archive_path = archive_path.as_ref();
    let start = Instant::now();

    let file = File::open(archive_path).map_err(|e| ArchiveError::io_at(archive_path, e))?;
    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|e| match e {
        ZipError::Io(io) => ArchiveError::io_at(archive_path, io),
        other => ArchiveError::InvalidArchive(format!("{}: {other}", archive_path.display())),
    })?;

    let dest = DestDir::create(output_dir)?;
    let mut report = extract_entries(&mut archive, &dest, config, progress)?;
    report.duration = start.elapsed();

    progress.on_complete();

    Ok(report)
}

/// Extracts every entry of an opened archive into `dest`.
///
/// # Errors
///
/// Returns on the first entry that fails validation or cannot be written.
pub fn extract_entries<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    dest: &DestDir,
    config: &ExtractionConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    let mut report = ExtractionReport::new();
    let mut buffer = CopyBuffer::new();
    let mut dir_modes: Vec<(PathBuf, u32)> = Vec::new();
    let total = archive.len();

    for idx in 0..total {
        let mut entry = archive.by_index(idx).map_err(|e| {
            ArchiveError::InvalidArchive(format!("failed to read ZIP entry {idx}: {e}"))
        })?;

        let name = entry.name().to_string();
        let safe_path = SafePath::validate(&name, dest, config)?;
        let output_path = dest.join(&safe_path);
        let mode = entry.unix_mode().filter(|_| config.preserve_permissions);

        progress.on_entry_start(Path::new(&name), total, idx + 1);

        if entry.is_dir() {
            create_directory(&output_path)?;
            report.directories_created += 1;
            if let Some(mode) = mode {
                dir_modes.push((output_path, mode));
            }
        } else if entry.is_symlink() {
            report.files_skipped += 1;
            report.add_warning(format!("Skipped symlink entry: {name}"));
        } else {
            let written = extract_file(&mut entry, &output_path, mode, &mut buffer, progress)?;
            report.files_extracted += 1;
            report.bytes_written += written;
        }

        progress.on_entry_complete(Path::new(&name));
    }

    // Deepest first, so a parent losing write access comes last
    for (path, mode) in dir_modes.iter().rev() {
        set_mode(path, *mode)?;
    }

    Ok(report)
}
