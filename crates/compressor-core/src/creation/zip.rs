//! ZIP archive creation.
//!
//! Directories become stored entries with a trailing slash; files are
//! deflated. Entries are written in the walker's order.

use crate::ArchiveError;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;
use crate::creation::config::CreationConfig;
use crate::creation::report::CreationReport;
use crate::creation::walker::EntryType;
use crate::creation::walker::SourceEntry;
use crate::creation::walker::collect_entries;
use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;

/// Sizes at or above this need ZIP64 headers.
const ZIP64_THRESHOLD: u64 = 0xFFFF_FFFF;

/// Creates a ZIP archive at `output` from `source`.
///
/// # Examples
///
/// ```no_run
/// use compressor_core::creation::CreationConfig;
/// use compressor_core::creation::zip::create_zip;
///
/// let report = create_zip("project", "project.zip", &CreationConfig::default())?;
/// println!("Added {} files", report.files_added);
/// # Ok::<(), compressor_core::ArchiveError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - Source path does not exist (the output is not created)
/// - Output is the source file itself (the source is left untouched)
/// - Output file cannot be created
/// - Any source file cannot be read, naming the failing path
pub fn create_zip<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    output: Q,
    config: &CreationConfig,
) -> Result<CreationReport> {
    create_zip_with_progress(source, output, config, &mut NoopProgress)
}

/// Creates a ZIP archive with progress reporting.
///
/// The source tree is walked before the output file is created, so a
/// missing or unreadable source leaves no output behind.
///
/// # Errors
///
/// Same as [`create_zip`].
pub fn create_zip_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    output: Q,
    config: &CreationConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<CreationReport> {
    let source = source.as_ref();
    let output = output.as_ref();
    let start = Instant::now();

    let excluded = excluded_output(source, output);
    if excluded.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
        return Err(ArchiveError::io_at(
            output,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "archive target is the source itself",
            ),
        ));
    }
    let entries = collect_entries(source, config, excluded.as_deref())?;

    let file = File::create(output).map_err(|e| ArchiveError::io_at(output, e))?;
    let mut report = CreationReport::default();
    if excluded.is_some() {
        report.files_skipped += 1;
        report.add_warning(format!(
            "Skipped output archive inside source: {}",
            output.display()
        ));
    }

    let file = write_zip(file, &entries, config, &mut report, progress).map_err(|e| match e {
        ArchiveError::Io(io) => ArchiveError::io_at(output, io),
        other => other,
    })?;

    report.bytes_compressed = file
        .metadata()
        .map_err(|e| ArchiveError::io_at(output, e))?
        .len();
    report.duration = start.elapsed();

    progress.on_complete();

    Ok(report)
}

/// Writes `entries` into a new ZIP stream and returns the finished writer.
///
/// # Errors
///
/// Returns an error if a source file cannot be read or the writer fails.
/// Read failures carry the source path; write failures are returned as
/// `ArchiveError::Io` for the caller to attach the output path.
pub fn write_zip<W: Write + Seek>(
    writer: W,
    entries: &[SourceEntry],
    config: &CreationConfig,
    report: &mut CreationReport,
    progress: &mut dyn ProgressCallback,
) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let mut buffer = CopyBuffer::new();
    let total = entries.len();

    for (idx, entry) in entries.iter().enumerate() {
        let name = Path::new(&entry.archive_name);
        progress.on_entry_start(name, total, idx + 1);

        match &entry.entry_type {
            EntryType::File => {
                add_file(&mut zip, entry, config, &mut buffer, progress)?;
                report.files_added += 1;
                report.bytes_written += entry.size;
            }
            EntryType::Directory => {
                let options = entry_options(entry, config, CompressionMethod::Stored);
                zip.add_directory(format!("{}/", entry.archive_name), options)
                    .map_err(|e| zip_write_error(&entry.archive_name, e))?;
                report.directories_added += 1;
            }
            EntryType::Symlink { target } => {
                report.files_skipped += 1;
                report.add_warning(format!(
                    "Skipped symlink: {} -> {}",
                    entry.path.display(),
                    target.display()
                ));
            }
        }

        progress.on_entry_complete(name);
    }

    zip.finish().map_err(|e| match e {
        ZipError::Io(io) => ArchiveError::Io(io),
        other => ArchiveError::Io(io::Error::other(format!(
            "failed to finish ZIP archive: {other}"
        ))),
    })
}

/// Source file handle that remembers whether a read failed, so a copy error
/// can be blamed on the source or on the archive being written.
struct SourceReader {
    file: File,
    failed: bool,
}

impl Read for SourceReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf).inspect_err(|e| {
            if e.kind() != io::ErrorKind::Interrupted {
                self.failed = true;
            }
        })
    }
}

/// Adds one file entry, holding the source handle only for the copy.
fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    entry: &SourceEntry,
    config: &CreationConfig,
    buffer: &mut CopyBuffer,
    progress: &mut dyn ProgressCallback,
) -> Result<()> {
    let file = File::open(&entry.path).map_err(|e| ArchiveError::io_at(&entry.path, e))?;
    let mut reader = SourceReader {
        file,
        failed: false,
    };

    let options = entry_options(entry, config, CompressionMethod::Deflated)
        .large_file(entry.size >= ZIP64_THRESHOLD);
    zip.start_file(entry.archive_name.as_str(), options)
        .map_err(|e| zip_write_error(&entry.archive_name, e))?;

    copy_with_buffer(&mut reader, zip, buffer, progress).map_err(|e| {
        if reader.failed {
            ArchiveError::io_at(&entry.path, e)
        } else {
            ArchiveError::Io(e)
        }
    })?;

    Ok(())
}

fn entry_options(
    entry: &SourceEntry,
    config: &CreationConfig,
    method: CompressionMethod,
) -> SimpleFileOptions {
    let options = SimpleFileOptions::default().compression_method(method);
    match entry.mode {
        Some(mode) if config.preserve_permissions => options.unix_permissions(mode),
        _ => options,
    }
}

/// Writer-side failure; the caller tags it with the output path.
fn zip_write_error(name: &str, err: ZipError) -> ArchiveError {
    match err {
        ZipError::Io(e) => ArchiveError::Io(e),
        other => ArchiveError::Io(io::Error::other(format!("{name}: {other}"))),
    }
}

/// Returns the output path relative to `source` when an archive already
/// exists there, so the walker does not pack the archive into itself.
fn excluded_output(source: &Path, output: &Path) -> Option<PathBuf> {
    let source = source.canonicalize().ok()?;
    let output = output.canonicalize().ok()?;
    output.strip_prefix(&source).ok().map(Path::to_path_buf)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use std::io::SeekFrom;
    use tempfile::TempDir;

    /// In-memory sink that refuses writes past `limit` bytes.
    struct FullDisk {
        len: u64,
        pos: u64,
        limit: u64,
    }

    impl Write for FullDisk {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.pos + buf.len() as u64 > self.limit {
                return Err(io::Error::other("no space left on device"));
            }
            self.pos += buf.len() as u64;
            self.len = self.len.max(self.pos);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Seek for FullDisk {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.pos = match pos {
                SeekFrom::Start(n) => n,
                SeekFrom::End(d) => self.len.saturating_add_signed(d),
                SeekFrom::Current(d) => self.pos.saturating_add_signed(d),
            };
            Ok(self.pos)
        }
    }

    fn entry_names(path: &Path) -> Vec<String> {
        let archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
        archive.file_names().map(str::to_string).collect()
    }

    #[test]
    fn test_create_zip_single_file() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("test.txt");
        fs::write(&source, "Hello ZIP").unwrap();
        let output = temp.path().join("output.zip");

        let report = create_zip(&source, &output, &CreationConfig::default()).unwrap();

        assert_eq!(report.files_added, 1);
        assert_eq!(report.directories_added, 0);
        assert_eq!(report.bytes_written, 9);
        assert!(report.bytes_compressed > 0);
        assert_eq!(entry_names(&output), vec!["test.txt"]);
    }

    #[test]
    fn test_create_zip_directory() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("project");
        fs::create_dir_all(source.join("sub")).unwrap();
        fs::write(source.join("a.txt"), "hello").unwrap();
        fs::write(source.join("sub/b.txt"), "world").unwrap();
        let output = temp.path().join("out.zip");

        let report = create_zip(&source, &output, &CreationConfig::default()).unwrap();

        assert_eq!(report.files_added, 2);
        assert_eq!(report.directories_added, 2);
        assert_eq!(
            entry_names(&output),
            vec!["project/", "project/a.txt", "project/sub/", "project/sub/b.txt"]
        );
    }

    #[test]
    fn test_compression_methods() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("project");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("data.txt"), "a".repeat(10_000)).unwrap();
        let output = temp.path().join("out.zip");

        create_zip(&source, &output, &CreationConfig::default()).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&output).unwrap()).unwrap();
        {
            let dir = archive.by_name("project/").unwrap();
            assert!(dir.is_dir());
            assert_eq!(dir.compression(), CompressionMethod::Stored);
        }
        let mut file = archive.by_name("project/data.txt").unwrap();
        assert_eq!(file.compression(), CompressionMethod::Deflated);
        assert!(file.compressed_size() < file.size());
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        assert_eq!(content, "a".repeat(10_000));
    }

    #[test]
    fn test_missing_source_creates_no_output() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("out.zip");

        let result = create_zip(
            temp.path().join("missing"),
            &output,
            &CreationConfig::default(),
        );

        assert!(matches!(result, Err(ArchiveError::SourceNotFound { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn test_overwrites_existing_output() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("a.txt");
        fs::write(&source, "new").unwrap();
        let output = temp.path().join("out.zip");
        fs::write(&output, "not a zip at all").unwrap();

        create_zip(&source, &output, &CreationConfig::default()).unwrap();
        assert_eq!(entry_names(&output), vec!["a.txt"]);
    }

    #[test]
    fn test_output_inside_source_is_skipped() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("project");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("a.txt"), "a").unwrap();
        let output = source.join("self.zip");
        fs::write(&output, "stale").unwrap();

        let report = create_zip(&source, &output, &CreationConfig::default()).unwrap();

        assert_eq!(report.files_skipped, 1);
        assert!(report.has_warnings());
        assert_eq!(entry_names(&output), vec!["project/", "project/a.txt"]);
    }

    #[test]
    fn test_output_same_as_source_file_rejected() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("a.txt");
        fs::write(&source, "precious data").unwrap();

        let result = create_zip(&source, &source, &CreationConfig::default());

        let err = result.unwrap_err();
        assert_eq!(err.path(), Some(source.as_path()));
        assert!(err.to_string().contains("archive target is the source itself"));
        assert_eq!(fs::read_to_string(&source).unwrap(), "precious data");
    }

    #[test]
    fn test_write_failure_not_blamed_on_source() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("noise.bin");
        // Poorly compressible bytes so deflate output outgrows the sink
        let mut state: u32 = 0x1234_5678;
        let noise: Vec<u8> = (0..256 * 1024)
            .map(|_| {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (state >> 24) as u8
            })
            .collect();
        fs::write(&source, &noise).unwrap();
        let entries = vec![SourceEntry {
            path: source,
            archive_name: "noise.bin".to_string(),
            entry_type: EntryType::File,
            size: noise.len() as u64,
            mode: None,
        }];
        let sink = FullDisk {
            len: 0,
            pos: 0,
            limit: 4096,
        };

        let result = write_zip(
            sink,
            &entries,
            &CreationConfig::default(),
            &mut CreationReport::default(),
            &mut NoopProgress,
        );

        assert!(matches!(result, Err(ArchiveError::Io(_))));
    }

    #[test]
    fn test_write_zip_to_memory() {
        let entries = vec![SourceEntry {
            path: PathBuf::from("unused"),
            archive_name: "empty".to_string(),
            entry_type: EntryType::Directory,
            size: 0,
            mode: Some(0o755),
        }];
        let mut report = CreationReport::default();

        let cursor = write_zip(
            Cursor::new(Vec::new()),
            &entries,
            &CreationConfig::default(),
            &mut report,
            &mut NoopProgress,
        )
        .unwrap();

        let archive = zip::ZipArchive::new(Cursor::new(cursor.into_inner())).unwrap();
        assert_eq!(archive.len(), 1);
        assert_eq!(report.directories_added, 1);
    }

    #[test]
    #[cfg(unix)]
    fn test_unreadable_file_names_path() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let source = temp.path().join("project");
        fs::create_dir(&source).unwrap();
        let locked = source.join("locked.txt");
        fs::write(&locked, "secret").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores permission bits
        if File::open(&locked).is_ok() {
            return;
        }

        let result = create_zip(&source, temp.path().join("out.zip"), &CreationConfig::default());
        let err = result.unwrap_err();
        assert_eq!(err.path(), Some(locked.as_path()));
    }

    #[test]
    #[cfg(unix)]
    fn test_permissions_recorded() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let source = temp.path().join("run.sh");
        fs::write(&source, "#!/bin/sh").unwrap();
        fs::set_permissions(&source, fs::Permissions::from_mode(0o750)).unwrap();
        let output = temp.path().join("out.zip");

        create_zip(&source, &output, &CreationConfig::default()).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&output).unwrap()).unwrap();
        let entry = archive.by_index(0).unwrap();
        assert_eq!(entry.unix_mode().unwrap() & 0o777, 0o750);
    }
}
