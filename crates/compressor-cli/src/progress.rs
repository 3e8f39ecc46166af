//! Progress reporting for CLI operations.

use compressor_core::NoopProgress;
use compressor_core::ProgressCallback;
use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use std::path::Path;

/// How an operation reports progress while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// Nothing until the final summary.
    Silent,
    /// One line per entry (`--verbose`).
    Entries,
    /// Progress bar on an interactive terminal.
    Bar,
}

impl ProgressMode {
    /// Picks the mode for the global output flags.
    pub fn from_flags(verbose: bool, quiet: bool, json: bool) -> Self {
        if quiet || json {
            Self::Silent
        } else if verbose {
            Self::Entries
        } else if CliProgress::should_show() {
            Self::Bar
        } else {
            Self::Silent
        }
    }
}

/// Runs `op` with the progress callback matching `mode`.
///
/// `label` titles the progress bar, `verb` prefixes the per-entry lines.
pub fn run_with_progress<T>(
    mode: ProgressMode,
    label: &str,
    verb: &'static str,
    op: impl FnOnce(&mut dyn ProgressCallback) -> T,
) -> T {
    match mode {
        ProgressMode::Silent => op(&mut NoopProgress),
        ProgressMode::Entries => op(&mut EntryLogger::new(verb)),
        ProgressMode::Bar => op(&mut CliProgress::new(label)),
    }
}

/// CLI progress bar wrapper implementing `ProgressCallback`.
///
/// Tracks entries against the archive total and shows the bytes copied so
/// far. Clears itself on drop, so a failed operation leaves no bar behind.
pub struct CliProgress {
    bar: ProgressBar,
    bytes_written: u64,
}

impl CliProgress {
    /// Creates a progress bar; its length is set by the first entry event.
    #[must_use]
    pub fn new(label: &str) -> Self {
        let bar = ProgressBar::new(0);

        // Template: "Archiving [████████░░░░] 42/100 entries 15.2 MB"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{prefix} [{bar:40.cyan/blue}] {pos}/{len} entries {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        bar.set_prefix(label.to_string());

        Self {
            bar,
            bytes_written: 0,
        }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_entry_start(&mut self, _path: &Path, total: usize, _current: usize) {
        self.bar.set_length(total as u64);
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes_written += bytes;
        self.bar.set_message(humanize_bytes(self.bytes_written));
    }

    fn on_entry_complete(&mut self, _path: &Path) {
        self.bar.inc(1);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Prints one line per entry, like `zip` and `unzip` do.
pub struct EntryLogger {
    verb: &'static str,
    term: Term,
}

impl EntryLogger {
    pub fn new(verb: &'static str) -> Self {
        Self {
            verb,
            term: Term::stdout(),
        }
    }

    fn line(&self, path: &Path) -> String {
        format!("  {}: {}", self.verb, path.display())
    }
}

impl ProgressCallback for EntryLogger {
    fn on_entry_start(&mut self, path: &Path, _total: usize, _current: usize) {
        let _ = self.term.write_line(&self.line(path));
    }

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}

/// Converts bytes to human-readable format (KB, MB, GB, TB).
pub fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
