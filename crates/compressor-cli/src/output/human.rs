//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use crate::progress::humanize_bytes;
use anyhow::Result;
use compressor_core::CreationReport;
use compressor_core::ExtractionReport;
use console::Term;
use console::style;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    fn headline(&self, text: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {text}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(text);
        }
    }

    fn creation_lines(&self, report: &CreationReport) -> Vec<String> {
        let mut lines = vec![
            format!(
                "  Files added:      {}",
                Self::format_number(report.files_added)
            ),
            format!(
                "  Directories:      {}",
                Self::format_number(report.directories_added)
            ),
            format!("  Total size:       {}", humanize_bytes(report.bytes_written)),
        ];

        if report.bytes_compressed > 0 {
            lines.push(format!(
                "  Archive size:     {}",
                humanize_bytes(report.bytes_compressed)
            ));
            lines.push(format!(
                "  Compression:      {:.1}%",
                report.compression_percentage()
            ));
        }

        if report.files_skipped > 0 {
            lines.push(format!("  Skipped:          {}", report.files_skipped));
        }

        if self.verbose {
            lines.push(format!("  Duration:         {:?}", report.duration));
        }

        lines
    }

    fn extraction_lines(&self, report: &ExtractionReport) -> Vec<String> {
        let mut lines = vec![
            format!(
                "  Files extracted:  {}",
                Self::format_number(report.files_extracted)
            ),
            format!(
                "  Directories:      {}",
                Self::format_number(report.directories_created)
            ),
            format!("  Total size:       {}", humanize_bytes(report.bytes_written)),
        ];

        if report.files_skipped > 0 {
            lines.push(format!("  Skipped:          {}", report.files_skipped));
        }

        if self.verbose {
            lines.push(format!("  Duration:         {:?}", report.duration));
        }

        lines
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_creation_result(&self, output_path: &Path, report: &CreationReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(&format!("Archive created: {}", output_path.display()));
        for line in self.creation_lines(report) {
            let _ = self.term.write_line(&line);
        }

        Ok(())
    }

    fn format_extraction_result(
        &self,
        output_dir: &Path,
        report: &ExtractionReport,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(&format!("Extracted into: {}", output_dir.display()));
        for line in self.extraction_lines(report) {
            let _ = self.term.write_line(&line);
        }

        Ok(())
    }

    fn format_error(&self, _operation: &str, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if console::colors_enabled_stderr() {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:#}", style("Error:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("Error: {error:#}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if console::colors_enabled_stderr() {
            let _ = self
                .err_term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("WARNING: {message}"));
        }
    }
}
