//! Unzip command implementation.

use super::Context;
use super::terminal_prompter;
use crate::cli::UnzipArgs;
use crate::error::convert_extraction_error;
use crate::progress::run_with_progress;
use crate::prompt::UNZIP_DESTINATION;
use crate::prompt::UNZIP_SOURCE;
use anyhow::Result;
use compressor_core::ExtractionConfig;
use compressor_core::extract_archive_with_progress;

pub fn execute(args: &UnzipArgs, ctx: &Context<'_>) -> Result<()> {
    let mut prompter = terminal_prompter();
    let archive = prompter.path_or_ask(args.archive.as_deref(), &UNZIP_SOURCE)?;
    let output_dir = prompter.path_or_ask(args.output_dir.as_deref(), &UNZIP_DESTINATION)?;

    let config = ExtractionConfig::default().with_preserve_permissions(!args.no_permissions);

    let report = run_with_progress(ctx.progress, "Extracting", "inflating", |progress| {
        extract_archive_with_progress(&archive, &output_dir, &config, progress)
    })
    .map_err(|e| convert_extraction_error(e, &archive))?;

    for warning in &report.warnings {
        ctx.formatter.format_warning(warning);
    }
    ctx.formatter.format_extraction_result(&output_dir, &report)?;

    Ok(())
}
