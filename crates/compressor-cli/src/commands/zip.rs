//! Zip command implementation.

use super::Context;
use super::terminal_prompter;
use crate::cli::ZipArgs;
use crate::error::convert_creation_error;
use crate::progress::run_with_progress;
use crate::prompt::ZIP_DESTINATION;
use crate::prompt::ZIP_SOURCE;
use anyhow::Result;
use compressor_core::CreationConfig;
use compressor_core::create_archive_with_progress;

pub fn execute(args: &ZipArgs, ctx: &Context<'_>) -> Result<()> {
    let mut prompter = terminal_prompter();
    let source = prompter.path_or_ask(args.source.as_deref(), &ZIP_SOURCE)?;
    let archive = prompter.path_or_ask(args.archive.as_deref(), &ZIP_DESTINATION)?;

    let config = CreationConfig::default()
        .with_follow_symlinks(args.follow_symlinks)
        .with_preserve_permissions(!args.no_permissions);

    let report = run_with_progress(ctx.progress, "Archiving", "adding", |progress| {
        create_archive_with_progress(&source, &archive, &config, progress)
    })
    .map_err(|e| convert_creation_error(e, &source))?;

    for warning in &report.warnings {
        ctx.formatter.format_warning(warning);
    }
    ctx.formatter.format_creation_result(&archive, &report)?;

    Ok(())
}
