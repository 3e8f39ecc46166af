//! Compressor CLI - zip a file or directory tree, unzip it back.

mod cli;
mod commands;
mod error;
mod output;
mod progress;
mod prompt;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    let ctx = commands::Context {
        formatter: &*formatter,
        progress: progress::ProgressMode::from_flags(cli.verbose, cli.quiet, cli.json),
    };

    let result = match &cli.command {
        cli::Commands::Zip(args) => commands::zip::execute(args, &ctx),
        cli::Commands::Unzip(args) => commands::unzip::execute(args, &ctx),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            formatter.format_error(cli.command.name(), &err);
            ExitCode::FAILURE
        }
    }
}
