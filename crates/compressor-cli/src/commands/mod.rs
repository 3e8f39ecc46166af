//! Subcommand implementations.

pub mod unzip;
pub mod zip;

use crate::output::OutputFormatter;
use crate::prompt::Prompter;
use std::io;

/// Global flags every command needs.
pub struct Context<'a> {
    pub formatter: &'a dyn OutputFormatter,
    pub progress: crate::progress::ProgressMode,
}

/// Prompter over the process's stdin, asking on stderr.
pub fn terminal_prompter() -> Prompter<io::StdinLock<'static>, io::Stderr> {
    Prompter::new(io::stdin().lock(), io::stderr())
}
