//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "compressor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print every entry as it is processed
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compress a file or directory into a ZIP archive
    #[command(visible_alias = "create")]
    Zip(ZipArgs),
    /// Extract a ZIP archive into a directory
    #[command(visible_alias = "extract")]
    Unzip(UnzipArgs),
}

impl Commands {
    /// Operation name used in JSON output.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Zip(_) => "zip",
            Self::Unzip(_) => "unzip",
        }
    }
}

#[derive(clap::Args)]
pub struct ZipArgs {
    /// File or directory to compress (prompted for when omitted)
    #[arg(value_name = "SOURCE")]
    pub source: Option<PathBuf>,

    /// Archive file to write (prompted for when omitted)
    #[arg(value_name = "ARCHIVE")]
    pub archive: Option<PathBuf>,

    /// Archive the targets of symbolic links instead of skipping them
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Do not record unix permission bits
    #[arg(long)]
    pub no_permissions: bool,
}

#[derive(clap::Args)]
pub struct UnzipArgs {
    /// Archive file to extract (prompted for when omitted)
    #[arg(value_name = "ARCHIVE")]
    pub archive: Option<PathBuf>,

    /// Directory to extract into (prompted for when omitted)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Do not apply permission bits stored in the archive
    #[arg(long)]
    pub no_permissions: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_zip_with_positionals() {
        let cli = Cli::try_parse_from(["compressor", "zip", "project", "out.zip"]).unwrap();
        let Commands::Zip(args) = cli.command else {
            panic!("expected zip command");
        };
        assert_eq!(args.source, Some(PathBuf::from("project")));
        assert_eq!(args.archive, Some(PathBuf::from("out.zip")));
        assert!(!args.follow_symlinks);
        assert!(!args.no_permissions);
    }

    #[test]
    fn test_parse_aliases() {
        let cli = Cli::try_parse_from(["compressor", "create", "a", "b.zip"]).unwrap();
        assert_eq!(cli.command.name(), "zip");

        let cli = Cli::try_parse_from(["compressor", "extract", "b.zip", "out"]).unwrap();
        assert_eq!(cli.command.name(), "unzip");
    }

    #[test]
    fn test_positionals_optional() {
        let cli = Cli::try_parse_from(["compressor", "unzip"]).unwrap();
        let Commands::Unzip(args) = cli.command else {
            panic!("expected unzip command");
        };
        assert!(args.archive.is_none());
        assert!(args.output_dir.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["compressor", "unzip", "a.zip", "out", "--json", "-q"]).unwrap();
        assert!(cli.json);
        assert!(cli.quiet);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = Cli::try_parse_from(["compressor", "-v", "-q", "zip", "a", "b.zip"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["compressor"]).is_err());
        assert!(Cli::try_parse_from(["compressor", "compress"]).is_err());
    }
}
