//! Command-line interface definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::CliOverrides;

/// Convert templated abstract submissions into a LaTeX poster booklet
#[derive(Debug, Parser)]
#[command(name = "posterbook", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert every submission in a directory into one LaTeX file
    Convert(ConvertArgs),
    /// Show converter availability and config file locations
    Info,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Directory holding the submissions and figures
    #[arg(default_value = ".")]
    pub input: PathBuf,

    /// Output LaTeX file [default: output.tex]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file (default: ./posterbook.toml, then the user config)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// pandoc executable
    #[arg(long, value_name = "PATH")]
    pub pandoc: Option<PathBuf>,

    /// Keep intermediate HTML files in this directory
    #[arg(long, value_name = "DIR")]
    pub intermediate_dir: Option<PathBuf>,

    /// Number posters sequentially instead of using the placeholder
    #[arg(long)]
    pub number_posters: bool,

    /// Prefix for sequential poster numbers (implies --number-posters)
    #[arg(long, value_name = "PREFIX")]
    pub poster_prefix: Option<String>,

    /// Render the optional references table
    #[arg(long)]
    pub references: bool,

    /// Match name particles ignoring case
    #[arg(long)]
    pub ignore_particle_case: bool,

    /// Write a JSON report of every file's outcome
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Print the plan without converting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress and summary output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl ConvertArgs {
    /// Overrides for flags the user actually set
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            output: self.output.clone(),
            pandoc: self.pandoc.clone(),
            intermediate_dir: self.intermediate_dir.clone(),
            number_posters: (self.number_posters || self.poster_prefix.is_some()).then_some(true),
            poster_prefix: self.poster_prefix.clone(),
            include_references: self.references.then_some(true),
            case_insensitive_particles: self.ignore_particle_case.then_some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> ConvertArgs {
        let cli = Cli::try_parse_from(std::iter::once("posterbook").chain(args.iter().copied())).unwrap();
        match cli.command {
            Commands::Convert(args) => args,
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convert_defaults() {
        let args = parse(&["convert"]);
        assert_eq!(args.input, PathBuf::from("."));
        assert!(args.output.is_none());
        assert!(!args.dry_run);
        assert_eq!(args.verbose, 0);

        let overrides = args.overrides();
        assert!(overrides.output.is_none());
        assert!(overrides.number_posters.is_none());
        assert!(overrides.include_references.is_none());
    }

    #[test]
    fn test_convert_flags() {
        let args = parse(&[
            "convert",
            "abstracts",
            "-o",
            "book.tex",
            "--poster-prefix",
            "P",
            "--references",
            "-vv",
        ]);
        assert_eq!(args.input, PathBuf::from("abstracts"));
        assert_eq!(args.verbose, 2);

        let overrides = args.overrides();
        assert_eq!(overrides.output, Some(PathBuf::from("book.tex")));
        assert_eq!(overrides.number_posters, Some(true));
        assert_eq!(overrides.poster_prefix.as_deref(), Some("P"));
        assert_eq!(overrides.include_references, Some(true));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["posterbook", "convert", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_info_command() {
        let cli = Cli::try_parse_from(["posterbook", "info"]).unwrap();
        assert!(matches!(cli.command, Commands::Info));
    }
}
