//! Command-line interface definitions.
//!
//! This module contains only clap struct definitions - no business logic.
//! All command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// contig - strip comments from C-like sources
#[derive(Parser, Debug)]
#[command(name = "contig", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Remove `//` and `/* */` comments, keeping string literals intact
    Strip(StripArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `strip` command.
#[derive(Args, Debug)]
pub struct StripArgs {
    /// Files to strip (use "-" for stdin; stdin if none are given)
    pub files: Vec<String>,

    /// Write the stripped output to this file instead of stdout
    #[arg(short, long, conflicts_with = "write")]
    pub output: Option<PathBuf>,

    /// Strip files in place
    #[arg(long)]
    pub write: bool,

    /// Exit with an error if any input contains comments
    #[arg(long, conflicts_with_all = ["write", "output"])]
    pub check: bool,

    /// Suppress informational output
    #[arg(long, short)]
    pub quiet: bool,
}

impl StripArgs {
    /// The inputs to process, defaulting to stdin.
    pub fn inputs(&self) -> Vec<&str> {
        if self.files.is_empty() {
            vec!["-"]
        } else {
            self.files.iter().map(String::as_str).collect()
        }
    }
}

/// Arguments for the `completions` command.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn strip_defaults_to_stdin() {
        let cli = Cli::parse_from(["contig", "strip"]);
        let Command::Strip(args) = cli.command else {
            panic!("expected strip command");
        };
        assert_eq!(args.inputs(), ["-"]);
    }

    #[test]
    fn check_conflicts_with_write() {
        let err = Cli::try_parse_from(["contig", "strip", "--check", "--write", "a.c"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
