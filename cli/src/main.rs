//! contig - strip comments from C-like sources.

use std::process::ExitCode;

use clap::Parser;
use contig_cli::cli::{Cli, Command};
use contig_cli::{commands, common};

fn main() -> ExitCode {
    // Install panic handler for user-friendly crash reporting
    common::panic::install_handler();

    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Strip(args) => commands::strip::run(args, cli.no_color),
        Command::Completions(args) => {
            commands::completions::run(args);
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => common::error::render_and_exit(e, cli.no_color),
    }
}
