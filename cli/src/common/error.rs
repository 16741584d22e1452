//! Error handling utilities for the CLI.

use std::io;
use std::path::PathBuf;

use contig_strip::StripError;
use nu_ansi_term::Color;
use thiserror::Error;

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{name}: {source}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{name}: {source}")]
    Strip {
        name: String,
        #[source]
        source: StripError,
    },

    #[error("cannot use --write with stdin")]
    WriteStdin,
}

/// Render an error as a single `error: ...` line.
pub fn render(error: &CliError, no_color: bool) -> String {
    let label = if no_color {
        "error:".to_string()
    } else {
        Color::Red.bold().paint("error:").to_string()
    };
    format!("{label} {error}")
}

/// Print an error to stderr without exiting.
pub fn report(error: &CliError, no_color: bool) {
    eprintln!("{}", render(error, no_color));
}

/// Render an error to stderr and exit with code 1.
pub fn render_and_exit(error: CliError, no_color: bool) -> ! {
    report(&error, no_color);
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_rendering_has_no_escapes() {
        let rendered = render(&CliError::WriteStdin, true);
        assert_eq!(rendered, "error: cannot use --write with stdin");
    }

    #[test]
    fn colored_rendering_wraps_the_label() {
        let rendered = render(&CliError::WriteStdin, false);
        assert!(rendered.starts_with("\x1b["));
        assert!(rendered.ends_with("cannot use --write with stdin"));
    }

    #[test]
    fn io_errors_carry_the_file_name() {
        let err = CliError::Read {
            name: "main.c".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "main.c: not found");
    }
}
