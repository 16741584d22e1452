//! The `strip` command - remove comments from files or stdin.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use contig_strip::{StripStats, strip_comments};

use crate::cli::StripArgs;
use crate::common::error::{self, CliError, CliResult};
use crate::common::input::{is_stdin, read_input};

/// Run the strip command.
///
/// Per-input failures are reported and the remaining inputs still run;
/// failing to open the `--output` file aborts the command.
pub fn run(args: StripArgs, no_color: bool) -> CliResult<ExitCode> {
    let mut sink = open_sink(args.output.as_deref())?;
    let mut has_errors = false;
    let mut has_comments = false;

    for path in args.inputs() {
        match strip_one(path, &args, &mut sink) {
            Ok(stats) => has_comments |= stats.has_comments(),
            Err(e) => {
                if !args.quiet {
                    error::report(&e, no_color);
                }
                has_errors = true;
            }
        }
    }

    sink.flush().map_err(|source| CliError::Write {
        path: sink_path(args.output.as_deref()),
        source,
    })?;

    if has_errors || (args.check && has_comments) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn open_sink(output: Option<&Path>) -> CliResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|source| CliError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

fn sink_path(output: Option<&Path>) -> PathBuf {
    output.map_or_else(|| PathBuf::from("<stdout>"), Path::to_path_buf)
}

/// Strip a single file or stdin.
fn strip_one(path: &str, args: &StripArgs, sink: &mut dyn Write) -> CliResult<StripStats> {
    // --write is incompatible with stdin
    if args.write && is_stdin(path) {
        return Err(CliError::WriteStdin);
    }

    let (input, name) = read_input(path)?;
    let mut stripped = Vec::with_capacity(input.len());
    let stats = strip_comments(input.as_slice(), &mut stripped).map_err(|source| {
        CliError::Strip {
            name: name.clone(),
            source,
        }
    })?;
    tracing::debug!(
        file = %name,
        bytes_in = stats.bytes_in,
        bytes_out = stats.bytes_out,
        comments = stats.comments,
        "stripped input"
    );

    if args.check {
        if stats.has_comments() && !args.quiet {
            println!("{name} has comments");
        }
    } else if args.write {
        if stats.has_comments() {
            std::fs::write(path, &stripped).map_err(|source| CliError::Write {
                path: PathBuf::from(path),
                source,
            })?;
            if !args.quiet {
                println!("stripped {name}");
            }
        }
    } else {
        sink.write_all(&stripped)
            .map_err(|source| CliError::Write {
                path: sink_path(args.output.as_deref()),
                source,
            })?;
    }

    Ok(stats)
}
