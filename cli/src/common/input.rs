//! File input utilities.

use std::io::Read;

use super::error::{CliError, CliResult};

/// Read input from a file path or stdin if path is "-".
///
/// Returns the content and a display name for error messages.
pub fn read_input(path: &str) -> CliResult<(Vec<u8>, String)> {
    if is_stdin(path) {
        let name = "<stdin>".to_string();
        let mut content = Vec::new();
        match std::io::stdin().read_to_end(&mut content) {
            Ok(_) => Ok((content, name)),
            Err(source) => Err(CliError::Read { name, source }),
        }
    } else {
        let content = std::fs::read(path).map_err(|source| CliError::Read {
            name: path.to_string(),
            source,
        })?;
        Ok((content, path.to_string()))
    }
}

/// Check if the path represents stdin.
pub fn is_stdin(path: &str) -> bool {
    path == "-"
}
