//! Panic handler for user-friendly crash reporting.

use std::fmt;
use std::panic::PanicHookInfo;

/// Install the custom panic handler.
///
/// This should be called early in main() before any other initialization.
pub fn install_handler() {
    std::panic::set_hook(Box::new(panic_hook));
}

fn panic_hook(info: &PanicHookInfo<'_>) {
    eprintln!("\n💥 contig crashed unexpectedly!\n");
    eprintln!("{}", CrashReport::from_hook(info));
    eprintln!("\nPlease include the lines above when reporting this bug.");
}

/// What gets printed when the binary panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrashReport {
    pub version: String,
    pub os: String,
    pub arch: String,
    pub location: String,
    /// Command line arguments (each arg as a separate element).
    pub command_line: Vec<String>,
    pub message: String,
}

impl CrashReport {
    fn from_hook(info: &PanicHookInfo<'_>) -> Self {
        let message = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(|s| s.as_str()))
            .unwrap_or("unknown");

        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            location,
            command_line: std::env::args().skip(1).collect(),
            message: message.to_string(),
        }
    }

    /// The command line as typed, with arguments quoted where needed.
    pub fn format_command_line(&self) -> Option<String> {
        if self.command_line.is_empty() {
            return None;
        }
        let args: Vec<String> = self
            .command_line
            .iter()
            .map(|arg| {
                if arg.is_empty() || arg.contains(|c: char| c.is_whitespace() || c == '"') {
                    format!("{arg:?}")
                } else {
                    arg.clone()
                }
            })
            .collect();
        Some(format!("contig {}", args.join(" ")))
    }
}

impl fmt::Display for CrashReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "message:  {}", self.message)?;
        writeln!(f, "location: {}", self.location)?;
        if let Some(command) = self.format_command_line() {
            writeln!(f, "command:  {command}")?;
        }
        write!(
            f,
            "version:  {} ({}-{})",
            self.version, self.os, self.arch
        )
    }
}
