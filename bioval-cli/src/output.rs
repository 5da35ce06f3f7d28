//! Output formatting for the CLI.
//!
//! Handles human-readable and JSON output formats.

use indicatif::{ProgressBar, ProgressStyle};

use crate::OutputFormat;

/// Output handler for CLI commands.
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Check if JSON output was requested.
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a line to stdout (respects quiet mode, human format only).
    pub fn println(&self, msg: &str) {
        if !self.quiet && !self.is_json() {
            println!("{}", msg);
        }
    }

    /// Print a success message (green in human format).
    pub fn success(&self, msg: &str) {
        if !self.quiet && !self.is_json() {
            println!("\x1b[32m{}\x1b[0m", msg);
        }
    }

    /// Print an error message (red in human format, always shown).
    pub fn error(&self, msg: &str) {
        if !self.is_json() {
            eprintln!("\x1b[31merror: {}\x1b[0m", msg);
        }
    }

    /// Progress bar over batch items (hidden in quiet/JSON mode).
    pub fn case_progress(&self, len: u64) -> ProgressBar {
        if self.quiet || self.is_json() {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    }
}
