//! Command-backed preprocessors.

use std::path::PathBuf;
use std::time::Duration;

use crate::helpers::subprocess;
use crate::types::Value;
use crate::BiovalError;

use super::Preprocessor;

/// Placeholder in argument templates substituted with the target path.
pub const PATH_PLACEHOLDER: &str = "{path}";

/// A preprocessor that runs an external program over the target file and
/// captures its stdout as the value.
///
/// Used for semantic (domain-summary) equality, e.g. comparing alignment
/// counts instead of BAM bytes. Any output on stderr fails the invocation.
pub struct CommandSummary {
    name: String,
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandSummary {
    /// Create a command summary preprocessor.
    ///
    /// `args` is a template: each occurrence of `{path}` is replaced with the
    /// target path at apply time.
    pub fn new(name: &str, program: &str, args: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            timeout: subprocess::DEFAULT_TIMEOUT,
        }
    }

    /// Override the subprocess deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The samtools alignment-summary preprocessor.
    ///
    /// flagstat output carries no headers or timestamps, so two BAMs with
    /// identical alignment records compare equal even when their `@PG` lines
    /// (and therefore byte checksums) differ.
    pub fn flagstat() -> Self {
        Self::new("flagstat", "samtools", &["flagstat", PATH_PLACEHOLDER])
    }
}

impl Preprocessor for CommandSummary {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, paths: &[PathBuf]) -> Result<Value, BiovalError> {
        let path = match paths {
            [path] => path,
            _ => {
                return Err(BiovalError::preprocessor_failed(
                    &self.name,
                    format!("expected exactly one path, got {}", paths.len()),
                ))
            }
        };
        if !path.exists() {
            return Err(BiovalError::missing_output_file(path));
        }

        let path_str = path.display().to_string();
        let args: Vec<String> = self
            .args
            .iter()
            .map(|a| a.replace(PATH_PLACEHOLDER, &path_str))
            .collect();

        let stdout = subprocess::run_capture(&self.program, &args, self.timeout)?;
        Ok(Value::Str(stdout))
    }
}
