//! Bioval error types.
//!
//! This module provides error handling using `exn` for context-aware errors
//! while preserving stable `error_type()` strings for batch-report payloads.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Error kind enum for bioval operations.
///
/// This defines the stable error types that map to `error_type()` strings.
/// The first three variants double as fail-soft assertion outcomes; the
/// remainder are authoring or environment errors that fail fast.
#[derive(Debug, Clone)]
pub enum ErrorKind {
    /// Resolved output path does not exist.
    MissingOutputFile { path: PathBuf },
    /// A preprocessor failed (subprocess stderr, non-zero exit, unreadable input).
    PreprocessorFailed { name: String, message: String },
    /// A subprocess-backed preprocessor exceeded its deadline.
    SubprocessTimeout { program: String, timeout: Duration },
    /// Malformed test-case declaration (authoring bug, fail fast).
    MalformedExpectation { message: String },
    /// An expectation references an output tag the tool does not declare.
    UnknownOutputTag { tag: String },
    /// An expectation references a secondary suffix the file kind does not declare.
    UndeclaredSuffix { suffix: String, kind: String },
    /// No preprocessor registered under the given name.
    UnknownPreprocessor { name: String },
    /// I/O error.
    IoError { message: String },
    /// JSON parsing error.
    JsonError { message: String },
}

impl ErrorKind {
    /// Get the error type as a string (stable, used in report payloads).
    pub fn error_type(&self) -> &'static str {
        match self {
            ErrorKind::MissingOutputFile { .. } => "missing_output_file",
            ErrorKind::PreprocessorFailed { .. } => "preprocessor_failed",
            ErrorKind::SubprocessTimeout { .. } => "subprocess_timeout",
            ErrorKind::MalformedExpectation { .. } => "malformed_expectation",
            ErrorKind::UnknownOutputTag { .. } => "unknown_output_tag",
            ErrorKind::UndeclaredSuffix { .. } => "undeclared_suffix",
            ErrorKind::UnknownPreprocessor { .. } => "unknown_preprocessor",
            ErrorKind::IoError { .. } => "io_error",
            ErrorKind::JsonError { .. } => "json_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MissingOutputFile { path } => {
                write!(f, "output file not found: {}", path.display())
            }
            ErrorKind::PreprocessorFailed { name, message } => {
                write!(f, "preprocessor {} failed: {}", name, message)
            }
            ErrorKind::SubprocessTimeout { program, timeout } => {
                write!(f, "{} timed out after {:?}", program, timeout)
            }
            ErrorKind::MalformedExpectation { message } => {
                write!(f, "malformed expectation: {}", message)
            }
            ErrorKind::UnknownOutputTag { tag } => {
                write!(f, "output tag not declared by tool: {}", tag)
            }
            ErrorKind::UndeclaredSuffix { suffix, kind } => {
                write!(f, "suffix {} not declared by file kind {}", suffix, kind)
            }
            ErrorKind::UnknownPreprocessor { name } => {
                write!(f, "no preprocessor registered as {}", name)
            }
            ErrorKind::IoError { message } => write!(f, "io error: {}", message),
            ErrorKind::JsonError { message } => write!(f, "json error: {}", message),
        }
    }
}

impl std::error::Error for ErrorKind {}

/// Main error type for bioval operations.
///
/// Wraps `exn::Exn<ErrorKind>` to provide context-aware error handling
/// while maintaining the stable `error_type()` interface.
#[derive(Debug)]
pub struct BiovalError(exn::Exn<ErrorKind>);

impl BiovalError {
    /// Create a new error from an error kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self(exn::Exn::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_error()
    }

    /// Get the error type as a string.
    pub fn error_type(&self) -> &'static str {
        self.kind().error_type()
    }

    // Convenience constructors for common error types

    /// Create a "missing output file" error.
    pub fn missing_output_file(path: impl Into<PathBuf>) -> Self {
        Self::new(ErrorKind::MissingOutputFile { path: path.into() })
    }

    /// Create a "preprocessor failed" error.
    pub fn preprocessor_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PreprocessorFailed {
            name: name.into(),
            message: message.into(),
        })
    }

    /// Create a "subprocess timeout" error.
    pub fn subprocess_timeout(program: impl Into<String>, timeout: Duration) -> Self {
        Self::new(ErrorKind::SubprocessTimeout {
            program: program.into(),
            timeout,
        })
    }

    /// Create a "malformed expectation" error.
    pub fn malformed_expectation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedExpectation {
            message: message.into(),
        })
    }

    /// Create an "unknown output tag" error.
    pub fn unknown_output_tag(tag: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownOutputTag { tag: tag.into() })
    }

    /// Create an "undeclared suffix" error.
    pub fn undeclared_suffix(suffix: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndeclaredSuffix {
            suffix: suffix.into(),
            kind: kind.into(),
        })
    }

    /// Create an "unknown preprocessor" error.
    pub fn unknown_preprocessor(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownPreprocessor { name: name.into() })
    }

    /// Check if this is a MissingOutputFile error.
    pub fn is_missing_output_file(&self) -> bool {
        matches!(self.kind(), ErrorKind::MissingOutputFile { .. })
    }

    /// Check if this is a MalformedExpectation error.
    pub fn is_malformed_expectation(&self) -> bool {
        matches!(self.kind(), ErrorKind::MalformedExpectation { .. })
    }
}

impl fmt::Display for BiovalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BiovalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl From<std::io::Error> for BiovalError {
    fn from(e: std::io::Error) -> Self {
        Self::new(ErrorKind::IoError {
            message: e.to_string(),
        })
    }
}

impl From<serde_json::Error> for BiovalError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(ErrorKind::JsonError {
            message: e.to_string(),
        })
    }
}
