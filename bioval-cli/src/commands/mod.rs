//! Bioval command implementations.
//!
//! Each subcommand is implemented in its own module and delegates to
//! bioval-core and bioval-catalog for the actual logic.

pub mod preprocessors;
pub mod run;
pub mod tools;

use std::io;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core engine error.
    #[error("{0}")]
    Bioval(#[from] bioval_core::BiovalError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArg(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
