use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod manifest;
mod output;

use output::Output;

/// Output format for CLI results.
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    /// Human-readable tables and messages.
    Human,
    /// Machine-readable JSON.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate a run manifest against the catalogued test cases.
    ///
    /// The manifest is a JSON list of executed test cases, each with the
    /// tag -> path mapping its tool run produced. Exits non-zero if any
    /// assertion fails.
    Run {
        /// Path to the run manifest (JSON).
        #[clap(long)]
        manifest: PathBuf,
        /// Number of worker threads for batch evaluation.
        #[clap(long)]
        jobs: Option<usize>,
    },
    /// List the catalogued tool versions and their declared outputs.
    Tools,
    /// List the registered preprocessors.
    Preprocessors,
}

#[derive(Parser)]
#[clap(version, author, about)]
pub struct Cli {
    /// Output results as JSON
    #[clap(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[clap(long, global = true)]
    pub quiet: bool,

    #[clap(subcommand)]
    pub command: Command,
}

fn try_main() -> Result<bool> {
    env_logger::init();

    let cli = Cli::parse();
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    let output = Output::new(format, cli.quiet);

    match cli.command {
        Command::Run { manifest, jobs } => {
            let passed = commands::run::run(&output, &manifest, jobs)?;
            Ok(passed)
        }
        Command::Tools => {
            commands::tools::run(&output)?;
            Ok(true)
        }
        Command::Preprocessors => {
            commands::preprocessors::run(&output)?;
            Ok(true)
        }
    }
}

fn main() {
    match try_main() {
        Ok(true) => {}
        Ok(false) => ::std::process::exit(1),
        Err(e) => {
            eprintln!("{e:?}");
            ::std::process::exit(2)
        }
    }
}
