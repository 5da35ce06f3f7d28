//! Bioval run command: evaluate a manifest of executed test cases.

use std::path::Path;

use serde::Serialize;
use tabled::{Table, Tabled};

use bioval_core::{evaluate_batch_with, BatchReport, PreprocessorRegistry};

use super::Result;
use crate::manifest;
use crate::output::Output;

/// Table row for one evaluated case.
#[derive(Tabled)]
struct CaseTableRow {
    #[tabled(rename = "Tool")]
    tool: String,
    #[tabled(rename = "Case")]
    case: String,
    #[tabled(rename = "Assertions")]
    assertions: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

/// JSON output for the run command.
#[derive(Serialize)]
struct RunOutput<'a> {
    report: &'a BatchReport,
    summary: RunSummary,
}

#[derive(Serialize)]
struct RunSummary {
    cases: usize,
    failed: usize,
}

/// Run the batch and render the report. Returns whether every case passed.
pub fn run(output: &Output, manifest_path: &Path, jobs: Option<usize>) -> Result<bool> {
    let entries = manifest::load(manifest_path)?;
    let items = manifest::to_batch_items(entries)?;
    let registry = PreprocessorRegistry::with_builtins();

    log::info!(
        "evaluating {} case(s) from {}",
        items.len(),
        manifest_path.display()
    );

    let pb = output.case_progress(items.len() as u64);
    let evaluate_all = || evaluate_batch_with(&items, &registry, |_| pb.inc(1));
    let report = match jobs {
        Some(jobs) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .map_err(|e| super::CliError::InvalidArg(e.to_string()))?;
            pool.install(evaluate_all)
        }
        None => evaluate_all(),
    };
    pb.finish_and_clear();

    if output.is_json() {
        let json_output = RunOutput {
            report: &report,
            summary: RunSummary {
                cases: report.cases.len(),
                failed: report.failed_count(),
            },
        };
        println!("{}", serde_json::to_string(&json_output)?);
        return Ok(report.passed());
    }

    let mut rows = Vec::new();
    for (tool, cases) in report.by_tool() {
        for case in cases {
            let total = case.assertions.len();
            let passed = total - case.failed_count();
            rows.push(CaseTableRow {
                tool: tool.to_string(),
                case: case.case.clone(),
                assertions: format!("{}/{}", passed, total),
                status: if case.passed() { "PASS" } else { "FAILED" }.to_string(),
                reason: case.reason(),
            });
        }
    }
    output.println(&Table::new(rows).to_string());

    if report.passed() {
        output.success(&format!("{} case(s) passed", report.cases.len()));
    } else {
        output.error(&format!(
            "{} of {} case(s) failed",
            report.failed_count(),
            report.cases.len()
        ));
    }

    Ok(report.passed())
}
