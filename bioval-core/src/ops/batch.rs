//! Parallel batch evaluation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use rayon::prelude::*;

use crate::preprocess::PreprocessorRegistry;
use crate::types::{BatchReport, CaseReport, TestCase};

use super::evaluate::evaluate;

/// One unit of batch work: a test case, the tool identity it belongs to, and
/// the tag -> path mapping its run produced.
#[derive(Debug, Clone)]
pub struct BatchItem {
    /// Tool identity (e.g. "gatk4-haplotype-caller/4.1.3.0").
    pub tool: String,
    /// The authored test case.
    pub case: TestCase,
    /// Output tag -> primary file path from the execution collaborator.
    pub produced: BTreeMap<String, PathBuf>,
}

/// Evaluate independent test cases on a worker pool.
///
/// Cases share no mutable state, so they run concurrently; collection order
/// is whatever the pool yields. `BatchReport::by_tool` regroups for display.
pub fn evaluate_batch(items: &[BatchItem], registry: &PreprocessorRegistry) -> BatchReport {
    evaluate_batch_with(items, registry, |_| {})
}

/// Like [`evaluate_batch`], invoking `on_case` as each case completes.
///
/// The callback runs on worker threads, in completion order. Callers use it
/// to drive progress display.
pub fn evaluate_batch_with<F>(
    items: &[BatchItem],
    registry: &PreprocessorRegistry,
    on_case: F,
) -> BatchReport
where
    F: Fn(&CaseReport) + Sync,
{
    let cases = items
        .par_iter()
        .map(|item| {
            let report = evaluate(&item.tool, &item.case, &item.produced, registry);
            on_case(&report);
            report
        })
        .collect();
    BatchReport::new(cases)
}
