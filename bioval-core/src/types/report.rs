//! Evaluation report records.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::expectation::Operator;
use crate::types::value::Value;

/// Outcome of one assertion.
///
/// Runtime failures are recorded here fail-soft; none of them abort the
/// remaining assertions of a test case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssertionStatus {
    /// The assertion held.
    Pass,
    /// The resolved output path does not exist.
    MissingOutputFile { path: PathBuf },
    /// The preprocessor failed (subprocess error, timeout, unreadable file).
    PreprocessorExecutionError { message: String },
    /// The operator returned false.
    ComparisonMismatch {
        operator: Operator,
        actual: Value,
        expected: Value,
    },
}

impl AssertionStatus {
    /// Whether this outcome is a pass.
    pub fn is_pass(&self) -> bool {
        matches!(self, AssertionStatus::Pass)
    }

    /// Human-readable reason for a non-pass outcome.
    pub fn reason(&self) -> String {
        match self {
            AssertionStatus::Pass => "pass".to_string(),
            AssertionStatus::MissingOutputFile { path } => {
                format!("output file not found: {}", path.display())
            }
            AssertionStatus::PreprocessorExecutionError { message } => {
                format!("preprocessor failed: {}", message)
            }
            AssertionStatus::ComparisonMismatch {
                operator,
                actual,
                expected,
            } => format!(
                "expected {} {}, got {}",
                operator.symbol(),
                expected,
                actual
            ),
        }
    }
}

/// Result of evaluating one `ExpectedOutput`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionResult {
    /// Label of the assertion (tag, target file, predicate).
    pub label: String,

    /// Resolved actual path, when resolution succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Outcome.
    pub status: AssertionStatus,
}

/// Report for one evaluated test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseReport {
    /// Tool identity (e.g. "samtools-flagstat/1.9").
    pub tool: String,

    /// Test case name.
    pub case: String,

    /// Per-assertion results, in declaration order.
    pub assertions: Vec<AssertionResult>,

    /// When evaluation finished.
    pub evaluated_at: DateTime<Utc>,
}

impl CaseReport {
    /// Whether every assertion passed.
    pub fn passed(&self) -> bool {
        self.assertions.iter().all(|a| a.status.is_pass())
    }

    /// Count of failing assertions.
    pub fn failed_count(&self) -> usize {
        self.assertions.iter().filter(|a| !a.status.is_pass()).count()
    }

    /// Reason string for the report table: the first failing assertion's
    /// label and diagnostic, or empty on pass.
    pub fn reason(&self) -> String {
        self.assertions
            .iter()
            .find(|a| !a.status.is_pass())
            .map(|a| format!("{}: {}", a.label, a.status.reason()))
            .unwrap_or_default()
    }
}

/// Aggregate report over a batch of test cases.
///
/// Row order within the batch is not guaranteed; `by_tool` regroups rows by
/// tool identity for rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// All evaluated cases.
    pub cases: Vec<CaseReport>,
}

impl BatchReport {
    /// Create a report over the given cases.
    pub fn new(cases: Vec<CaseReport>) -> Self {
        Self { cases }
    }

    /// Whether every case passed.
    pub fn passed(&self) -> bool {
        self.cases.iter().all(|c| c.passed())
    }

    /// Number of failing cases.
    pub fn failed_count(&self) -> usize {
        self.cases.iter().filter(|c| !c.passed()).count()
    }

    /// Cases grouped by tool identity.
    pub fn by_tool(&self) -> BTreeMap<&str, Vec<&CaseReport>> {
        let mut grouped: BTreeMap<&str, Vec<&CaseReport>> = BTreeMap::new();
        for case in &self.cases {
            grouped.entry(case.tool.as_str()).or_default().push(case);
        }
        grouped
    }
}
