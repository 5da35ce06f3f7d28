//! Bioval Core Library
//!
//! Declarative expected-output validation for bioinformatics tool runs.
//! Tool-version authors declare, per output, expected properties (size,
//! checksum, content, domain-tool summary); the evaluation engine checks
//! those properties against files an actual run produced and reports
//! per-assertion outcomes fail-soft.
//!
//! # Architecture
//!
//! - `types`: Value, Operator, ExpectedOutput, TestCase, reports, error types
//! - `preprocess`: named path -> value reductions plus the registry
//! - `builders`: per-file-kind `basic_test` composers over facet lists
//! - `ops`: the per-case evaluation pipeline and the parallel batch evaluator
//! - `helpers`: checksumming, secondary-path resolution, bounded subprocesses

pub mod builders;
pub mod helpers;
pub mod ops;
pub mod preprocess;
pub mod types;

// Re-export commonly used types at crate root
pub use types::{
    AssertionResult,
    AssertionStatus,
    BatchReport,
    BiovalError,
    CaseReport,
    ErrorKind,
    Expected,
    ExpectedOutput,
    FileKind,
    Operator,
    TestCase,
    TestCaseBuilder,
    ToolSignature,
    Value,
};

// Re-export operations at crate root
pub use ops::{evaluate, evaluate_batch, evaluate_batch_with, BatchItem};

// Re-export the preprocessor surface
pub use preprocess::{CommandSummary, Preprocessor, PreprocessorRegistry};

// Re-export the builder surface
pub use builders::{basic_test, BasicChecks, SecondaryChecks, SummaryCheck};
