//! Core type definitions for bioval.

mod error;
mod expectation;
mod kind;
mod report;
mod value;

pub use error::{BiovalError, ErrorKind};
pub use expectation::{Expected, ExpectedOutput, Operator, TestCase, TestCaseBuilder};
pub use kind::{FileKind, ToolSignature};
pub use report::{AssertionResult, AssertionStatus, BatchReport, CaseReport};
pub use value::Value;
