//! Test-case and expected-output declarations.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::kind::ToolSignature;
use crate::types::value::Value;
use crate::BiovalError;

/// Binary predicate applied to (actual, expected).
///
/// Closed set rather than raw function objects, so expectations stay
/// serializable and language-neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// actual == expected.
    Equal,
    /// actual >= expected.
    GreaterOrEqual,
    /// actual <= expected.
    LessOrEqual,
    /// expected is a substring of actual (text values only).
    Contains,
}

impl Operator {
    /// Apply the operator.
    ///
    /// `Err` carries a diagnostic for values the operator is not defined on
    /// (e.g. ordering an int against a string); callers record it fail-soft.
    pub fn apply(&self, actual: &Value, expected: &Value) -> Result<bool, String> {
        match self {
            Operator::Equal => Ok(actual == expected),
            Operator::GreaterOrEqual => actual
                .partial_cmp_same_kind(expected)
                .map(|ord| ord.is_ge())
                .ok_or_else(|| incomparable(actual, expected)),
            Operator::LessOrEqual => actual
                .partial_cmp_same_kind(expected)
                .map(|ord| ord.is_le())
                .ok_or_else(|| incomparable(actual, expected)),
            Operator::Contains => actual
                .contains(expected)
                .ok_or_else(|| incomparable(actual, expected)),
        }
    }

    /// Symbol for report rendering.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Equal => "==",
            Operator::GreaterOrEqual => ">=",
            Operator::LessOrEqual => "<=",
            Operator::Contains => "contains",
        }
    }
}

fn incomparable(actual: &Value, expected: &Value) -> String {
    format!(
        "cannot compare {} value against {} value",
        actual.kind_name(),
        expected.kind_name()
    )
}

/// The expected side of a comparison.
///
/// Exactly one source: a literal value, a reference file run through the same
/// preprocessor, or nothing (legal only for boolean-yielding preprocessors,
/// where the boolean is the result).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expected {
    /// Literal expected value.
    Value(Value),
    /// Reference file; its preprocessed value is the expected value.
    File(PathBuf),
    /// No expectation; the preprocessor itself decides (implicit identity).
    None,
}

impl Expected {
    /// Build from optional parts, enforcing mutual exclusion.
    ///
    /// Both set is a `MalformedExpectation`; neither set yields
    /// `Expected::None`.
    pub fn from_parts(
        value: Option<Value>,
        file: Option<PathBuf>,
    ) -> Result<Self, BiovalError> {
        match (value, file) {
            (Some(_), Some(_)) => Err(BiovalError::malformed_expectation(
                "expected_value and expected_file are mutually exclusive",
            )),
            (Some(v), None) => Ok(Expected::Value(v)),
            (None, Some(f)) => Ok(Expected::File(f)),
            (None, None) => Ok(Expected::None),
        }
    }
}

/// One assertion about one (primary or secondary) output file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedOutput {
    /// Declared output tag this assertion targets.
    pub tag: String,

    /// Secondary suffix selecting a companion file instead of the primary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_suffix: Option<String>,

    /// Registered preprocessor name.
    pub preprocessor: String,

    /// Comparison operator.
    pub operator: Operator,

    /// Expected side of the comparison.
    pub expected: Expected,
}

impl ExpectedOutput {
    /// Create an assertion on a primary file.
    pub fn new(tag: &str, preprocessor: &str, operator: Operator, expected: Expected) -> Self {
        Self {
            tag: tag.to_string(),
            secondary_suffix: None,
            preprocessor: preprocessor.to_string(),
            operator,
            expected,
        }
    }

    /// Target a secondary file of the tagged output.
    pub fn on_secondary(mut self, suffix: &str) -> Self {
        self.secondary_suffix = Some(suffix.to_string());
        self
    }

    /// Short human-readable label, e.g. `out.bai: file_size >= 200`.
    pub fn label(&self) -> String {
        let target = match &self.secondary_suffix {
            Some(suffix) => format!("{}{}", self.tag, suffix),
            None => self.tag.clone(),
        };
        match &self.expected {
            Expected::Value(v) => {
                format!("{}: {} {} {}", target, self.preprocessor, self.operator.symbol(), v)
            }
            Expected::File(f) => format!(
                "{}: {} {} {}({})",
                target,
                self.preprocessor,
                self.operator.symbol(),
                self.preprocessor,
                f.display()
            ),
            Expected::None => format!("{}: {}", target, self.preprocessor),
        }
    }
}

/// A named bundle of concrete inputs and the assertions a correct run must
/// satisfy. Authored once per tool version; evaluation never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    /// Test case name.
    pub name: String,

    /// Input parameter tag -> concrete value.
    pub input: BTreeMap<String, serde_json::Value>,

    /// Ordered assertions over the run's outputs.
    pub output: Vec<ExpectedOutput>,
}

impl TestCase {
    /// Create a validated test case.
    ///
    /// Every referenced tag must exist in the signature and every secondary
    /// suffix must be declared by that output's kind. Authoring errors fail
    /// fast here, before any execution.
    pub fn new(
        name: &str,
        input: BTreeMap<String, serde_json::Value>,
        output: Vec<ExpectedOutput>,
        signature: &ToolSignature,
    ) -> Result<Self, BiovalError> {
        for expectation in &output {
            let kind = signature
                .output(&expectation.tag)
                .ok_or_else(|| BiovalError::unknown_output_tag(&expectation.tag))?;
            if let Some(suffix) = &expectation.secondary_suffix {
                if !kind.declares(suffix) {
                    return Err(BiovalError::undeclared_suffix(suffix, kind.name()));
                }
            }
        }
        Ok(Self {
            name: name.to_string(),
            input,
            output,
        })
    }

    /// Create a builder.
    pub fn builder(name: &str) -> TestCaseBuilder {
        TestCaseBuilder::new(name)
    }
}

/// Builder for test cases.
pub struct TestCaseBuilder {
    name: String,
    input: BTreeMap<String, serde_json::Value>,
    output: Vec<ExpectedOutput>,
}

impl TestCaseBuilder {
    /// Create a new builder.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            input: BTreeMap::new(),
            output: Vec::new(),
        }
    }

    /// Set an input value.
    pub fn input(mut self, tag: &str, value: serde_json::Value) -> Self {
        self.input.insert(tag.to_string(), value);
        self
    }

    /// Append one assertion.
    pub fn expect(mut self, expectation: ExpectedOutput) -> Self {
        self.output.push(expectation);
        self
    }

    /// Append a list of assertions (e.g. from `basic_test`).
    pub fn expect_all(mut self, expectations: Vec<ExpectedOutput>) -> Self {
        self.output.extend(expectations);
        self
    }

    /// Validate against the tool signature and build.
    pub fn build(self, signature: &ToolSignature) -> Result<TestCase, BiovalError> {
        TestCase::new(&self.name, self.input, self.output, signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::kind::FileKind;

    fn indexed_bam_signature() -> ToolSignature {
        ToolSignature::new().with_output("out", FileKind::new("bam").with_secondary(".bai"))
    }

    #[test]
    fn test_operator_boundary_inclusivity() {
        let op = Operator::GreaterOrEqual;
        assert!(op.apply(&Value::Int(1000), &Value::Int(1000)).unwrap());
        assert!(!op.apply(&Value::Int(1000), &Value::Int(1001)).unwrap());
    }

    #[test]
    fn test_operator_incomparable_is_error() {
        let op = Operator::GreaterOrEqual;
        let err = op.apply(&Value::Int(5), &Value::Str("5".into())).unwrap_err();
        assert!(err.contains("cannot compare"));
    }

    #[test]
    fn test_expected_mutual_exclusion() {
        let err = Expected::from_parts(
            Some(Value::Int(1)),
            Some(PathBuf::from("ref.txt")),
        )
        .unwrap_err();
        assert_eq!(err.error_type(), "malformed_expectation");

        assert_eq!(Expected::from_parts(None, None).unwrap(), Expected::None);
    }

    #[test]
    fn test_test_case_validates_tags() {
        let sig = indexed_bam_signature();
        let err = TestCase::builder("bad-tag")
            .expect(ExpectedOutput::new(
                "nope",
                "file_size",
                Operator::GreaterOrEqual,
                Expected::Value(Value::Int(1)),
            ))
            .build(&sig)
            .unwrap_err();
        assert_eq!(err.error_type(), "unknown_output_tag");
    }

    #[test]
    fn test_test_case_validates_suffixes() {
        let sig = indexed_bam_signature();
        let err = TestCase::builder("bad-suffix")
            .expect(
                ExpectedOutput::new(
                    "out",
                    "file_size",
                    Operator::GreaterOrEqual,
                    Expected::Value(Value::Int(1)),
                )
                .on_secondary(".csi"),
            )
            .build(&sig)
            .unwrap_err();
        assert_eq!(err.error_type(), "undeclared_suffix");
    }

    #[test]
    fn test_label_rendering() {
        let eo = ExpectedOutput::new(
            "out",
            "file_size",
            Operator::GreaterOrEqual,
            Expected::Value(Value::Int(200)),
        )
        .on_secondary(".bai");
        assert_eq!(eo.label(), "out.bai: file_size >= 200");
    }
}
