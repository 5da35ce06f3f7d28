//! Single test-case evaluation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::Utc;

use crate::helpers::secondary;
use crate::preprocess::PreprocessorRegistry;
use crate::types::{
    AssertionResult, AssertionStatus, BiovalError, CaseReport, ErrorKind, Expected,
    ExpectedOutput, TestCase, Value,
};

/// Evaluate one test case against the tag -> primary-path mapping the
/// execution collaborator produced.
///
/// Each assertion runs the linear pipeline Resolve -> Preprocess -> Compare
/// -> Record. Runtime failures (missing file, broken preprocessor, mismatch)
/// are recorded and evaluation continues with the remaining assertions.
pub fn evaluate(
    tool: &str,
    case: &TestCase,
    produced: &BTreeMap<String, PathBuf>,
    registry: &PreprocessorRegistry,
) -> CaseReport {
    let assertions = case
        .output
        .iter()
        .map(|expectation| evaluate_assertion(expectation, produced, registry))
        .collect();

    CaseReport {
        tool: tool.to_string(),
        case: case.name.clone(),
        assertions,
        evaluated_at: Utc::now(),
    }
}

fn evaluate_assertion(
    expectation: &ExpectedOutput,
    produced: &BTreeMap<String, PathBuf>,
    registry: &PreprocessorRegistry,
) -> AssertionResult {
    let label = expectation.label();

    // Resolve.
    let Some(primary) = produced.get(&expectation.tag) else {
        log::debug!("{}: tag produced no path", label);
        return AssertionResult {
            label,
            path: None,
            status: AssertionStatus::MissingOutputFile {
                path: PathBuf::from(&expectation.tag),
            },
        };
    };
    let path = match &expectation.secondary_suffix {
        Some(suffix) => secondary::resolve(primary, suffix),
        None => primary.clone(),
    };
    if !path.exists() {
        return AssertionResult {
            label,
            path: Some(path.clone()),
            status: AssertionStatus::MissingOutputFile { path },
        };
    }

    // Preprocess.
    let actual = match apply_preprocessor(&expectation.preprocessor, &path, registry) {
        Ok(value) => value,
        Err(status) => {
            return AssertionResult {
                label,
                path: Some(path),
                status,
            }
        }
    };

    // Compare.
    let status = match &expectation.expected {
        Expected::Value(expected) => compare(expectation, &actual, expected),
        Expected::File(reference) => {
            match apply_preprocessor(&expectation.preprocessor, reference, registry) {
                Ok(expected) => compare(expectation, &actual, &expected),
                Err(status) => status,
            }
        }
        // Implicit identity: the preprocessor decides by itself.
        Expected::None => match actual {
            Value::Bool(true) => AssertionStatus::Pass,
            Value::Bool(false) => AssertionStatus::ComparisonMismatch {
                operator: expectation.operator,
                actual: Value::Bool(false),
                expected: Value::Bool(true),
            },
            other => AssertionStatus::PreprocessorExecutionError {
                message: format!(
                    "{} yielded a {} value but no expectation was declared",
                    expectation.preprocessor,
                    other.kind_name()
                ),
            },
        },
    };

    log::debug!("{}: {}", label, status.reason());
    AssertionResult {
        label,
        path: Some(path),
        status,
    }
}

fn apply_preprocessor(
    name: &str,
    path: &PathBuf,
    registry: &PreprocessorRegistry,
) -> Result<Value, AssertionStatus> {
    let preprocessor = registry
        .get(name)
        .map_err(|e| AssertionStatus::PreprocessorExecutionError {
            message: e.to_string(),
        })?;

    preprocessor
        .apply(std::slice::from_ref(path))
        .map_err(|e| runtime_status(e, path))
}

/// Map a runtime error to its fail-soft assertion outcome.
fn runtime_status(error: BiovalError, path: &PathBuf) -> AssertionStatus {
    match error.kind() {
        ErrorKind::MissingOutputFile { path } => AssertionStatus::MissingOutputFile {
            path: path.clone(),
        },
        _ => AssertionStatus::PreprocessorExecutionError {
            message: format!("{} ({})", error, path.display()),
        },
    }
}

fn compare(expectation: &ExpectedOutput, actual: &Value, expected: &Value) -> AssertionStatus {
    match expectation.operator.apply(actual, expected) {
        Ok(true) => AssertionStatus::Pass,
        // False result and incomparable values both surface actual vs expected.
        Ok(false) | Err(_) => AssertionStatus::ComparisonMismatch {
            operator: expectation.operator,
            actual: actual.clone(),
            expected: expected.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FileKind, Operator, ToolSignature};
    use std::io::Write;

    fn signature() -> ToolSignature {
        ToolSignature::new().with_output("out", FileKind::new("bam").with_secondary(".bai"))
    }

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs_err::File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    fn produced(path: PathBuf) -> BTreeMap<String, PathBuf> {
        let mut map = BTreeMap::new();
        map.insert("out".to_string(), path);
        map
    }

    #[test]
    fn test_pass_and_mismatch_in_one_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "out.bam", &[0u8; 500]);

        let case = TestCase::builder("size-window")
            .expect(ExpectedOutput::new(
                "out",
                "file_size",
                Operator::GreaterOrEqual,
                Expected::Value(Value::Int(100)),
            ))
            .expect(ExpectedOutput::new(
                "out",
                "file_size",
                Operator::LessOrEqual,
                Expected::Value(Value::Int(400)),
            ))
            .build(&signature())
            .unwrap();

        let registry = PreprocessorRegistry::with_builtins();
        let report = evaluate("samtools-sort/1.9", &case, &produced(path), &registry);

        assert!(!report.passed());
        assert!(report.assertions[0].status.is_pass());
        assert!(matches!(
            report.assertions[1].status,
            AssertionStatus::ComparisonMismatch { .. }
        ));
        // Both assertions evaluated despite the failure.
        assert_eq!(report.assertions.len(), 2);
    }

    #[test]
    fn test_missing_secondary_does_not_stop_primary() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "out.bam", &[0u8; 1000]);

        let case = TestCase::builder("indexed")
            .expect(ExpectedOutput::new(
                "out",
                "file_size",
                Operator::GreaterOrEqual,
                Expected::Value(Value::Int(1000)),
            ))
            .expect(
                ExpectedOutput::new(
                    "out",
                    "file_size",
                    Operator::GreaterOrEqual,
                    Expected::Value(Value::Int(200)),
                )
                .on_secondary(".bai"),
            )
            .build(&signature())
            .unwrap();

        let registry = PreprocessorRegistry::with_builtins();
        let report = evaluate("samtools-sort/1.9", &case, &produced(path.clone()), &registry);

        assert!(report.assertions[0].status.is_pass());
        match &report.assertions[1].status {
            AssertionStatus::MissingOutputFile { path: missing } => {
                assert_eq!(missing, &PathBuf::from(format!("{}.bai", path.display())));
            }
            other => panic!("expected MissingOutputFile, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_tag_recorded_not_raised() {
        let case = TestCase::builder("no-path")
            .expect(ExpectedOutput::new(
                "out",
                "file_size",
                Operator::GreaterOrEqual,
                Expected::Value(Value::Int(1)),
            ))
            .build(&signature())
            .unwrap();

        let registry = PreprocessorRegistry::with_builtins();
        let report = evaluate("tool/1.0", &case, &BTreeMap::new(), &registry);

        assert!(matches!(
            report.assertions[0].status,
            AssertionStatus::MissingOutputFile { .. }
        ));
    }

    #[test]
    fn test_expected_file_goes_through_same_preprocessor() {
        let dir = tempfile::tempdir().unwrap();
        let actual = write_file(&dir, "out.bam", b"identical bytes");
        let reference = write_file(&dir, "ref.bam", b"identical bytes");

        let case = TestCase::builder("md5-vs-reference")
            .expect(ExpectedOutput::new(
                "out",
                "file_md5",
                Operator::Equal,
                Expected::File(reference),
            ))
            .build(&signature())
            .unwrap();

        let registry = PreprocessorRegistry::with_builtins();
        let report = evaluate("tool/1.0", &case, &produced(actual), &registry);
        assert!(report.passed(), "reason: {}", report.reason());
    }

    #[test]
    fn test_unknown_preprocessor_is_execution_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "out.bam", b"x");

        let case = TestCase::builder("bad-preprocessor")
            .expect(ExpectedOutput::new(
                "out",
                "nonexistent",
                Operator::Equal,
                Expected::Value(Value::Int(1)),
            ))
            .build(&signature())
            .unwrap();

        let registry = PreprocessorRegistry::with_builtins();
        let report = evaluate("tool/1.0", &case, &produced(path), &registry);
        assert!(matches!(
            report.assertions[0].status,
            AssertionStatus::PreprocessorExecutionError { .. }
        ));
    }
}
