//! Per-file-kind `basic_test` composers.
//!
//! Each file kind declares an ordered secondary-suffix list (`FileKind`), and
//! one generic composer walks that list emitting assertions. Composite kinds
//! (an indexed BAM) are plain suffix-list concatenation over their un-indexed
//! counterparts; there is no subclass-and-call-super chain to keep in order.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::types::{Expected, ExpectedOutput, FileKind, Operator, Value};
use crate::BiovalError;

/// Thresholds for one secondary file.
#[derive(Debug, Clone, Default)]
pub struct SecondaryChecks {
    /// Minimum byte size of the secondary file.
    pub min_size: Option<u64>,
    /// Exact md5 of the secondary file.
    pub md5: Option<String>,
}

/// Semantic-summary equality against a reference file.
#[derive(Debug, Clone)]
pub struct SummaryCheck {
    /// Registered preprocessor name (e.g. "flagstat").
    pub preprocessor: String,
    /// Reference file whose preprocessed value is the expected value.
    pub reference: PathBuf,
}

/// Caller-supplied thresholds for `basic_test`.
#[derive(Debug, Clone)]
pub struct BasicChecks {
    min_size: u64,
    md5: Option<String>,
    summary: Option<SummaryCheck>,
    secondary: BTreeMap<String, SecondaryChecks>,
}

impl BasicChecks {
    /// Start from the one mandatory threshold: the primary file's minimum size.
    pub fn min_size(min_size: u64) -> Self {
        Self {
            min_size,
            md5: None,
            summary: None,
            secondary: BTreeMap::new(),
        }
    }

    /// Require an exact md5 of the primary file (byte-exact scenarios).
    pub fn md5(mut self, md5: &str) -> Self {
        self.md5 = Some(md5.to_string());
        self
    }

    /// Require semantic-summary equality against a reference file.
    pub fn summary(mut self, preprocessor: &str, reference: impl Into<PathBuf>) -> Self {
        self.summary = Some(SummaryCheck {
            preprocessor: preprocessor.to_string(),
            reference: reference.into(),
        });
        self
    }

    /// Require a minimum size for a secondary file.
    pub fn secondary_min_size(mut self, suffix: &str, min_size: u64) -> Self {
        self.secondary
            .entry(suffix.to_string())
            .or_default()
            .min_size = Some(min_size);
        self
    }

    /// Require an exact md5 for a secondary file.
    pub fn secondary_md5(mut self, suffix: &str, md5: &str) -> Self {
        self.secondary.entry(suffix.to_string()).or_default().md5 = Some(md5.to_string());
        self
    }
}

/// Compose the standard assertion list for one output of the given kind.
///
/// Always emits `file_size >= min_size` for the primary file, then the
/// optional primary md5/summary facets, then size/md5 facets for each
/// declared secondary suffix the caller supplied thresholds for. A threshold
/// for a suffix the kind does not declare is rejected here, at construction.
pub fn basic_test(
    kind: &FileKind,
    tag: &str,
    checks: &BasicChecks,
) -> Result<Vec<ExpectedOutput>, BiovalError> {
    for suffix in checks.secondary.keys() {
        if !kind.declares(suffix) {
            return Err(BiovalError::undeclared_suffix(suffix, kind.name()));
        }
    }

    let mut expectations = Vec::new();

    expectations.push(ExpectedOutput::new(
        tag,
        "file_size",
        Operator::GreaterOrEqual,
        Expected::Value(Value::from(checks.min_size)),
    ));

    if let Some(md5) = &checks.md5 {
        expectations.push(ExpectedOutput::new(
            tag,
            "file_md5",
            Operator::Equal,
            Expected::Value(Value::Str(md5.clone())),
        ));
    }

    if let Some(summary) = &checks.summary {
        expectations.push(ExpectedOutput::new(
            tag,
            &summary.preprocessor,
            Operator::Equal,
            Expected::File(summary.reference.clone()),
        ));
    }

    // Walk the kind's declared suffix list in order, not the caller's map.
    for suffix in kind.secondaries() {
        let Some(secondary) = checks.secondary.get(suffix) else {
            continue;
        };
        if let Some(min_size) = secondary.min_size {
            expectations.push(
                ExpectedOutput::new(
                    tag,
                    "file_size",
                    Operator::GreaterOrEqual,
                    Expected::Value(Value::from(min_size)),
                )
                .on_secondary(suffix),
            );
        }
        if let Some(md5) = &secondary.md5 {
            expectations.push(
                ExpectedOutput::new(
                    tag,
                    "file_md5",
                    Operator::Equal,
                    Expected::Value(Value::Str(md5.clone())),
                )
                .on_secondary(suffix),
            );
        }
    }

    Ok(expectations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_kind_single_size_facet() {
        let bam = FileKind::new("bam");
        let expectations = basic_test(&bam, "out", &BasicChecks::min_size(1000)).unwrap();

        assert_eq!(expectations.len(), 1);
        assert_eq!(expectations[0].label(), "out: file_size >= 1000");
    }

    #[test]
    fn test_indexed_kind_appends_secondary_facets() {
        let indexed_bam = FileKind::new("bam").with_secondary(".bai");
        let checks = BasicChecks::min_size(1000).secondary_min_size(".bai", 200);
        let expectations = basic_test(&indexed_bam, "out", &checks).unwrap();

        assert_eq!(expectations.len(), 2);
        assert_eq!(expectations[0].secondary_suffix, None);
        assert_eq!(expectations[1].secondary_suffix, Some(".bai".to_string()));
        assert_eq!(expectations[1].label(), "out.bai: file_size >= 200");
    }

    #[test]
    fn test_md5_and_summary_facets() {
        let bam = FileKind::new("bam");
        let checks = BasicChecks::min_size(1)
            .md5("d41d8cd98f00b204e9800998ecf8427e")
            .summary("flagstat", "ref/expected.bam");
        let expectations = basic_test(&bam, "out", &checks).unwrap();

        assert_eq!(expectations.len(), 3);
        assert_eq!(expectations[1].preprocessor, "file_md5");
        assert_eq!(expectations[1].operator, Operator::Equal);
        assert!(matches!(expectations[2].expected, Expected::File(_)));
    }

    #[test]
    fn test_undeclared_suffix_rejected_at_construction() {
        let bam = FileKind::new("bam");
        let checks = BasicChecks::min_size(1000).secondary_min_size(".bai", 200);
        let err = basic_test(&bam, "out", &checks).unwrap_err();
        assert_eq!(err.error_type(), "undeclared_suffix");
    }

    #[test]
    fn test_suffix_facets_follow_declaration_order() {
        let indexed_fasta = FileKind::new("fasta")
            .with_secondary(".fai")
            .with_secondary("^.dict");
        // Supplied in the opposite order; emitted in declaration order.
        let checks = BasicChecks::min_size(10)
            .secondary_min_size("^.dict", 5)
            .secondary_min_size(".fai", 3);
        let expectations = basic_test(&indexed_fasta, "ref", &checks).unwrap();

        assert_eq!(expectations[1].secondary_suffix, Some(".fai".to_string()));
        assert_eq!(expectations[2].secondary_suffix, Some("^.dict".to_string()));
    }
}
