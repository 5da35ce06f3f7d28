//! Versioned tool descriptions and their authored test cases.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;

use bioval_core::{
    basic_test, BasicChecks, BiovalError, Expected, ExpectedOutput, Operator, TestCase,
    ToolSignature, Value,
};

use crate::kinds;

/// Tool identity: family name plus version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ToolId {
    /// Tool family name (e.g. "samtools-flagstat").
    pub name: String,
    /// Version string (e.g. "1.9").
    pub version: String,
}

impl ToolId {
    /// Create a tool id.
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
        }
    }

    /// Parse a "name/version" string.
    pub fn parse(s: &str) -> Result<Self, BiovalError> {
        match s.split_once('/') {
            Some((name, version)) if !name.is_empty() && !version.is_empty() => {
                Ok(Self::new(name, version))
            }
            _ => Err(BiovalError::malformed_expectation(format!(
                "tool identity must be name/version, got {:?}",
                s
            ))),
        }
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}

/// One catalogued tool version: identity, container, declared outputs, and
/// the authored test cases a correct run must satisfy.
#[derive(Debug, Clone)]
pub struct ToolEntry {
    /// Tool identity.
    pub id: ToolId,
    /// Container image this version runs in.
    pub container: String,
    /// Declared outputs (tag -> file kind).
    pub signature: ToolSignature,
    /// Authored test cases.
    pub cases: Vec<TestCase>,
}

fn samtools_flagstat_1_9() -> Result<ToolEntry, BiovalError> {
    let signature = ToolSignature::new().with_output("stats", kinds::text());
    let case = TestCase::builder("basic")
        .input("bam", json!("petermac-testdata/NA12878.bam"))
        .expect_all(basic_test(&kinds::text(), "stats", &BasicChecks::min_size(300))?)
        .expect(ExpectedOutput::new(
            "stats",
            "line_count",
            Operator::GreaterOrEqual,
            Expected::Value(Value::Int(13)),
        ))
        .expect(ExpectedOutput::new(
            "stats",
            "file_content",
            Operator::Contains,
            Expected::Value(Value::Str("in total".to_string())),
        ))
        .build(&signature)?;

    Ok(ToolEntry {
        id: ToolId::new("samtools-flagstat", "1.9"),
        container: "quay.io/biocontainers/samtools:1.9--h8571acd_11".to_string(),
        signature,
        cases: vec![case],
    })
}

fn samtools_sort_1_9() -> Result<ToolEntry, BiovalError> {
    let signature = ToolSignature::new().with_output("out", kinds::bam());
    let case = TestCase::builder("basic")
        .input("bam", json!("petermac-testdata/NA12878.unsorted.bam"))
        .expect_all(basic_test(
            &kinds::bam(),
            "out",
            &BasicChecks::min_size(2_500_000)
                .summary("flagstat", "petermac-testdata/NA12878.sorted.bam"),
        )?)
        .build(&signature)?;

    Ok(ToolEntry {
        id: ToolId::new("samtools-sort", "1.9"),
        container: "quay.io/biocontainers/samtools:1.9--h8571acd_11".to_string(),
        signature,
        cases: vec![case],
    })
}

fn gatk4_haplotype_caller(version: &str) -> Result<ToolEntry, BiovalError> {
    let signature = ToolSignature::new()
        .with_output("out", kinds::compressed_vcf())
        .with_output("bam", kinds::indexed_bam());
    let case = TestCase::builder("germline")
        .input("bam", json!("petermac-testdata/NA12878.recalibrated.bam"))
        .input("reference", json!("references/Homo_sapiens_assembly38.fasta"))
        .expect_all(basic_test(
            &kinds::compressed_vcf(),
            "out",
            &BasicChecks::min_size(25_000).secondary_min_size(".tbi", 100),
        )?)
        .expect_all(basic_test(
            &kinds::indexed_bam(),
            "bam",
            &BasicChecks::min_size(500_000).secondary_min_size(".bai", 1_000),
        )?)
        .build(&signature)?;

    Ok(ToolEntry {
        id: ToolId::new("gatk4-haplotype-caller", version),
        container: format!("broadinstitute/gatk:{}", version),
        signature,
        cases: vec![case],
    })
}

fn gatk4_mutect2_4_1_3_0() -> Result<ToolEntry, BiovalError> {
    let signature = ToolSignature::new()
        .with_output("vcf", kinds::compressed_vcf())
        .with_output("stats", kinds::text());
    let case = TestCase::builder("tumor-only")
        .input("bam", json!("petermac-testdata/NA12878.tumor.bam"))
        .input("reference", json!("references/Homo_sapiens_assembly38.fasta"))
        .expect_all(basic_test(
            &kinds::compressed_vcf(),
            "vcf",
            &BasicChecks::min_size(10_000).secondary_min_size(".tbi", 100),
        )?)
        .expect_all(basic_test(&kinds::text(), "stats", &BasicChecks::min_size(50))?)
        .build(&signature)?;

    Ok(ToolEntry {
        id: ToolId::new("gatk4-mutect2", "4.1.3.0"),
        container: "broadinstitute/gatk:4.1.3.0".to_string(),
        signature,
        cases: vec![case],
    })
}

fn bcftools_view_1_9() -> Result<ToolEntry, BiovalError> {
    let signature = ToolSignature::new().with_output("out", kinds::vcf());
    let case = TestCase::builder("basic")
        .input("vcf", json!("petermac-testdata/NA12878.vcf.gz"))
        .expect_all(basic_test(&kinds::vcf(), "out", &BasicChecks::min_size(1_000))?)
        .expect(ExpectedOutput::new(
            "out",
            "file_content",
            Operator::Contains,
            Expected::Value(Value::Str("##fileformat=VCF".to_string())),
        ))
        .build(&signature)?;

    Ok(ToolEntry {
        id: ToolId::new("bcftools-view", "1.9"),
        container: "quay.io/biocontainers/bcftools:1.9--ha228f0b_4".to_string(),
        signature,
        cases: vec![case],
    })
}

fn strelka_germline_2_9_10() -> Result<ToolEntry, BiovalError> {
    let signature = ToolSignature::new().with_output("variants", kinds::compressed_vcf());
    let case = TestCase::builder("germline")
        .input("bam", json!("petermac-testdata/NA12878.recalibrated.bam"))
        .input("reference", json!("references/Homo_sapiens_assembly38.fasta"))
        .expect_all(basic_test(
            &kinds::compressed_vcf(),
            "variants",
            &BasicChecks::min_size(50_000).secondary_min_size(".tbi", 200),
        )?)
        .build(&signature)?;

    Ok(ToolEntry {
        id: ToolId::new("strelka-germline", "2.9.10"),
        container: "quay.io/biocontainers/strelka:2.9.10--0".to_string(),
        signature,
        cases: vec![case],
    })
}

/// All catalogued tool versions, newest first within a family.
///
/// Authoring errors in any declaration surface here, before any evaluation.
pub fn all() -> Result<Vec<ToolEntry>, BiovalError> {
    Ok(vec![
        samtools_flagstat_1_9()?,
        samtools_sort_1_9()?,
        gatk4_haplotype_caller("4.1.4.0")?,
        gatk4_haplotype_caller("4.1.3.0")?,
        gatk4_mutect2_4_1_3_0()?,
        bcftools_view_1_9()?,
        strelka_germline_2_9_10()?,
    ])
}

/// Find a specific tool version.
pub fn find(id: &ToolId) -> Result<Option<ToolEntry>, BiovalError> {
    Ok(all()?.into_iter().find(|e| &e.id == id))
}

/// Version lineage of one tool family, newest first.
pub fn versions(name: &str) -> Result<Vec<ToolEntry>, BiovalError> {
    Ok(all()?.into_iter().filter(|e| e.id.name == name).collect())
}
