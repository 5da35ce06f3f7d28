//! File-kind declarations.
//!
//! Each kind names the ordered secondary suffixes that must accompany its
//! primary file, using the `^`-prefix convention: a plain suffix appends to
//! the primary path, a `^`-prefixed suffix replaces the final extension.

use bioval_core::FileKind;

/// Unindexed BAM alignment file.
pub fn bam() -> FileKind {
    FileKind::new("bam")
}

/// BAM with its `.bai` index alongside.
pub fn indexed_bam() -> FileKind {
    FileKind::new("indexed-bam").with_secondary(".bai")
}

/// SAM text alignment file.
pub fn sam() -> FileKind {
    FileKind::new("sam")
}

/// CRAM with its `.crai` index.
pub fn indexed_cram() -> FileKind {
    FileKind::new("cram").with_secondary(".crai")
}

/// Plain FASTA reference.
pub fn fasta() -> FileKind {
    FileKind::new("fasta")
}

/// FASTA with faidx index and sequence dictionary (`ref.fasta` ->
/// `ref.fasta.fai` and `ref.dict`).
pub fn indexed_fasta() -> FileKind {
    FileKind::new("indexed-fasta")
        .with_secondary(".fai")
        .with_secondary("^.dict")
}

/// Uncompressed VCF.
pub fn vcf() -> FileKind {
    FileKind::new("vcf")
}

/// Bgzipped VCF with its tabix index.
pub fn compressed_vcf() -> FileKind {
    FileKind::new("compressed-vcf").with_secondary(".tbi")
}

/// BED interval file.
pub fn bed() -> FileKind {
    FileKind::new("bed")
}

/// Generic text output (logs, metrics, summaries).
pub fn text() -> FileKind {
    FileKind::new("text")
}

/// All catalogued kinds.
pub fn all() -> Vec<FileKind> {
    vec![
        bam(),
        indexed_bam(),
        sam(),
        indexed_cram(),
        fasta(),
        indexed_fasta(),
        vcf(),
        compressed_vcf(),
        bed(),
        text(),
    ]
}

/// Look up a kind by name.
pub fn lookup(name: &str) -> Option<FileKind> {
    all().into_iter().find(|k| k.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bioval_core::helpers::secondary::resolve;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_kind_names_unique() {
        let kinds = all();
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }

    #[test]
    fn test_indexed_fasta_suffixes_resolve() {
        let kind = indexed_fasta();
        let primary = Path::new("ref.fasta");
        let resolved: Vec<PathBuf> = kind
            .secondaries()
            .iter()
            .map(|s| resolve(primary, s))
            .collect();
        assert_eq!(
            resolved,
            vec![PathBuf::from("ref.fasta.fai"), PathBuf::from("ref.dict")]
        );
    }

    #[test]
    fn test_lookup() {
        assert!(lookup("compressed-vcf").unwrap().declares(".tbi"));
        assert!(lookup("nope").is_none());
    }

    #[test]
    fn test_indexed_kinds_are_distinct_from_plain() {
        assert_eq!(indexed_bam().name(), "indexed-bam");
        assert_eq!(indexed_fasta().name(), "indexed-fasta");

        // Both the plain and the indexed variant must be addressable by name.
        assert!(lookup("bam").unwrap().secondaries().is_empty());
        assert!(lookup("indexed-bam").unwrap().declares(".bai"));
        assert!(lookup("fasta").unwrap().secondaries().is_empty());
        assert!(lookup("indexed-fasta").unwrap().declares("^.dict"));
    }
}
