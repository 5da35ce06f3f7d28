//! File kinds and tool output signatures.
//!
//! These are the boundary types consumed from the tool-description side: a
//! file kind declares the ordered secondary suffixes that accompany a primary
//! file, and a tool signature maps each declared output tag to its kind.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A file kind: a primary file plus its ordered secondary-suffix declarations.
///
/// Composite kinds are built by suffix-list concatenation, not inheritance:
/// an indexed BAM is `FileKind::new("bam").with_secondary(".bai")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileKind {
    /// Kind name (e.g. "bam", "indexed-bam", "fasta").
    name: String,

    /// Ordered secondary suffixes, using the `^`-prefix convention.
    secondaries: Vec<String>,
}

impl FileKind {
    /// Create a kind with no secondary files.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            secondaries: Vec::new(),
        }
    }

    /// Append a secondary suffix declaration.
    pub fn with_secondary(mut self, suffix: &str) -> Self {
        self.secondaries.push(suffix.to_string());
        self
    }

    /// Kind name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared secondary suffixes, in order.
    pub fn secondaries(&self) -> &[String] {
        &self.secondaries
    }

    /// Whether the kind declares the given suffix.
    pub fn declares(&self, suffix: &str) -> bool {
        self.secondaries.iter().any(|s| s == suffix)
    }
}

/// Declared outputs of one tool version: output tag -> file kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolSignature {
    outputs: BTreeMap<String, FileKind>,
}

impl ToolSignature {
    /// Create an empty signature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an output.
    pub fn with_output(mut self, tag: &str, kind: FileKind) -> Self {
        self.outputs.insert(tag.to_string(), kind);
        self
    }

    /// Look up the kind declared for a tag.
    pub fn output(&self, tag: &str) -> Option<&FileKind> {
        self.outputs.get(tag)
    }

    /// Iterate declared outputs.
    pub fn outputs(&self) -> impl Iterator<Item = (&String, &FileKind)> {
        self.outputs.iter()
    }

    /// Number of declared outputs.
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Whether no outputs are declared.
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_kind_is_concatenation() {
        let bam = FileKind::new("bam");
        assert!(bam.secondaries().is_empty());

        let indexed = bam.clone().with_secondary(".bai");
        assert_eq!(indexed.secondaries(), &[".bai".to_string()]);
        assert!(indexed.declares(".bai"));
        assert!(!indexed.declares(".csi"));
    }

    #[test]
    fn test_signature_lookup() {
        let sig = ToolSignature::new()
            .with_output("out", FileKind::new("bam").with_secondary(".bai"))
            .with_output("metrics", FileKind::new("text"));

        assert_eq!(sig.len(), 2);
        assert!(sig.output("out").unwrap().declares(".bai"));
        assert!(sig.output("missing").is_none());
    }
}
