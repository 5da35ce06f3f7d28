//! Run manifest: what the execution collaborator produced.
//!
//! A manifest is a JSON list of entries, one per executed test case:
//!
//! ```json
//! [
//!   {
//!     "tool": "samtools-sort/1.9",
//!     "case": "basic",
//!     "produced": { "out": "/runs/run1/out.bam" }
//!   }
//! ]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use fs_err as fs;
use serde::{Deserialize, Serialize};

use bioval_catalog::{tools, ToolId};
use bioval_core::BatchItem;

use crate::commands::{CliError, Result};

/// One executed test case in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Tool identity as "name/version".
    pub tool: String,

    /// Name of the catalogued test case.
    pub case: String,

    /// Output tag -> primary file path.
    pub produced: BTreeMap<String, PathBuf>,
}

/// Load a manifest file.
pub fn load(path: &Path) -> Result<Vec<ManifestEntry>> {
    let content = fs::read_to_string(path)?;
    let entries: Vec<ManifestEntry> = serde_json::from_str(&content)
        .map_err(|e| CliError::InvalidArg(format!("{}: {}", path.display(), e)))?;
    Ok(entries)
}

/// Resolve manifest entries against the catalogue into batch items.
pub fn to_batch_items(entries: Vec<ManifestEntry>) -> Result<Vec<BatchItem>> {
    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        let id = ToolId::parse(&entry.tool)?;
        let tool = tools::find(&id)?
            .ok_or_else(|| CliError::InvalidArg(format!("unknown tool: {}", id)))?;
        let case = tool
            .cases
            .iter()
            .find(|c| c.name == entry.case)
            .ok_or_else(|| {
                CliError::InvalidArg(format!("unknown case {} for tool {}", entry.case, id))
            })?
            .clone();
        items.push(BatchItem {
            tool: id.to_string(),
            case,
            produced: entry.produced,
        });
    }
    Ok(items)
}
