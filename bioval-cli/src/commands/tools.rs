//! Bioval tools command: list the catalogued tool versions.

use serde::Serialize;
use tabled::{Table, Tabled};

use super::Result;
use crate::output::Output;

/// Table row for one catalogued tool version.
#[derive(Tabled)]
struct ToolTableRow {
    #[tabled(rename = "Tool")]
    tool: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Container")]
    container: String,
    #[tabled(rename = "Outputs")]
    outputs: String,
    #[tabled(rename = "Cases")]
    cases: usize,
}

/// JSON entry for one catalogued tool version.
#[derive(Serialize)]
struct ToolEntryOutput {
    tool: String,
    version: String,
    container: String,
    outputs: Vec<OutputDeclOutput>,
    cases: Vec<String>,
}

#[derive(Serialize)]
struct OutputDeclOutput {
    tag: String,
    kind: String,
    secondaries: Vec<String>,
}

/// Run the tools command.
pub fn run(output: &Output) -> Result<()> {
    let entries = bioval_catalog::tools::all()?;

    if output.is_json() {
        let json_entries: Vec<ToolEntryOutput> = entries
            .iter()
            .map(|entry| ToolEntryOutput {
                tool: entry.id.name.clone(),
                version: entry.id.version.clone(),
                container: entry.container.clone(),
                outputs: entry
                    .signature
                    .outputs()
                    .map(|(tag, kind)| OutputDeclOutput {
                        tag: tag.clone(),
                        kind: kind.name().to_string(),
                        secondaries: kind.secondaries().to_vec(),
                    })
                    .collect(),
                cases: entry.cases.iter().map(|c| c.name.clone()).collect(),
            })
            .collect();
        println!("{}", serde_json::to_string(&json_entries)?);
        return Ok(());
    }

    let rows: Vec<ToolTableRow> = entries
        .iter()
        .map(|entry| ToolTableRow {
            tool: entry.id.name.clone(),
            version: entry.id.version.clone(),
            container: entry.container.clone(),
            outputs: entry
                .signature
                .outputs()
                .map(|(tag, kind)| format!("{} ({})", tag, kind.name()))
                .collect::<Vec<_>>()
                .join(", "),
            cases: entry.cases.len(),
        })
        .collect();
    output.println(&Table::new(rows).to_string());
    Ok(())
}
