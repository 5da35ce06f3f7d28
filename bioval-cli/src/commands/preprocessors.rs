//! Bioval preprocessors command: list the registered preprocessors.

use bioval_core::PreprocessorRegistry;

use super::Result;
use crate::output::Output;

/// Run the preprocessors command.
pub fn run(output: &Output) -> Result<()> {
    let registry = PreprocessorRegistry::with_builtins();
    let names = registry.names();

    if output.is_json() {
        println!("{}", serde_json::to_string(&names)?);
        return Ok(());
    }

    for name in names {
        output.println(name);
    }
    Ok(())
}
