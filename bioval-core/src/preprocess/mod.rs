//! Preprocessors: named reductions of files to comparable values.
//!
//! A preprocessor maps one or more file paths to a `Value` (size, checksum,
//! content, line count, or an external tool's summary). All built-ins are
//! pure reads; command-backed preprocessors spawn a bounded subprocess.

mod builtins;
mod command;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::types::Value;
use crate::BiovalError;

pub use builtins::{FileContent, FileMd5, FileSize, LineCount};
pub use command::CommandSummary;

/// A named preprocessor.
///
/// `apply` must be deterministic for byte-identical inputs. Implementations
/// used for semantic equality must produce output insensitive to irrelevant
/// variation (timestamps, embedded command lines); implementations used for
/// checksum equality must be byte-exact. The two uses must not be conflated.
pub trait Preprocessor: Send + Sync {
    /// Registered name.
    fn name(&self) -> &str;

    /// Reduce the given paths to a comparable value.
    fn apply(&self, paths: &[PathBuf]) -> Result<Value, BiovalError>;
}

/// Name -> preprocessor registry.
///
/// Inspectable and swappable: custom domain preprocessors register alongside
/// the built-ins under their own names.
#[derive(Clone, Default)]
pub struct PreprocessorRegistry {
    entries: BTreeMap<String, Arc<dyn Preprocessor>>,
}

impl PreprocessorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-ins plus the flagstat summary.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(FileSize));
        registry.register(Arc::new(FileMd5));
        registry.register(Arc::new(FileContent));
        registry.register(Arc::new(LineCount));
        registry.register(Arc::new(CommandSummary::flagstat()));
        registry
    }

    /// Register a preprocessor under its own name.
    pub fn register(&mut self, preprocessor: Arc<dyn Preprocessor>) {
        self.entries
            .insert(preprocessor.name().to_string(), preprocessor);
    }

    /// Look up a preprocessor by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Preprocessor>, BiovalError> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| BiovalError::unknown_preprocessor(name))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_registered() {
        let registry = PreprocessorRegistry::with_builtins();
        for name in ["file_size", "file_md5", "file_content", "line_count", "flagstat"] {
            assert!(registry.get(name).is_ok(), "missing builtin {}", name);
        }
    }

    #[test]
    fn test_unknown_name() {
        let registry = PreprocessorRegistry::with_builtins();
        match registry.get("no_such_thing") {
            Ok(_) => panic!("lookup of an unregistered name succeeded"),
            Err(err) => assert_eq!(err.error_type(), "unknown_preprocessor"),
        }
    }

    #[test]
    fn test_custom_registration() {
        struct AlwaysTrue;
        impl Preprocessor for AlwaysTrue {
            fn name(&self) -> &str {
                "always_true"
            }
            fn apply(&self, _paths: &[PathBuf]) -> Result<Value, BiovalError> {
                Ok(Value::Bool(true))
            }
        }

        let mut registry = PreprocessorRegistry::new();
        registry.register(Arc::new(AlwaysTrue));
        let value = registry.get("always_true").unwrap().apply(&[]).unwrap();
        assert_eq!(value, Value::Bool(true));
    }
}
