//! Bioval Catalogue
//!
//! Declarative descriptions consumed by the evaluation engine: file kinds
//! with their secondary-file declarations, and versioned tool entries
//! (signature, container tag, authored test cases).

pub mod kinds;
pub mod tools;

pub use tools::{ToolEntry, ToolId};
