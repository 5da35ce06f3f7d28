//! High-level evaluation operations.

mod batch;
mod evaluate;

pub use batch::{evaluate_batch, evaluate_batch_with, BatchItem};
pub use evaluate::evaluate;
