//! Low-level helper utilities.

pub mod checksum;
pub mod secondary;
pub mod subprocess;
