//! Secondary (companion) file path resolution.
//!
//! A secondary suffix is either a plain string appended to the primary path
//! (`.bai` on `x.bam` gives `x.bam.bai`) or a `^`-prefixed string, meaning
//! strip the primary path's final extension and append the remainder
//! (`^.dict` on `x.fasta` gives `x.dict`). Builders and the evaluation
//! engine must resolve through this one function.

use std::path::{Path, PathBuf};

/// Resolve the path of a secondary file next to `primary`.
pub fn resolve(primary: &Path, suffix: &str) -> PathBuf {
    match suffix.strip_prefix('^') {
        Some(rest) => {
            let stripped = strip_last_extension(primary);
            PathBuf::from(format!("{}{}", stripped.display(), rest))
        }
        None => PathBuf::from(format!("{}{}", primary.display(), suffix)),
    }
}

/// Drop the final extension of a path, if it has one.
fn strip_last_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.with_extension("")
    } else {
        path.to_path_buf()
    }
}
