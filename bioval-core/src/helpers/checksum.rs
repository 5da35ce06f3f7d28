//! Md5 checksumming utilities.

use fs_err as fs;
use fs_err::File;
use std::path::Path;

use memmap2::Mmap;

use crate::BiovalError;

/// Checksum threshold for memory-mapped I/O (16KB).
pub const MMAP_THRESHOLD: u64 = 16 * 1024;

/// Compute the hex-encoded md5 checksum of a file.
///
/// Uses memory-mapped I/O for files >= 16KB, traditional read for smaller files.
pub fn file_md5(path: &Path) -> Result<String, BiovalError> {
    let metadata = fs::metadata(path)?;
    let size = metadata.len();

    if size >= MMAP_THRESHOLD {
        md5_mmap(path)
    } else {
        md5_read(path)
    }
}

fn md5_mmap(path: &Path) -> Result<String, BiovalError> {
    let file = File::open(path)?;
    let mmap = unsafe { Mmap::map(&file)? };

    let digest = md5::compute(&mmap[..]);
    Ok(format!("{:x}", digest))
}

fn md5_read(path: &Path) -> Result<String, BiovalError> {
    // Only reached below the mmap threshold, so a whole-file read is fine.
    let bytes = fs::read(path)?;
    let digest = md5::compute(&bytes);
    Ok(format!("{:x}", digest))
}
