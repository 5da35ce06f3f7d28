//! Built-in pure-read preprocessors.

use fs_err as fs;
use std::path::{Path, PathBuf};

use crate::helpers::checksum;
use crate::types::Value;
use crate::BiovalError;

use super::Preprocessor;

/// Pull the single path these preprocessors operate on.
fn single_path<'a>(name: &str, paths: &'a [PathBuf]) -> Result<&'a Path, BiovalError> {
    match paths {
        [path] => {
            if !path.exists() {
                return Err(BiovalError::missing_output_file(path));
            }
            Ok(path)
        }
        _ => Err(BiovalError::preprocessor_failed(
            name,
            format!("expected exactly one path, got {}", paths.len()),
        )),
    }
}

/// Byte length of the file.
pub struct FileSize;

impl Preprocessor for FileSize {
    fn name(&self) -> &str {
        "file_size"
    }

    fn apply(&self, paths: &[PathBuf]) -> Result<Value, BiovalError> {
        let path = single_path(self.name(), paths)?;
        let metadata = fs::metadata(path)?;
        Ok(Value::from(metadata.len()))
    }
}

/// Hex-encoded md5 of the file content. Byte-exact equality only.
pub struct FileMd5;

impl Preprocessor for FileMd5 {
    fn name(&self) -> &str {
        "file_md5"
    }

    fn apply(&self, paths: &[PathBuf]) -> Result<Value, BiovalError> {
        let path = single_path(self.name(), paths)?;
        Ok(Value::Str(checksum::file_md5(path)?))
    }
}

/// Raw text content, for substring and equality checks on small text outputs.
pub struct FileContent;

impl Preprocessor for FileContent {
    fn name(&self) -> &str {
        "file_content"
    }

    fn apply(&self, paths: &[PathBuf]) -> Result<Value, BiovalError> {
        let path = single_path(self.name(), paths)?;
        let content = fs::read_to_string(path).map_err(|e| {
            BiovalError::preprocessor_failed(self.name(), e.to_string())
        })?;
        Ok(Value::Str(content))
    }
}

/// Number of lines in the file.
pub struct LineCount;

impl Preprocessor for LineCount {
    fn name(&self) -> &str {
        "line_count"
    }

    fn apply(&self, paths: &[PathBuf]) -> Result<Value, BiovalError> {
        let path = single_path(self.name(), paths)?;
        let content = fs::read_to_string(path).map_err(|e| {
            BiovalError::preprocessor_failed(self.name(), e.to_string())
        })?;
        Ok(Value::from(content.lines().count() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs_err::File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_file_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "out.bam", &[0u8; 1000]);
        let value = FileSize.apply(&[path]).unwrap();
        assert_eq!(value, Value::Int(1000));
    }

    #[test]
    fn test_missing_path_is_missing_output_file() {
        let err = FileSize.apply(&[PathBuf::from("/no/such/file.bam")]).unwrap_err();
        assert_eq!(err.error_type(), "missing_output_file");
    }

    #[test]
    fn test_wrong_arity() {
        let err = FileSize.apply(&[]).unwrap_err();
        assert_eq!(err.error_type(), "preprocessor_failed");
    }

    #[test]
    fn test_file_md5_identical_content() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_file(&dir, "a.txt", b"same bytes");
        let b = write_file(&dir, "b.txt", b"same bytes");
        assert_eq!(FileMd5.apply(&[a]).unwrap(), FileMd5.apply(&[b]).unwrap());
    }

    #[test]
    fn test_file_content_and_line_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "calls.vcf", b"##fileformat=VCFv4.2\nchr1\t100\t.\tA\tT\n");

        let content = FileContent.apply(&[path.clone()]).unwrap();
        assert!(matches!(content, Value::Str(s) if s.starts_with("##fileformat")));

        let lines = LineCount.apply(&[path]).unwrap();
        assert_eq!(lines, Value::Int(2));
    }
}
