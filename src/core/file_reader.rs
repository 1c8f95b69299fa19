//! File reading for the `check` walker
//!
//! Transforms must see the complete, exact file content, so oversized,
//! binary, and non-UTF-8 files are skipped instead of truncated or
//! converted lossily.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default maximum file size in bytes (8 MB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 8 * 1024 * 1024;

/// Number of leading bytes inspected for NUL bytes
const BINARY_SNIFF_LEN: usize = 8192;

/// Configuration for file reading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReadConfig {
    /// Maximum file size to process (bytes)
    pub max_file_size: u64,
}

impl Default for FileReadConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// Why a file was not read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Unreadable,
    TooLarge,
    Binary,
    InvalidUtf8,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Unreadable => "unreadable",
            SkipReason::TooLarge => "too_large",
            SkipReason::Binary => "binary",
            SkipReason::InvalidUtf8 => "invalid_utf8",
        }
    }
}

/// Result of reading a file
#[derive(Debug, Clone)]
pub enum FileReadResult {
    Text { content: String, size: u64 },
    Skipped(SkipReason),
}

impl FileReadResult {
    pub fn content(&self) -> Option<&str> {
        match self {
            FileReadResult::Text { content, .. } => Some(content),
            FileReadResult::Skipped(_) => None,
        }
    }
}

/// Read a file with the given configuration
pub fn read_file_with_config(path: &Path, config: &FileReadConfig) -> FileReadResult {
    let size = match fs::metadata(path) {
        Ok(m) => m.len(),
        Err(_) => return FileReadResult::Skipped(SkipReason::Unreadable),
    };

    if size > config.max_file_size {
        return FileReadResult::Skipped(SkipReason::TooLarge);
    }

    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(_) => return FileReadResult::Skipped(SkipReason::Unreadable),
    };

    let check_len = std::cmp::min(BINARY_SNIFF_LEN, bytes.len());
    if bytes[..check_len].contains(&0) {
        return FileReadResult::Skipped(SkipReason::Binary);
    }

    match String::from_utf8(bytes) {
        Ok(content) => FileReadResult::Text { content, size },
        Err(_) => FileReadResult::Skipped(SkipReason::InvalidUtf8),
    }
}

/// Convenience function with default config
pub fn read_file_safe(path: &Path) -> FileReadResult {
    read_file_with_config(path, &FileReadConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_read_file_success() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("a.css");
        fs::write(&file_path, ".a{@apply flex;}").unwrap();

        let result = read_file_safe(&file_path);
        assert_eq!(result.content(), Some(".a{@apply flex;}"));
        assert!(matches!(result, FileReadResult::Text { size: 16, .. }));
    }

    #[test]
    fn test_read_file_too_large() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("big.css");
        fs::write(&file_path, "Hello").unwrap();

        let config = FileReadConfig { max_file_size: 1 };
        let result = read_file_with_config(&file_path, &config);
        assert!(matches!(result, FileReadResult::Skipped(SkipReason::TooLarge)));
    }

    #[test]
    fn test_read_file_binary() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("image.bin");
        let mut file = fs::File::create(&file_path).unwrap();
        file.write_all(&[0x00, 0x01, 0x02, 0x00, 0x03]).unwrap();

        let result = read_file_safe(&file_path);
        assert!(matches!(result, FileReadResult::Skipped(SkipReason::Binary)));
    }

    #[test]
    fn test_read_file_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("latin1.css");
        let mut file = fs::File::create(&file_path).unwrap();
        file.write_all(&[0xFF, 0xFE, 0x48, 0x65, 0x6C, 0x6C, 0x6F])
            .unwrap();

        let result = read_file_safe(&file_path);
        assert!(matches!(
            result,
            FileReadResult::Skipped(SkipReason::InvalidUtf8)
        ));
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = read_file_safe(Path::new("/nonexistent/file.css"));
        assert!(matches!(
            result,
            FileReadResult::Skipped(SkipReason::Unreadable)
        ));
        assert!(result.content().is_none());
    }

    #[test]
    fn test_skip_reason_as_str() {
        assert_eq!(SkipReason::InvalidUtf8.as_str(), "invalid_utf8");
    }
}
