// ============================================================
// UPLOAD CONFIGURATION
// ============================================================
// Named limits for the upload ingestion pipeline

use serde::{Deserialize, Serialize};

/// Configuration for upload intake, validation, and preview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Maximum accepted file size in bytes (default: 10 MiB)
    pub max_file_size_bytes: u64,

    /// Maximum number of parsed rows, header included (default: 100000)
    pub max_row_count: usize,

    /// Number of sanitized rows kept for display (default: 5)
    pub preview_row_count: usize,

    /// Also accept upper/mixed-case `.csv` extensions.
    /// The reference behavior is case-sensitive, so this is off by
    /// default.
    pub case_insensitive_extension: bool,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 10 * 1024 * 1024,
            max_row_count: 100_000,
            preview_row_count: 5,
            case_insensitive_extension: false,
        }
    }
}

impl UploadConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.max_file_size_bytes == 0 {
            return Err("max_file_size_bytes must be > 0".to_string());
        }
        if self.max_row_count == 0 {
            return Err("max_row_count must be > 0".to_string());
        }
        if self.preview_row_count == 0 {
            return Err("preview_row_count must be > 0".to_string());
        }
        if self.preview_row_count > self.max_row_count {
            return Err("preview_row_count must be <= max_row_count".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_match_reference_behavior() {
        let config = UploadConfig::new();
        assert_eq!(config.max_file_size_bytes, 10_485_760);
        assert_eq!(config.max_row_count, 100_000);
        assert_eq!(config.preview_row_count, 5);
        assert!(!config.case_insensitive_extension);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_limits_are_rejected() {
        let config = UploadConfig {
            preview_row_count: 0,
            ..UploadConfig::default()
        };
        assert!(config.validate().is_err());

        let config = UploadConfig {
            max_row_count: 0,
            ..UploadConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
