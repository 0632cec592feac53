//! Intake Guard for candidate uploads
//!
//! Admission control before any parsing happens:
//! - File size ceiling
//! - `.csv` extension check (case-sensitive unless configured otherwise)
//!
//! A rejection carries a kind-tagged reason and leaves no state behind;
//! the pipeline resets to "no file selected".

use tracing::warn;

use crate::domain::upload::{CandidateFile, RejectionKind, UploadConfig, UploadRejection};

/// File extension admitted by the guard
pub const CSV_EXTENSION: &str = ".csv";

/// Admission control for candidate files
pub struct IntakeGuard {
    config: UploadConfig,
}

impl IntakeGuard {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    /// Decide admission for a candidate file before any parsing occurs.
    /// Size is checked first so an oversized file is refused without
    /// looking at its name.
    pub fn admit(&self, file: &CandidateFile) -> Result<(), UploadRejection> {
        if file.size_bytes > self.config.max_file_size_bytes {
            warn!(
                file = %file.name,
                size_bytes = file.size_bytes,
                max_bytes = self.config.max_file_size_bytes,
                "Upload rejected: file too large"
            );
            return Err(UploadRejection::new(
                RejectionKind::FileTooLarge,
                format!(
                    "File is {} bytes, maximum allowed is {} bytes",
                    file.size_bytes, self.config.max_file_size_bytes
                ),
            ));
        }

        if !self.has_csv_extension(&file.name) {
            warn!(file = %file.name, "Upload rejected: not a .csv file");
            return Err(UploadRejection::new(
                RejectionKind::InvalidExtension,
                format!("File '{}' does not have a .csv extension", file.name),
            ));
        }

        Ok(())
    }

    fn has_csv_extension(&self, name: &str) -> bool {
        if self.config.case_insensitive_extension {
            name.to_lowercase().ends_with(CSV_EXTENSION)
        } else {
            name.ends_with(CSV_EXTENSION)
        }
    }
}
