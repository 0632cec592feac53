use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{FileMetadata, SanitizedPreview, Violation};

/// Machine-distinguishable reason an upload was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    FileTooLarge,
    InvalidExtension,
    ParseFailure,
    SecurityValidationFailed,
}

impl RejectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionKind::FileTooLarge => "file_too_large",
            RejectionKind::InvalidExtension => "invalid_extension",
            RejectionKind::ParseFailure => "parse_failure",
            RejectionKind::SecurityValidationFailed => "security_validation_failed",
        }
    }
}

/// A successfully ingested upload, handed to the conversation layer
/// as a single accepted-upload event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptedUpload {
    pub upload_id: Uuid,
    pub file: FileMetadata,
    pub preview: SanitizedPreview,
    /// Row count of the full parsed table, before preview truncation
    pub total_rows: usize,
    pub uploaded_at: DateTime<Utc>,
}

/// A kind-tagged refusal. Carries the full violation list even though
/// hosts typically surface only the first entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRejection {
    pub kind: RejectionKind,
    pub message: String,
    pub violations: Vec<Violation>,
}

impl UploadRejection {
    pub fn new(kind: RejectionKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            violations: vec![],
        }
    }

    pub fn with_violations(
        kind: RejectionKind,
        message: impl Into<String>,
        violations: Vec<Violation>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            violations,
        }
    }

    /// The single user-facing line a host shows for this rejection.
    /// Display policy stays with the caller; the full list remains in
    /// `violations`.
    pub fn notification(&self) -> &str {
        self.violations
            .first()
            .map(|v| v.message.as_str())
            .unwrap_or(&self.message)
    }
}

/// Terminal outcome of one upload attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadOutcome {
    Accepted(AcceptedUpload),
    Rejected(UploadRejection),
    /// A newer attempt started while this one was parsing; its
    /// completion was discarded
    Superseded { attempt: u64 },
}

impl UploadOutcome {
    pub fn as_accepted(&self) -> Option<&AcceptedUpload> {
        match self {
            UploadOutcome::Accepted(upload) => Some(upload),
            _ => None,
        }
    }

    pub fn as_rejection(&self) -> Option<&UploadRejection> {
        match self {
            UploadOutcome::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}
