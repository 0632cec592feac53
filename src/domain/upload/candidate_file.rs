use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::error::{AppError, Result};

/// A user-selected file awaiting validation before being admitted
/// to a conversation. Owned by the caller for the duration of one
/// pipeline invocation; nothing is retained on rejection.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    /// File name as selected in the UI
    pub name: String,

    /// Declared size in bytes; the UI layer knows this before the
    /// content is read, so the guard checks it without touching bytes
    pub size_bytes: u64,

    /// Raw file content
    pub content: Vec<u8>,
}

impl CandidateFile {
    /// Create a candidate with an explicitly declared size
    pub fn new(name: impl Into<String>, size_bytes: u64, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            content,
        }
    }

    /// Create a candidate whose declared size is the content length
    pub fn from_bytes(name: impl Into<String>, content: Vec<u8>) -> Self {
        let size_bytes = content.len() as u64;
        Self::new(name, size_bytes, content)
    }

    /// Read a candidate from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| AppError::IoError(format!("Not a file path: {}", path.display())))?;
        let content = std::fs::read(path)?;
        Ok(Self::from_bytes(name, content))
    }

    /// Byte-free projection forwarded to the conversation layer
    pub fn metadata(&self) -> FileMetadata {
        FileMetadata {
            name: self.name.clone(),
            size_bytes: self.size_bytes,
        }
    }
}

/// What the rest of the application learns about an accepted file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMetadata {
    pub name: String,
    pub size_bytes: u64,
}
