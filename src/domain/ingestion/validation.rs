//! Validation helpers for ingestion

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::DomainError;

/// File formats accepted for ingestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileFormat {
    PlainText,
    Pdf,
}

impl FileFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlainText => "plain_text",
            Self::Pdf => "pdf",
        }
    }
}

/// Detect the file format from the path's extension, case-insensitively
pub fn detect_format_from_path(path: &Path) -> Option<FileFormat> {
    let ext = path.extension()?.to_str()?.to_lowercase();

    match ext.as_str() {
        "txt" => Some(FileFormat::PlainText),
        "pdf" => Some(FileFormat::Pdf),
        _ => None,
    }
}

/// Validate chunk size parameters
pub fn validate_chunk_params(chunk_size: usize, chunk_overlap: usize) -> Result<(), DomainError> {
    if chunk_size == 0 {
        return Err(DomainError::validation("Chunk size must be greater than 0"));
    }

    if chunk_overlap >= chunk_size {
        return Err(DomainError::validation(
            "Chunk overlap must be less than chunk size",
        ));
    }

    Ok(())
}

/// Validate embedding batch size
pub fn validate_batch_size(batch_size: usize) -> Result<(), DomainError> {
    if batch_size == 0 {
        return Err(DomainError::validation("Batch size must be greater than 0"));
    }

    Ok(())
}
