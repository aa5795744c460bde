//! File loading front door

use std::path::Path;

use crate::domain::ingestion::{detect_format_from_path, Document};
use crate::domain::DomainError;

use super::factory::ParserFactory;

/// Loads PDF and plain-text files into documents
#[derive(Debug, Clone, Default)]
pub struct DocumentLoader;

impl DocumentLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load `path` into one document (text) or one per page (PDF).
    ///
    /// The extension is checked before the filesystem is touched, so an
    /// unsupported path fails with `UnsupportedFormat` even if it doesn't exist.
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<Vec<Document>, DomainError> {
        let path = path.as_ref();

        let format = detect_format_from_path(path)
            .ok_or_else(|| DomainError::unsupported_format(path.display().to_string()))?;

        let documents = ParserFactory::create(format).parse(path).await?;

        tracing::debug!(
            path = %path.display(),
            format = format.as_str(),
            documents = documents.len(),
            "Loaded file"
        );

        Ok(documents)
    }
}
