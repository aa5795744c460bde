//! Plain text document parser

use async_trait::async_trait;
use std::path::Path;

use crate::domain::ingestion::{Document, DocumentParser, FileFormat, SOURCE_KEY};
use crate::domain::DomainError;

/// Reads a UTF-8 text file into a single document
#[derive(Debug, Clone, Default)]
pub struct PlainTextParser;

impl PlainTextParser {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentParser for PlainTextParser {
    fn format(&self) -> FileFormat {
        FileFormat::PlainText
    }

    fn supported_extensions(&self) -> &[&str] {
        &["txt"]
    }

    async fn parse(&self, path: &Path) -> Result<Vec<Document>, DomainError> {
        let source = path.display().to_string();

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| DomainError::io(&source, e.to_string()))?;

        let content = String::from_utf8(bytes)
            .map_err(|e| DomainError::io(&source, format!("Invalid UTF-8: {}", e)))?;

        Ok(vec![Document::new(content).with_metadata(SOURCE_KEY, source)])
    }
}
