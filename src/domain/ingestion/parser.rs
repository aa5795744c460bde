//! Document parser trait

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::Path;

use super::document::Document;
use super::validation::FileFormat;
use crate::domain::DomainError;

/// Reads one file format into documents
#[async_trait]
pub trait DocumentParser: Send + Sync + Debug {
    /// The format this parser handles
    fn format(&self) -> FileFormat;

    /// Get supported file extensions (e.g., ["txt"])
    fn supported_extensions(&self) -> &[&str];

    /// Parse the file at `path` into one or more documents.
    ///
    /// Every returned document carries `source` set to the path as given.
    async fn parse(&self, path: &Path) -> Result<Vec<Document>, DomainError>;

    /// Check if this parser supports a given path, by extension
    fn supports_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.supported_extensions()
                    .iter()
                    .any(|e| e.eq_ignore_ascii_case(ext))
            })
    }
}
