//! PDF document parser

use async_trait::async_trait;
use std::path::Path;

use crate::domain::ingestion::{Document, DocumentParser, FileFormat, PAGE_KEY, SOURCE_KEY};
use crate::domain::DomainError;

/// Extracts text from a PDF, one document per page.
///
/// Page metadata is the 0-based page index.
#[derive(Debug, Clone, Default)]
pub struct PdfParser;

impl PdfParser {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentParser for PdfParser {
    fn format(&self) -> FileFormat {
        FileFormat::Pdf
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    async fn parse(&self, path: &Path) -> Result<Vec<Document>, DomainError> {
        let source = path.display().to_string();
        let owned = path.to_path_buf();

        // lopdf reads and decodes synchronously
        let pages = tokio::task::spawn_blocking(move || extract_pages(&owned))
            .await
            .map_err(|e| DomainError::io(&source, format!("PDF extraction task failed: {}", e)))?
            .map_err(|message| DomainError::io(&source, message))?;

        let documents: Vec<Document> = pages
            .into_iter()
            .enumerate()
            .map(|(index, text)| {
                Document::new(text)
                    .with_metadata(SOURCE_KEY, &source)
                    .with_metadata(PAGE_KEY, index.to_string())
            })
            .collect();

        tracing::debug!(source = %source, pages = documents.len(), "Parsed PDF");

        Ok(documents)
    }
}

/// Text of every page in page order
fn extract_pages(path: &Path) -> Result<Vec<String>, String> {
    let pdf = lopdf::Document::load(path).map_err(|e| format!("Failed to read PDF: {}", e))?;

    pdf.get_pages()
        .into_keys()
        .map(|page_number| {
            pdf.extract_text(&[page_number]).map_err(|e| {
                format!("Failed to extract text from page {}: {}", page_number, e)
            })
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_parse_pdf_one_document_per_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lecture.pdf");
        test_support::write_pdf(&path, &["Cell Structure", "Cell Division"]);

        let docs = PdfParser::new().parse(&path).await.unwrap();

        assert_eq!(docs.len(), 2);
        assert!(docs[0].content.contains("Cell Structure"));
        assert!(docs[1].content.contains("Cell Division"));
        assert_eq!(docs[0].metadata.get(PAGE_KEY).map(String::as_str), Some("0"));
        assert_eq!(docs[1].metadata.get(PAGE_KEY).map(String::as_str), Some("1"));
        assert_eq!(docs[1].source(), Some(path.display().to_string().as_str()));
    }

    #[tokio::test]
    async fn test_parse_corrupt_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let result = PdfParser::new().parse(&path).await;

        assert!(matches!(result, Err(DomainError::Io { .. })));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_parse_missing_pdf_off_runtime_threads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.pdf");

        let result = PdfParser::new().parse(&path).await;

        match result {
            Err(DomainError::Io { path: reported, message }) => {
                assert_eq!(reported, path.display().to_string());
                assert!(message.starts_with("Failed to read PDF"));
            }
            other => panic!("expected Io error, got {:?}", other),
        }
    }
}
