//! Factory for creating parsers and chunkers

use std::sync::Arc;

use crate::domain::ingestion::{ChunkingStrategy, DocumentParser, FileFormat};

use super::chunkers::RecursiveChunker;
use super::parsers::{PdfParser, PlainTextParser};

/// Factory for creating document parsers
#[derive(Debug, Default)]
pub struct ParserFactory;

impl ParserFactory {
    /// Create a parser for the given format
    pub fn create(format: FileFormat) -> Arc<dyn DocumentParser> {
        match format {
            FileFormat::PlainText => Arc::new(PlainTextParser::new()),
            FileFormat::Pdf => Arc::new(PdfParser::new()),
        }
    }

    /// Get a list of all supported file extensions
    pub fn supported_extensions() -> Vec<&'static str> {
        vec!["txt", "pdf"]
    }
}

/// Factory for creating chunking strategies
#[derive(Debug, Default)]
pub struct ChunkerFactory;

impl ChunkerFactory {
    /// The default separator-aware chunker
    pub fn create_default() -> Arc<dyn ChunkingStrategy> {
        Arc::new(RecursiveChunker::new())
    }
}
