//! Knowledge base records and query results

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ingestion::{Metadata, SOURCE_KEY};

/// A chunk with its embedding, ready to be stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBaseEntry {
    /// UUID v4 assigned at creation
    pub id: String,
    pub content: String,
    pub embedding: Vec<f32>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl KnowledgeBaseEntry {
    /// Create an entry with a fresh id
    pub fn new(content: impl Into<String>, embedding: Vec<f32>, metadata: Metadata) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            embedding,
            metadata,
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.metadata.get(SOURCE_KEY).map(String::as_str)
    }
}

/// A nearest-neighbour match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub content: String,
    /// Cosine distance to the query (lower is more similar)
    pub score: f32,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl SearchResult {
    pub fn new(id: impl Into<String>, content: impl Into<String>, score: f32) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            score,
            metadata: Metadata::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_all_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn source(&self) -> Option<&str> {
        self.metadata.get(SOURCE_KEY).map(String::as_str)
    }
}

/// Result of adding entries to a knowledge base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddEntriesResult {
    pub added: usize,
}

impl AddEntriesResult {
    pub fn success(added: usize) -> Self {
        Self { added }
    }
}

/// Number of stored chunks per source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub source: String,
    pub document_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_gets_unique_uuid() {
        let a = KnowledgeBaseEntry::new("a", vec![1.0], Metadata::new());
        let b = KnowledgeBaseEntry::new("a", vec![1.0], Metadata::new());

        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn test_search_result_builder() {
        let result = SearchResult::new("chunk-1", "Chlorophyll absorbs light", 0.12)
            .with_metadata(SOURCE_KEY, "bio.txt")
            .with_metadata("topic", "Biology");

        assert_eq!(result.source(), Some("bio.txt"));
        assert_eq!(result.score, 0.12);
        assert_eq!(result.metadata.len(), 2);
    }
}
