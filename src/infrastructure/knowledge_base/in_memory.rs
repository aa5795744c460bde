//! In-memory knowledge base provider for ephemeral use and tests

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::knowledge_base::{
    check_dimensions, check_query_dimensions, rank_by_distance, tally_sources, AddEntriesResult, KnowledgeBaseEntry,
    KnowledgeBaseProvider, SearchResult, SourceInfo,
};
use crate::domain::DomainError;

/// Entries plus the dimensionality fixed by the first insertion
#[derive(Debug, Default)]
pub(crate) struct VectorSet {
    pub(crate) entries: Vec<KnowledgeBaseEntry>,
    pub(crate) dimensions: Option<usize>,
}

impl VectorSet {
    pub(crate) fn new(entries: Vec<KnowledgeBaseEntry>, dimensions: Option<usize>) -> Self {
        Self {
            entries,
            dimensions,
        }
    }

    /// Validate and append; nothing is appended when any entry is rejected
    pub(crate) fn append(&mut self, entries: Vec<KnowledgeBaseEntry>) -> Result<usize, DomainError> {
        let dimensions = check_dimensions(self.dimensions, &entries)?;
        let added = entries.len();

        self.dimensions = dimensions;
        self.entries.extend(entries);

        Ok(added)
    }

    /// Undo an append that could not be persisted
    pub(crate) fn truncate(&mut self, len: usize, dimensions: Option<usize>) {
        self.entries.truncate(len);
        self.dimensions = dimensions;
    }

    pub(crate) fn search(
        &self,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>, DomainError> {
        check_query_dimensions(self.dimensions, embedding)?;
        Ok(rank_by_distance(&self.entries, embedding, top_k))
    }

    pub(crate) fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.dimensions = None;
        removed
    }

    pub(crate) fn sources(&self) -> Vec<SourceInfo> {
        tally_sources(self.entries.iter().map(KnowledgeBaseEntry::source))
    }
}

/// Non-persistent vector store
#[derive(Debug, Default)]
pub struct InMemoryKnowledgeBaseProvider {
    set: RwLock<VectorSet>,
}

impl InMemoryKnowledgeBaseProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KnowledgeBaseProvider for InMemoryKnowledgeBaseProvider {
    fn provider_type(&self) -> &'static str {
        "in_memory"
    }

    async fn add(&self, entries: Vec<KnowledgeBaseEntry>) -> Result<AddEntriesResult, DomainError> {
        let added = self.set.write().await.append(entries)?;
        Ok(AddEntriesResult::success(added))
    }

    async fn search(
        &self,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>, DomainError> {
        self.set.read().await.search(embedding, top_k)
    }

    async fn delete_all(&self) -> Result<usize, DomainError> {
        Ok(self.set.write().await.clear())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.set.read().await.entries.len())
    }

    async fn list_sources(&self) -> Result<Vec<SourceInfo>, DomainError> {
        Ok(self.set.read().await.sources())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ingestion::{Metadata, SOURCE_KEY};

    fn entry(content: &str, embedding: Vec<f32>, source: &str) -> KnowledgeBaseEntry {
        let mut metadata = Metadata::new();
        metadata.insert(SOURCE_KEY.to_string(), source.to_string());
        KnowledgeBaseEntry::new(content, embedding, metadata)
    }

    #[tokio::test]
    async fn test_add_and_search() {
        let provider = InMemoryKnowledgeBaseProvider::new();
        provider
            .add(vec![
                entry("chlorophyll", vec![1.0, 0.0], "bio.txt"),
                entry("loops", vec![0.0, 1.0], "python.txt"),
            ])
            .await
            .unwrap();

        let results = provider.search(&[0.9, 0.1], 1).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].content, "chlorophyll");
        assert_eq!(results[0].source(), Some("bio.txt"));
        assert_eq!(provider.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_dimension_mismatch_rejected_atomically() {
        let provider = InMemoryKnowledgeBaseProvider::new();
        provider.add(vec![entry("a", vec![1.0, 0.0], "a.txt")]).await.unwrap();

        let result = provider
            .add(vec![
                entry("b", vec![1.0, 0.0], "b.txt"),
                entry("c", vec![1.0, 0.0, 0.0], "c.txt"),
            ])
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert_eq!(provider.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_search_rejects_query_of_other_dimension() {
        let provider = InMemoryKnowledgeBaseProvider::new();
        provider
            .add(vec![
                entry("cells divide", vec![1.0, 0.0], "bio.txt"),
                entry("stars burn", vec![0.0, 1.0], "astro.txt"),
            ])
            .await
            .unwrap();

        let result = provider.search(&[1.0, 0.0, 0.0], 2).await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_delete_all_resets_dimensions() {
        let provider = InMemoryKnowledgeBaseProvider::new();
        provider.add(vec![entry("a", vec![1.0, 0.0], "a.txt")]).await.unwrap();

        assert_eq!(provider.delete_all().await.unwrap(), 1);
        assert_eq!(provider.delete_all().await.unwrap(), 0);
        assert_eq!(provider.count().await.unwrap(), 0);

        provider.add(vec![entry("b", vec![1.0, 0.0, 0.0], "b.txt")]).await.unwrap();
        assert_eq!(provider.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_sources() {
        let provider = InMemoryKnowledgeBaseProvider::new();
        provider
            .add(vec![
                entry("a", vec![1.0], "b.txt"),
                entry("b", vec![1.0], "a.txt"),
                entry("c", vec![1.0], "b.txt"),
            ])
            .await
            .unwrap();

        let sources = provider.list_sources().await.unwrap();

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].source, "a.txt");
        assert_eq!(sources[1].document_count, 2);
    }
}
