//! Knowledge base provider trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::entity::{AddEntriesResult, KnowledgeBaseEntry, SearchResult, SourceInfo};
use crate::domain::error::DomainError;

/// Vector store holding embedded chunks
///
/// Every stored entry has a non-empty embedding of the store's fixed
/// dimensionality, set by the first insertion.
#[async_trait]
pub trait KnowledgeBaseProvider: Send + Sync + Debug {
    /// Get the provider type name
    fn provider_type(&self) -> &'static str;

    /// Append entries; rejects the whole call on a dimensionality mismatch
    async fn add(&self, entries: Vec<KnowledgeBaseEntry>) -> Result<AddEntriesResult, DomainError>;

    /// The `top_k` entries nearest to `embedding` by cosine distance, nearest first
    async fn search(&self, embedding: &[f32], top_k: usize)
        -> Result<Vec<SearchResult>, DomainError>;

    /// Remove every entry and reset the store to empty; returns how many were removed
    async fn delete_all(&self) -> Result<usize, DomainError>;

    /// Get the total entry count
    async fn count(&self) -> Result<usize, DomainError>;

    /// List all unique sources with their chunk counts, sorted by source
    async fn list_sources(&self) -> Result<Vec<SourceInfo>, DomainError>;
}

/// Tally entries by their `source` metadata, sorted by source name
pub fn tally_sources<'a>(sources: impl Iterator<Item = Option<&'a str>>) -> Vec<SourceInfo> {
    let mut counts: std::collections::BTreeMap<String, usize> = std::collections::BTreeMap::new();

    for source in sources.flatten() {
        *counts.entry(source.to_string()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(source, document_count)| SourceInfo {
            source,
            document_count,
        })
        .collect()
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::knowledge_base::search::{check_query_dimensions, rank_by_distance};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::RwLock;

    /// Mock knowledge base provider for testing
    #[derive(Debug, Default)]
    pub struct MockKnowledgeBaseProvider {
        entries: RwLock<Vec<KnowledgeBaseEntry>>,
        add_calls: AtomicUsize,
        search_count: AtomicUsize,
        fail_adds_after: Option<usize>,
        fail_search: bool,
    }

    impl MockKnowledgeBaseProvider {
        pub fn new() -> Self {
            Self::default()
        }

        /// Let the first `n` add calls succeed and fail every one after
        pub fn with_add_failure_after(mut self, n: usize) -> Self {
            self.fail_adds_after = Some(n);
            self
        }

        pub fn with_search_failure(mut self) -> Self {
            self.fail_search = true;
            self
        }

        pub fn add_calls(&self) -> usize {
            self.add_calls.load(Ordering::SeqCst)
        }

        pub fn search_count(&self) -> usize {
            self.search_count.load(Ordering::SeqCst)
        }

        pub async fn entries(&self) -> Vec<KnowledgeBaseEntry> {
            self.entries.read().await.clone()
        }
    }

    #[async_trait]
    impl KnowledgeBaseProvider for MockKnowledgeBaseProvider {
        fn provider_type(&self) -> &'static str {
            "mock"
        }

        async fn add(
            &self,
            entries: Vec<KnowledgeBaseEntry>,
        ) -> Result<AddEntriesResult, DomainError> {
            let call = self.add_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_adds_after.is_some_and(|n| call >= n) {
                return Err(DomainError::storage("Mock provider configured to fail"));
            }

            let added = entries.len();
            self.entries.write().await.extend(entries);
            Ok(AddEntriesResult::success(added))
        }

        async fn search(
            &self,
            embedding: &[f32],
            top_k: usize,
        ) -> Result<Vec<SearchResult>, DomainError> {
            self.search_count.fetch_add(1, Ordering::SeqCst);
            if self.fail_search {
                return Err(DomainError::storage("Mock provider configured to fail"));
            }

            let entries = self.entries.read().await;
            let dimensions = entries.first().map(|e| e.embedding.len());
            check_query_dimensions(dimensions, embedding)?;

            Ok(rank_by_distance(&entries, embedding, top_k))
        }

        async fn delete_all(&self) -> Result<usize, DomainError> {
            let mut entries = self.entries.write().await;
            let removed = entries.len();
            entries.clear();
            Ok(removed)
        }

        async fn count(&self) -> Result<usize, DomainError> {
            Ok(self.entries.read().await.len())
        }

        async fn list_sources(&self) -> Result<Vec<SourceInfo>, DomainError> {
            let entries = self.entries.read().await;
            Ok(tally_sources(entries.iter().map(|e| e.source())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_sources_sorted_and_skips_missing() {
        let sources = vec![Some("b.txt"), None, Some("a.pdf"), Some("b.txt")];

        let tally = tally_sources(sources.into_iter());

        assert_eq!(
            tally,
            vec![
                SourceInfo {
                    source: "a.pdf".into(),
                    document_count: 1
                },
                SourceInfo {
                    source: "b.txt".into(),
                    document_count: 2
                },
            ]
        );
    }
}
