//! Retrieval pipeline: chunk, embed and store documents; embed, search and
//! format queries

use std::sync::Arc;

use serde::Serialize;

use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest};
use crate::domain::ingestion::{
    validate_batch_size, ChunkingConfig, ChunkingStrategy, Document, Metadata,
};
use crate::domain::knowledge_base::{
    KnowledgeBaseEntry, KnowledgeBaseProvider, SearchResult, SourceInfo,
};
use crate::domain::DomainError;
use crate::infrastructure::ingestion::ChunkerFactory;

/// Returned by [`RagService::format_context`] when nothing matched
pub const NO_CONTEXT_FOUND: &str = "No relevant context found in knowledge base.";

pub const DEFAULT_BATCH_SIZE: usize = 100;
pub const DEFAULT_TOP_K: usize = 5;

/// Summary of one ingestion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestionResult {
    /// Documents that produced at least one chunk
    pub documents: usize,
    pub chunks: usize,
    /// Embedding calls made (one per batch)
    pub batches: usize,
}

/// Record count and per-source breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnowledgeBaseStats {
    pub total: usize,
    pub sources: Vec<SourceInfo>,
}

/// Orchestrates ingestion into and retrieval from a knowledge base
pub struct RagService {
    embedding_provider: Arc<dyn EmbeddingProvider>,
    embedding_model: String,
    knowledge_base: Arc<dyn KnowledgeBaseProvider>,
    chunker: Arc<dyn ChunkingStrategy>,
    chunking: ChunkingConfig,
    batch_size: usize,
    top_k: usize,
}

impl std::fmt::Debug for RagService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagService")
            .field("embedding_provider", &self.embedding_provider.provider_name())
            .field("embedding_model", &self.embedding_model)
            .field("knowledge_base", &self.knowledge_base.provider_type())
            .field("chunker", &self.chunker.name())
            .field("chunking", &self.chunking)
            .field("batch_size", &self.batch_size)
            .field("top_k", &self.top_k)
            .finish()
    }
}

impl RagService {
    /// Service with the default chunker, chunking parameters, batch size and `top_k`
    pub fn new(
        embedding_provider: Arc<dyn EmbeddingProvider>,
        embedding_model: impl Into<String>,
        knowledge_base: Arc<dyn KnowledgeBaseProvider>,
    ) -> Self {
        Self {
            embedding_provider,
            embedding_model: embedding_model.into(),
            knowledge_base,
            chunker: ChunkerFactory::create_default(),
            chunking: ChunkingConfig::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_chunker(mut self, chunker: Arc<dyn ChunkingStrategy>) -> Self {
        self.chunker = chunker;
        self
    }

    pub fn with_chunking(mut self, chunking: ChunkingConfig) -> Result<Self, DomainError> {
        chunking.validate()?;
        self.chunking = chunking;
        Ok(self)
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Result<Self, DomainError> {
        validate_batch_size(batch_size)?;
        self.batch_size = batch_size;
        Ok(self)
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn chunking(&self) -> ChunkingConfig {
        self.chunking
    }

    pub fn knowledge_base(&self) -> &Arc<dyn KnowledgeBaseProvider> {
        &self.knowledge_base
    }

    /// Chunk every document and flatten, carrying document metadata onto each chunk
    fn chunk_documents(
        &self,
        documents: &[Document],
    ) -> Result<(usize, Vec<(String, Metadata)>), DomainError> {
        let mut chunked_documents = 0;
        let mut chunks = Vec::new();

        for document in documents {
            if document.content.trim().is_empty() {
                tracing::debug!(source = ?document.source(), "Skipping blank document");
                continue;
            }

            let document_chunks = self.chunker.chunk(&document.content, &self.chunking)?;
            if document_chunks.is_empty() {
                continue;
            }

            chunked_documents += 1;
            for chunk in document_chunks {
                let mut metadata = document.metadata.clone();
                chunk.metadata.write_to(&mut metadata);
                chunks.push((chunk.content, metadata));
            }
        }

        Ok((chunked_documents, chunks))
    }

    async fn embed_batch(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, DomainError> {
        let expected = texts.len();
        let request = EmbeddingRequest::batch(&self.embedding_model, texts);
        let vectors = self.embedding_provider.embed(request).await?.into_vectors();

        if vectors.len() != expected {
            return Err(DomainError::provider(
                self.embedding_provider.provider_name(),
                format!("Expected {} embeddings, got {}", expected, vectors.len()),
            ));
        }

        Ok(vectors)
    }

    /// Chunk, embed and store `documents`.
    ///
    /// Override `i` is merged into the metadata of flattened chunk `i`, with
    /// override keys winning. Each batch is stored as soon as it is embedded;
    /// batches stored before a failure stay stored.
    pub async fn ingest(
        &self,
        documents: &[Document],
        overrides: Option<&[Metadata]>,
    ) -> Result<IngestionResult, DomainError> {
        let (document_count, mut chunks) = self.chunk_documents(documents)?;

        if chunks.is_empty() {
            tracing::info!("No chunks to ingest");
            return Ok(IngestionResult::default());
        }

        if let Some(overrides) = overrides {
            for ((_, metadata), extra) in chunks.iter_mut().zip(overrides) {
                metadata.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }

        let total_chunks = chunks.len();
        let mut batches = 0;
        let mut remaining = chunks.into_iter().peekable();

        while remaining.peek().is_some() {
            let batch: Vec<(String, Metadata)> = remaining.by_ref().take(self.batch_size).collect();
            let texts = batch.iter().map(|(text, _)| text.clone()).collect();

            let vectors = self.embed_batch(texts).await?;

            let entries = batch
                .into_iter()
                .zip(vectors)
                .map(|((text, metadata), vector)| KnowledgeBaseEntry::new(text, vector, metadata))
                .collect();

            let added = self.knowledge_base.add(entries).await?.added;
            batches += 1;

            tracing::debug!(batch = batches, added, "Stored embedding batch");
        }

        tracing::info!(
            documents = document_count,
            chunks = total_chunks,
            batches,
            "Ingested documents into knowledge base"
        );

        Ok(IngestionResult {
            documents: document_count,
            chunks: total_chunks,
            batches,
        })
    }

    /// The `k` stored chunks nearest to `text`, closest first
    pub async fn query(&self, text: &str, k: usize) -> Result<Vec<SearchResult>, DomainError> {
        if k == 0 || self.knowledge_base.count().await? == 0 {
            return Ok(Vec::new());
        }

        let request = EmbeddingRequest::single(&self.embedding_model, text);
        let vector = self
            .embedding_provider
            .embed(request)
            .await?
            .into_vectors()
            .into_iter()
            .next()
            .ok_or_else(|| {
                DomainError::provider(
                    self.embedding_provider.provider_name(),
                    "Empty embedding response for query",
                )
            })?;

        let results = self.knowledge_base.search(&vector, k).await?;

        tracing::debug!(k, matches = results.len(), "Searched knowledge base");

        Ok(results)
    }

    /// Render matches as numbered `[Source n]` blocks
    pub fn format_context(matches: &[SearchResult]) -> String {
        if matches.is_empty() {
            return NO_CONTEXT_FOUND.to_string();
        }

        matches
            .iter()
            .enumerate()
            .map(|(i, m)| format!("[Source {}]\n{}\n", i + 1, m.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Formatted context for `topic`, or `None` when nothing matched
    pub async fn context_for(&self, topic: &str, k: usize) -> Result<Option<String>, DomainError> {
        let matches = self.query(topic, k).await?;

        if matches.is_empty() {
            return Ok(None);
        }

        Ok(Some(Self::format_context(&matches)))
    }

    /// Drop every stored record; returns how many were removed
    pub async fn clear(&self) -> Result<usize, DomainError> {
        let removed = self.knowledge_base.delete_all().await?;
        tracing::info!(removed, "Cleared knowledge base");
        Ok(removed)
    }

    pub async fn stats(&self) -> Result<KnowledgeBaseStats, DomainError> {
        Ok(KnowledgeBaseStats {
            total: self.knowledge_base.count().await?,
            sources: self.knowledge_base.list_sources().await?,
        })
    }
}
