//! Educational content generator
//!
//! Builds study guides, quizzes, explanations, summaries and practice
//! problems with a chat completion model, optionally grounded in passages
//! retrieved from a local knowledge base of ingested PDF and text files.

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use crate::config::KnowledgeBaseBackend;
use domain::ingestion::ChunkingConfig;
use domain::{DomainError, EmbeddingProvider, KnowledgeBaseProvider, LlmProvider};
use infrastructure::{
    embedding::OpenAiEmbeddingProvider,
    ingestion::DocumentLoader,
    knowledge_base::{InMemoryKnowledgeBaseProvider, LocalKnowledgeBaseProvider},
    llm::{HttpClient, OpenAiProvider},
    services::{ContentService, RagService},
};
use tracing::info;

/// Long-lived handles shared by every command.
///
/// Built once by the caller and passed explicitly; nothing here is global.
#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub loader: DocumentLoader,
    pub rag: Arc<RagService>,
    pub content: ContentService,
}

/// Build the context with OpenAI-backed embedding and completion providers
pub async fn create_app_context(config: AppConfig) -> Result<AppContext, DomainError> {
    let api_key = config.api_key().ok_or_else(|| {
        DomainError::configuration(format!(
            "OpenAI API key not found. Set openai.api_key or the {} environment variable",
            crate::config::OPENAI_API_KEY_ENV
        ))
    })?;

    let http = HttpClient::with_timeout(Duration::from_secs(config.openai.timeout_secs))?;
    let base_url = config.openai.base_url.clone();

    let embedding: Arc<dyn EmbeddingProvider> = Arc::new(OpenAiEmbeddingProvider::with_base_url(
        http.clone(),
        api_key.clone(),
        base_url.clone(),
    ));
    let llm: Arc<dyn LlmProvider> = Arc::new(OpenAiProvider::with_base_url(http, api_key, base_url));

    create_app_context_with_providers(config, embedding, llm).await
}

/// Build the context around caller-supplied providers
pub async fn create_app_context_with_providers(
    config: AppConfig,
    embedding: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LlmProvider>,
) -> Result<AppContext, DomainError> {
    let knowledge_base = create_knowledge_base(&config).await?;

    let kb_config = &config.knowledge_base;
    let rag = RagService::new(embedding, config.embedding.model.clone(), knowledge_base)
        .with_chunking(ChunkingConfig::new(kb_config.chunk_size, kb_config.chunk_overlap))?
        .with_batch_size(config.embedding.batch_size)?
        .with_top_k(kb_config.top_k);
    let rag = Arc::new(rag);

    let content = ContentService::new(llm, config.completion.model.clone(), rag.clone())
        .with_temperature(config.completion.temperature)
        .with_max_tokens(config.completion.max_tokens);

    Ok(AppContext {
        config,
        loader: DocumentLoader::new(),
        rag,
        content,
    })
}

async fn create_knowledge_base(
    config: &AppConfig,
) -> Result<Arc<dyn KnowledgeBaseProvider>, DomainError> {
    match config.knowledge_base.backend {
        KnowledgeBaseBackend::Local => {
            let directory = &config.knowledge_base.persist_directory;
            info!("Knowledge base: local store at {}", directory.display());
            Ok(Arc::new(LocalKnowledgeBaseProvider::open(directory).await?))
        }
        KnowledgeBaseBackend::InMemory => {
            info!("Knowledge base: in-memory");
            Ok(Arc::new(InMemoryKnowledgeBaseProvider::new()))
        }
    }
}
