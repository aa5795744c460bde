//! Domain layer - Core business logic and entities

pub mod embedding;
pub mod error;
pub mod ingestion;
pub mod knowledge_base;
pub mod llm;
pub mod prompt;

pub use embedding::{
    cosine_distance, cosine_similarity, EmbeddingInput, EmbeddingProvider, EmbeddingRequest,
    EmbeddingResponse, EmbeddingUsage,
};
pub use error::DomainError;
pub use ingestion::{
    Chunk, ChunkMetadata, ChunkingConfig, ChunkingStrategy, Document, DocumentParser, FileFormat,
    Metadata,
};
pub use knowledge_base::{
    AddEntriesResult, KnowledgeBaseEntry, KnowledgeBaseProvider, SearchResult, SourceInfo,
};
pub use llm::{FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, MessageRole, Usage};
pub use prompt::{
    compose, validate_topic, ComposedPrompt, ContentRequest, ContentType, GenerationOutcome,
    GenerationResult,
};
