//! Infrastructure services

mod content_service;
mod rag_service;

pub use content_service::{ContentService, DEFAULT_TEMPERATURE};
pub use rag_service::{
    IngestionResult, KnowledgeBaseStats, RagService, DEFAULT_BATCH_SIZE, DEFAULT_TOP_K,
    NO_CONTEXT_FOUND,
};
