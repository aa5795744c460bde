//! Knowledge base provider implementations

mod in_memory;
mod local;

pub use in_memory::InMemoryKnowledgeBaseProvider;
pub use local::LocalKnowledgeBaseProvider;
