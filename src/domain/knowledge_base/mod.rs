//! Knowledge base (vector store) domain types and traits

pub mod entity;
pub mod provider;
pub mod search;

pub use entity::{AddEntriesResult, KnowledgeBaseEntry, SearchResult, SourceInfo};
pub use provider::{tally_sources, KnowledgeBaseProvider};
pub use search::{check_dimensions, check_query_dimensions, rank_by_distance};

#[cfg(test)]
pub use provider::mock::MockKnowledgeBaseProvider;
