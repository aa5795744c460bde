//! Loaded document type

use std::collections::BTreeMap;

/// Free-form string metadata, ordered by key
pub type Metadata = BTreeMap<String, String>;

/// Metadata key holding the originating file path
pub const SOURCE_KEY: &str = "source";
/// Metadata key holding the 0-based PDF page index
pub const PAGE_KEY: &str = "page";

/// Text extracted from a file (or one page of it) plus its metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub content: String,
    pub metadata: Metadata,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: Metadata::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn source(&self) -> Option<&str> {
        self.metadata.get(SOURCE_KEY).map(String::as_str)
    }
}
