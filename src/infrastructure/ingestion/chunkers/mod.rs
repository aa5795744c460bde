//! Chunking strategy implementations

mod recursive;

pub use recursive::{split, RecursiveChunker, DEFAULT_SEPARATORS};
