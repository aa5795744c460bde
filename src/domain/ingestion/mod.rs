//! Document ingestion domain types and traits
//!
//! This module provides:
//! - `Document`, the unit produced by loading a file
//! - `DocumentParser` trait, one implementation per file format
//! - `ChunkingStrategy` trait for splitting documents into chunks

pub mod chunker;
pub mod document;
pub mod parser;
pub mod validation;

pub use chunker::{
    Chunk, ChunkMetadata, ChunkingConfig, ChunkingStrategy, DEFAULT_CHUNK_OVERLAP,
    DEFAULT_CHUNK_SIZE,
};
pub use document::{Document, Metadata, PAGE_KEY, SOURCE_KEY};
pub use parser::DocumentParser;
pub use validation::{
    detect_format_from_path, validate_batch_size, validate_chunk_params, FileFormat,
};
