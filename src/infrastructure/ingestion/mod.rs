//! Document ingestion infrastructure
//!
//! File parsers, the chunker, and the loader that picks a parser by extension.

pub mod chunkers;
pub mod factory;
pub mod loader;
pub mod parsers;

pub use chunkers::{split, RecursiveChunker};
pub use factory::{ChunkerFactory, ParserFactory};
pub use loader::DocumentLoader;
pub use parsers::{PdfParser, PlainTextParser};
