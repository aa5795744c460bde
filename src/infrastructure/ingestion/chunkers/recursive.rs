//! Separator-aware sliding window chunker

use crate::domain::ingestion::{Chunk, ChunkMetadata, ChunkingConfig, ChunkingStrategy};
use crate::domain::DomainError;

/// Break points in order of preference: paragraph, line, sentence, word
pub const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", ". ", " "];

/// Splits text into windows of at most `chunk_size` characters.
///
/// Each window ends just after the last occurrence of the most preferred
/// separator that still leaves more than `chunk_overlap` characters in the
/// window; failing that it is cut hard at `chunk_size`. The next window starts
/// `chunk_overlap` characters before the previous end, so neighbours always
/// share exactly `chunk_overlap` characters. Offsets count chars, not bytes.
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    separators: Vec<Vec<char>>,
}

impl RecursiveChunker {
    pub fn new() -> Self {
        Self::with_separators(&DEFAULT_SEPARATORS)
    }

    /// Use a custom separator preference list; empty separators are ignored
    pub fn with_separators(separators: &[&str]) -> Self {
        Self {
            separators: separators
                .iter()
                .filter(|s| !s.is_empty())
                .map(|s| s.chars().collect())
                .collect(),
        }
    }

    /// End of the window starting at `start`, exclusive
    fn window_end(&self, chars: &[char], start: usize, config: &ChunkingConfig) -> usize {
        let hard_end = start + config.chunk_size;
        let window = &chars[start..hard_end];
        let min_break = start + config.chunk_overlap;

        for separator in &self.separators {
            if let Some(pos) = rfind(window, separator) {
                let break_at = start + pos + separator.len();
                if break_at > min_break {
                    return break_at;
                }
            }
        }

        hard_end
    }
}

impl Default for RecursiveChunker {
    fn default() -> Self {
        Self::new()
    }
}

/// Position of the last occurrence of `needle` in `haystack`
fn rfind(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }

    (0..=haystack.len() - needle.len())
        .rev()
        .find(|&i| haystack[i..i + needle.len()] == *needle)
}

impl ChunkingStrategy for RecursiveChunker {
    fn chunk(&self, content: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, DomainError> {
        config.validate()?;

        if content.is_empty() {
            return Ok(vec![]);
        }

        let chars: Vec<char> = content.chars().collect();
        let total_len = chars.len();

        if total_len <= config.chunk_size {
            return Ok(vec![Chunk::new(
                content,
                ChunkMetadata::new(0, 1, 0, total_len),
            )]);
        }

        let mut spans = Vec::new();
        let mut start = 0;

        loop {
            if start + config.chunk_size >= total_len {
                spans.push((start, total_len));
                break;
            }

            let end = self.window_end(&chars, start, config);
            spans.push((start, end));
            start = end - config.chunk_overlap;
        }

        let total = spans.len();
        let chunks = spans
            .into_iter()
            .enumerate()
            .map(|(index, (start, end))| {
                Chunk::new(
                    chars[start..end].iter().collect::<String>(),
                    ChunkMetadata::new(index, total, start, end),
                )
            })
            .collect();

        Ok(chunks)
    }

    fn name(&self) -> &'static str {
        "recursive"
    }
}

/// Split `text` with the default separators
pub fn split(text: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, DomainError> {
    RecursiveChunker::new().chunk(text, config)
}
