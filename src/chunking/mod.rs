//! Sentence-based chunking for similarity comparison.
//!
//! Text is split on runs of sentence terminators (`.`, `!`, `?`). Sentences are packed greedily
//! into a buffer until adding the next one would reach the configured character budget; each
//! emitted chunk ends every sentence with `". "` (trimmed at the chunk boundary). Chunks whose
//! trimmed length is at most [`MIN_CHUNK_CHARS`] are dropped as noise.
//!
//! Lengths are counted in `char`s, not bytes.


use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{DEFAULT_CHUNK_SIZE, MIN_CHUNK_CHARS};

static SENTENCE_TERMINATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("Invalid sentence terminator regex"));

/// Which side of a comparison a chunk came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkOrigin {
    /// The extracted source document.
    Source,
    /// The converted markup.
    Converted,
}

/// A bounded span of text used as the unit of semantic comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Chunk text (already trimmed).
    pub text: String,
    /// Originating side.
    pub origin: ChunkOrigin,
}

/// Splits text into size-bounded chunks. Pure function of `(text, chunk_size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    chunk_size: usize,
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl Chunker {
    /// Creates a chunker with the given character budget.
    pub fn new(chunk_size: usize) -> Self {
        Self { chunk_size }
    }

    /// Returns the configured character budget.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Splits `text` into chunk strings.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_len = 0usize;

        for sentence in SENTENCE_TERMINATORS.split(text) {
            let sentence = sentence.trim();
            if sentence.is_empty() {
                continue;
            }

            let sentence_len = sentence.chars().count();
            if current_len + sentence_len < self.chunk_size {
                current.push_str(sentence);
                current.push_str(". ");
                current_len += sentence_len + 2;
            } else {
                if !current.is_empty() {
                    chunks.push(current.trim().to_string());
                }
                current = format!("{sentence}. ");
                current_len = sentence_len + 2;
            }
        }

        if !current.is_empty() {
            chunks.push(current.trim().to_string());
        }

        chunks.retain(|chunk| chunk.chars().count() > MIN_CHUNK_CHARS);
        chunks
    }

    /// Like [`Chunker::chunk`], tagging each chunk with its origin.
    pub fn chunk_tagged(&self, text: &str, origin: ChunkOrigin) -> Vec<Chunk> {
        self.chunk(text)
            .into_iter()
            .map(|text| Chunk { text, origin })
            .collect()
    }
}
