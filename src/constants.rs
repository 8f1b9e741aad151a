//! Cross-cutting, shared constants.
//!
//! The thresholds here are part of the observable contract of the checks: changing one changes
//! which documents pass. Keep the messages in [`crate::validation`] in sync when editing them.

/// Minimum semantic similarity for the semantic gate to pass (inclusive).
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

/// Character budget for one similarity chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 512;

/// Chunks whose trimmed length is at or below this are treated as noise.
pub const MIN_CHUNK_CHARS: usize = 20;

/// Max tokens fed to the sentence encoder per chunk.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Output dimension of the stub encoder (matches all-MiniLM-L6-v2).
pub const STUB_EMBEDDING_DIM: usize = 384;

/// Minimum trimmed length (chars) for a document to be worth ingesting.
pub const MIN_CONTENT_CHARS: usize = 200;

/// Minimum number of word tokens.
pub const MIN_WORD_COUNT: usize = 50;

/// Minimum number of sentences with at least [`MIN_SENTENCE_TOKENS`] tokens.
pub const MIN_SENTENCES: usize = 5;

/// Whitespace-separated tokens needed for a fragment to count as a sentence.
pub const MIN_SENTENCE_TOKENS: usize = 3;

/// Max share of characters outside the permitted set.
pub const MAX_SPECIAL_CHAR_RATIO: f64 = 0.10;

/// Placeholder tokens that must not survive into the corpus.
pub const PLACEHOLDER_TOKENS: [&str; 5] = ["TODO", "FIXME", "XXX", "[PLACEHOLDER]", "TBD"];

/// File extensions recognised as converted markup.
pub const MARKUP_EXTENSIONS: [&str; 2] = ["md", "markdown"];
