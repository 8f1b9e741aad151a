//! Embedding backend for semantic similarity.
//!
//! - [`encoder`] provides the sentence encoder (real model or deterministic stub).
//! - [`Embedder`] is the seam [`crate::similarity::EmbeddingSimilarity`] depends on.

/// BERT sentence model wrapper used by the encoder.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
/// Sentence encoder.
pub mod encoder;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
/// Tokenizer loading helpers.
pub mod utils;

pub use encoder::{EncoderConfig, REQUIRED_MODEL_FILES, SentenceEncoder};
pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;

/// Turns texts into fixed-size vectors, one per input, in input order.
pub trait Embedder {
    /// Short backend label for logs.
    fn name(&self) -> &str;

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}
