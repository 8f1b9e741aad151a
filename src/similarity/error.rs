use thiserror::Error;

use crate::embedding::EmbeddingError;

/// Failures of a similarity strategy. The scorer recovers from all of them.
#[derive(Debug, Error)]
pub enum SimilarityError {
    #[error("embedding backend error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("similarity computation produced a non-finite score")]
    NonFinite,
}
