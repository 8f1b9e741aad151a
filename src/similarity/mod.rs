//! Similarity between the source text and the converted text.
//!
//! Two interchangeable strategies implement [`TextSimilarity`]:
//! - [`EmbeddingSimilarity`]: chunk both texts, embed, best-match mean of cosine similarities.
//! - [`LexicalSimilarity`]: matching-blocks ratio over the whole normalised texts.
//!
//! [`SimilarityScorer`] owns the selection policy; call sites never branch on backend
//! availability themselves.

mod embedding;
mod error;
mod lexical;
mod scorer;


pub use embedding::{EmbeddingSimilarity, SimilarityMatrix, cosine_similarity};
pub use error::SimilarityError;
pub use lexical::{LexicalSimilarity, normalize, sequence_ratio};
pub use scorer::SimilarityScorer;

use serde::Serialize;

/// A strategy that scores two texts.
pub trait TextSimilarity {
    fn method(&self) -> SimilarityMethod;

    fn score(&self, text1: &str, text2: &str) -> Result<f64, SimilarityError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMethod {
    Embedding,
    Lexical,
}

impl std::fmt::Display for SimilarityMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimilarityMethod::Embedding => f.write_str("embedding"),
            SimilarityMethod::Lexical => f.write_str("lexical"),
        }
    }
}

/// Score plus the method that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarityOutcome {
    /// Always within `[0, 1]`.
    pub score: f64,
    pub method: SimilarityMethod,
}

impl SimilarityOutcome {
    /// Clamps `score` into `[0, 1]` (negative cosine means count as no similarity).
    pub fn new(score: f64, method: SimilarityMethod) -> Self {
        let score = if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 1.0)
        };
        Self { score, method }
    }
}
