//! Chunked embedding similarity with best-match aggregation.

use tracing::debug;

use crate::chunking::{Chunk, ChunkOrigin, Chunker};
use crate::embedding::{Embedder, EmbeddingError};

use super::{SimilarityError, SimilarityMethod, TextSimilarity};

/// Pairwise cosine similarities, one row per source chunk, one column per converted chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    rows: Vec<Vec<f32>>,
}

impl SimilarityMatrix {
    pub fn compute(source: &[Vec<f32>], converted: &[Vec<f32>]) -> Self {
        let rows = source
            .iter()
            .map(|s| converted.iter().map(|c| cosine_similarity(s, c)).collect())
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    /// Best match per source chunk.
    pub fn row_maxima(&self) -> Vec<f32> {
        self.rows
            .iter()
            .map(|row| row.iter().copied().fold(f32::NEG_INFINITY, f32::max))
            .collect()
    }

    /// Mean of [`row_maxima`](Self::row_maxima); `0.0` for an empty matrix.
    pub fn best_match_mean(&self) -> f64 {
        let maxima = self.row_maxima();
        if maxima.is_empty() {
            return 0.0;
        }
        maxima.iter().map(|&m| f64::from(m)).sum::<f64>() / maxima.len() as f64
    }
}

/// Semantic similarity over chunk embeddings.
///
/// A source chunk may be preserved anywhere in the converted text, so each source chunk is
/// matched against its best converted chunk and the maxima are averaged. Missing content drags
/// the mean down; reordered content does not.
pub struct EmbeddingSimilarity {
    embedder: Box<dyn Embedder>,
    chunker: Chunker,
}

impl std::fmt::Debug for EmbeddingSimilarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingSimilarity")
            .field("embedder", &self.embedder.name())
            .field("chunk_size", &self.chunker.chunk_size())
            .finish()
    }
}

impl EmbeddingSimilarity {
    pub fn new(embedder: Box<dyn Embedder>, chunker: Chunker) -> Self {
        Self { embedder, chunker }
    }

    pub fn embedder_name(&self) -> &str {
        self.embedder.name()
    }

    fn embed_chunks(&self, chunks: &[Chunk]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts)?;

        if embeddings.len() != texts.len() {
            return Err(EmbeddingError::BatchSizeMismatch {
                expected: texts.len(),
                actual: embeddings.len(),
            });
        }

        Ok(embeddings)
    }
}

impl TextSimilarity for EmbeddingSimilarity {
    fn method(&self) -> SimilarityMethod {
        SimilarityMethod::Embedding
    }

    fn score(&self, text1: &str, text2: &str) -> Result<f64, SimilarityError> {
        let source = self.chunker.chunk_tagged(text1, ChunkOrigin::Source);
        let converted = self.chunker.chunk_tagged(text2, ChunkOrigin::Converted);

        if source.is_empty() || converted.is_empty() {
            debug!(
                source_chunks = source.len(),
                converted_chunks = converted.len(),
                "No comparable chunks, similarity is zero"
            );
            return Ok(0.0);
        }

        let source_embeddings = self.embed_chunks(&source)?;
        let converted_embeddings = self.embed_chunks(&converted)?;

        let matrix = SimilarityMatrix::compute(&source_embeddings, &converted_embeddings);
        let score = matrix.best_match_mean();

        debug!(
            source_chunks = source.len(),
            converted_chunks = converted.len(),
            score,
            "Computed embedding similarity"
        );

        if !score.is_finite() {
            return Err(SimilarityError::NonFinite);
        }

        Ok(score)
    }
}

/// Cosine similarity; `0.0` for mismatched lengths, empty or zero vectors.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) = a
        .iter()
        .zip(b.iter())
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
            (dot + av * bv, na + av * av, nb + bv * bv)
        });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
