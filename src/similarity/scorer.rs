use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::chunking::Chunker;
use crate::config::EvaluatorConfig;
use crate::embedding::{Embedder, EncoderConfig, SentenceEncoder};
use crate::telemetry::EvaluationObserver;

use super::{
    EmbeddingSimilarity, LexicalSimilarity, SimilarityMethod, SimilarityOutcome, TextSimilarity,
};

/// Chooses between embedding and lexical similarity.
///
/// The embedding backend is loaded once at construction. Scoring never fails: if the
/// embedding path is missing or errors on a call, that call is scored lexically and the
/// degradation is reported to the observer.
pub struct SimilarityScorer {
    embedding: Option<EmbeddingSimilarity>,
    lexical: LexicalSimilarity,
    observer: Arc<dyn EvaluationObserver>,
}

impl std::fmt::Debug for SimilarityScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityScorer")
            .field("embedding", &self.embedding)
            .field("preferred", &self.preferred_method())
            .finish()
    }
}

impl SimilarityScorer {
    /// Loads the configured embedding model; falls back to lexical-only when absent or broken.
    pub fn from_config(config: &EvaluatorConfig, observer: Arc<dyn EvaluationObserver>) -> Self {
        let Some(model_path) = &config.model_path else {
            info!("No embedding model configured, using lexical similarity");
            return Self::lexical_only(observer);
        };

        let encoder_config =
            EncoderConfig::new(model_path.clone()).with_max_seq_len(config.max_seq_len);

        match SentenceEncoder::load(encoder_config) {
            Ok(encoder) => {
                info!(model_dir = %model_path.display(), "Embedding similarity enabled");
                Self::with_embedder(Box::new(encoder), Chunker::new(config.chunk_size), observer)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    model_dir = %model_path.display(),
                    "Failed to load embedding model, using lexical similarity"
                );
                Self::lexical_only(observer)
            }
        }
    }

    /// Scorer that never attempts the embedding path.
    pub fn lexical_only(observer: Arc<dyn EvaluationObserver>) -> Self {
        Self {
            embedding: None,
            lexical: LexicalSimilarity::new(),
            observer,
        }
    }

    /// Scorer that prefers the given embedder.
    pub fn with_embedder(
        embedder: Box<dyn Embedder>,
        chunker: Chunker,
        observer: Arc<dyn EvaluationObserver>,
    ) -> Self {
        Self {
            embedding: Some(EmbeddingSimilarity::new(embedder, chunker)),
            lexical: LexicalSimilarity::new(),
            observer,
        }
    }

    /// Method tried first.
    pub fn preferred_method(&self) -> SimilarityMethod {
        if self.embedding.is_some() {
            SimilarityMethod::Embedding
        } else {
            SimilarityMethod::Lexical
        }
    }

    /// Scores `converted` against `source`; the result is always within `[0, 1]`.
    pub fn score(&self, source: &str, converted: &str) -> SimilarityOutcome {
        if let Some(embedding) = &self.embedding {
            match embedding.score(source, converted) {
                Ok(score) => {
                    return SimilarityOutcome::new(score, SimilarityMethod::Embedding);
                }
                Err(e) => {
                    self.observer.similarity_degraded(&e.to_string());
                }
            }
        }

        let score = self.lexical.ratio(source, converted);
        debug!(score, "Computed lexical similarity");
        SimilarityOutcome::new(score, SimilarityMethod::Lexical)
    }
}
