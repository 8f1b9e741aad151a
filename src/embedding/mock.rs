use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Embedder, EmbeddingError};

enum MockBehavior {
    Constant(Vec<f32>),
    Fail(String),
    Truncate,
}

/// Scriptable [`Embedder`] for exercising the embedding path and its fallback.
pub struct MockEmbedder {
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockEmbedder {
    /// Returns the same vector for every input (all cosine similarities are 1.0).
    pub fn constant(vector: Vec<f32>) -> Self {
        Self::with_behavior(MockBehavior::Constant(vector))
    }

    /// Fails every call with [`EmbeddingError::InferenceFailed`].
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::Fail(reason.into()))
    }

    /// Returns one embedding fewer than requested.
    pub fn truncating() -> Self {
        Self::with_behavior(MockBehavior::Truncate)
    }

    fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `embed_batch` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Embedder for MockEmbedder {
    fn name(&self) -> &str {
        "mock"
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Constant(vector) => Ok(vec![vector.clone(); texts.len()]),
            MockBehavior::Fail(reason) => Err(EmbeddingError::InferenceFailed {
                reason: reason.clone(),
            }),
            MockBehavior::Truncate => Ok(vec![vec![1.0]; texts.len().saturating_sub(1)]),
        }
    }
}
