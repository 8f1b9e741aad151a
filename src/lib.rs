//! Datum Guardian library crate (used by both binaries and the integration tests).
//!
//! Checks that a converted markup file is a faithful, well-formed and ingestion-ready rendition
//! of its source document.
//!
//! # Public API Surface
//!
//! ## Pipeline
//! - [`DataQualityEvaluator`] - Extract, structural, similarity, readiness, aggregate
//! - [`EvaluationResult`] - Verdict of one evaluation, serialisable as JSON
//! - [`EvaluatorConfig`], [`ConfigError`] - Threshold, chunk size, embedding model
//!
//! ## Checks
//! - [`StructuralValidator`], [`ReadinessValidator`] - Pure rule checks over text
//! - [`SimilarityScorer`] - Embedding similarity with lexical fallback
//! - [`Chunker`] - Sentence chunking for similarity
//!
//! ## Reporting
//! - [`ConsoleReport`], [`Diagnostics`] - Human-readable verdict and line evidence
//! - [`Scorecard`] - Standalone 0-100 readiness score for pretraining corpora
//!
//! ## Test/Mock Support
//! [`MockEmbedder`] and [`RecordingObserver`] are available behind
//! `#[cfg(any(test, feature = "mock"))]`.

pub mod chunking;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod evaluation;
pub mod input;
pub mod report;
pub mod scorecard;
pub mod similarity;
pub mod telemetry;
pub mod validation;

pub use chunking::{Chunk, ChunkOrigin, Chunker};
pub use config::{ConfigError, EvaluatorConfig};
pub use embedding::{Embedder, EmbeddingError, EncoderConfig, SentenceEncoder};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
pub use evaluation::{DataQualityEvaluator, EvaluationError, EvaluationResult};
pub use input::{InputError, find_markup_files, find_source_for, read_converted, read_source};
pub use report::{ConsoleReport, Diagnostics};
pub use scorecard::{Grade, Scorecard, ScorecardIssue};
pub use similarity::{
    LexicalSimilarity, SimilarityError, SimilarityMethod, SimilarityOutcome, SimilarityScorer,
    TextSimilarity,
};
pub use telemetry::{EvaluationObserver, Stage, TracingObserver, init_tracing};
#[cfg(any(test, feature = "mock"))]
pub use telemetry::{ObservedEvent, RecordingObserver};
pub use validation::{ReadinessIssue, ReadinessValidator, StructuralIssue, StructuralValidator};
