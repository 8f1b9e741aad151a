use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::config::EvaluatorConfig;
use crate::input::{read_converted, read_source};
use crate::similarity::{SimilarityMethod, SimilarityScorer};
use crate::telemetry::{EvaluationObserver, Stage};
use crate::validation::{ReadinessValidator, StructuralValidator};

use super::{EvaluationError, EvaluationResult};

/// Runs the linear pipeline: extract, structural, similarity, readiness, aggregate.
///
/// Configuration and the similarity backend are fixed at construction and shared by every
/// evaluation this instance performs.
pub struct DataQualityEvaluator {
    config: EvaluatorConfig,
    scorer: SimilarityScorer,
    observer: Arc<dyn EvaluationObserver>,
}

impl std::fmt::Debug for DataQualityEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataQualityEvaluator")
            .field("config", &self.config)
            .field("scorer", &self.scorer)
            .finish()
    }
}

impl DataQualityEvaluator {
    /// Validates `config` and loads the embedding backend once.
    pub fn new(
        config: EvaluatorConfig,
        observer: Arc<dyn EvaluationObserver>,
    ) -> Result<Self, EvaluationError> {
        config.validate()?;
        let scorer = SimilarityScorer::from_config(&config, observer.clone());

        info!(
            threshold = config.similarity_threshold,
            chunk_size = config.chunk_size,
            method = %scorer.preferred_method(),
            "Evaluator ready"
        );

        Ok(Self {
            config,
            scorer,
            observer,
        })
    }

    /// Uses a prepared scorer instead of probing.
    pub fn with_scorer(
        config: EvaluatorConfig,
        scorer: SimilarityScorer,
        observer: Arc<dyn EvaluationObserver>,
    ) -> Result<Self, EvaluationError> {
        config.validate()?;
        Ok(Self {
            config,
            scorer,
            observer,
        })
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    pub fn similarity_method(&self) -> SimilarityMethod {
        self.scorer.preferred_method()
    }

    /// Reads both files and evaluates them.
    ///
    /// Only unreadable inputs are errors; every check outcome is part of the result.
    #[instrument(skip(self, source_path, converted_path), fields(source = %source_path.display(), converted = %converted_path.display()))]
    pub fn evaluate(
        &self,
        source_path: &Path,
        converted_path: &Path,
    ) -> Result<EvaluationResult, EvaluationError> {
        self.observer.stage_started(Stage::Extract);
        let source_text = read_source(source_path).map_err(EvaluationError::Source)?;
        let converted_text = read_converted(converted_path).map_err(EvaluationError::Converted)?;
        self.observer.stage_finished(Stage::Extract, 0);

        Ok(self.evaluate_texts(
            source_path.display().to_string(),
            converted_path.display().to_string(),
            &source_text,
            &converted_text,
        ))
    }

    /// Evaluates already-loaded texts. Never fails.
    pub fn evaluate_texts(
        &self,
        source_id: impl Into<String>,
        converted_id: impl Into<String>,
        source_text: &str,
        converted_text: &str,
    ) -> EvaluationResult {
        self.observer.stage_started(Stage::Structural);
        let structural_errors = StructuralValidator::check(converted_text);
        self.observer
            .stage_finished(Stage::Structural, structural_errors.len());

        self.observer.stage_started(Stage::Similarity);
        let similarity = self.scorer.score(source_text, converted_text);
        self.observer.stage_finished(Stage::Similarity, 0);

        self.observer.stage_started(Stage::Readiness);
        let readiness_errors = ReadinessValidator::check(converted_text);
        self.observer
            .stage_finished(Stage::Readiness, readiness_errors.len());

        self.observer.stage_started(Stage::Aggregate);
        let result = EvaluationResult::new(
            source_id,
            converted_id,
            structural_errors,
            similarity,
            self.config.similarity_threshold,
            readiness_errors,
        );
        self.observer.stage_finished(Stage::Aggregate, 0);

        info!(
            similarity = result.semantic_similarity(),
            method = %result.similarity_method(),
            structural_errors = result.structural_errors().len(),
            readiness_errors = result.readiness_errors().len(),
            passed = result.overall_passed(),
            "Evaluation complete"
        );

        result
    }
}
