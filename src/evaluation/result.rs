use serde::Serialize;

use crate::similarity::{SimilarityMethod, SimilarityOutcome};
use crate::validation::{ReadinessIssue, StructuralIssue};

use super::gate::{overall_gate, semantic_gate};

/// Verdict for one (source, converted) pair.
///
/// Immutable once built; the gate flags are derived in [`EvaluationResult::new`] and cannot
/// disagree with the issue lists. Serialises to
/// `{pdf_path, md_path, structural_errors, semantic_similarity, semantic_passed, readiness_errors, overall_passed}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pdf_path: String,
    md_path: String,
    structural_errors: Vec<StructuralIssue>,
    semantic_similarity: f64,
    semantic_passed: bool,
    readiness_errors: Vec<ReadinessIssue>,
    overall_passed: bool,
    #[serde(skip)]
    similarity_method: SimilarityMethod,
    #[serde(skip)]
    threshold: f64,
}

impl EvaluationResult {
    pub fn new(
        pdf_path: impl Into<String>,
        md_path: impl Into<String>,
        structural_errors: Vec<StructuralIssue>,
        similarity: SimilarityOutcome,
        threshold: f64,
        readiness_errors: Vec<ReadinessIssue>,
    ) -> Self {
        let semantic_passed = semantic_gate(similarity.score, threshold);
        let overall_passed = overall_gate(&structural_errors, semantic_passed, &readiness_errors);

        Self {
            pdf_path: pdf_path.into(),
            md_path: md_path.into(),
            structural_errors,
            semantic_similarity: similarity.score,
            semantic_passed,
            readiness_errors,
            overall_passed,
            similarity_method: similarity.method,
            threshold,
        }
    }

    pub fn pdf_path(&self) -> &str {
        &self.pdf_path
    }

    pub fn md_path(&self) -> &str {
        &self.md_path
    }

    pub fn structural_errors(&self) -> &[StructuralIssue] {
        &self.structural_errors
    }

    /// Within `[0, 1]`.
    pub fn semantic_similarity(&self) -> f64 {
        self.semantic_similarity
    }

    pub fn semantic_passed(&self) -> bool {
        self.semantic_passed
    }

    pub fn readiness_errors(&self) -> &[ReadinessIssue] {
        &self.readiness_errors
    }

    pub fn overall_passed(&self) -> bool {
        self.overall_passed
    }

    /// Method that produced [`semantic_similarity`](Self::semantic_similarity).
    pub fn similarity_method(&self) -> SimilarityMethod {
        self.similarity_method
    }

    /// Threshold the semantic gate was evaluated against.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn structural_passed(&self) -> bool {
        self.structural_errors.is_empty()
    }

    pub fn readiness_passed(&self) -> bool {
        self.readiness_errors.is_empty()
    }
}
