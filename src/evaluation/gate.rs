//! Combination of the three checks into one verdict. No side effects.

use crate::validation::{ReadinessIssue, StructuralIssue};

/// Inclusive: a score equal to the threshold passes.
#[inline]
pub fn semantic_gate(similarity: f64, threshold: f64) -> bool {
    similarity >= threshold
}

#[inline]
pub fn overall_gate(
    structural_errors: &[StructuralIssue],
    semantic_passed: bool,
    readiness_errors: &[ReadinessIssue],
) -> bool {
    structural_errors.is_empty() && semantic_passed && readiness_errors.is_empty()
}
