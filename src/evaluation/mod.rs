//! The evaluation pipeline and its verdict.

mod error;
mod evaluator;
mod gate;
mod result;

#[cfg(test)]
mod tests;

pub use error::EvaluationError;
pub use evaluator::DataQualityEvaluator;
pub use gate::{overall_gate, semantic_gate};
pub use result::EvaluationResult;
