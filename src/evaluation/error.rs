use thiserror::Error;

use crate::config::ConfigError;
use crate::input::InputError;

/// Fatal failures of one evaluation. Rule violations are never errors.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Source document unreadable or without text.
    #[error("source document: {0}")]
    Source(#[source] InputError),

    /// Converted text unreadable or undecodable.
    #[error("converted text: {0}")]
    Converted(#[source] InputError),
}
