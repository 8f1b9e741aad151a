//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Threshold is outside `[0, 1]`.
    #[error("invalid similarity threshold {value}: must be between 0.0 and 1.0")]
    ThresholdOutOfRange { value: f64 },

    /// Threshold string could not be parsed as a float.
    #[error("failed to parse similarity threshold '{value}': {source}")]
    ThresholdParseError {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// Chunk size string could not be parsed as an integer.
    #[error("failed to parse chunk size '{value}': {source}")]
    ChunkSizeParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a directory (model paths are directories).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
