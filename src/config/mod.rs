//! Environment-backed evaluator configuration.
//!
//! Every setting has a default. Override with `DATUM_*` environment variables, then with
//! command-line flags (see the `with_*` builders).

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

use crate::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_SEQ_LEN, DEFAULT_SIMILARITY_THRESHOLD};

/// Immutable settings for one evaluator instance.
///
/// Use [`EvaluatorConfig::from_env`] to read `DATUM_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatorConfig {
    /// Minimum semantic similarity (inclusive). Default: `0.7`.
    pub similarity_threshold: f64,

    /// Character budget per similarity chunk. Default: `512`.
    pub chunk_size: usize,

    /// Sentence embedding model directory. `None` means lexical similarity only.
    pub model_path: Option<PathBuf>,

    /// Token limit per chunk for the sentence encoder. Default: `256`.
    pub max_seq_len: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            chunk_size: DEFAULT_CHUNK_SIZE,
            model_path: None,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
        }
    }
}

impl EvaluatorConfig {
    const ENV_THRESHOLD: &'static str = "DATUM_SIMILARITY_THRESHOLD";
    const ENV_CHUNK_SIZE: &'static str = "DATUM_CHUNK_SIZE";
    const ENV_MODEL_PATH: &'static str = "DATUM_MODEL_PATH";
    const ENV_MAX_SEQ_LEN: &'static str = "DATUM_MAX_SEQ_LEN";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let similarity_threshold =
            Self::parse_threshold_from_env(defaults.similarity_threshold)?;
        let chunk_size = Self::parse_chunk_size_from_env(defaults.chunk_size)?;
        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);
        let max_seq_len = Self::parse_usize_from_env(Self::ENV_MAX_SEQ_LEN, defaults.max_seq_len);

        Ok(Self {
            similarity_threshold,
            chunk_size,
            model_path,
            max_seq_len,
        })
    }

    /// Overrides the similarity threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Overrides the chunk size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Sets the embedding model directory.
    pub fn with_model_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.model_path = Some(path.into());
        self
    }

    /// Validates ranges and paths (does not load anything).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::ThresholdOutOfRange {
                value: self.similarity_threshold,
            });
        }

        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }

        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    fn parse_threshold_from_env(default: f64) -> Result<f64, ConfigError> {
        match env::var(Self::ENV_THRESHOLD) {
            Ok(value) => {
                value
                    .trim()
                    .parse()
                    .map_err(|e| ConfigError::ThresholdParseError {
                        value: value.clone(),
                        source: e,
                    })
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_chunk_size_from_env(default: usize) -> Result<usize, ConfigError> {
        match env::var(Self::ENV_CHUNK_SIZE) {
            Ok(value) => {
                value
                    .trim()
                    .parse()
                    .map_err(|e| ConfigError::ChunkSizeParseError {
                        value: value.clone(),
                        source: e,
                    })
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_usize_from_env(var_name: &str, default: usize) -> usize {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}
