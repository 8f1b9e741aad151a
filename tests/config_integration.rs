//! Environment configuration feeding the evaluator.

mod common;

use std::env;
use std::sync::Arc;

use common::fixtures::harbour_report;
use datum_guardian::{
    DataQualityEvaluator, EvaluationError, EvaluatorConfig, SimilarityMethod, TracingObserver,
};
use serial_test::serial;
use tempfile::tempdir;

const ENV_VARS: [&str; 4] = [
    "DATUM_SIMILARITY_THRESHOLD",
    "DATUM_CHUNK_SIZE",
    "DATUM_MODEL_PATH",
    "DATUM_MAX_SEQ_LEN",
];

fn with_env<R>(vars: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
    // SAFETY: Test code only, env tests are serialised.
    unsafe {
        for key in ENV_VARS {
            env::remove_var(key);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }
    }

    let result = f();

    // SAFETY: Test code only, env tests are serialised.
    unsafe {
        for key in ENV_VARS {
            env::remove_var(key);
        }
    }

    result
}

#[test]
#[serial]
fn test_env_threshold_reaches_results() {
    let result = with_env(&[("DATUM_SIMILARITY_THRESHOLD", "0.95")], || {
        let config = EvaluatorConfig::from_env().expect("valid env");
        let evaluator =
            DataQualityEvaluator::new(config, Arc::new(TracingObserver)).expect("valid config");
        let doc = harbour_report();
        evaluator.evaluate_texts("a.pdf", "a.md", &doc, &doc)
    });

    assert_eq!(result.threshold(), 0.95);
    assert!(result.semantic_passed());
}

#[test]
#[serial]
fn test_cli_override_wins_over_env() {
    let config = with_env(&[("DATUM_SIMILARITY_THRESHOLD", "0.95")], || {
        EvaluatorConfig::from_env()
            .expect("valid env")
            .with_threshold(0.5)
    });

    assert_eq!(config.similarity_threshold, 0.5);
}

#[test]
#[serial]
fn test_unloadable_model_falls_back_to_lexical() {
    let dir = tempdir().expect("tempdir");
    let model_dir = dir.path().to_str().expect("utf-8 path").to_string();

    let evaluator = with_env(&[("DATUM_MODEL_PATH", model_dir.as_str())], || {
        let config = EvaluatorConfig::from_env().expect("valid env");
        DataQualityEvaluator::new(config, Arc::new(TracingObserver)).expect("valid config")
    });

    assert_eq!(evaluator.similarity_method(), SimilarityMethod::Lexical);
}

#[test]
#[serial]
fn test_missing_model_directory_is_a_config_error() {
    let err = with_env(&[("DATUM_MODEL_PATH", "/nonexistent/datum/model")], || {
        let config = EvaluatorConfig::from_env().expect("valid env");
        DataQualityEvaluator::new(config, Arc::new(TracingObserver)).unwrap_err()
    });

    assert!(matches!(err, EvaluationError::Config(_)));
}
