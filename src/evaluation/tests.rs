use super::*;
use std::fs;
use std::sync::Arc;

use tempfile::tempdir;

use crate::chunking::Chunker;
use crate::config::EvaluatorConfig;
use crate::embedding::MockEmbedder;
use crate::input::InputError;
use crate::similarity::{SimilarityMethod, SimilarityOutcome, SimilarityScorer};
use crate::telemetry::{ObservedEvent, RecordingObserver, Stage, TracingObserver};
use crate::validation::{ReadinessIssue, StructuralIssue};

const SENTENCES: [&str; 10] = [
    "The survey team walked the northern ridge at first light each morning",
    "Soil samples were collected from every marked plot along the trail",
    "Rainfall during the season was lower than the long term average",
    "Several nesting sites were recorded near the eastern stream bank",
    "Volunteers helped catalogue the plant species found in the meadow",
    "Most of the oak trees showed healthy growth and little damage",
    "The wetland area had expanded slightly since the previous visit",
    "Local farmers reported fewer grazing conflicts than in earlier years",
    "Access roads remained passable despite the occasional heavy storm",
    "The final report will guide planning for the next field season",
];

/// About 300 words under proper headings; passes every structural and readiness rule.
fn survey_report() -> String {
    let body = format!("{}.", SENTENCES.join(". "));
    format!(
        "# Field Survey Report\n\n## Methods\n\n{body}\n\n## Observations\n\n{body}\n\n## Outlook\n\n{body}\n"
    )
}

/// Digits only, nothing in common with [`survey_report`].
fn unrelated_text() -> String {
    (0..300)
        .map(|i| format!("{:04}", (i * 7919) % 10000))
        .collect::<Vec<_>>()
        .join(" ")
}

fn lexical_evaluator(threshold: f64) -> DataQualityEvaluator {
    let config = EvaluatorConfig::default().with_threshold(threshold);
    DataQualityEvaluator::new(config, Arc::new(TracingObserver)).expect("valid config")
}

fn result_with(
    structural: Vec<StructuralIssue>,
    score: f64,
    readiness: Vec<ReadinessIssue>,
) -> EvaluationResult {
    EvaluationResult::new(
        "a.pdf",
        "a.md",
        structural,
        SimilarityOutcome::new(score, SimilarityMethod::Lexical),
        0.7,
        readiness,
    )
}

mod gate_tests {
    use super::*;

    #[test]
    fn test_semantic_gate_is_inclusive() {
        assert!(semantic_gate(0.7, 0.7));
        assert!(!semantic_gate(0.699_999, 0.7));
        assert!(semantic_gate(1.0, 1.0));
        assert!(semantic_gate(0.0, 0.0));
    }

    #[test]
    fn test_raising_threshold_never_turns_fail_into_pass() {
        for score in [0.0, 0.25, 0.5, 0.7, 0.9, 1.0] {
            let mut previously_passed = true;
            for step in 0..=20 {
                let threshold = f64::from(step) / 20.0;
                let passed = semantic_gate(score, threshold);
                assert!(previously_passed || !passed, "score {score} threshold {threshold}");
                previously_passed = passed;
            }
        }
    }

    #[test]
    fn test_overall_requires_every_stage() {
        for structural_ok in [true, false] {
            for semantic_ok in [true, false] {
                for readiness_ok in [true, false] {
                    let structural = if structural_ok {
                        vec![]
                    } else {
                        vec![StructuralIssue::NoHeadings]
                    };
                    let readiness = if readiness_ok {
                        vec![]
                    } else {
                        vec![ReadinessIssue::TooShort]
                    };
                    let score = if semantic_ok { 0.9 } else { 0.1 };

                    let result = result_with(structural, score, readiness);
                    assert_eq!(result.semantic_passed(), semantic_ok);
                    assert_eq!(
                        result.overall_passed(),
                        structural_ok && semantic_ok && readiness_ok
                    );
                }
            }
        }
    }
}

mod result_tests {
    use super::*;

    #[test]
    fn test_serialised_shape() {
        let result = result_with(
            vec![StructuralIssue::UnclosedCodeBlock],
            0.5,
            vec![ReadinessIssue::LowWordCount { count: 12 }],
        );

        let json = serde_json::to_value(&result).expect("serialise");
        let object = json.as_object().expect("object");
        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                "md_path",
                "overall_passed",
                "pdf_path",
                "readiness_errors",
                "semantic_passed",
                "semantic_similarity",
                "structural_errors",
            ]
        );
        assert_eq!(json["structural_errors"][0], "Unclosed code blocks detected");
        assert_eq!(
            json["readiness_errors"][0],
            "Very low word count (12) - insufficient content"
        );
        assert_eq!(json["semantic_similarity"], 0.5);
        assert_eq!(json["overall_passed"], false);
    }

    #[test]
    fn test_similarity_is_clamped_into_result() {
        let result = result_with(vec![], -0.2, vec![]);
        assert_eq!(result.semantic_similarity(), 0.0);
        assert!(!result.semantic_passed());
    }
}

mod evaluator_tests {
    use super::*;

    #[test]
    fn test_empty_converted_text() {
        let result = lexical_evaluator(0.7).evaluate_texts("s", "c", &survey_report(), "");

        assert!(result.structural_errors().contains(&StructuralIssue::NoHeadings));
        assert!(!result.structural_errors().contains(&StructuralIssue::UnclosedCodeBlock));
        assert!(result.readiness_errors().contains(&ReadinessIssue::TooShort));
        assert!(!result.overall_passed());
    }

    #[test]
    fn test_identical_texts_pass_semantic_gate_at_any_threshold() {
        let doc = survey_report();
        for threshold in [0.0, 0.7, 1.0] {
            let result = lexical_evaluator(threshold).evaluate_texts("s", "c", &doc, &doc);
            assert_eq!(result.semantic_similarity(), 1.0);
            assert!(result.semantic_passed());
            assert_eq!(result.similarity_method(), SimilarityMethod::Lexical);
        }
    }

    #[test]
    fn test_gates_are_independent() {
        let result =
            lexical_evaluator(0.7).evaluate_texts("s", "c", &unrelated_text(), &survey_report());

        assert!(result.structural_errors().is_empty());
        assert!(result.readiness_errors().is_empty());
        assert!(result.semantic_similarity() < 0.7);
        assert!(!result.semantic_passed());
        assert!(!result.overall_passed());
    }

    #[test]
    fn test_observer_sees_every_stage_in_order() {
        let observer = Arc::new(RecordingObserver::new());
        let evaluator =
            DataQualityEvaluator::new(EvaluatorConfig::default(), observer.clone()).expect("valid");

        evaluator.evaluate_texts("s", "c", "source", "no heading []()");

        assert_eq!(
            observer.events(),
            vec![
                ObservedEvent::Started(Stage::Structural),
                ObservedEvent::Finished(Stage::Structural, 2),
                ObservedEvent::Started(Stage::Similarity),
                ObservedEvent::Finished(Stage::Similarity, 0),
                ObservedEvent::Started(Stage::Readiness),
                ObservedEvent::Finished(Stage::Readiness, 3),
                ObservedEvent::Started(Stage::Aggregate),
                ObservedEvent::Finished(Stage::Aggregate, 0),
            ]
        );
    }

    #[test]
    fn test_broken_embedder_still_produces_result() {
        let observer = Arc::new(RecordingObserver::new());
        let scorer = SimilarityScorer::with_embedder(
            Box::new(MockEmbedder::failing("device lost")),
            Chunker::default(),
            observer.clone(),
        );
        let evaluator =
            DataQualityEvaluator::with_scorer(EvaluatorConfig::default(), scorer, observer.clone())
                .expect("valid");
        assert_eq!(evaluator.similarity_method(), SimilarityMethod::Embedding);

        let doc = survey_report();
        let result = evaluator.evaluate_texts("s", "c", &doc, &doc);

        assert_eq!(result.similarity_method(), SimilarityMethod::Lexical);
        assert!(result.overall_passed());
        assert_eq!(observer.degradations().len(), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EvaluatorConfig::default().with_threshold(1.5);
        let err = DataQualityEvaluator::new(config, Arc::new(TracingObserver)).unwrap_err();
        assert!(matches!(err, EvaluationError::Config(_)));
    }

    #[test]
    fn test_evaluate_reads_files() {
        let dir = tempdir().expect("tempdir");
        let source = dir.path().join("report.txt");
        let converted = dir.path().join("report.md");
        fs::write(&source, survey_report()).expect("write");
        fs::write(&converted, survey_report()).expect("write");

        let result = lexical_evaluator(0.7)
            .evaluate(&source, &converted)
            .expect("evaluates");

        assert!(result.overall_passed());
        assert_eq!(result.pdf_path(), source.display().to_string());
        assert_eq!(result.md_path(), converted.display().to_string());
        assert_eq!(result.threshold(), 0.7);
    }

    #[test]
    fn test_unreadable_inputs_are_fatal() {
        let dir = tempdir().expect("tempdir");
        let converted = dir.path().join("report.md");
        fs::write(&converted, survey_report()).expect("write");

        let err = lexical_evaluator(0.7)
            .evaluate(&dir.path().join("missing.pdf"), &converted)
            .unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::Source(InputError::NotFound { .. })
        ));

        let source = dir.path().join("blank.txt");
        fs::write(&source, "   ").expect("write");
        let err = lexical_evaluator(0.7)
            .evaluate(&source, &converted)
            .unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::Source(InputError::NoExtractableText { .. })
        ));
    }
}
