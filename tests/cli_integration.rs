//! Exit codes and stdout of both binaries.

mod common;

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use common::fixtures::{harbour_report, write};
use serde_json::{Value, json};
use tempfile::tempdir;

fn run(bin: &str, args: &[&Path]) -> Output {
    Command::new(bin)
        .args(args)
        .env_remove("DATUM_MODEL_PATH")
        .env_remove("DATUM_SIMILARITY_THRESHOLD")
        .env_remove("DATUM_CHUNK_SIZE")
        .env_remove("DATUM_MAX_SEQ_LEN")
        .env_remove("RUST_LOG")
        .output()
        .expect("binary runs")
}

fn batch(args: &[&Path]) -> Output {
    run(env!("CARGO_BIN_EXE_md-readiness"), args)
}

fn single(args: &[&Path]) -> Output {
    run(env!("CARGO_BIN_EXE_datum-guardian"), args)
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is one JSON value")
}

mod batch_tests {
    use super::*;

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = tempdir().expect("tempdir");
        write(dir.path(), "notes.txt", "not markup");

        let output = batch(&[dir.path()]);

        assert_eq!(output.status.code(), Some(1));
        assert_eq!(stdout_json(&output), json!({ "error": "no markup files found" }));
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let output = batch(&[&dir.path().join("missing")]);

        assert_eq!(output.status.code(), Some(1));
        let error = stdout_json(&output)["error"].as_str().expect("error string").to_string();
        assert!(error.starts_with("file not found"), "{error}");
    }

    #[test]
    fn test_non_markup_file_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let pdf = write(dir.path(), "paper.pdf", "%PDF-1.4");

        let output = batch(&[&pdf]);

        assert_eq!(output.status.code(), Some(1));
        let error = stdout_json(&output)["error"].as_str().expect("error string").to_string();
        assert!(error.starts_with("not a markdown file"), "{error}");
    }

    #[test]
    fn test_scoring_mode_exits_zero_and_writes_array() {
        let dir = tempdir().expect("tempdir");
        write(dir.path(), "docs/review.md", harbour_report());
        write(dir.path(), "docs/stub.md", "tiny");
        let report = dir.path().join("report.json");

        let output = batch(&[&dir.path().join("docs"), Path::new("--output"), &report]);

        assert_eq!(output.status.code(), Some(0));
        let reports: Value =
            serde_json::from_str(&fs::read_to_string(&report).expect("report written"))
                .expect("valid JSON");
        let reports = reports.as_array().expect("array");
        assert_eq!(reports.len(), 2);
        assert!(reports[0]["file"].as_str().expect("file").ends_with("review.md"));
        assert!(reports[0]["readiness_score"].is_f64());
        assert!(reports[1]["grade"].is_string());
    }

    #[test]
    fn test_pairwise_with_orphan_fails() {
        let dir = tempdir().expect("tempdir");
        write(dir.path(), "review.md", harbour_report());
        write(dir.path(), "review.txt", harbour_report());
        write(dir.path(), "orphan.md", harbour_report());
        let report = dir.path().join("out").join("report.json");
        fs::create_dir_all(report.parent().expect("parent")).expect("mkdir");

        let output = batch(&[
            dir.path(),
            Path::new("--pairwise"),
            Path::new("--output"),
            &report,
        ]);

        assert_eq!(output.status.code(), Some(1));
        let reports: Value =
            serde_json::from_str(&fs::read_to_string(&report).expect("report written"))
                .expect("valid JSON");
        let reports = reports.as_array().expect("array");
        assert_eq!(reports.len(), 2);

        assert!(reports[0]["file"].as_str().expect("file").ends_with("orphan.md"));
        assert!(reports[0]["error"].is_string());
        assert_eq!(reports[1]["overall_passed"], true);
        assert_eq!(reports[1]["semantic_similarity"], 1.0);
    }

    #[test]
    fn test_pairwise_all_passing_exits_zero() {
        let dir = tempdir().expect("tempdir");
        let sources = dir.path().join("sources");
        write(dir.path(), "md/review.md", harbour_report());
        write(&sources, "review.txt", harbour_report());

        let output = batch(&[
            &dir.path().join("md"),
            Path::new("--pairwise"),
            Path::new("--source-dir"),
            &sources,
        ]);

        assert_eq!(output.status.code(), Some(0));
        let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
        assert!(stdout.contains("\"overall_passed\": true"));
        assert!(stdout.trim_end().ends_with(&"-".repeat(80)));
    }
}

mod single_pair_tests {
    use super::*;

    #[test]
    fn test_passing_pair_exits_zero() {
        let dir = tempdir().expect("tempdir");
        let source = write(dir.path(), "review.txt", harbour_report());
        let converted = write(dir.path(), "review.md", harbour_report());

        let output = single(&[Path::new("--pdf"), &source, Path::new("--md"), &converted]);

        assert_eq!(output.status.code(), Some(0));
        let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
        assert!(stdout.contains("Overall Status: ✓ PASSED"));
        assert!(!stdout.contains("FAILURE ANALYSIS"));
    }

    #[test]
    fn test_failing_pair_exits_one_with_diagnostics() {
        let dir = tempdir().expect("tempdir");
        let source = write(dir.path(), "review.txt", harbour_report());
        let converted = write(dir.path(), "review.md", "Body text []() only.");

        let output = single(&[Path::new("--pdf"), &source, Path::new("--md"), &converted]);

        assert_eq!(output.status.code(), Some(1));
        let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
        assert!(stdout.contains("Overall Status: ✗ FAILED"));
        assert!(stdout.contains("FAILURE ANALYSIS"));
        assert!(stdout.contains("Line 1: Body text []() only."));
    }

    #[test]
    fn test_json_output() {
        let dir = tempdir().expect("tempdir");
        let source = write(dir.path(), "review.txt", harbour_report());
        let converted = write(dir.path(), "review.md", harbour_report());

        let output = single(&[
            Path::new("--pdf"),
            &source,
            Path::new("--md"),
            &converted,
            Path::new("--json"),
        ]);

        assert_eq!(output.status.code(), Some(0));
        let result = stdout_json(&output);
        assert_eq!(result["overall_passed"], true);
        assert_eq!(result["md_path"], converted.display().to_string());
    }

    #[test]
    fn test_missing_file_exits_one() {
        let dir = tempdir().expect("tempdir");
        let converted = write(dir.path(), "review.md", harbour_report());
        let missing = dir.path().join("missing.pdf");

        let output = single(&[Path::new("--pdf"), &missing, Path::new("--md"), &converted]);

        assert_eq!(output.status.code(), Some(1));
        let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
        assert!(stdout.starts_with("Error: PDF file not found:"), "{stdout}");
    }
}
