//! Batch readiness checks over a folder of converted markup files.
//!
//! By default every file gets a standalone readiness scorecard. With `--pairwise` each file is
//! paired with its source document (same stem, `.pdf` then `.txt`) and run through the full
//! quality gate instead. Documents are processed sequentially in path order.
//!
//! ```bash
//! md-readiness ./corpus --recursive --output report.json
//! md-readiness ./converted --pairwise --source-dir ./pdfs --threshold 0.8
//! ```

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde_json::{Value, json};
use tracing::{Level, info, warn};

use datum_guardian::{
    DataQualityEvaluator, EvaluatorConfig, Scorecard, TracingObserver, find_markup_files,
    find_source_for, init_tracing,
};

const NO_MARKUP_FILES: &str = "no markup files found";
const SEPARATOR_WIDTH: usize = 80;

/// Score markdown files for LLM corpus readiness
#[derive(Parser, Debug)]
#[command(name = "md-readiness")]
#[command(version, about, long_about = None)]
struct Args {
    /// Markdown file or directory of markdown files
    input: PathBuf,

    /// Write all reports to this JSON file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Walk subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Evaluate each file against its source document instead of scoring it alone
    #[arg(long)]
    pairwise: bool,

    /// Directory holding the source documents [default: next to each markdown file]
    #[arg(long)]
    source_dir: Option<PathBuf>,

    /// Minimum semantic similarity in pairwise mode [default: 0.7]
    #[arg(long)]
    threshold: Option<f64>,

    /// Characters per similarity chunk in pairwise mode [default: 512]
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Sentence embedding model directory for pairwise mode
    #[arg(long, env = "DATUM_MODEL_PATH")]
    model: Option<PathBuf>,

    /// Emit log lines as JSON
    #[arg(long)]
    log_json: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    init_tracing(args.log_json, level);

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            print_error(format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<ExitCode> {
    let files = match find_markup_files(&args.input, args.recursive) {
        Ok(files) => files,
        Err(e) => {
            print_error(e);
            return Ok(ExitCode::FAILURE);
        }
    };
    if files.is_empty() {
        print_error(NO_MARKUP_FILES);
        return Ok(ExitCode::FAILURE);
    }

    info!(
        input = %args.input.display(),
        files = files.len(),
        pairwise = args.pairwise,
        "Processing markup files"
    );

    let (reports, all_passed) = if args.pairwise {
        evaluate_pairs(args, &files)?
    } else {
        (score_files(&files)?, true)
    };

    match &args.output {
        Some(output) => {
            fs::write(output, serde_json::to_string_pretty(&reports)?)
                .with_context(|| format!("failed to write {}", output.display()))?;
            info!(output = %output.display(), reports = reports.len(), "Report written");
        }
        None => {
            let separator = "-".repeat(SEPARATOR_WIDTH);
            for report in &reports {
                println!("{}", serde_json::to_string_pretty(report)?);
                println!("{separator}");
            }
        }
    }

    Ok(if all_passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn score_files(files: &[PathBuf]) -> anyhow::Result<Vec<Value>> {
    let mut reports = Vec::with_capacity(files.len());
    for file in files {
        match Scorecard::from_file(file) {
            Ok(scorecard) => reports.push(serde_json::to_value(&scorecard)?),
            Err(e) => {
                warn!(file = %file.display(), error = %e, "Skipping unreadable file");
                reports.push(failure(file, e));
            }
        }
    }
    Ok(reports)
}

/// Returns the reports and whether every document passed.
fn evaluate_pairs(args: &Args, files: &[PathBuf]) -> anyhow::Result<(Vec<Value>, bool)> {
    let mut config = EvaluatorConfig::from_env().context("invalid DATUM_* environment")?;
    if let Some(threshold) = args.threshold {
        config = config.with_threshold(threshold);
    }
    if let Some(chunk_size) = args.chunk_size {
        config = config.with_chunk_size(chunk_size);
    }
    if let Some(model) = &args.model {
        config = config.with_model_path(model.clone());
    }

    let evaluator = DataQualityEvaluator::new(config, Arc::new(TracingObserver))?;

    let mut reports = Vec::with_capacity(files.len());
    let mut all_passed = true;
    for file in files {
        let Some(source) = find_source_for(file, args.source_dir.as_deref()) else {
            warn!(file = %file.display(), "No source document found");
            reports.push(failure(file, "no source document found (.pdf or .txt)"));
            all_passed = false;
            continue;
        };

        match evaluator.evaluate(&source, file) {
            Ok(result) => {
                all_passed &= result.overall_passed();
                reports.push(serde_json::to_value(&result)?);
            }
            Err(e) => {
                warn!(file = %file.display(), error = %e, "Evaluation failed");
                reports.push(failure(file, e));
                all_passed = false;
            }
        }
    }

    Ok((reports, all_passed))
}

fn failure(file: &Path, error: impl Display) -> Value {
    json!({
        "file": file.display().to_string(),
        "error": error.to_string(),
    })
}

fn print_error(message: impl Display) {
    println!("{}", json!({ "error": message.to_string() }));
}
