//! Single-pair quality gate.
//!
//! Evaluates one converted markup file against its source document and exits 0 only when the
//! structural, semantic and readiness checks all pass.
//!
//! ```bash
//! datum-guardian --pdf paper.pdf --md paper.md
//! datum-guardian --pdf paper.pdf --md paper.md --threshold 0.8 --model ./all-MiniLM-L6-v2
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::Level;

use datum_guardian::{
    ConsoleReport, DataQualityEvaluator, Diagnostics, EvaluatorConfig, TracingObserver,
    init_tracing, read_converted,
};

/// Evaluate the quality of a document-to-markdown conversion
#[derive(Parser, Debug)]
#[command(name = "datum-guardian")]
#[command(version, about, long_about = None)]
struct Args {
    /// Source document (PDF, or already extracted plain text)
    #[arg(long)]
    pdf: PathBuf,

    /// Converted markdown file
    #[arg(long)]
    md: PathBuf,

    /// Minimum semantic similarity, inclusive [default: 0.7]
    #[arg(long)]
    threshold: Option<f64>,

    /// Characters per similarity chunk [default: 512]
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Sentence embedding model directory; lexical similarity is used without one
    #[arg(long, env = "DATUM_MODEL_PATH")]
    model: Option<PathBuf>,

    /// Print the result as JSON instead of the report
    #[arg(long)]
    json: bool,

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
            println!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<ExitCode> {
    if !args.pdf.exists() {
        println!("Error: PDF file not found: {}", args.pdf.display());
        return Ok(ExitCode::FAILURE);
    }
    if !args.md.exists() {
        println!("Error: Markdown file not found: {}", args.md.display());
        return Ok(ExitCode::FAILURE);
    }

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
    let result = evaluator.evaluate(&args.pdf, &args.md)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", ConsoleReport::new(&result));
        if !result.overall_passed() {
            let converted = read_converted(&args.md)?;
            print!("{}", Diagnostics::collect(&result, &converted));
        }
    }

    Ok(if result.overall_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
