use std::fmt;

use crate::evaluation::EvaluationResult;

pub(crate) const HEAVY_RULE: &str =
    "============================================================";
pub(crate) const LIGHT_RULE: &str =
    "------------------------------------------------------------";

fn status(passed: bool) -> &'static str {
    if passed { "✓ PASSED" } else { "✗ FAILED" }
}

/// Human-readable summary of one [`EvaluationResult`].
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReport<'a> {
    result: &'a EvaluationResult,
}

impl<'a> ConsoleReport<'a> {
    pub fn new(result: &'a EvaluationResult) -> Self {
        Self { result }
    }
}

impl fmt::Display for ConsoleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;

        writeln!(f)?;
        writeln!(f, "{HEAVY_RULE}")?;
        writeln!(f, "DATA QUALITY EVALUATION RESULTS")?;
        writeln!(f, "{HEAVY_RULE}")?;
        writeln!(f, "PDF: {}", r.pdf_path())?;
        writeln!(f, "Markdown: {}", r.md_path())?;
        writeln!(f, "Overall Status: {}", status(r.overall_passed()))?;
        writeln!(f, "{LIGHT_RULE}")?;

        writeln!(f, "STRUCTURAL CHECKS: {}", status(r.structural_passed()))?;
        for issue in r.structural_errors() {
            writeln!(f, "  ✗ {issue}")?;
        }

        writeln!(f, "SEMANTIC SIMILARITY: {}", status(r.semantic_passed()))?;
        writeln!(
            f,
            "  Score: {:.3} (threshold: {}, method: {})",
            r.semantic_similarity(),
            r.threshold(),
            r.similarity_method()
        )?;

        writeln!(f, "INGESTION READINESS: {}", status(r.readiness_passed()))?;
        for issue in r.readiness_errors() {
            writeln!(f, "  ✗ {issue}")?;
        }

        writeln!(f, "{HEAVY_RULE}")
    }
}
