//! Line-level evidence for each reported issue.
//!
//! Presentational only: collecting diagnostics never changes a verdict.

use std::fmt;

use crate::evaluation::EvaluationResult;
use crate::validation::{ReadinessIssue, StructuralIssue};

use super::console::LIGHT_RULE;

/// Where in the converted text an issue shows up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evidence {
    /// Offending lines as `(1-based line number, line content)`.
    Lines(Vec<(usize, String)>),
    /// Line numbers of every fence marker.
    FenceMarkers(Vec<usize>),
    /// The rule applies to the document as a whole.
    None,
}

/// One issue message plus its evidence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDiagnostic {
    pub message: String,
    pub evidence: Evidence,
}

/// The semantic stage's score against its threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SemanticVerdict {
    pub score: f64,
    pub threshold: f64,
    pub passed: bool,
}

/// Failure analysis for one evaluation. Renders as the `FAILURE ANALYSIS` block.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics {
    structural: Vec<IssueDiagnostic>,
    semantic: SemanticVerdict,
    readiness: Vec<IssueDiagnostic>,
}

impl Diagnostics {
    /// Re-scans `converted_text` line by line for each issue in `result`.
    pub fn collect(result: &EvaluationResult, converted_text: &str) -> Self {
        let lines: Vec<&str> = converted_text.split('\n').collect();

        let structural = result
            .structural_errors()
            .iter()
            .map(|issue| IssueDiagnostic {
                message: issue.to_string(),
                evidence: structural_evidence(issue, &lines),
            })
            .collect();

        let readiness = result
            .readiness_errors()
            .iter()
            .map(|issue| IssueDiagnostic {
                message: issue.to_string(),
                evidence: readiness_evidence(issue, &lines),
            })
            .collect();

        Self {
            structural,
            semantic: SemanticVerdict {
                score: result.semantic_similarity(),
                threshold: result.threshold(),
                passed: result.semantic_passed(),
            },
            readiness,
        }
    }

    pub fn structural(&self) -> &[IssueDiagnostic] {
        &self.structural
    }

    pub fn semantic(&self) -> SemanticVerdict {
        self.semantic
    }

    pub fn readiness(&self) -> &[IssueDiagnostic] {
        &self.readiness
    }
}

fn matching_lines(lines: &[&str], predicate: impl Fn(&str) -> bool) -> Evidence {
    Evidence::Lines(
        lines
            .iter()
            .enumerate()
            .filter(|(_, line)| predicate(**line))
            .map(|(i, line)| (i + 1, (*line).to_string()))
            .collect(),
    )
}

fn structural_evidence(issue: &StructuralIssue, lines: &[&str]) -> Evidence {
    use crate::validation::structural::{
        CODE_FENCE, EMPTY_IMAGE, EMPTY_LINK, OCR_ARTIFACT, is_malformed_table_row,
    };

    match issue {
        StructuralIssue::MalformedTable { .. } => {
            matching_lines(lines, is_malformed_table_row)
        }
        StructuralIssue::EmptyLink => matching_lines(lines, |line| line.contains(EMPTY_LINK)),
        StructuralIssue::EmptyImage => matching_lines(lines, |line| line.contains(EMPTY_IMAGE)),
        StructuralIssue::UnclosedCodeBlock => Evidence::FenceMarkers(
            lines
                .iter()
                .enumerate()
                .filter(|(_, line)| line.contains(CODE_FENCE))
                .map(|(i, _)| i + 1)
                .collect(),
        ),
        StructuralIssue::OcrArtifacts => matching_lines(lines, |line| OCR_ARTIFACT.is_match(line)),
        StructuralIssue::NoHeadings | StructuralIssue::ExcessiveWhitespace => Evidence::None,
    }
}

fn readiness_evidence(issue: &ReadinessIssue, lines: &[&str]) -> Evidence {
    use crate::validation::readiness::REPLACEMENT_CHAR;

    match issue {
        ReadinessIssue::Placeholder { token } => {
            matching_lines(lines, |line| line.contains(token))
        }
        ReadinessIssue::ReplacementCharacters => {
            matching_lines(lines, |line| line.contains(REPLACEMENT_CHAR))
        }
        _ => Evidence::None,
    }
}

fn write_issues(f: &mut fmt::Formatter<'_>, issues: &[IssueDiagnostic]) -> fmt::Result {
    for issue in issues {
        writeln!(f, "  ✗ {}", issue.message)?;
        match &issue.evidence {
            Evidence::Lines(lines) => {
                for (number, content) in lines {
                    writeln!(f, "    Line {number}: {content}")?;
                }
            }
            Evidence::FenceMarkers(numbers) => {
                writeln!(f, "    Code block markers found at lines: {numbers:?}")?;
            }
            Evidence::None => {}
        }
    }
    Ok(())
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "FAILURE ANALYSIS")?;
        writeln!(f, "{LIGHT_RULE}")?;

        if self.structural.is_empty() {
            writeln!(f, "No structural errors.")?;
        } else {
            writeln!(f, "STRUCTURAL ERRORS:")?;
            write_issues(f, &self.structural)?;
        }
        writeln!(f)?;

        if self.semantic.passed {
            writeln!(f, "Semantic similarity passed.")?;
        } else {
            writeln!(
                f,
                "SEMANTIC SIMILARITY FAILED: Score {:.3} < threshold {}",
                self.semantic.score, self.semantic.threshold
            )?;
        }
        writeln!(f)?;

        if self.readiness.is_empty() {
            writeln!(f, "No ingestion readiness errors.")?;
        } else {
            writeln!(f, "INGESTION READINESS ERRORS:")?;
            write_issues(f, &self.readiness)?;
        }

        writeln!(f, "{LIGHT_RULE}")
    }
}
