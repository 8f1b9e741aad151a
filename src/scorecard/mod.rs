//! Readiness scorecard for LLM pretraining corpora.
//!
//! Scores a converted markup file on its own (no source document) with four weighted checks,
//! turns the weighted sum into a 0-100 score and a letter grade, and derives suggestions from
//! the issues of any check scoring below 0.8.

mod checks;
mod issue;


pub use issue::{Category, ScorecardIssue};

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::input::{InputError, read_converted};

pub const STRUCTURAL_WEIGHT: f64 = 0.30;
pub const FORMAT_WEIGHT: f64 = 0.30;
pub const LLM_FRIENDLINESS_WEIGHT: f64 = 0.25;
pub const CITATIONS_WEIGHT: f64 = 0.15;

/// Sub-scores below this trigger suggestions.
pub const SUGGESTION_THRESHOLD: f64 = 0.8;

pub const READY_MESSAGE: &str = "Overall quality is good; the file can be used for LLM pretraining as is";

/// Letter grade for a 0-100 readiness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    APlus,
    A,
    BPlus,
    B,
    CPlus,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 95.0 => Grade::APlus,
            s if s >= 90.0 => Grade::A,
            s if s >= 85.0 => Grade::BPlus,
            s if s >= 80.0 => Grade::B,
            s if s >= 75.0 => Grade::CPlus,
            s if s >= 70.0 => Grade::C,
            s if s >= 60.0 => Grade::D,
            _ => Grade::F,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(label)
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn as_percent<S: Serializer>(score: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&format_args!("{}%", (score * 100.0).round() as i64))
}

/// Per-check scores in `[0, 1]`; serialised as whole percentages (`"95%"`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetailedScores {
    #[serde(serialize_with = "as_percent")]
    pub structural: f64,
    #[serde(serialize_with = "as_percent")]
    pub format: f64,
    #[serde(serialize_with = "as_percent")]
    pub llm_friendliness: f64,
    #[serde(serialize_with = "as_percent")]
    pub citations: f64,
}

impl DetailedScores {
    /// Weighted sum scaled to 0-100, rounded to one decimal.
    pub fn weighted_score(&self) -> f64 {
        let total = self.structural * STRUCTURAL_WEIGHT
            + self.format * FORMAT_WEIGHT
            + self.llm_friendliness * LLM_FRIENDLINESS_WEIGHT
            + self.citations * CITATIONS_WEIGHT;
        (total * 1000.0).round() / 10.0
    }

    fn score_for(&self, category: Category) -> Option<f64> {
        match category {
            Category::Structural => Some(self.structural),
            Category::Format => Some(self.format),
            Category::LlmFriendliness => Some(self.llm_friendliness),
            Category::Citations => Some(self.citations),
            Category::Technical => None,
        }
    }
}

/// Scorecard for one markup file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scorecard {
    file: String,
    readiness_score: f64,
    grade: Grade,
    detailed_scores: DetailedScores,
    issues: Vec<ScorecardIssue>,
    suggestions: Vec<String>,
}

impl Scorecard {
    /// Scores `text`; `file_size` (bytes on disk) feeds the technical check.
    pub fn assess(file: impl Into<String>, text: &str, file_size: u64) -> Self {
        let structural = checks::structural(text);
        let format = checks::format(text);
        let llm = checks::llm_friendliness(text);
        let citations = checks::citations(text);

        let detailed_scores = DetailedScores {
            structural: structural.score,
            format: format.score,
            llm_friendliness: llm.score,
            citations: citations.score,
        };

        let mut issues: Vec<ScorecardIssue> = structural
            .issues
            .into_iter()
            .chain(format.issues)
            .chain(llm.issues)
            .chain(citations.issues)
            .collect();
        let suggestions = suggestions(&detailed_scores, &issues);
        issues.extend(checks::technical(file_size, text));

        let readiness_score = detailed_scores.weighted_score();
        let grade = Grade::from_score(readiness_score);
        let file = file.into();

        debug!(file = %file, readiness_score, grade = %grade, issues = issues.len(), "Scored file");

        Self {
            file,
            readiness_score,
            grade,
            detailed_scores,
            issues,
            suggestions,
        }
    }

    /// Reads and scores a markup file.
    pub fn from_file(path: &Path) -> Result<Self, InputError> {
        let text = read_converted(path)?;
        let file_size = fs::metadata(path)
            .map_err(|e| InputError::io(path, e))?
            .len();
        Ok(Self::assess(path.display().to_string(), &text, file_size))
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// 0-100, one decimal.
    pub fn readiness_score(&self) -> f64 {
        self.readiness_score
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub fn detailed_scores(&self) -> &DetailedScores {
        &self.detailed_scores
    }

    /// Weighted issues first (structural, format, LLM friendliness, citations), then technical.
    pub fn issues(&self) -> &[ScorecardIssue] {
        &self.issues
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }
}

fn suggestions(scores: &DetailedScores, issues: &[ScorecardIssue]) -> Vec<String> {
    use ScorecardIssue::*;

    let low = |category: Category| {
        scores
            .score_for(category)
            .is_some_and(|score| score < SUGGESTION_THRESHOLD)
    };
    let any = |predicate: fn(&ScorecardIssue) -> bool| issues.iter().any(predicate);

    let mut out = Vec::new();

    if low(Category::Structural) {
        if any(|i| matches!(i, HeadingJump { .. })) {
            out.push("Adjust heading levels so adjacent headings differ by at most one level".to_string());
        }
        if any(|i| matches!(i, DuplicateHeading { .. })) {
            out.push("Rename duplicate headings so every section title is unique".to_string());
        }
        if any(|i| matches!(i, ListIndent { .. })) {
            out.push("Use consistent list indentation of 2 to 4 spaces".to_string());
        }
    }

    if low(Category::Format) {
        if any(|i| matches!(i, LongLine { .. })) {
            out.push(
                "Split lines longer than 1000 characters, keeping each line under 80 characters"
                    .to_string(),
            );
        }
        if any(|i| matches!(i, Mojibake { .. })) {
            out.push("Fix garbled characters and save the file as UTF-8".to_string());
        }
        if any(|i| matches!(i, ExternalUrls { .. })) {
            out.push("Replace external links with local references or remove dead links".to_string());
        }
    }

    if low(Category::LlmFriendliness) {
        if let Some(count) = issues.iter().find_map(|i| match i {
            FewHeadings { count } => Some(*count),
            _ => None,
        }) {
            out.push(format!(
                "Add section headings: at least {} more are needed",
                3usize.saturating_sub(count)
            ));
        }
        if any(|i| matches!(i, LongParagraphs { .. })) {
            out.push(
                "Split paragraphs longer than 400 words, keeping each under 200 words".to_string(),
            );
        }
    }

    if low(Category::Citations) {
        if any(|i| matches!(i, MissingReferences)) {
            out.push("Add a references section that records cited sources".to_string());
        }
        if any(|i| matches!(i, InvalidCitations { .. })) {
            out.push("Use one citation format throughout, such as BibTeX".to_string());
        }
    }

    if out.is_empty() {
        out.push(READY_MESSAGE.to_string());
    }
    out
}
