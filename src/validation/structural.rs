use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#{1,6}\s+.+").expect("Invalid heading regex"));

static EXCESSIVE_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n\s*\n\s*\n").expect("Invalid whitespace regex"));

pub(crate) static OCR_ARTIFACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}_\s]{5,}").expect("Invalid OCR artifact regex"));

pub(crate) const EMPTY_LINK: &str = "[]()";
pub(crate) const EMPTY_IMAGE: &str = "![]()";
pub(crate) const CODE_FENCE: &str = "```";

/// Characters of the offending line quoted in [`StructuralIssue::MalformedTable`].
const TABLE_EXCERPT_CHARS: usize = 50;

/// A structural defect in the converted markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralIssue {
    /// No `#`-style heading anywhere.
    NoHeadings,
    /// `[]()` present.
    EmptyLink,
    /// `![]()` present.
    EmptyImage,
    /// First line containing a single `|`.
    MalformedTable {
        /// Up to the first 50 characters of that line.
        excerpt: String,
    },
    /// Odd number of fence markers.
    UnclosedCodeBlock,
    /// Three or more blank lines in a row.
    ExcessiveWhitespace,
    /// A run of 5+ characters that are neither word characters nor whitespace.
    OcrArtifacts,
}

impl StructuralIssue {
    /// Short stable identifier.
    pub fn kind(&self) -> &'static str {
        match self {
            StructuralIssue::NoHeadings => "no_headings",
            StructuralIssue::EmptyLink => "empty_link",
            StructuralIssue::EmptyImage => "empty_image",
            StructuralIssue::MalformedTable { .. } => "malformed_table",
            StructuralIssue::UnclosedCodeBlock => "unclosed_code_block",
            StructuralIssue::ExcessiveWhitespace => "excessive_whitespace",
            StructuralIssue::OcrArtifacts => "ocr_artifacts",
        }
    }
}

impl fmt::Display for StructuralIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralIssue::NoHeadings => f.write_str("No markdown headings found"),
            StructuralIssue::EmptyLink => f.write_str("Empty links detected: []()"),
            StructuralIssue::EmptyImage => f.write_str("Empty image references detected: ![]()"),
            StructuralIssue::MalformedTable { excerpt } => {
                write!(f, "Malformed table at line with content: {excerpt}...")
            }
            StructuralIssue::UnclosedCodeBlock => f.write_str("Unclosed code blocks detected"),
            StructuralIssue::ExcessiveWhitespace => {
                f.write_str("Excessive whitespace detected (4+ consecutive newlines)")
            }
            StructuralIssue::OcrArtifacts => f.write_str(
                "Potential OCR artifacts detected (5+ consecutive special characters)",
            ),
        }
    }
}

/// Shallow markup sanity checks. Not a linter: every rule is a regex-level cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuralValidator;

impl StructuralValidator {
    /// Runs every rule; each contributes at most one issue, in rule order.
    pub fn check(text: &str) -> Vec<StructuralIssue> {
        let mut issues = Vec::new();

        if !HEADING.is_match(text) {
            issues.push(StructuralIssue::NoHeadings);
        }

        if text.contains(EMPTY_LINK) {
            issues.push(StructuralIssue::EmptyLink);
        }

        if text.contains(EMPTY_IMAGE) {
            issues.push(StructuralIssue::EmptyImage);
        }

        if let Some(line) = text.split('\n').find(|line| is_malformed_table_row(line)) {
            issues.push(StructuralIssue::MalformedTable {
                excerpt: line.chars().take(TABLE_EXCERPT_CHARS).collect(),
            });
        }

        if text.matches(CODE_FENCE).count() % 2 != 0 {
            issues.push(StructuralIssue::UnclosedCodeBlock);
        }

        if EXCESSIVE_WHITESPACE.is_match(text) {
            issues.push(StructuralIssue::ExcessiveWhitespace);
        }

        if OCR_ARTIFACT.is_match(text) {
            issues.push(StructuralIssue::OcrArtifacts);
        }

        issues
    }
}

/// A line that looks like a table row but has only one `|`.
pub(crate) fn is_malformed_table_row(line: &str) -> bool {
    line.matches('|').count() == 1
}
