use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{
    MAX_SPECIAL_CHAR_RATIO, MIN_CONTENT_CHARS, MIN_SENTENCE_TOKENS, MIN_SENTENCES, MIN_WORD_COUNT,
    PLACEHOLDER_TOKENS,
};

static SPECIAL_CHAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[^\p{L}\p{N}_\s.,!?;:(){}\[\]"'\-]"#)
        .expect("Invalid special character regex")
});

/// Letters, numbers and `_`; combining marks split words.
static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}_]+").expect("Invalid word regex"));

static SENTENCE_TERMINATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("Invalid sentence terminator regex"));

pub(crate) const REPLACEMENT_CHAR: char = '\u{FFFD}';

/// A reason the converted text is not fit for corpus ingestion.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadinessIssue {
    /// Fewer than 200 characters after trimming.
    TooShort,
    /// One of the placeholder tokens is present.
    Placeholder { token: &'static str },
    /// U+FFFD present.
    ReplacementCharacters,
    /// More than 10% of characters fall outside the permitted set.
    HighSpecialCharRatio { ratio: f64 },
    /// Fewer than 50 word tokens.
    LowWordCount { count: usize },
    /// Fewer than 5 sentences with at least 3 tokens.
    InsufficientSentences,
}

impl ReadinessIssue {
    /// Short stable identifier.
    pub fn kind(&self) -> &'static str {
        match self {
            ReadinessIssue::TooShort => "too_short",
            ReadinessIssue::Placeholder { .. } => "placeholder",
            ReadinessIssue::ReplacementCharacters => "replacement_characters",
            ReadinessIssue::HighSpecialCharRatio { .. } => "high_special_char_ratio",
            ReadinessIssue::LowWordCount { .. } => "low_word_count",
            ReadinessIssue::InsufficientSentences => "insufficient_sentences",
        }
    }
}

impl fmt::Display for ReadinessIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadinessIssue::TooShort => {
                f.write_str("Content too short for meaningful ingestion (<200 chars)")
            }
            ReadinessIssue::Placeholder { token } => write!(f, "Contains placeholder: {token}"),
            ReadinessIssue::ReplacementCharacters => {
                f.write_str("Contains replacement characters (encoding issues)")
            }
            ReadinessIssue::HighSpecialCharRatio { ratio } => write!(
                f,
                "High special character ratio ({:.2}%) - potential OCR noise",
                ratio * 100.0
            ),
            ReadinessIssue::LowWordCount { count } => {
                write!(f, "Very low word count ({count}) - insufficient content")
            }
            ReadinessIssue::InsufficientSentences => {
                f.write_str("Insufficient sentence structure for meaningful content")
            }
        }
    }
}

/// Checks whether converted text is substantial and clean enough to ingest.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadinessValidator;

impl ReadinessValidator {
    /// Runs every rule in order. Placeholders yield one issue per token found.
    pub fn check(text: &str) -> Vec<ReadinessIssue> {
        let mut issues = Vec::new();

        if text.trim().chars().count() < MIN_CONTENT_CHARS {
            issues.push(ReadinessIssue::TooShort);
        }

        issues.extend(
            placeholders_in(text).map(|token| ReadinessIssue::Placeholder { token }),
        );

        if text.contains(REPLACEMENT_CHAR) {
            issues.push(ReadinessIssue::ReplacementCharacters);
        }

        let ratio = special_char_ratio(text);
        if ratio > MAX_SPECIAL_CHAR_RATIO {
            issues.push(ReadinessIssue::HighSpecialCharRatio { ratio });
        }

        let count = word_count(text);
        if count < MIN_WORD_COUNT {
            issues.push(ReadinessIssue::LowWordCount { count });
        }

        if sentence_count(text) < MIN_SENTENCES {
            issues.push(ReadinessIssue::InsufficientSentences);
        }

        issues
    }
}

/// Placeholder tokens present anywhere in `text`, in declaration order.
pub(crate) fn placeholders_in(text: &str) -> impl Iterator<Item = &'static str> + '_ {
    PLACEHOLDER_TOKENS
        .iter()
        .copied()
        .filter(move |token| text.contains(token))
}

/// Share of characters outside word chars, whitespace and `.,!?;:(){}[]"'-`. Zero for empty text.
fn special_char_ratio(text: &str) -> f64 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    SPECIAL_CHAR.find_iter(text).count() as f64 / total as f64
}

fn word_count(text: &str) -> usize {
    WORD.find_iter(text).count()
}

fn sentence_count(text: &str) -> usize {
    SENTENCE_TERMINATORS
        .split(text)
        .filter(|s| s.split_whitespace().count() >= MIN_SENTENCE_TOKENS)
        .count()
}
