//! The four weighted checks plus the unweighted technical check.
//!
//! Each check starts at 1.0, subtracts a fixed penalty per finding and is floored at 0.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::issue::ScorecardIssue;

static HEADING_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(#+) (.*)$").expect("Invalid heading line regex"));

static HEADING_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#+ ").expect("Invalid heading marker regex"));

static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(\s*[-*+]|\s*\d+\.) ").expect("Invalid list item regex"));

/// Outside ASCII, CJK unified ideographs and the half/full-width forms block.
static UNEXPECTED_NON_ASCII: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\x00-\x7F\x{4e00}-\x{9fa5}\x{ff00}-\x{ffff}]")
        .expect("Invalid non-ASCII regex")
});

static URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+|www\.\S+").expect("Invalid URL regex"));

static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("Invalid paragraph break regex"));

static REFERENCES_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^#+\s*(?:参考文献|References)").expect("Invalid references heading regex")
});

static CITATION_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[.*?\]|doi:\s*10\.\d+|@\w+\{").expect("Invalid citation entry regex")
});

const MAX_LINE_CHARS: usize = 1000;
const MOJIBAKE_MIN_CHARS: usize = 5;
const URL_PENALTY_ABOVE: usize = 5;
const MIN_HEADINGS: usize = 3;
const LONG_PARAGRAPH_WORDS: usize = 400;
const LONG_PARAGRAPHS_ALLOWED: usize = 2;
const MAX_AVERAGE_PARAGRAPH_WORDS: f64 = 300.0;
const INVALID_CITATIONS_ALLOWED: usize = 3;

const TINY_FILE_BYTES: u64 = 500;
const SMALL_FILE_BYTES: u64 = 1000;
const LARGE_FILE_BYTES: u64 = 2 * 1024 * 1024;
const HUGE_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Result of one check.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SubScore {
    pub score: f64,
    pub issues: Vec<ScorecardIssue>,
}

impl SubScore {
    fn new() -> Self {
        Self {
            score: 1.0,
            issues: Vec::new(),
        }
    }

    fn penalise(&mut self, issue: ScorecardIssue, penalty: f64) {
        self.issues.push(issue);
        self.score -= penalty;
    }

    fn finish(mut self) -> Self {
        self.score = self.score.max(0.0);
        self
    }
}

fn leading_whitespace(s: &str) -> usize {
    s.chars().take_while(|c| c.is_whitespace()).count()
}

fn marker_len(s: &str) -> usize {
    s.trim().chars().count()
}

/// Heading hierarchy, duplicate titles, list indentation, code fences.
pub(crate) fn structural(text: &str) -> SubScore {
    let mut sub = SubScore::new();

    let mut previous_level = 0;
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (i, caps) in HEADING_LINE.captures_iter(text).enumerate() {
        let level = caps[1].len();
        let title = caps.get(2).map_or("", |m| m.as_str()).trim();

        if level > previous_level + 1 {
            sub.penalise(
                ScorecardIssue::HeadingJump {
                    index: i + 1,
                    from: previous_level,
                    to: level,
                },
                0.05,
            );
        }

        let occurrences = seen.entry(title).or_insert(0);
        *occurrences += 1;
        if *occurrences > 1 {
            sub.penalise(
                ScorecardIssue::DuplicateHeading {
                    title: title.to_string(),
                    occurrences: *occurrences,
                },
                0.03,
            );
        }

        previous_level = level;
    }

    let items: Vec<&str> = LIST_ITEM
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();
    for (i, pair) in items.windows(2).enumerate() {
        let (previous, current) = (pair[0], pair[1]);
        if marker_len(previous) != marker_len(current) {
            continue;
        }
        let expected = leading_whitespace(previous);
        let actual = leading_whitespace(current);
        if expected.abs_diff(actual) > 2 {
            sub.penalise(
                ScorecardIssue::ListIndent {
                    index: i + 2,
                    expected,
                    actual,
                },
                0.02,
            );
        }
    }

    if text.matches("```").count() % 2 != 0 {
        sub.penalise(ScorecardIssue::UnclosedCodeBlock, 0.1);
    }

    sub.finish()
}

/// Over-long lines, garbled lines, external URLs.
pub(crate) fn format(text: &str) -> SubScore {
    let mut sub = SubScore::new();

    for (i, line) in text.lines().enumerate() {
        let length = line.chars().count();
        if length > MAX_LINE_CHARS {
            sub.penalise(ScorecardIssue::LongLine { line: i + 1, length }, 0.02);
        }
    }

    for (i, line) in text.lines().enumerate() {
        let unexpected = UNEXPECTED_NON_ASCII.find_iter(line).count();
        if unexpected >= MOJIBAKE_MIN_CHARS {
            let percent = unexpected as f64 / line.chars().count() as f64 * 100.0;
            sub.penalise(ScorecardIssue::Mojibake { line: i + 1, percent }, 0.03);
        }
    }

    let external = URL
        .find_iter(text)
        .filter(|m| !(m.as_str().contains(".local") || m.as_str().contains("localhost")))
        .count();
    if external > 0 {
        let penalty = if external > URL_PENALTY_ABOVE { 0.03 } else { 0.0 };
        sub.penalise(ScorecardIssue::ExternalUrls { count: external }, penalty);
    }

    sub.finish()
}

/// Section count and paragraph length distribution.
pub(crate) fn llm_friendliness(text: &str) -> SubScore {
    let mut sub = SubScore::new();

    let headings = HEADING_MARKER.find_iter(text).count();
    if headings < MIN_HEADINGS {
        sub.penalise(ScorecardIssue::FewHeadings { count: headings }, 0.1);
    }

    let paragraphs: Vec<&str> = PARAGRAPH_BREAK.split(text).collect();

    let long = paragraphs
        .iter()
        .filter(|p| p.split_whitespace().count() > LONG_PARAGRAPH_WORDS)
        .count();
    if long > LONG_PARAGRAPHS_ALLOWED {
        sub.penalise(ScorecardIssue::LongParagraphs { count: long }, 0.1);
    }

    let sizes: Vec<usize> = paragraphs
        .iter()
        .filter(|p| !p.trim().is_empty())
        .map(|p| p.split_whitespace().count())
        .collect();
    if !sizes.is_empty() {
        let average = sizes.iter().sum::<usize>() as f64 / sizes.len() as f64;
        if average > MAX_AVERAGE_PARAGRAPH_WORDS {
            sub.penalise(ScorecardIssue::LongAverageParagraph { average }, 0.05);
        }
    }

    sub.finish()
}

/// Presence and shape of the references section.
pub(crate) fn citations(text: &str) -> SubScore {
    let mut sub = SubScore::new();

    let Some(heading) = REFERENCES_HEADING.find(text) else {
        sub.penalise(ScorecardIssue::MissingReferences, 0.05);
        return sub.finish();
    };

    let after_heading = &text[heading.end()..];
    let body = after_heading
        .find('\n')
        .map_or("", |newline| &after_heading[newline + 1..]);
    let section = body.find("\n#").map_or(body, |end| &body[..end]);

    let invalid = section
        .trim()
        .split("\n\n")
        .filter(|entry| !entry.trim().is_empty())
        .filter(|entry| !CITATION_ENTRY.is_match(entry))
        .count();

    if invalid > 0 {
        let penalty = if invalid > INVALID_CITATIONS_ALLOWED { 0.05 } else { 0.0 };
        sub.penalise(ScorecardIssue::InvalidCitations { count: invalid }, penalty);
    }

    sub.finish()
}

/// File size and emptiness. Reported only.
pub(crate) fn technical(file_size: u64, text: &str) -> Vec<ScorecardIssue> {
    let mut issues = Vec::new();

    if file_size < TINY_FILE_BYTES {
        issues.push(ScorecardIssue::TinyFile);
    } else if file_size < SMALL_FILE_BYTES {
        issues.push(ScorecardIssue::SmallFile);
    } else if file_size > HUGE_FILE_BYTES {
        issues.push(ScorecardIssue::HugeFile);
    } else if file_size > LARGE_FILE_BYTES {
        issues.push(ScorecardIssue::LargeFile);
    }

    if text.trim().is_empty() {
        issues.push(ScorecardIssue::EmptyFile);
    }

    issues
}
