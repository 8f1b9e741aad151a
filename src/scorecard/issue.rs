use std::fmt;

/// Weighted sub-score an issue belongs to. `Technical` issues are reported but not weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Structural,
    Format,
    LlmFriendliness,
    Citations,
    Technical,
}

/// A finding of the readiness scorecard.
#[derive(Debug, Clone, PartialEq)]
pub enum ScorecardIssue {
    /// 1-based heading index; `from` is 0 before the first heading.
    HeadingJump { index: usize, from: usize, to: usize },
    DuplicateHeading { title: String, occurrences: usize },
    /// 1-based list item index.
    ListIndent { index: usize, expected: usize, actual: usize },
    UnclosedCodeBlock,
    LongLine { line: usize, length: usize },
    Mojibake { line: usize, percent: f64 },
    ExternalUrls { count: usize },
    FewHeadings { count: usize },
    LongParagraphs { count: usize },
    LongAverageParagraph { average: f64 },
    MissingReferences,
    InvalidCitations { count: usize },
    TinyFile,
    SmallFile,
    HugeFile,
    LargeFile,
    EmptyFile,
}

impl ScorecardIssue {
    pub fn category(&self) -> Category {
        use ScorecardIssue::*;
        match self {
            HeadingJump { .. } | DuplicateHeading { .. } | ListIndent { .. } | UnclosedCodeBlock => {
                Category::Structural
            }
            LongLine { .. } | Mojibake { .. } | ExternalUrls { .. } => Category::Format,
            FewHeadings { .. } | LongParagraphs { .. } | LongAverageParagraph { .. } => {
                Category::LlmFriendliness
            }
            MissingReferences | InvalidCitations { .. } => Category::Citations,
            TinyFile | SmallFile | HugeFile | LargeFile | EmptyFile => Category::Technical,
        }
    }
}

impl fmt::Display for ScorecardIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ScorecardIssue::*;
        match self {
            HeadingJump { index, from, to } => {
                write!(f, "Heading {index} jumps levels: from H{from} to H{to}")
            }
            DuplicateHeading { title, occurrences } => {
                write!(f, "Heading '{title}' repeated {occurrences} times")
            }
            ListIndent {
                index,
                expected,
                actual,
            } => write!(
                f,
                "List item {index} has irregular indentation (expected {expected}, found {actual})"
            ),
            UnclosedCodeBlock => f.write_str("Unclosed code block found"),
            LongLine { line, length } => {
                write!(f, "Line {line} is too long ({length} characters)")
            }
            Mojibake { line, percent } => write!(
                f,
                "Line {line} looks garbled (non-ASCII characters make up {percent:.1}%)"
            ),
            ExternalUrls { count } => write!(
                f,
                "{count} external URLs detected, check that they are reachable"
            ),
            FewHeadings { count } => write!(
                f,
                "Too few headings (only {count}), add more section breaks"
            ),
            LongParagraphs { count } => write!(
                f,
                "{count} overly long paragraphs (>400 words), split them"
            ),
            LongAverageParagraph { average } => write!(
                f,
                "Average paragraph length is too long ({average:.1} words), add more breaks"
            ),
            MissingReferences => f.write_str("No references section found"),
            InvalidCitations { count } => {
                write!(f, "{count} reference entries are not properly formatted")
            }
            TinyFile => {
                f.write_str("File is very small (<500B), content may be severely incomplete")
            }
            SmallFile => f.write_str("File is small (<1KB), content may be incomplete"),
            HugeFile => f.write_str("File is very large (>5MB), split it into several files"),
            LargeFile => f.write_str("File is large (>2MB), consider splitting it"),
            EmptyFile => f.write_str("File is empty"),
        }
    }
}

impl serde::Serialize for ScorecardIssue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
