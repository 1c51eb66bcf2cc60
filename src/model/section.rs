//! Sections: a heading line and the paragraphs that follow it.

use serde::{Deserialize, Serialize};

use super::ClassifiedLine;

/// Anything that wraps a [`ClassifiedLine`] and can be grouped into sections.
pub trait SectionLine {
    /// The underlying classified line.
    fn classified(&self) -> &ClassifiedLine;
}

impl SectionLine for ClassifiedLine {
    fn classified(&self) -> &ClassifiedLine {
        self
    }
}

/// Relevance of one line to a query.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LineScores {
    /// TF-IDF cosine similarity to the query, in `[0, 1]`
    pub relevance: f64,
    /// Share of query keywords present in the line, in `[0, 1]`
    pub keyword: f64,
    /// Weighted blend of `relevance` and `keyword`
    pub combined: f64,
}

/// A classified line with its relevance scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLine {
    /// The classified line
    pub line: ClassifiedLine,
    /// Scores against the query
    pub scores: LineScores,
}

impl SectionLine for ScoredLine {
    fn classified(&self) -> &ClassifiedLine {
        &self.line
    }
}

/// A heading plus the body lines that follow it, within one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section<L = ClassifiedLine> {
    /// Name of the owning document
    pub document: String,
    /// The heading line (TITLE or H1-H4)
    pub heading: L,
    /// Paragraph lines in reading order
    pub content: Vec<L>,
}

impl<L: SectionLine> Section<L> {
    /// Heading text.
    pub fn title(&self) -> &str {
        self.heading.classified().text()
    }

    /// Page of the heading.
    pub fn page(&self) -> u32 {
        self.heading.classified().page()
    }

    /// Total content length in characters.
    pub fn content_chars(&self) -> usize {
        self.content
            .iter()
            .map(|l| l.classified().line.char_len())
            .sum()
    }

    /// Check if the section has no paragraphs.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// A section with its importance score and rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSection {
    /// The section with per-line scores
    pub section: Section<ScoredLine>,
    /// Weighted importance score
    pub importance_score: f64,
    /// Dense 1-based rank
    pub rank: usize,
}
