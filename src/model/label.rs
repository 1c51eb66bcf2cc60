//! Structural labels assigned by the classifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The structural role of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StructuralLabel {
    /// Document title (at most one per document after repair)
    Title,
    /// Top-level heading
    H1,
    /// Second-level heading
    H2,
    /// Third-level heading
    H3,
    /// Fourth-level heading
    H4,
    /// Body text
    Paragraph,
}

impl StructuralLabel {
    /// Heading label for a numbering depth (number of dots in the prefix).
    ///
    /// Depths beyond three collapse to H4.
    pub fn from_depth(dots: usize) -> Self {
        match dots {
            0 => StructuralLabel::H1,
            1 => StructuralLabel::H2,
            2 => StructuralLabel::H3,
            _ => StructuralLabel::H4,
        }
    }

    /// TITLE or any H level.
    pub fn is_heading(self) -> bool {
        !matches!(self, StructuralLabel::Paragraph)
    }

    /// H1 through H4 (the labels that appear in an outline).
    pub fn is_outline_level(self) -> bool {
        matches!(
            self,
            StructuralLabel::H1 | StructuralLabel::H2 | StructuralLabel::H3 | StructuralLabel::H4
        )
    }

    /// Numeric heading level: 0 for TITLE, 1-4 for H1-H4, `None` for body text.
    pub fn level(self) -> Option<u8> {
        match self {
            StructuralLabel::Title => Some(0),
            StructuralLabel::H1 => Some(1),
            StructuralLabel::H2 => Some(2),
            StructuralLabel::H3 => Some(3),
            StructuralLabel::H4 => Some(4),
            StructuralLabel::Paragraph => None,
        }
    }

    /// Wire name (e.g. "H2").
    pub fn as_str(self) -> &'static str {
        match self {
            StructuralLabel::Title => "TITLE",
            StructuralLabel::H1 => "H1",
            StructuralLabel::H2 => "H2",
            StructuralLabel::H3 => "H3",
            StructuralLabel::H4 => "H4",
            StructuralLabel::Paragraph => "PARAGRAPH",
        }
    }
}

impl fmt::Display for StructuralLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StructuralLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TITLE" => Ok(StructuralLabel::Title),
            "H1" => Ok(StructuralLabel::H1),
            "H2" => Ok(StructuralLabel::H2),
            "H3" => Ok(StructuralLabel::H3),
            "H4" => Ok(StructuralLabel::H4),
            "P" | "PARAGRAPH" => Ok(StructuralLabel::Paragraph),
            other => Err(Error::Other(format!("unknown structural label: {}", other))),
        }
    }
}
