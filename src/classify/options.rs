//! Classifier thresholds.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Structural keywords that mark a heading regardless of numbering.
pub const DEFAULT_KEYWORDS: [&str; 9] = [
    "abstract",
    "introduction",
    "conclusion",
    "references",
    "background",
    "methodology",
    "results",
    "discussion",
    "summary",
];

/// Options for the structure classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierOptions {
    /// Last page (1-indexed) on which a title may appear
    pub title_max_page: u32,

    /// Minimum size ratio for a bold title
    pub title_ratio: f32,

    /// Minimum size ratio for a title that is not bold
    pub title_strong_ratio: f32,

    /// Title must start in this upper fraction of the page
    pub title_vertical_fraction: f32,

    /// Keyword headings at or above this ratio (or bold) are H1, else H2
    pub keyword_h1_ratio: f32,

    /// Structural keywords (matched as lowercase substrings)
    pub keywords: Vec<String>,

    /// Font-ratio cascade thresholds
    pub cascade: CascadeOptions,

    /// Body size assumed when a document has no usable lines
    pub fallback_body_size: f32,
}

/// Thresholds of the font-ratio cascade, checked top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CascadeOptions {
    /// H1: ratio at or above this and (bold or shorter than `h1_max_len`)
    pub h1_ratio: f32,
    /// Length ceiling for non-bold H1 lines
    pub h1_max_len: usize,
    /// H2: ratio at or above this and (bold or shorter than `h2_max_len`)
    pub h2_ratio: f32,
    /// Length ceiling for non-bold H2 lines
    pub h2_max_len: usize,
    /// H3: ratio at or above this, bold and shorter than `h3_max_len`
    pub h3_ratio: f32,
    /// Length ceiling for H3 lines found by ratio
    pub h3_max_len: usize,
    /// Bold lines shorter than this are H3 even at body size
    pub bold_max_len: usize,
}

impl Default for CascadeOptions {
    fn default() -> Self {
        Self {
            h1_ratio: 1.3,
            h1_max_len: 100,
            h2_ratio: 1.15,
            h2_max_len: 80,
            h3_ratio: 1.05,
            h3_max_len: 60,
            bold_max_len: 100,
        }
    }
}

impl ClassifierOptions {
    /// Create classifier options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the last page a title may appear on.
    pub fn with_title_max_page(mut self, page: u32) -> Self {
        self.title_max_page = page;
        self
    }

    /// Set the title ratios (bold, not bold).
    pub fn with_title_ratios(mut self, ratio: f32, strong_ratio: f32) -> Self {
        self.title_ratio = ratio;
        self.title_strong_ratio = strong_ratio;
        self
    }

    /// Replace the structural keyword list.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(|k| k.into().to_lowercase()).collect();
        self
    }

    /// Set the cascade thresholds.
    pub fn with_cascade(mut self, cascade: CascadeOptions) -> Self {
        self.cascade = cascade;
        self
    }

    /// Check that every threshold is usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.title_ratio > 0.0) {
            return Err(Error::invalid_option("title_ratio", "must be positive"));
        }
        if !(self.title_strong_ratio >= self.title_ratio) {
            return Err(Error::invalid_option(
                "title_strong_ratio",
                "must be at least title_ratio",
            ));
        }
        if !(self.title_vertical_fraction > 0.0 && self.title_vertical_fraction <= 1.0) {
            return Err(Error::invalid_option(
                "title_vertical_fraction",
                "must be within (0, 1]",
            ));
        }
        if !(self.keyword_h1_ratio > 0.0) {
            return Err(Error::invalid_option("keyword_h1_ratio", "must be positive"));
        }
        if !(self.fallback_body_size > 0.0) {
            return Err(Error::invalid_option("fallback_body_size", "must be positive"));
        }
        let c = &self.cascade;
        if !(c.h1_ratio >= c.h2_ratio && c.h2_ratio >= c.h3_ratio && c.h3_ratio > 0.0) {
            return Err(Error::invalid_option(
                "cascade",
                "ratios must be positive and non-increasing from H1 to H3",
            ));
        }
        Ok(())
    }
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            title_max_page: 3,
            title_ratio: 1.5,
            title_strong_ratio: 1.8,
            title_vertical_fraction: 0.5,
            keyword_h1_ratio: 1.2,
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            cascade: CascadeOptions::default(),
            fallback_body_size: 12.0,
        }
    }
}
