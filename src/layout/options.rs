//! Merge and noise-filter thresholds.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Options for merging fragments into lines and filtering layout noise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Maximum difference of top edges for fragments on the same line
    pub vertical_tolerance: f32,

    /// Maximum horizontal gap between a line and the next fragment
    pub horizontal_gap: f32,

    /// Fragments below this opacity are watermarks
    pub min_opacity: f32,

    /// Fragments below this font size are dropped
    pub min_font_size: f32,

    /// Fragments above this font size are dropped
    pub max_font_size: f32,

    /// Fraction of the page width/height treated as margin on every edge
    pub margin_fraction: f32,

    /// Lines of this many characters or fewer are junk
    pub min_text_len: usize,

    /// Lines with fewer distinct non-space characters are junk...
    pub min_distinct_chars: usize,

    /// ...unless they are at least this long
    pub distinct_chars_waiver_len: usize,

    /// Longest line that can be a numbered table-of-contents row
    pub toc_max_len: usize,

    /// Headings that introduce a table of contents or index (case-insensitive)
    pub contents_phrases: Vec<String>,

    /// Apply Unicode NFC normalization and ligature expansion to fragment text
    pub normalize_text: bool,
}

impl LayoutOptions {
    /// Create layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the vertical merge tolerance.
    pub fn with_vertical_tolerance(mut self, tolerance: f32) -> Self {
        self.vertical_tolerance = tolerance;
        self
    }

    /// Set the horizontal merge gap.
    pub fn with_horizontal_gap(mut self, gap: f32) -> Self {
        self.horizontal_gap = gap;
        self
    }

    /// Set the minimum opacity.
    pub fn with_min_opacity(mut self, opacity: f32) -> Self {
        self.min_opacity = opacity;
        self
    }

    /// Set the accepted font size range.
    pub fn with_font_size_bounds(mut self, min: f32, max: f32) -> Self {
        self.min_font_size = min;
        self.max_font_size = max;
        self
    }

    /// Set the margin fraction.
    pub fn with_margin_fraction(mut self, fraction: f32) -> Self {
        self.margin_fraction = fraction;
        self
    }

    /// Enable or disable text normalization.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize_text = normalize;
        self
    }

    /// Check that every threshold is usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.vertical_tolerance >= 0.0) {
            return Err(Error::invalid_option(
                "vertical_tolerance",
                "must be non-negative",
            ));
        }
        if !(self.horizontal_gap >= 0.0) {
            return Err(Error::invalid_option("horizontal_gap", "must be non-negative"));
        }
        if !(0.0..=1.0).contains(&self.min_opacity) {
            return Err(Error::invalid_option("min_opacity", "must be within [0, 1]"));
        }
        if !(self.min_font_size >= 0.0 && self.min_font_size < self.max_font_size) {
            return Err(Error::invalid_option(
                "min_font_size",
                "must be non-negative and below max_font_size",
            ));
        }
        if !(0.0..0.5).contains(&self.margin_fraction) {
            return Err(Error::invalid_option("margin_fraction", "must be within [0, 0.5)"));
        }
        Ok(())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            vertical_tolerance: 2.0,
            horizontal_gap: 20.0,
            min_opacity: 0.5,
            min_font_size: 6.0,
            max_font_size: 60.0,
            margin_fraction: 0.05,
            min_text_len: 2,
            min_distinct_chars: 3,
            distinct_chars_waiver_len: 10,
            toc_max_len: 80,
            contents_phrases: vec![
                "contents".to_string(),
                "table of contents".to_string(),
                "index".to_string(),
            ],
            normalize_text: true,
        }
    }
}
