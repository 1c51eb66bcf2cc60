//! Layout noise: margins, watermarks, junk text and table-of-contents rows.

use std::collections::HashSet;
use std::fmt;

use regex::Regex;

use super::LayoutOptions;
use crate::model::{PageGeometry, TextFragment, TextLine};

/// Why a fragment or line was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseReason {
    /// Opacity below the watermark threshold
    Transparent,
    /// Font size above the outlier bound
    FontTooLarge,
    /// Font size below the minimum
    FontTooSmall,
    /// Positioned inside a page margin
    Margin,
    /// Nothing left after trimming
    Empty,
    /// Too few characters
    TooShort,
    /// Only punctuation or symbols
    SymbolsOnly,
    /// A bare page number or Roman numeral
    PageNumber,
    /// Dot leader followed by a page number
    DotLeader,
    /// Too few distinct characters
    LowVariety,
}

impl fmt::Display for NoiseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NoiseReason::Transparent => "transparent",
            NoiseReason::FontTooLarge => "font too large",
            NoiseReason::FontTooSmall => "font too small",
            NoiseReason::Margin => "margin",
            NoiseReason::Empty => "empty",
            NoiseReason::TooShort => "too short",
            NoiseReason::SymbolsOnly => "symbols only",
            NoiseReason::PageNumber => "page number",
            NoiseReason::DotLeader => "dot leader",
            NoiseReason::LowVariety => "low variety",
        };
        f.write_str(s)
    }
}

/// Predicates that separate content from layout noise.
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    options: LayoutOptions,
    symbols_regex: Regex,
    page_number_regex: Regex,
    roman_regex: Regex,
    dot_leader_regex: Regex,
    toc_leader_regex: Regex,
    numbered_toc_regex: Regex,
}

impl NoiseFilter {
    /// Create a noise filter with the given options.
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            options,
            symbols_regex: Regex::new(r"^[^\w\s]+$").unwrap(),
            page_number_regex: Regex::new(
                r"(?i)^(?:page\s+)?[-–—]?\s*\d{1,4}\s*(?:of\s+\d{1,4})?\s*[-–—]?$",
            )
            .unwrap(),
            // Single-case numerals only, so capitalised words like "Mix" survive.
            roman_regex: Regex::new(concat!(
                r"^\(?(?:m{0,4}(?:cm|cd|d?c{0,3})(?:xc|xl|l?x{0,3})(?:ix|iv|v?i{0,3})",
                r"|M{0,4}(?:CM|CD|D?C{0,3})(?:XC|XL|L?X{0,3})(?:IX|IV|V?I{0,3}))\)?\.?$",
            ))
            .unwrap(),
            dot_leader_regex: Regex::new(r"\.{3,}\s*\d+\s*$").unwrap(),
            toc_leader_regex: Regex::new(r"(?:\.{2,}|…+)\s*\d+\s*$").unwrap(),
            numbered_toc_regex: Regex::new(r"^\d{1,3}(?:\.\d{1,3})*\.?\s+.*\S\s+\d{1,4}$").unwrap(),
        }
    }

    /// The options this filter was built with.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Margin/watermark test for a single fragment.
    pub fn fragment_noise(
        &self,
        fragment: &TextFragment,
        geometry: PageGeometry,
    ) -> Option<NoiseReason> {
        let opts = &self.options;

        if fragment.opacity < opts.min_opacity {
            return Some(NoiseReason::Transparent);
        }
        if fragment.font_size > opts.max_font_size {
            return Some(NoiseReason::FontTooLarge);
        }
        if fragment.font_size < opts.min_font_size {
            return Some(NoiseReason::FontTooSmall);
        }

        if geometry.is_known() {
            let mx = geometry.width * opts.margin_fraction;
            let my = geometry.height * opts.margin_fraction;
            let x = fragment.bbox.x0;
            let y = fragment.bbox.y0;
            if x < mx || x > geometry.width - mx || y < my || y > geometry.height - my {
                return Some(NoiseReason::Margin);
            }
        }

        None
    }

    /// Check if a fragment is margin or watermark noise.
    pub fn is_watermark(&self, fragment: &TextFragment, geometry: PageGeometry) -> bool {
        self.fragment_noise(fragment, geometry).is_some()
    }

    /// Junk-text test for a merged line.
    pub fn text_noise(&self, text: &str) -> Option<NoiseReason> {
        let text = text.trim();
        if text.is_empty() {
            return Some(NoiseReason::Empty);
        }

        let len = text.chars().count();
        if len <= self.options.min_text_len {
            return Some(NoiseReason::TooShort);
        }
        if self.symbols_regex.is_match(text) {
            return Some(NoiseReason::SymbolsOnly);
        }
        if self.page_number_regex.is_match(text) || (len <= 6 && self.roman_regex.is_match(text))
        {
            return Some(NoiseReason::PageNumber);
        }
        if self.dot_leader_regex.is_match(text) {
            return Some(NoiseReason::DotLeader);
        }

        let distinct: HashSet<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
        if distinct.len() < self.options.min_distinct_chars
            && len < self.options.distinct_chars_waiver_len
        {
            return Some(NoiseReason::LowVariety);
        }

        None
    }

    /// Check if a line's text is junk.
    pub fn is_junk(&self, text: &str) -> bool {
        self.text_noise(text).is_some()
    }

    /// Table-of-contents test: leader rows, numbered rows at body size,
    /// and the contents/index heading itself.
    pub fn is_toc_entry(&self, line: &TextLine, body_size: f32) -> bool {
        let text = line.text.trim();

        if self.toc_leader_regex.is_match(text) {
            return true;
        }

        if text.chars().count() <= self.options.toc_max_len
            && line.font_size <= body_size
            && self.numbered_toc_regex.is_match(text)
        {
            return true;
        }

        let phrase = text.trim_end_matches(':').trim().to_lowercase();
        self.options
            .contents_phrases
            .iter()
            .any(|p| p.eq_ignore_ascii_case(&phrase))
    }

    /// Lines that survive the table-of-contents test.
    pub fn drop_toc(&self, lines: &[TextLine], body_size: f32) -> Vec<TextLine> {
        let kept: Vec<TextLine> = lines
            .iter()
            .filter(|line| !self.is_toc_entry(line, body_size))
            .cloned()
            .collect();
        if kept.len() < lines.len() {
            log::debug!(
                "Excluded {} table-of-contents lines",
                lines.len() - kept.len()
            );
        }
        kept
    }
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self::new(LayoutOptions::default())
    }
}
