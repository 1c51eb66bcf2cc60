//! Feature extraction for label predictors.

use regex::Regex;

use super::FontStatistics;
use crate::model::{FeatureVector, TextLine};

/// Turns merged lines into [`FeatureVector`]s.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    keywords: Vec<String>,
    numbering_regex: Regex,
}

impl FeatureExtractor {
    /// Create an extractor that flags the given structural keywords.
    pub fn new(keywords: &[String]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            // Components are 1-3 digits so years are never section numbers
            numbering_regex: Regex::new(r"^(\d{1,3}(?:\.\d{1,3})*)\.?(?:\s+|$)").unwrap(),
        }
    }

    /// Number of components in a leading section number (`"1.2.3 Results"` is 3).
    pub fn numbering_depth(&self, text: &str) -> Option<usize> {
        self.numbering_regex
            .captures(text.trim_start())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().split('.').count())
    }

    /// Check if the lowercase text contains a structural keyword.
    pub fn has_keyword(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }

    /// Compute the feature vector of a line.
    pub fn extract(&self, line: &TextLine, stats: &FontStatistics, page_count: u32) -> FeatureVector {
        let text = line.text.trim();
        let flag = |b: bool| if b { 1.0 } else { 0.0 };

        FeatureVector {
            font_size: line.font_size,
            font_size_ratio: stats.ratio(line.font_size),
            x_ratio: line.horizontal_ratio(),
            y_ratio: line.vertical_ratio(),
            bold: flag(line.bold),
            page_ratio: if page_count > 0 {
                line.page as f32 / page_count as f32
            } else {
                0.0
            },
            length: line.char_len() as f32,
            uppercase_ratio: line.uppercase_ratio(),
            section_number: flag(self.numbering_depth(text).is_some()),
            colon_terminated: flag(text.ends_with(':')),
            all_caps: flag(line.is_all_caps()),
            has_keyword: flag(self.has_keyword(text)),
        }
    }
}
