//! Importance weights and output limits.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Slack for floating-point weight sums.
const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Options for section ranking and report assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankOptions {
    /// Weight of the heading's combined score
    pub heading_weight: f64,

    /// Weight of the mean content score
    pub mean_weight: f64,

    /// Weight of the best content score
    pub max_weight: f64,

    /// Weight of the content length term
    pub length_weight: f64,

    /// Content length (characters) at which the length term saturates
    pub length_normalizer: f64,

    /// Number of sections ranked and reported
    pub top_k: usize,

    /// Paragraphs excerpted per ranked section
    pub excerpts_per_section: usize,

    /// Excerpts longer than this many characters are truncated
    pub excerpt_chars: usize,
}

impl RankOptions {
    /// Create rank options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of ranked sections.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the excerpt count and length limit.
    pub fn with_excerpts(mut self, per_section: usize, max_chars: usize) -> Self {
        self.excerpts_per_section = per_section;
        self.excerpt_chars = max_chars;
        self
    }

    /// Set the importance weights (heading, mean, max, length).
    pub fn with_weights(mut self, heading: f64, mean: f64, max: f64, length: f64) -> Self {
        self.heading_weight = heading;
        self.mean_weight = mean;
        self.max_weight = max;
        self.length_weight = length;
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        for (name, w) in [
            ("heading_weight", self.heading_weight),
            ("mean_weight", self.mean_weight),
            ("max_weight", self.max_weight),
            ("length_weight", self.length_weight),
        ] {
            if !(0.0..=1.0).contains(&w) {
                return Err(Error::invalid_option(name, "must be within [0, 1]"));
            }
        }
        let total = self.heading_weight + self.mean_weight + self.max_weight + self.length_weight;
        if total > 1.0 + WEIGHT_TOLERANCE {
            return Err(Error::invalid_option(
                "length_weight",
                "importance weights must not sum above 1",
            ));
        }
        if !(self.length_normalizer > 0.0) {
            return Err(Error::invalid_option("length_normalizer", "must be positive"));
        }
        if self.top_k == 0 {
            return Err(Error::invalid_option("top_k", "must be at least 1"));
        }
        if self.excerpt_chars == 0 {
            return Err(Error::invalid_option("excerpt_chars", "must be at least 1"));
        }
        Ok(())
    }
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            heading_weight: 0.4,
            mean_weight: 0.3,
            max_weight: 0.2,
            length_weight: 0.1,
            length_normalizer: 1000.0,
            top_k: 10,
            excerpts_per_section: 3,
            excerpt_chars: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RankOptions::default();
        assert_eq!(options.top_k, 10);
        assert_eq!(options.excerpts_per_section, 3);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_zero_top_k_rejected() {
        let err = RankOptions::new().with_top_k(0).validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid option `top_k`: must be at least 1");
    }

    #[test]
    fn test_importance_weight_sum_above_one_rejected() {
        let err = RankOptions::new()
            .with_weights(1.0, 1.0, 0.0, 0.0)
            .validate()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid option `length_weight`: importance weights must not sum above 1"
        );
        assert!(RankOptions::new().with_weights(0.5, 0.2, 0.2, 0.1).validate().is_ok());
    }

    #[test]
    fn test_partial_json_override() {
        let options: RankOptions = serde_json::from_str(r#"{"top_k": 5}"#).unwrap();
        assert_eq!(options.top_k, 5);
        assert_eq!(options.excerpt_chars, 500);
    }
}
