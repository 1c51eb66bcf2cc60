//! Relevance scoring options.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Slack for floating-point weight sums.
const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Options for TF-IDF similarity and keyword overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceOptions {
    /// Weight of TF-IDF similarity in the combined score
    pub relevance_weight: f64,

    /// Weight of keyword overlap in the combined score
    pub keyword_weight: f64,

    /// Vocabulary size limit (most frequent terms kept; 0 keeps all)
    pub max_features: usize,

    /// Terms occurring in more than this share of documents are dropped
    pub max_df: f64,

    /// Longest n-gram in the vocabulary (1 = unigrams only)
    pub max_ngram: usize,

    /// Remove English stop words before building n-grams
    pub stop_words: bool,
}

impl RelevanceOptions {
    /// Create relevance options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the combined-score weights.
    pub fn with_weights(mut self, relevance: f64, keyword: f64) -> Self {
        self.relevance_weight = relevance;
        self.keyword_weight = keyword;
        self
    }

    /// Set the vocabulary size limit.
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Set the maximum document frequency.
    pub fn with_max_df(mut self, max_df: f64) -> Self {
        self.max_df = max_df;
        self
    }

    /// Set the longest n-gram.
    pub fn with_max_ngram(mut self, n: usize) -> Self {
        self.max_ngram = n;
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        for (name, w) in [
            ("relevance_weight", self.relevance_weight),
            ("keyword_weight", self.keyword_weight),
        ] {
            if !(0.0..=1.0).contains(&w) {
                return Err(Error::invalid_option(name, "must be within [0, 1]"));
            }
        }
        if self.relevance_weight + self.keyword_weight > 1.0 + WEIGHT_TOLERANCE {
            return Err(Error::invalid_option(
                "keyword_weight",
                "relevance_weight + keyword_weight must not exceed 1",
            ));
        }
        if !(self.max_df > 0.0 && self.max_df <= 1.0) {
            return Err(Error::invalid_option("max_df", "must be within (0, 1]"));
        }
        if self.max_ngram == 0 {
            return Err(Error::invalid_option("max_ngram", "must be at least 1"));
        }
        Ok(())
    }
}

impl Default for RelevanceOptions {
    fn default() -> Self {
        Self {
            relevance_weight: 0.7,
            keyword_weight: 0.3,
            max_features: 1000,
            max_df: 0.95,
            max_ngram: 2,
            stop_words: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let options = RelevanceOptions::default();
        assert_eq!(options.relevance_weight, 0.7);
        assert_eq!(options.max_features, 1000);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(RelevanceOptions::new().with_weights(1.5, 0.3).validate().is_err());
        assert!(RelevanceOptions::new().with_max_df(0.0).validate().is_err());
        assert!(RelevanceOptions::new().with_max_ngram(0).validate().is_err());
    }

    #[test]
    fn test_weight_sum_above_one_rejected() {
        let err = RelevanceOptions::new().with_weights(1.0, 1.0).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid option `keyword_weight`: relevance_weight + keyword_weight must not exceed 1"
        );
        assert!(RelevanceOptions::new().with_weights(0.5, 0.5).validate().is_ok());
        assert!(RelevanceOptions::new().with_weights(0.6, 0.2).validate().is_ok());
    }
}
