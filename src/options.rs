//! Options for a whole analysis run.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::ClassifierOptions;
use crate::error::Result;
use crate::layout::LayoutOptions;
use crate::rank::RankOptions;
use crate::relevance::RelevanceOptions;

/// Every stage's options plus run-wide switches.
///
/// Deserializes from partial JSON: missing fields keep their defaults.
///
/// ```
/// use doclens::AnalysisOptions;
///
/// let options = AnalysisOptions::from_json(br#"{"rank": {"top_k": 5}}"#).unwrap();
/// assert_eq!(options.rank.top_k, 5);
/// assert!(options.parallel);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Fragment merging and noise filtering
    pub layout: LayoutOptions,

    /// Structure classification
    pub classifier: ClassifierOptions,

    /// Query relevance scoring
    pub relevance: RelevanceOptions,

    /// Ranking and report assembly
    pub rank: RankOptions,

    /// Process documents in parallel
    pub parallel: bool,
}

impl AnalysisOptions {
    /// Create analysis options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set layout options.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Set classifier options.
    pub fn with_classifier(mut self, classifier: ClassifierOptions) -> Self {
        self.classifier = classifier;
        self
    }

    /// Set relevance options.
    pub fn with_relevance(mut self, relevance: RelevanceOptions) -> Self {
        self.relevance = relevance;
        self
    }

    /// Set rank options.
    pub fn with_rank(mut self, rank: RankOptions) -> Self {
        self.rank = rank;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(self) -> Self {
        self.with_parallel(false)
    }

    /// Parse options from JSON and validate them.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let options: Self = serde_json::from_slice(data)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }

    /// Check every stage's options.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        self.classifier.validate()?;
        self.relevance.validate()?;
        self.rank.validate()
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            layout: LayoutOptions::default(),
            classifier: ClassifierOptions::default(),
            relevance: RelevanceOptions::default(),
            rank: RankOptions::default(),
            parallel: true,
        }
    }
}
