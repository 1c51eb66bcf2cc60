//! Section importance and ranking.

use super::RankOptions;
use crate::model::{ScoredLine, ScoredSection, Section};

/// Scores sections and keeps the most important ones.
#[derive(Debug, Clone, Default)]
pub struct SectionRanker {
    options: RankOptions,
}

impl SectionRanker {
    /// Create a ranker with the given options.
    pub fn new(options: RankOptions) -> Self {
        Self { options }
    }

    /// The ranker options.
    pub fn options(&self) -> &RankOptions {
        &self.options
    }

    /// Importance of one section.
    ///
    /// Blends the heading score, the mean and best content scores (0 without
    /// content) and the saturating content length.
    pub fn importance(&self, section: &Section<ScoredLine>) -> f64 {
        let o = &self.options;
        let heading = section.heading.scores.combined;
        let (mean, max) = if section.content.is_empty() {
            (0.0, 0.0)
        } else {
            let scores = section.content.iter().map(|l| l.scores.combined);
            let sum: f64 = scores.clone().sum();
            let max = scores.fold(0.0f64, f64::max);
            (sum / section.content.len() as f64, max)
        };
        let length = (section.content_chars() as f64 / o.length_normalizer).min(1.0);

        o.heading_weight * heading + o.mean_weight * mean + o.max_weight * max + o.length_weight * length
    }

    /// Rank sections by importance, highest first, keeping the top K.
    ///
    /// The sort is stable, so equal scores keep their discovery order; ranks
    /// run 1..=K without gaps.
    pub fn rank(&self, sections: Vec<Section<ScoredLine>>) -> Vec<ScoredSection> {
        let total = sections.len();
        let mut scored: Vec<(f64, Section<ScoredLine>)> = sections
            .into_iter()
            .map(|s| (self.importance(&s), s))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let ranked: Vec<ScoredSection> = scored
            .into_iter()
            .take(self.options.top_k)
            .enumerate()
            .map(|(i, (importance_score, section))| ScoredSection {
                section,
                importance_score,
                rank: i + 1,
            })
            .collect();

        log::debug!("Ranked {} of {} sections", ranked.len(), total);
        ranked
    }
}
