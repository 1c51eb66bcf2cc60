//! Per-document font statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::TextLine;

/// Font size statistics anchoring every relative threshold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FontStatistics {
    /// Body text font size (most common, rounded to 0.1)
    pub body_size: f32,
    /// Mean font size
    pub mean: f32,
    /// Population standard deviation of font sizes
    pub std_dev: f32,
    /// Observed font sizes (tenths of a point) with frequency
    pub size_histogram: BTreeMap<i32, usize>,
    /// Number of observations
    pub count: usize,
    #[serde(skip)]
    sum: f64,
    #[serde(skip)]
    sum_sq: f64,
}

impl FontStatistics {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect and analyse the font sizes of `lines`.
    ///
    /// With no lines, `fallback_body_size` is used as body size and mean.
    pub fn from_lines(lines: &[TextLine], fallback_body_size: f32) -> Self {
        let mut stats = Self::new();
        for line in lines {
            stats.add_size(line.font_size);
        }
        stats.analyze(fallback_body_size);
        stats
    }

    /// Add a font size observation.
    pub fn add_size(&mut self, size: f32) {
        let key = (size * 10.0).round() as i32;
        *self.size_histogram.entry(key).or_insert(0) += 1;
        self.count += 1;
        self.sum += size as f64;
        self.sum_sq += (size as f64) * (size as f64);
    }

    /// Calculate body size, mean and standard deviation.
    pub fn analyze(&mut self, fallback_body_size: f32) {
        if self.count == 0 {
            self.body_size = fallback_body_size;
            self.mean = fallback_body_size;
            self.std_dev = 0.0;
            return;
        }

        let n = self.count as f64;
        let mean = self.sum / n;
        self.mean = mean as f32;
        self.std_dev = (self.sum_sq / n - mean * mean).max(0.0).sqrt() as f32;

        // Ties go to the smaller size
        let mut best: Option<(i32, usize)> = None;
        for (&key, &count) in &self.size_histogram {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((key, count));
            }
        }
        self.body_size = best.map_or(fallback_body_size, |(key, _)| key as f32 / 10.0);
        if self.body_size <= 0.0 {
            self.body_size = fallback_body_size;
        }
    }

    /// Font size relative to the body size.
    pub fn ratio(&self, font_size: f32) -> f32 {
        if self.body_size > 0.0 {
            font_size / self.body_size
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sample_line;

    #[test]
    fn test_body_size_is_modal() {
        let mut stats = FontStatistics::new();
        for size in [11.0, 11.0, 11.0, 14.0, 18.0, 11.04] {
            stats.add_size(size);
        }
        stats.analyze(12.0);
        assert_eq!(stats.body_size, 11.0);
        assert_eq!(stats.count, 6);
    }

    #[test]
    fn test_mean_and_std_dev() {
        let mut stats = FontStatistics::new();
        for size in [10.0, 12.0, 14.0] {
            stats.add_size(size);
        }
        stats.analyze(12.0);
        assert!((stats.mean - 12.0).abs() < 1e-4);
        assert!((stats.std_dev - (8.0f32 / 3.0).sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_modal_tie_prefers_smaller_size() {
        let mut stats = FontStatistics::new();
        for size in [14.0, 10.0, 14.0, 10.0] {
            stats.add_size(size);
        }
        stats.analyze(12.0);
        assert_eq!(stats.body_size, 10.0);
    }

    #[test]
    fn test_empty_uses_fallback() {
        let stats = FontStatistics::from_lines(&[], 12.0);
        assert_eq!(stats.body_size, 12.0);
        assert_eq!(stats.ratio(18.0), 1.5);
    }

    #[test]
    fn test_from_lines() {
        let lines = vec![
            sample_line("Title", 1, 50.0, 24.0, true),
            sample_line("Body one", 1, 100.0, 10.0, false),
            sample_line("Body two", 1, 120.0, 10.0, false),
        ];
        let stats = FontStatistics::from_lines(&lines, 12.0);
        assert_eq!(stats.body_size, 10.0);
        assert_eq!(stats.ratio(24.0), 2.4);
    }
}
