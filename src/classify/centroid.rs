//! Nearest-centroid predictor fitted on labelled feature vectors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::LabelPredictor;
use crate::error::{Error, Result};
use crate::model::{FeatureVector, StructuralLabel};

/// Mean feature vector of one label, in standardised units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    /// Label this centroid stands for
    pub label: StructuralLabel,
    /// Standardised mean features
    pub center: Vec<f32>,
    /// Number of training samples
    pub support: usize,
}

/// A nearest-centroid classifier over standardised feature vectors.
///
/// Features are centred and scaled by the training mean and standard
/// deviation, so large-valued features (length, font size) do not drown out
/// the binary flags. Prediction picks the closest centroid by Euclidean
/// distance; ties go to the label earlier in hierarchy order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentroidPredictor {
    /// Feature names, for compatibility checks when loading
    pub features: Vec<String>,
    /// Per-feature training mean
    pub means: Vec<f32>,
    /// Per-feature training standard deviation (1 where constant)
    pub scales: Vec<f32>,
    /// One centroid per label seen in training, in hierarchy order
    pub centroids: Vec<Centroid>,
}

impl CentroidPredictor {
    /// Fit a predictor from labelled samples.
    ///
    /// Fails with [`Error::Model`] when fewer than two distinct labels occur.
    pub fn fit(samples: &[(FeatureVector, StructuralLabel)]) -> Result<Self> {
        let mut by_label: BTreeMap<StructuralLabel, Vec<[f32; FeatureVector::LEN]>> =
            BTreeMap::new();
        for (features, label) in samples {
            by_label.entry(*label).or_default().push(features.to_array());
        }

        if by_label.len() < 2 {
            return Err(Error::Model(format!(
                "need samples of at least two labels, got {}",
                by_label.len()
            )));
        }

        let n = samples.len() as f32;
        let mut means = vec![0.0f32; FeatureVector::LEN];
        for (features, _) in samples {
            for (m, v) in means.iter_mut().zip(features.to_array()) {
                *m += v / n;
            }
        }

        let mut scales = vec![0.0f32; FeatureVector::LEN];
        for (features, _) in samples {
            for ((s, v), m) in scales.iter_mut().zip(features.to_array()).zip(&means) {
                *s += (v - m) * (v - m) / n;
            }
        }
        for s in scales.iter_mut() {
            *s = s.sqrt();
            if !(*s > f32::EPSILON) {
                *s = 1.0;
            }
        }

        let centroids = by_label
            .into_iter()
            .map(|(label, rows)| {
                let mut center = vec![0.0f32; FeatureVector::LEN];
                for row in &rows {
                    for (i, c) in center.iter_mut().enumerate() {
                        *c += (row[i] - means[i]) / scales[i];
                    }
                }
                for c in center.iter_mut() {
                    *c /= rows.len() as f32;
                }
                Centroid {
                    label,
                    center,
                    support: rows.len(),
                }
            })
            .collect::<Vec<_>>();

        log::info!(
            "Fitted centroid predictor on {} samples ({} labels)",
            samples.len(),
            centroids.len()
        );

        Ok(Self {
            features: FeatureVector::NAMES.iter().map(|s| s.to_string()).collect(),
            means,
            scales,
            centroids,
        })
    }

    /// Check that a deserialized model matches the current feature layout.
    pub fn check(&self) -> Result<()> {
        let expected: Vec<&str> = FeatureVector::NAMES.to_vec();
        let actual: Vec<&str> = self.features.iter().map(String::as_str).collect();
        if actual != expected {
            return Err(Error::Model(format!(
                "feature layout mismatch: expected {:?}, found {:?}",
                expected, actual
            )));
        }
        if self.means.len() != FeatureVector::LEN || self.scales.len() != FeatureVector::LEN {
            return Err(Error::Model("scaling vectors have the wrong length".to_string()));
        }
        if self.centroids.is_empty()
            || self
                .centroids
                .iter()
                .any(|c| c.center.len() != FeatureVector::LEN)
        {
            return Err(Error::Model("missing or malformed centroids".to_string()));
        }
        Ok(())
    }

    /// Parse and check a serialized model.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let model: Self = serde_json::from_slice(data)?;
        model.check()?;
        Ok(model)
    }

    fn standardise(&self, features: &FeatureVector) -> Vec<f32> {
        features
            .to_array()
            .iter()
            .zip(self.means.iter().zip(&self.scales))
            .map(|(v, (m, s))| (v - m) / s)
            .collect()
    }
}

impl LabelPredictor for CentroidPredictor {
    fn predict(&self, features: &FeatureVector) -> StructuralLabel {
        let x = self.standardise(features);
        let mut best: Option<(StructuralLabel, f32)> = None;

        for centroid in &self.centroids {
            let dist: f32 = centroid
                .center
                .iter()
                .zip(&x)
                .map(|(c, v)| (c - v) * (c - v))
                .sum();
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((centroid.label, dist));
            }
        }

        best.map_or(StructuralLabel::Paragraph, |(label, _)| label)
    }

    fn name(&self) -> &str {
        "nearest-centroid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ratio: f32, bold: bool, length: f32) -> FeatureVector {
        FeatureVector {
            font_size: 12.0 * ratio,
            font_size_ratio: ratio,
            bold: if bold { 1.0 } else { 0.0 },
            length,
            ..Default::default()
        }
    }

    fn training_set() -> Vec<(FeatureVector, StructuralLabel)> {
        vec![
            (sample(1.6, true, 20.0), StructuralLabel::H1),
            (sample(1.5, true, 25.0), StructuralLabel::H1),
            (sample(1.0, false, 300.0), StructuralLabel::Paragraph),
            (sample(1.0, false, 280.0), StructuralLabel::Paragraph),
            (sample(1.0, false, 320.0), StructuralLabel::Paragraph),
        ]
    }

    #[test]
    fn test_fit_and_predict() {
        let model = CentroidPredictor::fit(&training_set()).unwrap();
        assert_eq!(model.centroids.len(), 2);
        assert_eq!(model.centroids[0].label, StructuralLabel::H1);
        assert_eq!(model.centroids[1].support, 3);

        assert_eq!(model.predict(&sample(1.55, true, 18.0)), StructuralLabel::H1);
        assert_eq!(model.predict(&sample(1.0, false, 250.0)), StructuralLabel::Paragraph);
    }

    #[test]
    fn test_fit_requires_two_labels() {
        let samples = vec![(sample(1.0, false, 100.0), StructuralLabel::Paragraph)];
        assert!(matches!(CentroidPredictor::fit(&samples), Err(Error::Model(_))));
        assert!(matches!(CentroidPredictor::fit(&[]), Err(Error::Model(_))));
    }

    #[test]
    fn test_serialized_model_round_trip() {
        let model = CentroidPredictor::fit(&training_set()).unwrap();
        let json = serde_json::to_vec(&model).unwrap();
        let loaded = CentroidPredictor::from_json(&json).unwrap();
        assert_eq!(loaded.predict(&sample(1.6, true, 20.0)), StructuralLabel::H1);
    }

    #[test]
    fn test_from_json_rejects_wrong_layout() {
        let mut model = CentroidPredictor::fit(&training_set()).unwrap();
        model.features.pop();
        let json = serde_json::to_vec(&model).unwrap();
        assert!(matches!(
            CentroidPredictor::from_json(&json),
            Err(Error::Model(_))
        ));
    }
}
