//! Label predictors: functions from a feature vector to a structural label.

use super::CascadeOptions;
use crate::model::{FeatureVector, StructuralLabel};

/// A predictor consulted for lines that no explicit rule claims.
///
/// Implementations must be deterministic: the same features always yield the
/// same label.
pub trait LabelPredictor: Send + Sync {
    /// Predict the label of a line from its features.
    fn predict(&self, features: &FeatureVector) -> StructuralLabel;

    /// Short name used in log messages.
    fn name(&self) -> &str;
}

/// Descending font-ratio thresholds combined with boldness and length ceilings.
#[derive(Debug, Clone, Default)]
pub struct FontRatioCascade {
    options: CascadeOptions,
}

impl FontRatioCascade {
    /// Create a cascade with the given thresholds.
    pub fn new(options: CascadeOptions) -> Self {
        Self { options }
    }
}

impl LabelPredictor for FontRatioCascade {
    fn predict(&self, features: &FeatureVector) -> StructuralLabel {
        let o = &self.options;
        let ratio = features.font_size_ratio;
        let bold = features.is_bold();
        let len = features.length as usize;

        if ratio >= o.h1_ratio && (bold || len < o.h1_max_len) {
            StructuralLabel::H1
        } else if ratio >= o.h2_ratio && (bold || len < o.h2_max_len) {
            StructuralLabel::H2
        } else if ratio >= o.h3_ratio && bold && len < o.h3_max_len {
            StructuralLabel::H3
        } else if bold && len < o.bold_max_len {
            StructuralLabel::H3
        } else {
            StructuralLabel::Paragraph
        }
    }

    fn name(&self) -> &str {
        "font-ratio-cascade"
    }
}
