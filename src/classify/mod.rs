//! Structure classification: body statistics, features, rules and predictors.
//!
//! Lines are labelled TITLE, H1-H4 or PARAGRAPH. Explicit rules (numbering,
//! title candidates, structural keywords) take precedence; remaining lines go
//! to a [`LabelPredictor`], which is the [`FontRatioCascade`] unless a fitted
//! model such as [`CentroidPredictor`] is supplied.

mod centroid;
mod features;
mod options;
mod predictor;
mod rules;
mod stats;
mod title;

pub use centroid::{Centroid, CentroidPredictor};
pub use features::FeatureExtractor;
pub use options::{CascadeOptions, ClassifierOptions, DEFAULT_KEYWORDS};
pub use predictor::{FontRatioCascade, LabelPredictor};
pub use rules::StructureClassifier;
pub use stats::FontStatistics;
pub use title::repair_titles;
