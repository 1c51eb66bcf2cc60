//! Layout stage: load provider output, merge fragments into lines and drop noise.

mod merge;
mod noise;
mod options;
mod provider;

pub use merge::SpanMerger;
pub use noise::{NoiseFilter, NoiseReason};
pub use options::LayoutOptions;
pub use provider::{JsonLayoutProvider, LayoutProvider};
