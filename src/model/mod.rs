//! Data model shared by every pipeline stage.
//!
//! Data flows strictly forward: layout fragments become [`TextLine`]s, lines
//! become [`ClassifiedLine`]s, classified lines are grouped into [`Section`]s,
//! and sections are scored and ranked into output records. Each stage builds
//! new values; nothing is modified in place.

mod fragment;
mod label;
mod line;
mod output;
mod query;
mod section;

pub use fragment::{
    BoundingBox, LayoutBlock, LayoutDocument, LayoutLine, LayoutPage, PageGeometry, TextFragment,
};
pub use label::StructuralLabel;
pub use line::{ClassifiedLine, FeatureVector, TextLine};
pub use output::{
    ExtractedSection, OutlineEntry, RelevanceReport, ReportMetadata, StructureOutput,
    SubsectionAnalysis, UNTITLED,
};
pub use query::Query;
pub use section::{LineScores, ScoredLine, ScoredSection, Section, SectionLine};

#[cfg(test)]
pub(crate) use line::sample_line;
