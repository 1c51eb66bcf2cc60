//! # doclens
//!
//! Document outline extraction and persona-driven section ranking.
//!
//! doclens reads page-layout text (positioned fragments with font metadata),
//! recovers the document's skeleton (title, H1-H4 headings, paragraphs) and,
//! given a reader persona and task, ranks the document's sections by
//! relevance to that task.
//!
//! ## Quick Start
//!
//! ```no_run
//! use doclens::{outline_file, render};
//!
//! fn main() -> doclens::Result<()> {
//!     let outline = outline_file("report.json")?;
//!     println!("{}", render::to_json(&outline, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Span merging**: fragments sharing a baseline become lines
//! - **Noise filtering**: margins, watermarks, junk and contents rows are dropped
//! - **Classification**: numbering, title, keyword and font-ratio rules, with a
//!   pluggable [`LabelPredictor`] for the last step
//! - **Sections**: each heading collects the paragraphs that follow it
//! - **Relevance**: TF-IDF cosine similarity blended with query keyword overlap
//! - **Ranking**: importance-weighted top-K sections with excerpts

pub mod analyzer;
pub mod classify;
pub mod collection;
pub mod error;
pub mod layout;
pub mod model;
pub mod options;
pub mod rank;
pub mod relevance;
pub mod render;
pub mod sections;

// Re-export commonly used types
pub use analyzer::{Analyzer, DocumentOutcome};
pub use classify::{
    CentroidPredictor, ClassifierOptions, FontRatioCascade, FontStatistics, LabelPredictor,
    StructureClassifier,
};
pub use collection::{discover_collections, Collection, CollectionRequest};
pub use error::{Error, Result};
pub use layout::{JsonLayoutProvider, LayoutOptions, LayoutProvider, NoiseFilter, SpanMerger};
pub use model::{
    BoundingBox, ClassifiedLine, LayoutDocument, LayoutPage, OutlineEntry, Query,
    RelevanceReport, Section, StructuralLabel, StructureOutput, TextFragment, TextLine,
};
pub use options::AnalysisOptions;
pub use rank::{RankOptions, SectionRanker};
pub use relevance::{RelevanceOptions, RelevanceScorer};
pub use render::JsonFormat;
pub use sections::SectionBuilder;

use std::path::Path;

/// Load a JSON layout file.
///
/// # Example
///
/// ```no_run
/// let doc = doclens::load_layout("report.json").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn load_layout<P: AsRef<Path>>(path: P) -> Result<LayoutDocument> {
    JsonLayoutProvider::new().load(path.as_ref())
}

/// Extract the title and outline of a JSON layout file with default options.
pub fn outline_file<P: AsRef<Path>>(path: P) -> Result<StructureOutput> {
    let doc = load_layout(path)?;
    Analyzer::new(AnalysisOptions::default())?.outline(&doc)
}

/// Rank the sections of JSON layout files against a persona and task.
///
/// Files that cannot be loaded are logged and skipped; the remaining
/// documents are ranked.
///
/// # Example
///
/// ```no_run
/// use doclens::{rank_files, Query};
///
/// let query = Query::new("Travel Planner", "Plan a 4-day trip");
/// let report = rank_files(&["guide.json", "menu.json"], &query).unwrap();
/// for section in &report.extracted_sections {
///     println!("{} {}", section.importance_rank, section.section_title);
/// }
/// ```
pub fn rank_files<P: AsRef<Path>>(paths: &[P], query: &Query) -> Result<RelevanceReport> {
    let docs: Vec<LayoutDocument> = paths
        .iter()
        .filter_map(|path| match load_layout(path) {
            Ok(doc) => Some(doc),
            Err(e) => {
                log::warn!("{}: skipped: {}", path.as_ref().display(), e);
                None
            }
        })
        .collect();
    Analyzer::new(AnalysisOptions::default())?.rank(&docs, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_layout_names_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brochure.json");
        std::fs::write(&path, r#"{"pages": []}"#).unwrap();

        let doc = load_layout(&path).unwrap();
        assert_eq!(doc.name, "brochure");
        assert_eq!(outline_file(&path).unwrap(), StructureOutput::untitled());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(load_layout("/nonexistent/doc.json"), Err(Error::Io(_))));
    }
}
