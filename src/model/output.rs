//! Output records for structure mode and relevance mode.

use serde::{Deserialize, Serialize};

use super::StructuralLabel;

/// Title used when a document has no TITLE line.
pub const UNTITLED: &str = "Untitled Document";

/// Structure-mode result: a title and a flat outline of headings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureOutput {
    /// Document title
    pub title: String,
    /// Headings H1-H4 in reading order
    pub outline: Vec<OutlineEntry>,
}

impl StructureOutput {
    /// The result for a document with no usable lines.
    pub fn untitled() -> Self {
        Self {
            title: UNTITLED.to_string(),
            outline: Vec::new(),
        }
    }

    /// Check if nothing was recovered.
    pub fn is_empty(&self) -> bool {
        self.title == UNTITLED && self.outline.is_empty()
    }
}

impl Default for StructureOutput {
    fn default() -> Self {
        Self::untitled()
    }
}

/// One heading in an outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level, H1-H4
    pub level: StructuralLabel,
    /// Heading text
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

/// Relevance-mode result for a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceReport {
    /// Run metadata
    pub metadata: ReportMetadata,
    /// Top-ranked sections
    pub extracted_sections: Vec<ExtractedSection>,
    /// Leading paragraphs of each ranked section
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

/// Metadata describing a relevance run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Names of the analysed documents, in input order
    pub input_documents: Vec<String>,
    /// Persona text
    pub persona: String,
    /// Task text
    pub job_to_be_done: String,
    /// When the run happened (RFC 3339)
    pub processing_timestamp: String,
    /// Sections found across all documents
    pub total_sections_found: usize,
    /// Sections present in `extracted_sections`
    pub top_sections_returned: usize,
    /// Wall-clock time of the run, rounded to 0.01 s
    pub processing_time_seconds: f64,
    /// Opaque caller data passed through from the collection request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_info: Option<serde_json::Value>,
}

/// A ranked section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    /// Owning document
    pub document: String,
    /// Page of the heading
    pub page_number: u32,
    /// Heading text
    pub section_title: String,
    /// Dense 1-based rank
    pub importance_rank: usize,
    /// Importance score, rounded to 4 decimals
    pub importance_score: f64,
}

/// An excerpt from a ranked section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    /// Owning document
    pub document: String,
    /// Heading of the section the excerpt belongs to
    pub section_title: String,
    /// Paragraph text, truncated if long
    pub refined_text: String,
    /// Page of the paragraph
    pub page_number: u32,
    /// Combined score of the paragraph, rounded to 4 decimals
    pub relevance_score: f64,
}
