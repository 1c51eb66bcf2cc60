//! Output record assembly.

use chrono::{DateTime, Utc};

use super::RankOptions;
use crate::model::{
    ClassifiedLine, ExtractedSection, OutlineEntry, Query, RelevanceReport, ReportMetadata,
    ScoredSection, StructuralLabel, StructureOutput, SubsectionAnalysis, UNTITLED,
};

/// Title and H1-H4 outline of one document's classified lines.
pub fn structure_output(lines: &[ClassifiedLine]) -> StructureOutput {
    let title = lines
        .iter()
        .find(|l| l.label == StructuralLabel::Title)
        .map(|l| l.text().trim().to_string())
        .unwrap_or_else(|| UNTITLED.to_string());

    let outline = lines
        .iter()
        .filter(|l| l.label.is_outline_level())
        .map(|l| OutlineEntry {
            level: l.label,
            text: l.text().trim().to_string(),
            page: l.page(),
        })
        .collect();

    StructureOutput { title, outline }
}

/// Inputs of a relevance report besides the ranked sections.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Document names in input order
    pub documents: Vec<String>,
    /// The query
    pub query: &'a Query,
    /// Sections found before ranking
    pub total_sections: usize,
    /// Run timestamp
    pub timestamp: DateTime<Utc>,
    /// Run duration in seconds
    pub elapsed_seconds: f64,
    /// Opaque caller data
    pub challenge_info: Option<serde_json::Value>,
}

/// Builds relevance reports from ranked sections.
#[derive(Debug, Clone, Default)]
pub struct ReportAssembler {
    options: RankOptions,
}

impl ReportAssembler {
    /// Create an assembler with the given options.
    pub fn new(options: RankOptions) -> Self {
        Self { options }
    }

    /// Assemble the report.
    pub fn assemble(&self, ranked: &[ScoredSection], context: ReportContext<'_>) -> RelevanceReport {
        let extracted_sections = ranked
            .iter()
            .map(|s| ExtractedSection {
                document: s.section.document.clone(),
                page_number: s.section.page(),
                section_title: s.section.title().trim().to_string(),
                importance_rank: s.rank,
                importance_score: round_to(s.importance_score, 4),
            })
            .collect::<Vec<_>>();

        let subsection_analysis = ranked
            .iter()
            .flat_map(|s| {
                s.section
                    .content
                    .iter()
                    .take(self.options.excerpts_per_section)
                    .map(move |line| SubsectionAnalysis {
                        document: s.section.document.clone(),
                        section_title: s.section.title().trim().to_string(),
                        refined_text: self.truncate(line.line.text()),
                        page_number: line.line.page(),
                        relevance_score: round_to(line.scores.combined, 4),
                    })
            })
            .collect();

        RelevanceReport {
            metadata: ReportMetadata {
                input_documents: context.documents,
                persona: context.query.persona.clone(),
                job_to_be_done: context.query.task.clone(),
                processing_timestamp: context.timestamp.to_rfc3339(),
                total_sections_found: context.total_sections,
                top_sections_returned: extracted_sections.len(),
                processing_time_seconds: round_to(context.elapsed_seconds, 2),
                challenge_info: context.challenge_info,
            },
            extracted_sections,
            subsection_analysis,
        }
    }

    /// Cut text longer than the excerpt limit and mark the cut.
    pub fn truncate(&self, text: &str) -> String {
        let limit = self.options.excerpt_chars;
        if text.chars().count() > limit {
            let mut cut: String = text.chars().take(limit).collect();
            cut.push_str("...");
            cut
        } else {
            text.to_string()
        }
    }
}

/// Round to a number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
