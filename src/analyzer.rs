//! End-to-end analysis: outlines and query-driven section ranking.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use rayon::prelude::*;

use crate::classify::{FontStatistics, LabelPredictor, StructureClassifier};
use crate::error::Result;
use crate::layout::SpanMerger;
use crate::model::{
    ClassifiedLine, FeatureVector, LayoutDocument, Query, RelevanceReport, StructuralLabel,
    StructureOutput,
};
use crate::options::AnalysisOptions;
use crate::rank::{structure_output, ReportAssembler, ReportContext, SectionRanker};
use crate::relevance::RelevanceScorer;
use crate::sections::SectionBuilder;

/// The result of analysing one document of a batch.
#[derive(Debug)]
pub struct DocumentOutcome {
    /// Document name
    pub document: String,
    /// The outline, or why the document could not be analysed
    pub result: Result<StructureOutput>,
}

impl DocumentOutcome {
    /// Check if the document was analysed.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// The outline, if the document was analysed.
    pub fn output(&self) -> Option<&StructureOutput> {
        self.result.as_ref().ok()
    }
}

/// Runs the full pipeline with one set of options.
///
/// ```
/// use doclens::{Analyzer, AnalysisOptions, LayoutDocument};
///
/// let analyzer = Analyzer::new(AnalysisOptions::default()).unwrap();
/// let outline = analyzer.outline(&LayoutDocument::new("empty.pdf")).unwrap();
/// assert_eq!(outline.title, "Untitled Document");
/// ```
#[derive(Debug, Clone)]
pub struct Analyzer {
    options: AnalysisOptions,
    merger: SpanMerger,
    classifier: StructureClassifier,
    scorer: RelevanceScorer,
    ranker: SectionRanker,
    assembler: ReportAssembler,
}

impl Analyzer {
    /// Create an analyzer after validating `options`.
    pub fn new(options: AnalysisOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            merger: SpanMerger::new(options.layout.clone()),
            classifier: StructureClassifier::new(options.classifier.clone()),
            scorer: RelevanceScorer::new(options.relevance.clone()),
            ranker: SectionRanker::new(options.rank.clone()),
            assembler: ReportAssembler::new(options.rank.clone()),
            options,
        })
    }

    /// Use a custom predictor for lines no explicit rule labels.
    pub fn with_predictor(mut self, predictor: Arc<dyn LabelPredictor>) -> Self {
        self.classifier = self.classifier.with_predictor(predictor);
        self
    }

    /// The analysis options.
    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// The structure classifier.
    pub fn classifier(&self) -> &StructureClassifier {
        &self.classifier
    }

    /// Merge, filter and classify the lines of one document.
    pub fn classify_document(&self, doc: &LayoutDocument) -> Result<Vec<ClassifiedLine>> {
        let lines = self.merger.merge_document(doc)?;
        let stats = FontStatistics::from_lines(&lines, self.options.classifier.fallback_body_size);
        log::debug!(
            "{}: body size {:.1} (mean {:.2}, std dev {:.2})",
            doc.name,
            stats.body_size,
            stats.mean,
            stats.std_dev
        );

        let lines = self.merger.filter().drop_toc(&lines, stats.body_size);
        Ok(self.classifier.classify(&lines, &stats, doc.page_count()))
    }

    /// Title and outline of one document.
    pub fn outline(&self, doc: &LayoutDocument) -> Result<StructureOutput> {
        let classified = self.classify_document(doc)?;
        Ok(structure_output(&classified))
    }

    /// Outlines of many documents, in input order.
    ///
    /// A failing document is reported in its outcome; the others carry on.
    pub fn outline_batch(&self, docs: &[LayoutDocument]) -> Vec<DocumentOutcome> {
        let run = |doc: &LayoutDocument| {
            let result = self.outline(doc);
            if let Err(e) = &result {
                log::warn!("{}: {}", doc.name, e);
            }
            DocumentOutcome {
                document: doc.name.clone(),
                result,
            }
        };

        if self.options.parallel {
            docs.par_iter().map(run).collect()
        } else {
            docs.iter().map(run).collect()
        }
    }

    /// Rule-labelled feature vectors of `docs`, for fitting a predictor.
    pub fn training_samples(&self, docs: &[LayoutDocument]) -> Vec<(FeatureVector, StructuralLabel)> {
        self.classify_all(docs)
            .into_iter()
            .flatten()
            .map(|line| (line.features, line.label))
            .collect()
    }

    /// Rank the sections of `docs` against `query`.
    pub fn rank(&self, docs: &[LayoutDocument], query: &Query) -> Result<RelevanceReport> {
        let started = Instant::now();
        let timestamp = Utc::now();
        let mut report = self.rank_with_clock(docs, query, timestamp, 0.0)?;
        report.metadata.processing_time_seconds =
            crate::rank::round_to(started.elapsed().as_secs_f64(), 2);
        Ok(report)
    }

    /// Rank with a fixed timestamp and duration, for reproducible output.
    pub fn rank_with_clock(
        &self,
        docs: &[LayoutDocument],
        query: &Query,
        timestamp: DateTime<Utc>,
        elapsed_seconds: f64,
    ) -> Result<RelevanceReport> {
        let classified = self.classify_all(docs);
        let scored = self.scorer.score_documents(&classified, query)?;

        let builder = SectionBuilder::new();
        let sections: Vec<_> = docs
            .iter()
            .zip(&scored)
            .flat_map(|(doc, lines)| builder.build(&doc.name, lines))
            .collect();
        let total_sections = sections.len();

        let ranked = self.ranker.rank(sections);
        log::info!(
            "Ranked {} sections from {} documents, returning {}",
            total_sections,
            docs.len(),
            ranked.len()
        );

        Ok(self.assembler.assemble(
            &ranked,
            ReportContext {
                documents: docs.iter().map(|d| d.name.clone()).collect(),
                query,
                total_sections,
                timestamp,
                elapsed_seconds,
                challenge_info: None,
            },
        ))
    }

    /// Classify every document; failures become empty line lists.
    fn classify_all(&self, docs: &[LayoutDocument]) -> Vec<Vec<ClassifiedLine>> {
        let run = |doc: &LayoutDocument| {
            self.classify_document(doc).unwrap_or_else(|e| {
                log::warn!("{}: skipped: {}", doc.name, e);
                Vec::new()
            })
        };

        if self.options.parallel {
            docs.par_iter().map(run).collect()
        } else {
            docs.iter().map(run).collect()
        }
    }
}
