//! Layered rule classifier.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{
    repair_titles, ClassifierOptions, FeatureExtractor, FontRatioCascade, FontStatistics,
    LabelPredictor,
};
use crate::model::{ClassifiedLine, FeatureVector, StructuralLabel, TextLine};

/// Assigns every line a structural label.
///
/// Rules are evaluated per line in strict priority order, first match wins:
/// explicit numbering, title candidate, structural keyword, then the
/// configured [`LabelPredictor`] (the font-ratio cascade by default).
#[derive(Clone)]
pub struct StructureClassifier {
    options: ClassifierOptions,
    extractor: Arc<FeatureExtractor>,
    predictor: Arc<dyn LabelPredictor>,
}

impl StructureClassifier {
    /// Create a classifier using the font-ratio cascade as fallback.
    pub fn new(options: ClassifierOptions) -> Self {
        let predictor = Arc::new(FontRatioCascade::new(options.cascade.clone()));
        Self {
            extractor: Arc::new(FeatureExtractor::new(&options.keywords)),
            options,
            predictor,
        }
    }

    /// Replace the fallback predictor.
    pub fn with_predictor(mut self, predictor: Arc<dyn LabelPredictor>) -> Self {
        self.predictor = predictor;
        self
    }

    /// The classifier options.
    pub fn options(&self) -> &ClassifierOptions {
        &self.options
    }

    /// The fallback predictor.
    pub fn predictor(&self) -> &dyn LabelPredictor {
        self.predictor.as_ref()
    }

    /// Compute the feature vector of a line.
    pub fn features(&self, line: &TextLine, stats: &FontStatistics, page_count: u32) -> FeatureVector {
        self.extractor.extract(line, stats, page_count)
    }

    /// Label a single line, without title repair.
    pub fn classify_line(
        &self,
        line: &TextLine,
        stats: &FontStatistics,
        page_count: u32,
    ) -> ClassifiedLine {
        let features = self.features(line, stats, page_count);
        let label = self.label(line, &features);
        ClassifiedLine::new(line.clone(), label, features)
    }

    /// Label every line of one document and repair titles.
    pub fn classify(
        &self,
        lines: &[TextLine],
        stats: &FontStatistics,
        page_count: u32,
    ) -> Vec<ClassifiedLine> {
        let classified: Vec<ClassifiedLine> = lines
            .iter()
            .map(|line| self.classify_line(line, stats, page_count))
            .collect();

        if log::log_enabled!(log::Level::Debug) {
            let mut histogram: BTreeMap<StructuralLabel, usize> = BTreeMap::new();
            for line in &classified {
                *histogram.entry(line.label).or_insert(0) += 1;
            }
            log::debug!(
                "Classified {} lines with {}: {:?}",
                classified.len(),
                self.predictor.name(),
                histogram
            );
        }

        repair_titles(classified)
    }

    fn label(&self, line: &TextLine, features: &FeatureVector) -> StructuralLabel {
        let text = line.text.trim();

        if let Some(depth) = self.extractor.numbering_depth(text) {
            return StructuralLabel::from_depth(depth - 1);
        }

        if self.is_title_candidate(line, features) {
            return StructuralLabel::Title;
        }

        if self.extractor.has_keyword(text) {
            return if features.is_bold() || features.font_size_ratio >= self.options.keyword_h1_ratio
            {
                StructuralLabel::H1
            } else {
                StructuralLabel::H2
            };
        }

        self.predictor.predict(features)
    }

    fn is_title_candidate(&self, line: &TextLine, features: &FeatureVector) -> bool {
        let o = &self.options;
        let ratio = features.font_size_ratio;
        line.page <= o.title_max_page
            && ratio >= o.title_ratio
            && (features.is_bold() || ratio >= o.title_strong_ratio)
            && line.vertical_ratio() <= o.title_vertical_fraction
    }
}

impl Default for StructureClassifier {
    fn default() -> Self {
        Self::new(ClassifierOptions::default())
    }
}

impl std::fmt::Debug for StructureClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructureClassifier")
            .field("options", &self.options)
            .field("predictor", &self.predictor.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sample_line;

    struct Always(StructuralLabel);

    impl LabelPredictor for Always {
        fn predict(&self, _: &FeatureVector) -> StructuralLabel {
            self.0
        }
        fn name(&self) -> &str {
            "always"
        }
    }

    fn body_stats() -> FontStatistics {
        let body: Vec<TextLine> = (0..10)
            .map(|i| sample_line("Body text line", 1, 300.0 + i as f32 * 14.0, 10.0, false))
            .collect();
        FontStatistics::from_lines(&body, 12.0)
    }

    fn label_of(text: &str, page: u32, y0: f32, size: f32, bold: bool) -> StructuralLabel {
        StructureClassifier::default()
            .classify_line(&sample_line(text, page, y0, size, bold), &body_stats(), 5)
            .label
    }

    #[test]
    fn test_numbering_ignores_font() {
        assert_eq!(label_of("1.2.3 Results", 1, 100.0, 8.0, false), StructuralLabel::H3);
        assert_eq!(label_of("1.2.3 Results", 1, 100.0, 30.0, true), StructuralLabel::H3);
        assert_eq!(label_of("1 Overview", 4, 400.0, 10.0, false), StructuralLabel::H1);
        assert_eq!(label_of("2.1 Scope", 2, 400.0, 10.0, false), StructuralLabel::H2);
        assert_eq!(label_of("1.1.1.1 Detail", 2, 400.0, 10.0, false), StructuralLabel::H4);
        assert_eq!(label_of("1.1.1.1.1 Deeper", 2, 400.0, 10.0, false), StructuralLabel::H4);
    }

    #[test]
    fn test_title_candidate() {
        assert_eq!(label_of("Annual Report", 1, 80.0, 16.0, true), StructuralLabel::Title);
        assert_eq!(label_of("Annual Report", 1, 80.0, 20.0, false), StructuralLabel::Title);
        // Not bold and below the strong ratio
        assert_eq!(label_of("Annual Report", 1, 80.0, 16.0, false), StructuralLabel::H1);
        // Too late in the document
        assert_eq!(label_of("Annual Report", 4, 80.0, 20.0, true), StructuralLabel::H1);
        // Lower half of the page
        assert_eq!(label_of("Annual Report", 1, 600.0, 20.0, true), StructuralLabel::H1);
    }

    #[test]
    fn test_keyword_heading() {
        // Bold, 1.25x body on page 1
        assert_eq!(label_of("Abstract", 1, 100.0, 12.5, true), StructuralLabel::H1);
        assert_eq!(label_of("Abstract", 1, 100.0, 12.0, false), StructuralLabel::H1);
        assert_eq!(label_of("Summary", 1, 100.0, 10.0, false), StructuralLabel::H2);
    }

    #[test]
    fn test_cascade_fallback() {
        assert_eq!(label_of("Getting there", 2, 400.0, 13.5, false), StructuralLabel::H1);
        assert_eq!(label_of("Local food", 2, 400.0, 10.0, true), StructuralLabel::H3);
        assert_eq!(
            label_of("An ordinary sentence of body text.", 2, 400.0, 10.0, false),
            StructuralLabel::Paragraph
        );
    }

    #[test]
    fn test_custom_predictor_only_replaces_fallback() {
        let classifier = StructureClassifier::default()
            .with_predictor(Arc::new(Always(StructuralLabel::H4)));
        let stats = body_stats();

        let plain = classifier.classify_line(&sample_line("Plain text", 2, 400.0, 10.0, false), &stats, 5);
        assert_eq!(plain.label, StructuralLabel::H4);

        let numbered = classifier.classify_line(&sample_line("3 Costs", 2, 400.0, 10.0, false), &stats, 5);
        assert_eq!(numbered.label, StructuralLabel::H1);
        assert_eq!(classifier.predictor().name(), "always");
    }

    #[test]
    fn test_classify_repairs_titles() {
        let lines = vec![
            sample_line("First Title", 1, 60.0, 24.0, true),
            sample_line("Second Title", 1, 120.0, 28.0, true),
            sample_line("Body text line", 1, 300.0, 10.0, false),
        ];
        let classified = StructureClassifier::default().classify(&lines, &body_stats(), 1);
        let labels: Vec<StructuralLabel> = classified.iter().map(|l| l.label).collect();
        assert_eq!(
            labels,
            vec![StructuralLabel::H1, StructuralLabel::Title, StructuralLabel::Paragraph]
        );
    }
}
