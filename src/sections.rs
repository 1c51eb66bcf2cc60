//! Grouping classified lines into sections.

use crate::model::{Section, SectionLine};

/// Groups a document's lines into heading-led sections.
///
/// Lines are put in reading order (page, then top edge; stable for equal
/// positions). A heading closes the open section and opens a new one;
/// paragraphs append to the open section; paragraphs before the first
/// heading are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionBuilder;

impl SectionBuilder {
    /// Create a section builder.
    pub fn new() -> Self {
        Self
    }

    /// Build the sections of one document.
    pub fn build<L: SectionLine + Clone>(&self, document: &str, lines: &[L]) -> Vec<Section<L>> {
        let mut ordered: Vec<&L> = lines.iter().collect();
        ordered.sort_by(|a, b| {
            let (a, b) = (&a.classified().line, &b.classified().line);
            a.page.cmp(&b.page).then(a.bbox.y0.total_cmp(&b.bbox.y0))
        });

        let mut sections = Vec::new();
        let mut current: Option<Section<L>> = None;
        let mut orphans = 0usize;

        for line in ordered {
            if line.classified().label.is_heading() {
                if let Some(done) = current.take() {
                    sections.push(done);
                }
                current = Some(Section {
                    document: document.to_string(),
                    heading: line.clone(),
                    content: Vec::new(),
                });
            } else if let Some(open) = current.as_mut() {
                open.content.push(line.clone());
            } else {
                orphans += 1;
            }
        }
        if let Some(done) = current {
            sections.push(done);
        }

        log::debug!(
            "{}: built {} sections ({} leading paragraphs dropped)",
            document,
            sections.len(),
            orphans
        );
        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{sample_line, ClassifiedLine, FeatureVector, StructuralLabel};

    fn line(text: &str, page: u32, y0: f32, label: StructuralLabel) -> ClassifiedLine {
        ClassifiedLine::new(
            sample_line(text, page, y0, 11.0, false),
            label,
            FeatureVector::default(),
        )
    }

    #[test]
    fn test_headings_open_sections() {
        use StructuralLabel::*;
        let lines = vec![
            line("Orphan text", 1, 50.0, Paragraph),
            line("Guide", 1, 80.0, Title),
            line("Intro text", 1, 120.0, Paragraph),
            line("Cities", 1, 200.0, H1),
            line("Nice", 1, 240.0, H4),
            line("Nice is sunny", 1, 260.0, Paragraph),
            line("More on Nice", 2, 60.0, Paragraph),
        ];
        let sections = SectionBuilder::new().build("guide.pdf", &lines);
        let titles: Vec<&str> = sections.iter().map(|s| s.title()).collect();
        assert_eq!(titles, vec!["Guide", "Cities", "Nice"]);
        assert_eq!(sections[0].content.len(), 1);
        assert!(sections[1].is_empty());
        assert_eq!(sections[2].content.len(), 2);
        assert_eq!(sections[2].document, "guide.pdf");
        assert_eq!(sections[2].content_chars(), "Nice is sunny".len() + "More on Nice".len());
    }

    #[test]
    fn test_reading_order_is_restored() {
        use StructuralLabel::*;
        let lines = vec![
            line("Later text", 2, 100.0, Paragraph),
            line("Heading", 1, 300.0, H1),
            line("Early text", 1, 400.0, Paragraph),
        ];
        let sections = SectionBuilder::new().build("doc", &lines);
        assert_eq!(sections.len(), 1);
        let texts: Vec<&str> = sections[0].content.iter().map(|l| l.text()).collect();
        assert_eq!(texts, vec!["Early text", "Later text"]);
    }

    #[test]
    fn test_no_heading_no_sections() {
        let lines = vec![line("Only text", 1, 100.0, StructuralLabel::Paragraph)];
        assert!(SectionBuilder::new().build("doc", &lines).is_empty());
    }
}
