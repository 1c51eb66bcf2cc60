//! Merge positioned fragments into logical lines.

use unicode_normalization::UnicodeNormalization;

use super::{LayoutOptions, NoiseFilter};
use crate::error::{Error, Result};
use crate::model::{BoundingBox, LayoutDocument, PageGeometry, TextFragment, TextLine};

/// Common typographic ligatures and their expansions.
const LIGATURES: [(char, &str); 7] = [
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
    ('\u{FB05}', "st"),
    ('\u{FB06}', "st"),
];

/// Groups fragments of each provider line by proximity and filters the result.
#[derive(Debug, Clone)]
pub struct SpanMerger {
    filter: NoiseFilter,
}

/// A line under construction.
struct PendingLine {
    text: String,
    anchor_y0: f32,
    bbox: BoundingBox,
    font_size: f32,
    bold: bool,
    fragment_count: usize,
}

impl PendingLine {
    fn start(fragment: &TextFragment, text: String) -> Self {
        Self {
            text,
            anchor_y0: fragment.bbox.y0,
            bbox: fragment.bbox,
            font_size: fragment.font_size,
            bold: fragment.is_bold(),
            fragment_count: 1,
        }
    }

    fn accepts(&self, fragment: &TextFragment, options: &LayoutOptions) -> bool {
        (fragment.bbox.y0 - self.anchor_y0).abs() < options.vertical_tolerance
            && fragment.bbox.x0 - self.bbox.x1 < options.horizontal_gap
    }

    fn push(&mut self, fragment: &TextFragment, text: &str) {
        self.text.push(' ');
        self.text.push_str(text);
        self.bbox = self.bbox.union(&fragment.bbox);
        self.font_size = self.font_size.max(fragment.font_size);
        self.bold |= fragment.is_bold();
        self.fragment_count += 1;
    }

    fn finish(self, page: u32, geometry: PageGeometry) -> TextLine {
        TextLine {
            text: self.text.trim().to_string(),
            bbox: self.bbox,
            font_size: self.font_size,
            bold: self.bold,
            page,
            geometry,
            fragment_count: self.fragment_count,
        }
    }
}

impl SpanMerger {
    /// Create a merger with the given options.
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            filter: NoiseFilter::new(options),
        }
    }

    /// The noise filter used by this merger.
    pub fn filter(&self) -> &NoiseFilter {
        &self.filter
    }

    /// Merge every page of a document into filtered lines, in page order.
    pub fn merge_document(&self, doc: &LayoutDocument) -> Result<Vec<TextLine>> {
        let mut lines = Vec::new();
        let mut dropped_fragments = 0usize;
        let mut dropped_lines = 0usize;

        for (index, page) in doc.pages.iter().enumerate() {
            let page_number = doc.page_number(index);
            let geometry = page.geometry();

            for block in &page.blocks {
                for group in &block.lines {
                    for fragment in &group.fragments {
                        validate_fragment(fragment, &doc.name, page_number)?;
                    }

                    let (merged, skipped) = self.merge_group(&group.fragments, page_number, geometry);
                    dropped_fragments += skipped;

                    for line in merged {
                        if let Some(reason) = self.filter.text_noise(&line.text) {
                            log::trace!("Dropped line {:?}: {}", line.text, reason);
                            dropped_lines += 1;
                        } else {
                            lines.push(line);
                        }
                    }
                }
            }
        }

        log::debug!(
            "{}: merged {} lines ({} fragments and {} lines dropped as noise)",
            doc.name,
            lines.len(),
            dropped_fragments,
            dropped_lines
        );

        Ok(lines)
    }

    /// Merge one provider line group. Returns the lines and the number of
    /// fragments skipped as noise.
    pub fn merge_group(
        &self,
        fragments: &[TextFragment],
        page: u32,
        geometry: PageGeometry,
    ) -> (Vec<TextLine>, usize) {
        let options = self.filter.options();
        let mut lines = Vec::new();
        let mut current: Option<PendingLine> = None;
        let mut skipped = 0;

        for fragment in fragments {
            if self.filter.is_watermark(fragment, geometry) {
                skipped += 1;
                continue;
            }

            let text = self.clean_text(&fragment.text);
            if text.is_empty() {
                continue;
            }

            match current.as_mut() {
                Some(line) if line.accepts(fragment, options) => line.push(fragment, &text),
                _ => {
                    if let Some(done) = current.take() {
                        lines.push(done.finish(page, geometry));
                    }
                    current = Some(PendingLine::start(fragment, text));
                }
            }
        }

        if let Some(done) = current {
            lines.push(done.finish(page, geometry));
        }

        (lines, skipped)
    }

    fn clean_text(&self, text: &str) -> String {
        let text = text.trim();
        if !self.filter.options().normalize_text {
            return text.to_string();
        }

        let mut result = String::with_capacity(text.len());
        for c in text.nfc() {
            match LIGATURES.iter().find(|(lig, _)| *lig == c) {
                Some((_, expansion)) => result.push_str(expansion),
                None => result.push(c),
            }
        }
        result
    }
}

impl Default for SpanMerger {
    fn default() -> Self {
        Self::new(LayoutOptions::default())
    }
}

fn validate_fragment(fragment: &TextFragment, doc: &str, page: u32) -> Result<()> {
    if !fragment.bbox.is_finite() || !fragment.font_size.is_finite() {
        return Err(Error::InvalidLayout(format!(
            "{}: fragment {:?} on page {} has a non-finite coordinate or font size",
            doc, fragment.text, page
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LayoutPage;

    fn frag(text: &str, x0: f32, y0: f32, width: f32, size: f32) -> TextFragment {
        TextFragment::new(text, BoundingBox::new(x0, y0, x0 + width, y0 + size), size)
    }

    fn letter() -> PageGeometry {
        LayoutPage::letter(1).geometry()
    }

    #[test]
    fn test_merge_adjacent_fragments() {
        let merger = SpanMerger::default();
        let fragments = vec![
            frag("Hello", 72.0, 100.0, 30.0, 12.0),
            frag("world", 110.0, 101.0, 30.0, 14.0).with_bold(true),
        ];
        let (lines, skipped) = merger.merge_group(&fragments, 1, letter());

        assert_eq!(skipped, 0);
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line.text, "Hello world");
        assert_eq!(line.font_size, 14.0);
        assert!(line.bold);
        assert_eq!(line.fragment_count, 2);
        assert!(line.bbox.contains(&fragments[0].bbox));
        assert!(line.bbox.contains(&fragments[1].bbox));
    }

    #[test]
    fn test_vertical_or_horizontal_gap_starts_new_line() {
        let merger = SpanMerger::default();
        let fragments = vec![
            frag("First", 72.0, 100.0, 30.0, 12.0),
            frag("Below", 72.0, 115.0, 30.0, 12.0),
            frag("Far right", 300.0, 115.0, 40.0, 12.0),
        ];
        let (lines, _) = merger.merge_group(&fragments, 1, letter());
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["First", "Below", "Far right"]);
    }

    #[test]
    fn test_watermark_does_not_break_merge() {
        let merger = SpanMerger::default();
        let fragments = vec![
            frag("Annual", 72.0, 100.0, 40.0, 12.0),
            frag("DRAFT", 112.0, 100.0, 40.0, 12.0).with_opacity(0.1),
            frag("Report", 118.0, 100.0, 40.0, 12.0),
        ];
        let (lines, skipped) = merger.merge_group(&fragments, 1, letter());
        assert_eq!(skipped, 1);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Annual Report");
    }

    #[test]
    fn test_ligatures_are_expanded() {
        let merger = SpanMerger::default();
        let fragments = vec![frag("\u{FB01}nding \u{FB02}owers", 72.0, 100.0, 80.0, 12.0)];
        let (lines, _) = merger.merge_group(&fragments, 1, letter());
        assert_eq!(lines[0].text, "finding flowers");
    }

    #[test]
    fn test_merge_document_drops_junk_and_margins() {
        let mut page = LayoutPage::letter(1);
        page.add_line(vec![frag("Introduction", 72.0, 100.0, 80.0, 16.0)]);
        page.add_line(vec![frag("12", 300.0, 400.0, 10.0, 10.0)]);
        page.add_line(vec![frag("Running header", 72.0, 10.0, 80.0, 9.0)]);
        let mut doc = LayoutDocument::new("sample");
        doc.add_page(page);

        let lines = SpanMerger::default().merge_document(&doc).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Introduction");
        assert_eq!(lines[0].page, 1);
    }

    #[test]
    fn test_non_finite_coordinates_are_rejected() {
        let mut page = LayoutPage::letter(1);
        page.add_line(vec![frag("Broken", f32::NAN, 100.0, 10.0, 12.0)]);
        let mut doc = LayoutDocument::new("broken");
        doc.add_page(page);

        let err = SpanMerger::default().merge_document(&doc).unwrap_err();
        assert!(matches!(err, Error::InvalidLayout(_)));
    }
}
