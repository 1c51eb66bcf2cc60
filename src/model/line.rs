//! Merged text lines and their classified form.

use serde::{Deserialize, Serialize};

use super::{BoundingBox, PageGeometry, StructuralLabel};

/// A logical text row: fragments sharing a baseline, merged left to right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Merged text (fragments joined by single spaces)
    pub text: String,
    /// Union of the contributing fragment boxes
    pub bbox: BoundingBox,
    /// Largest contributing font size
    pub font_size: f32,
    /// True if any contributing fragment is bold
    pub bold: bool,
    /// Page number (1-indexed)
    pub page: u32,
    /// Dimensions of the page the line sits on
    pub geometry: PageGeometry,
    /// Number of fragments merged into this line
    pub fragment_count: usize,
}

impl TextLine {
    /// Text length in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Share of uppercase characters over all characters.
    pub fn uppercase_ratio(&self) -> f32 {
        let total = self.char_len();
        if total == 0 {
            return 0.0;
        }
        let upper = self.text.chars().filter(|c| c.is_uppercase()).count();
        upper as f32 / total as f32
    }

    /// Check if every letter in the line is uppercase.
    pub fn is_all_caps(&self) -> bool {
        let mut letters = self.text.chars().filter(|c| c.is_alphabetic()).peekable();
        letters.peek().is_some() && letters.all(|c| c.is_uppercase())
    }

    /// Left edge as a fraction of page width (0 if the width is unknown).
    pub fn horizontal_ratio(&self) -> f32 {
        if self.geometry.width > 0.0 {
            self.bbox.x0 / self.geometry.width
        } else {
            0.0
        }
    }

    /// Top edge as a fraction of page height (0 if the height is unknown).
    pub fn vertical_ratio(&self) -> f32 {
        if self.geometry.height > 0.0 {
            self.bbox.y0 / self.geometry.height
        } else {
            0.0
        }
    }
}

/// Numeric features describing a line, consumed by label predictors.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Absolute font size
    pub font_size: f32,
    /// Font size divided by the document body size
    pub font_size_ratio: f32,
    /// Left edge / page width
    pub x_ratio: f32,
    /// Top edge / page height
    pub y_ratio: f32,
    /// 1.0 if bold
    pub bold: f32,
    /// Page number / page count
    pub page_ratio: f32,
    /// Text length in characters
    pub length: f32,
    /// Share of uppercase characters
    pub uppercase_ratio: f32,
    /// 1.0 if the line starts with a dotted section number
    pub section_number: f32,
    /// 1.0 if the line ends with a colon
    pub colon_terminated: f32,
    /// 1.0 if every letter is uppercase
    pub all_caps: f32,
    /// 1.0 if the line contains a structural keyword
    pub has_keyword: f32,
}

impl FeatureVector {
    /// Number of features.
    pub const LEN: usize = 12;

    /// Feature names in [`FeatureVector::to_array`] order.
    pub const NAMES: [&'static str; Self::LEN] = [
        "font_size",
        "font_size_ratio",
        "x_ratio",
        "y_ratio",
        "bold",
        "page_ratio",
        "length",
        "uppercase_ratio",
        "section_number",
        "colon_terminated",
        "all_caps",
        "has_keyword",
    ];

    /// Flatten into a fixed-size array.
    pub fn to_array(&self) -> [f32; Self::LEN] {
        [
            self.font_size,
            self.font_size_ratio,
            self.x_ratio,
            self.y_ratio,
            self.bold,
            self.page_ratio,
            self.length,
            self.uppercase_ratio,
            self.section_number,
            self.colon_terminated,
            self.all_caps,
            self.has_keyword,
        ]
    }

    /// Whether the bold flag is set.
    pub fn is_bold(&self) -> bool {
        self.bold > 0.5
    }
}

/// A line together with its label and the features used to derive it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    /// The merged line
    pub line: TextLine,
    /// Assigned structural role
    pub label: StructuralLabel,
    /// Features the label was derived from
    pub features: FeatureVector,
}

impl ClassifiedLine {
    /// Create a classified line.
    pub fn new(line: TextLine, label: StructuralLabel, features: FeatureVector) -> Self {
        Self {
            line,
            label,
            features,
        }
    }

    /// The line text.
    pub fn text(&self) -> &str {
        &self.line.text
    }

    /// Page number (1-indexed).
    pub fn page(&self) -> u32 {
        self.line.page
    }

    /// Copy of this line carrying a different label.
    pub fn relabeled(&self, label: StructuralLabel) -> Self {
        Self {
            label,
            ..self.clone()
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_line(text: &str, page: u32, y0: f32, font_size: f32, bold: bool) -> TextLine {
    TextLine {
        text: text.to_string(),
        bbox: BoundingBox::new(72.0, y0, 300.0, y0 + font_size),
        font_size,
        bold,
        page,
        geometry: PageGeometry {
            width: 612.0,
            height: 792.0,
        },
        fragment_count: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uppercase_ratio() {
        let line = sample_line("ABcd", 1, 100.0, 12.0, false);
        assert!((line.uppercase_ratio() - 0.5).abs() < 1e-6);

        let empty = sample_line("", 1, 100.0, 12.0, false);
        assert_eq!(empty.uppercase_ratio(), 0.0);
    }

    #[test]
    fn test_all_caps() {
        assert!(sample_line("ABSTRACT 1", 1, 0.0, 12.0, false).is_all_caps());
        assert!(!sample_line("Abstract", 1, 0.0, 12.0, false).is_all_caps());
        assert!(!sample_line("123", 1, 0.0, 12.0, false).is_all_caps());
    }

    #[test]
    fn test_position_ratios() {
        let line = sample_line("Hello", 1, 396.0, 12.0, false);
        assert!((line.vertical_ratio() - 0.5).abs() < 1e-6);
        assert!((line.horizontal_ratio() - 72.0 / 612.0).abs() < 1e-6);
    }

    #[test]
    fn test_feature_array_order() {
        let f = FeatureVector {
            font_size: 14.0,
            has_keyword: 1.0,
            ..Default::default()
        };
        let arr = f.to_array();
        assert_eq!(arr[0], 14.0);
        assert_eq!(arr[FeatureVector::LEN - 1], 1.0);
        assert_eq!(FeatureVector::NAMES[1], "font_size_ratio");
    }

    #[test]
    fn test_relabeled_keeps_line() {
        let c = ClassifiedLine::new(
            sample_line("Intro", 1, 50.0, 18.0, true),
            StructuralLabel::Title,
            FeatureVector::default(),
        );
        let h1 = c.relabeled(StructuralLabel::H1);
        assert_eq!(h1.label, StructuralLabel::H1);
        assert_eq!(h1.line, c.line);
    }
}
