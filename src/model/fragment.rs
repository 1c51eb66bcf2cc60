//! Layout-provider input: pages, blocks, lines and positioned text fragments.
//!
//! Coordinates follow the usual page-layout convention: the origin is the
//! top-left corner of the page and `y` grows downwards.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box `(x0, y0, x1, y1)`.
///
/// Serialized as a four-element array, matching the layout provider format.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BoundingBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        (self.x1 - self.x0).max(0.0)
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        (self.y1 - self.y0).max(0.0)
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Check whether `other` lies entirely inside this box.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        self.x0 <= other.x0 && self.y0 <= other.y0 && self.x1 >= other.x1 && self.y1 >= other.y1
    }

    /// Check that every coordinate is a finite number.
    pub fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from(b: [f32; 4]) -> Self {
        Self::new(b[0], b[1], b[2], b[3])
    }
}

impl From<BoundingBox> for [f32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x0, b.y0, b.x1, b.y1]
    }
}

/// The smallest positioned unit of text delivered by the layout provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextFragment {
    /// The text content
    pub text: String,
    /// Position on the page
    pub bbox: BoundingBox,
    /// Font size in points
    pub font_size: f32,
    /// Font name (e.g., "Helvetica-Bold")
    #[serde(default)]
    pub font_name: String,
    /// Bold flag as reported by the provider
    #[serde(default)]
    pub bold: bool,
    /// Opacity in `[0, 1]`
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

fn default_opacity() -> f32 {
    1.0
}

impl TextFragment {
    /// Create a fully opaque, non-bold fragment.
    pub fn new(text: impl Into<String>, bbox: BoundingBox, font_size: f32) -> Self {
        Self {
            text: text.into(),
            bbox,
            font_size,
            font_name: String::new(),
            bold: false,
            opacity: 1.0,
        }
    }

    /// Set the font name.
    pub fn with_font(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self
    }

    /// Set the bold flag.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set the opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Whether the fragment is bold, either flagged by the provider or
    /// implied by its font name.
    pub fn is_bold(&self) -> bool {
        if self.bold {
            return true;
        }
        let name = self.font_name.to_lowercase();
        name.contains("bold") || name.contains("black") || name.contains("heavy")
    }
}

/// A provider line: fragments the layout engine already grouped together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutLine {
    /// Fragments in reading order
    #[serde(alias = "spans")]
    pub fragments: Vec<TextFragment>,
}

impl LayoutLine {
    /// Create a line from fragments.
    pub fn new(fragments: Vec<TextFragment>) -> Self {
        Self { fragments }
    }
}

/// A provider block (a group of lines).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutBlock {
    /// Lines in the block
    pub lines: Vec<LayoutLine>,
}

impl LayoutBlock {
    /// Create a block from lines.
    pub fn new(lines: Vec<LayoutLine>) -> Self {
        Self { lines }
    }
}

/// One page of layout output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutPage {
    /// Page number (1-indexed). Zero means "use the position in the document".
    #[serde(default)]
    pub number: u32,
    /// Page width (0 if unknown)
    #[serde(default)]
    pub width: f32,
    /// Page height (0 if unknown)
    #[serde(default)]
    pub height: f32,
    /// Blocks on the page
    #[serde(default)]
    pub blocks: Vec<LayoutBlock>,
}

impl LayoutPage {
    /// Create an empty page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            blocks: Vec::new(),
        }
    }

    /// Create a US Letter page (612 x 792 points).
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0)
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: LayoutBlock) {
        self.blocks.push(block);
    }

    /// Add a single-line block holding the given fragments.
    pub fn add_line(&mut self, fragments: Vec<TextFragment>) {
        self.blocks
            .push(LayoutBlock::new(vec![LayoutLine::new(fragments)]));
    }

    /// Page geometry used for relative positions.
    pub fn geometry(&self) -> PageGeometry {
        PageGeometry {
            width: self.width,
            height: self.height,
        }
    }

    /// Total number of fragments on the page.
    pub fn fragment_count(&self) -> usize {
        self.blocks
            .iter()
            .flat_map(|b| b.lines.iter())
            .map(|l| l.fragments.len())
            .sum()
    }
}

/// Page dimensions carried alongside each merged line.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Page width (0 if unknown)
    pub width: f32,
    /// Page height (0 if unknown)
    pub height: f32,
}

impl PageGeometry {
    /// Whether both dimensions are known.
    pub fn is_known(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// A whole document as delivered by the layout provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Source document name (e.g. "report.pdf")
    #[serde(default)]
    pub name: String,
    /// Pages in order
    #[serde(default)]
    pub pages: Vec<LayoutPage>,
}

impl LayoutDocument {
    /// Create an empty document.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pages: Vec::new(),
        }
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: LayoutPage) {
        self.pages.push(page);
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Effective 1-indexed page number of the page at `index`.
    pub fn page_number(&self, index: usize) -> u32 {
        match self.pages.get(index) {
            Some(page) if page.number > 0 => page.number,
            _ => index as u32 + 1,
        }
    }

    /// Check if the document has any fragments at all.
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(|p| p.fragment_count() == 0)
    }
}
