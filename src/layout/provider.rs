//! Layout provider abstraction.
//!
//! A layout provider turns a source document into pages of positioned text
//! fragments. The analysis pipeline only ever sees [`LayoutDocument`] values,
//! so any engine able to emit fragments with font metadata can be plugged in.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::LayoutDocument;

/// Abstract interface for loading layout data.
pub trait LayoutProvider: Send + Sync {
    /// Load the layout of the document at `path`.
    fn load(&self, path: &Path) -> Result<LayoutDocument>;

    /// Short name used in log messages.
    fn name(&self) -> &'static str;
}

/// Reads layout documents serialized as JSON.
///
/// The expected shape is
/// `{"name": ..., "pages": [{"number", "width", "height", "blocks": [{"lines": [{"fragments": [...]}]}]}]}`
/// where each fragment is `{text, bbox: [x0, y0, x1, y1], font_size, font_name, bold, opacity}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLayoutProvider;

impl JsonLayoutProvider {
    /// Create a JSON layout provider.
    pub fn new() -> Self {
        Self
    }

    /// Parse a layout document from bytes.
    pub fn from_slice(&self, data: &[u8]) -> Result<LayoutDocument> {
        let doc: LayoutDocument = serde_json::from_slice(data)?;
        check_document(&doc)?;
        Ok(doc)
    }

    /// Parse a layout document from a reader.
    pub fn from_reader<R: Read>(&self, reader: R) -> Result<LayoutDocument> {
        let doc: LayoutDocument = serde_json::from_reader(reader)?;
        check_document(&doc)?;
        Ok(doc)
    }
}

impl LayoutProvider for JsonLayoutProvider {
    fn load(&self, path: &Path) -> Result<LayoutDocument> {
        let file = File::open(path)?;
        let mut doc = self.from_reader(BufReader::new(file))?;

        if doc.name.is_empty() {
            doc.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }

        log::debug!(
            "Loaded {} ({} pages) from {}",
            doc.name,
            doc.page_count(),
            path.display()
        );
        Ok(doc)
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

fn check_document(doc: &LayoutDocument) -> Result<()> {
    for (index, page) in doc.pages.iter().enumerate() {
        if !(page.width >= 0.0 && page.height >= 0.0) {
            return Err(Error::InvalidLayout(format!(
                "page {} has invalid dimensions {}x{}",
                index + 1,
                page.width,
                page.height
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "pages": [{
            "number": 1, "width": 612, "height": 792,
            "blocks": [{"lines": [{"spans": [
                {"text": "Hello", "bbox": [72, 100, 110, 112], "font_size": 12, "font_name": "Arial-Bold"}
            ]}]}]
        }]
    }"#;

    #[test]
    fn test_from_slice() {
        let doc = JsonLayoutProvider::new().from_slice(SAMPLE.as_bytes()).unwrap();
        assert_eq!(doc.page_count(), 1);
        let frag = &doc.pages[0].blocks[0].lines[0].fragments[0];
        assert_eq!(frag.text, "Hello");
        assert!(frag.is_bold());
    }

    #[test]
    fn test_load_defaults_name_to_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        File::create(&path)
            .unwrap()
            .write_all(SAMPLE.as_bytes())
            .unwrap();

        let doc = JsonLayoutProvider::new().load(&path).unwrap();
        assert_eq!(doc.name, "report");
    }

    #[test]
    fn test_invalid_json_and_dimensions() {
        let provider = JsonLayoutProvider::new();
        assert!(matches!(provider.from_slice(b"{not json"), Err(Error::Json(_))));

        let bad = r#"{"pages": [{"width": -1, "height": 792}]}"#;
        assert!(matches!(
            provider.from_slice(bad.as_bytes()),
            Err(Error::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = JsonLayoutProvider::new()
            .load(Path::new("/nonexistent/layout.json"))
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
