//! Markdown rendering of document outlines.

use crate::model::StructureOutput;

/// Render an outline as a Markdown document.
///
/// The title becomes a level-one heading; headings become a bullet list
/// indented two spaces per level below H1, each with its page number.
pub fn outline_to_markdown(output: &StructureOutput) -> String {
    let mut md = format!("# {}\n", escape(&output.title));

    if output.outline.is_empty() {
        md.push_str("\n_No headings found._\n");
        return md;
    }

    md.push('\n');
    for entry in &output.outline {
        let depth = entry.level.level().unwrap_or(1).saturating_sub(1) as usize;
        md.push_str(&"  ".repeat(depth));
        md.push_str(&format!("- {} (p. {})\n", escape(&entry.text), entry.page));
    }
    md
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '*' | '_' | '`' | '[' | ']' | '#') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OutlineEntry, StructuralLabel};

    #[test]
    fn test_nested_outline() {
        let output = StructureOutput {
            title: "Field Guide".to_string(),
            outline: vec![
                OutlineEntry {
                    level: StructuralLabel::H1,
                    text: "1 Birds".to_string(),
                    page: 2,
                },
                OutlineEntry {
                    level: StructuralLabel::H3,
                    text: "1.1.1 Owls".to_string(),
                    page: 4,
                },
            ],
        };
        let md = outline_to_markdown(&output);
        assert_eq!(md, "# Field Guide\n\n- 1 Birds (p. 2)\n    - 1.1.1 Owls (p. 4)\n");
    }

    #[test]
    fn test_empty_outline() {
        let md = outline_to_markdown(&StructureOutput::untitled());
        assert!(md.starts_with("# Untitled Document\n"));
        assert!(md.contains("No headings"));
    }

    #[test]
    fn test_escapes_markup() {
        assert_eq!(escape("a*b_c"), "a\\*b\\_c");
    }
}
