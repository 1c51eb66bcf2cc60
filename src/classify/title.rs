//! Single-title repair.

use std::cmp::Ordering;

use crate::model::{ClassifiedLine, StructuralLabel};

/// Keep at most one TITLE per document.
///
/// The surviving title is the candidate with the largest font size, then the
/// earliest page, then the highest position on the page. Every other
/// candidate becomes H1.
pub fn repair_titles(lines: Vec<ClassifiedLine>) -> Vec<ClassifiedLine> {
    let winner = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.label == StructuralLabel::Title)
        .min_by(|(_, a), (_, b)| title_order(a, b))
        .map(|(i, _)| i);

    let Some(winner) = winner else {
        return lines;
    };

    let mut demoted = 0;
    let repaired: Vec<ClassifiedLine> = lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            if line.label == StructuralLabel::Title && i != winner {
                demoted += 1;
                line.relabeled(StructuralLabel::H1)
            } else {
                line
            }
        })
        .collect();

    if demoted > 0 {
        log::debug!(
            "Title repair: kept {:?}, demoted {} candidates to H1",
            repaired[winner].text(),
            demoted
        );
    }
    repaired
}

/// Ordering in which the best title candidate comes first.
fn title_order(a: &ClassifiedLine, b: &ClassifiedLine) -> Ordering {
    b.line
        .font_size
        .total_cmp(&a.line.font_size)
        .then(a.line.page.cmp(&b.line.page))
        .then(a.line.bbox.y0.total_cmp(&b.line.bbox.y0))
}
