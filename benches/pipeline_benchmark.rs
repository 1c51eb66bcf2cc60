//! Benchmarks for the doclens pipeline.
//!
//! Run with: cargo bench
//!
//! These benchmarks run outline extraction and section ranking over a
//! synthetic corpus of layout documents.

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use doclens::relevance::CorpusIndex;
use doclens::{
    AnalysisOptions, Analyzer, BoundingBox, LayoutDocument, LayoutPage, Query, RelevanceOptions,
    TextFragment,
};

const TOPICS: [&str; 6] = ["budget", "museum", "beach", "nightlife", "cuisine", "transport"];

/// Creates a synthetic document with the given number of pages.
fn create_test_document(index: usize, page_count: usize) -> LayoutDocument {
    let mut doc = LayoutDocument::new(format!("doc-{}.pdf", index));

    for p in 0..page_count {
        let mut page = LayoutPage::letter(p as u32 + 1);
        let mut y = 60.0;
        if p == 0 {
            page.add_line(vec![fragment("Regional Travel Guide", y, 26.0, true)]);
            y += 50.0;
        }
        for s in 0..4 {
            let topic = TOPICS[(index + p + s) % TOPICS.len()];
            page.add_line(vec![fragment(&format!("{}.{} Notes on {}", p + 1, s + 1, topic), y, 14.0, true)]);
            y += 22.0;
            for l in 0..6 {
                let text = format!(
                    "Line {} covers {} options for a group trip, with prices and opening hours.",
                    l, topic
                );
                page.add_line(vec![fragment(&text, y, 10.0, false)]);
                y += 14.0;
            }
            y += 8.0;
        }
        doc.add_page(page);
    }
    doc
}

fn fragment(text: &str, y0: f32, size: f32, bold: bool) -> TextFragment {
    TextFragment::new(text, BoundingBox::new(72.0, y0, 540.0, y0 + size), size).with_bold(bold)
}

/// Benchmark outline extraction at various sizes.
fn bench_outline(c: &mut Criterion) {
    let mut group = c.benchmark_group("outline");
    let analyzer = Analyzer::new(AnalysisOptions::default()).unwrap();

    for page_count in [1, 5, 20].iter() {
        let doc = create_test_document(0, *page_count);
        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| analyzer.outline(black_box(&doc)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark ranking a collection, sequential and parallel.
fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    let docs: Vec<LayoutDocument> = (0..8).map(|i| create_test_document(i, 5)).collect();
    let query = Query::new("Travel Planner", "Plan a 4-day trip for a group of friends");
    let now = Utc::now();

    for (name, options) in [
        ("parallel", AnalysisOptions::default()),
        ("sequential", AnalysisOptions::default().sequential()),
    ] {
        let analyzer = Analyzer::new(options).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| analyzer.rank_with_clock(black_box(&docs), &query, now, 0.0).unwrap());
        });
    }

    group.finish();
}

/// Benchmark fitting the TF-IDF index alone.
fn bench_tfidf(c: &mut Criterion) {
    let texts: Vec<String> = (0..2000)
        .map(|i| format!("Line {} about {} and a trip", i, TOPICS[i % TOPICS.len()]))
        .collect();
    let options = RelevanceOptions::default();

    c.bench_function("tfidf_build_2000", |b| {
        b.iter(|| CorpusIndex::build(black_box(&texts), &options));
    });
}

criterion_group!(benches, bench_outline, bench_rank, bench_tfidf);
criterion_main!(benches);
