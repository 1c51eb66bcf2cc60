//! Integration tests for collection directories.

use std::fs;
use std::path::Path;

use doclens::collection::{LAYOUT_DIR, OUTPUT_FILE, REQUEST_FILE};
use doclens::render::{to_json, JsonFormat};
use doclens::{
    discover_collections, AnalysisOptions, Analyzer, BoundingBox, Collection, JsonLayoutProvider,
    LayoutDocument, LayoutPage, TextFragment,
};

fn write_layout(dir: &Path, file: &str, heading: &str, paragraph: &str) {
    let mut page = LayoutPage::letter(1);
    page.add_line(vec![TextFragment::new(heading, BoundingBox::new(72.0, 80.0, 300.0, 94.0), 14.0)
        .with_font("Helvetica-Bold")]);
    page.add_line(vec![TextFragment::new(paragraph, BoundingBox::new(72.0, 110.0, 500.0, 120.0), 10.0)]);
    let mut doc = LayoutDocument::new("");
    doc.add_page(page);
    fs::write(dir.join(file), to_json(&doc, JsonFormat::Compact).unwrap()).unwrap();
}

fn create_collection(root: &Path, name: &str) -> std::path::PathBuf {
    let dir = root.join(name);
    let layouts = dir.join(LAYOUT_DIR);
    fs::create_dir_all(&layouts).unwrap();

    write_layout(&layouts, "cities.json", "Coastal Cities", "Nice and Marseille suit a short trip.");
    write_layout(&layouts, "cuisine.json", "Regional Cuisine", "Bouillabaisse is a fish stew.");
    fs::write(layouts.join("broken.json"), "{ not json").unwrap();

    fs::write(
        dir.join(REQUEST_FILE),
        r#"{
            "challenge_info": {"challenge_id": "round_1b_002", "test_case_name": "travel_planner"},
            "documents": [
                {"filename": "cities.pdf", "title": "Cities"},
                {"filename": "cuisine.pdf", "title": "Cuisine"},
                {"filename": "broken.pdf", "title": "Broken"}
            ],
            "persona": {"role": "Travel Planner"},
            "job_to_be_done": {"task": "Plan a trip of 4 days for a group of friends."}
        }"#,
    )
    .unwrap();
    dir
}

#[test]
fn test_run_writes_report() {
    let root = tempfile::tempdir().unwrap();
    let dir = create_collection(root.path(), "Collection 1");

    let analyzer = Analyzer::new(AnalysisOptions::default()).unwrap();
    let collection = Collection::open(&dir).unwrap();
    let report = collection.run(&analyzer, &JsonLayoutProvider::new()).unwrap();

    // The unreadable layout is skipped; the others keep their requested names
    assert_eq!(report.metadata.input_documents, vec!["cities.pdf", "cuisine.pdf"]);
    assert_eq!(report.metadata.total_sections_found, 2);
    assert_eq!(report.extracted_sections[0].section_title, "Coastal Cities");

    let written: serde_json::Value =
        serde_json::from_slice(&fs::read(dir.join(OUTPUT_FILE)).unwrap()).unwrap();
    assert_eq!(written["metadata"]["persona"], "Travel Planner");
    assert_eq!(written["metadata"]["challenge_info"]["challenge_id"], "round_1b_002");
    assert_eq!(written["extracted_sections"][0]["importance_rank"], 1);
}

#[test]
fn test_discover_and_run_all() {
    let root = tempfile::tempdir().unwrap();
    create_collection(root.path(), "Collection 2");
    create_collection(root.path(), "Collection 1");
    fs::create_dir(root.path().join("Collection 3")).unwrap();

    let analyzer = Analyzer::new(AnalysisOptions::default()).unwrap();
    let provider = JsonLayoutProvider::new();
    let dirs = discover_collections(root.path()).unwrap();
    assert_eq!(dirs.len(), 3);

    let results: Vec<bool> = dirs
        .iter()
        .map(|d| Collection::open(d).and_then(|c| c.run(&analyzer, &provider)).is_ok())
        .collect();
    // The incomplete collection fails alone
    assert_eq!(results, vec![true, true, false]);
    assert!(root.path().join("Collection 1").join(OUTPUT_FILE).exists());
    assert!(root.path().join("Collection 2").join(OUTPUT_FILE).exists());
}
