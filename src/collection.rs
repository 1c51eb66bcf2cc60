//! Document collections: a request file plus a directory of layouts.
//!
//! ```text
//! Collection 1/
//!   challenge1b_input.json
//!   layouts/
//!     guide.json
//!     menu.json
//!   challenge1b_output.json   (written)
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analyzer::Analyzer;
use crate::error::{Error, Result};
use crate::layout::LayoutProvider;
use crate::model::{LayoutDocument, Query, RelevanceReport};
use crate::render::{to_json, JsonFormat};

/// Name of the request file inside a collection.
pub const REQUEST_FILE: &str = "challenge1b_input.json";

/// Name of the report written into a collection.
pub const OUTPUT_FILE: &str = "challenge1b_output.json";

/// Directory holding the layout files of a collection.
pub const LAYOUT_DIR: &str = "layouts";

/// The persona of a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    /// Role description
    pub role: String,
}

/// The task of a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobToBeDone {
    /// Task description
    pub task: String,
}

/// A document named by a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Source file name (e.g. "guide.pdf")
    pub filename: String,
    /// Display title
    #[serde(default)]
    pub title: Option<String>,
}

impl DocumentRef {
    /// File name without extension.
    pub fn stem(&self) -> &str {
        Path::new(&self.filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.filename)
    }
}

/// Contents of a collection request file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionRequest {
    /// Who is reading
    pub persona: Persona,
    /// What they need to do
    pub job_to_be_done: JobToBeDone,
    /// Documents to analyse; empty means every layout file
    #[serde(default)]
    pub documents: Vec<DocumentRef>,
    /// Opaque caller data, copied into the report metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_info: Option<serde_json::Value>,
}

impl CollectionRequest {
    /// Parse a request from JSON.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    /// The query formed by persona role and task.
    pub fn query(&self) -> Query {
        Query::new(self.persona.role.clone(), self.job_to_be_done.task.clone())
    }
}

/// Sub-directories of `root` whose name starts with "Collection", sorted by name.
pub fn discover_collections(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root.as_ref())? {
        let entry = entry?;
        let path = entry.path();
        let is_collection = entry
            .file_name()
            .to_str()
            .map_or(false, |name| name.starts_with("Collection"));
        if is_collection && path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    log::debug!("Found {} collections in {}", dirs.len(), root.as_ref().display());
    Ok(dirs)
}

/// Layout files (`*.json`) in `dir`, sorted by file name.
pub fn layout_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map_or(false, |e| e.eq_ignore_ascii_case("json"));
        if is_json && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// An opened collection directory.
#[derive(Debug, Clone)]
pub struct Collection {
    dir: PathBuf,
    request: CollectionRequest,
    layouts: Vec<(PathBuf, String)>,
}

impl Collection {
    /// Read the request and list the layout files of `dir`.
    ///
    /// When the request names documents, only layouts whose file stem matches
    /// one of them are used, in layout file order.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let request_path = dir.join(REQUEST_FILE);
        if !request_path.is_file() {
            return Err(Error::Collection(format!(
                "{} has no {}",
                dir.display(),
                REQUEST_FILE
            )));
        }
        let layout_dir = dir.join(LAYOUT_DIR);
        if !layout_dir.is_dir() {
            return Err(Error::Collection(format!(
                "{} has no {}/ directory",
                dir.display(),
                LAYOUT_DIR
            )));
        }

        let request = CollectionRequest::from_json(&fs::read(&request_path)?)?;
        let mut layouts = Vec::new();
        for path in layout_files(&layout_dir)? {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            if request.documents.is_empty() {
                layouts.push((path, stem));
            } else if let Some(doc) = request.documents.iter().find(|d| d.stem() == stem) {
                layouts.push((path, doc.filename.clone()));
            }
        }

        if layouts.len() < request.documents.len() {
            log::warn!(
                "{}: {} of {} requested documents have layouts",
                dir.display(),
                layouts.len(),
                request.documents.len()
            );
        }

        Ok(Self {
            dir,
            request,
            layouts,
        })
    }

    /// The collection directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The parsed request.
    pub fn request(&self) -> &CollectionRequest {
        &self.request
    }

    /// Layout files to analyse.
    pub fn layout_paths(&self) -> impl Iterator<Item = &Path> {
        self.layouts.iter().map(|(p, _)| p.as_path())
    }

    /// Where the report is written.
    pub fn output_path(&self) -> PathBuf {
        self.dir.join(OUTPUT_FILE)
    }

    /// Load every layout; unreadable ones are logged and skipped.
    ///
    /// Documents are named after the request entry they match, or after the
    /// layout file stem.
    pub fn load_documents(&self, provider: &dyn LayoutProvider) -> Vec<LayoutDocument> {
        self.layouts
            .iter()
            .filter_map(|(path, name)| match provider.load(path) {
                Ok(mut doc) => {
                    doc.name = name.clone();
                    Some(doc)
                }
                Err(e) => {
                    log::warn!("{}: skipped: {}", path.display(), e);
                    None
                }
            })
            .collect()
    }

    /// Analyse the collection and write the report.
    pub fn run(&self, analyzer: &Analyzer, provider: &dyn LayoutProvider) -> Result<RelevanceReport> {
        let docs = self.load_documents(provider);
        let mut report = analyzer.rank(&docs, &self.request.query())?;
        report.metadata.challenge_info = self.request.challenge_info.clone();

        fs::write(self.output_path(), to_json(&report, JsonFormat::Pretty)?)?;
        log::info!("Wrote {}", self.output_path().display());
        Ok(report)
    }
}
