//! doclens CLI - document outlines and persona-driven section ranking

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use doclens::collection::layout_files;
use doclens::render::{outline_to_markdown, to_json};
use doclens::{
    discover_collections, AnalysisOptions, Analyzer, CentroidPredictor, Collection,
    JsonFormat, JsonLayoutProvider, LayoutDocument, LayoutProvider, Query, StructureOutput,
};

type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "doclens")]
#[command(version)]
#[command(about = "Extract document outlines and rank sections for a persona and task", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract title and heading outline from layout files
    Outline {
        /// Layout JSON file or directory of them
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "output")]
        output: PathBuf,

        /// Also write a Markdown outline per document
        #[arg(long)]
        markdown: bool,

        /// Fitted predictor (from `doclens train`)
        #[arg(long, value_name = "FILE")]
        model: Option<PathBuf>,

        /// Options file (JSON, partial)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Rank the sections of a directory of layout files
    Rank {
        /// Directory of layout JSON files
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Reader persona
        #[arg(long, env = "DOCLENS_PERSONA")]
        persona: String,

        /// Task to accomplish
        #[arg(long, env = "DOCLENS_JOB")]
        job: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Number of sections to return
        #[arg(long)]
        top_k: Option<usize>,

        /// Options file (JSON, partial)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Process every "Collection*" directory under a root
    Collections {
        /// Root directory
        #[arg(value_name = "ROOT", default_value = ".")]
        root: PathBuf,

        /// Options file (JSON, partial)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Fit a nearest-centroid predictor on rule-labelled layouts
    Train {
        /// Layout JSON file or directory of them
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Where to write the model
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Options file (JSON, partial)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Outline {
            input,
            output,
            markdown,
            model,
            config,
            sequential,
        } => cmd_outline(
            &input,
            &output,
            markdown,
            model.as_deref(),
            config.as_deref(),
            sequential,
        ),
        Commands::Rank {
            input,
            persona,
            job,
            output,
            top_k,
            config,
        } => cmd_rank(&input, Query::new(persona, job), output.as_deref(), top_k, config.as_deref()),
        Commands::Collections { root, config } => cmd_collections(&root, config.as_deref()),
        Commands::Train {
            input,
            output,
            config,
        } => cmd_train(&input, &output, config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_options(config: Option<&Path>) -> CliResult<AnalysisOptions> {
    match config {
        Some(path) => Ok(AnalysisOptions::from_file(path)?),
        None => Ok(AnalysisOptions::default()),
    }
}

/// A single layout file, or every layout file in a directory.
fn input_files(input: &Path) -> CliResult<Vec<PathBuf>> {
    if input.is_dir() {
        Ok(layout_files(input)?)
    } else if input.is_file() {
        Ok(vec![input.to_path_buf()])
    } else {
        Err(format!("{} does not exist", input.display()).into())
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}

/// Load layouts, reporting and skipping unreadable ones.
///
/// Each document is paired with the file it came from.
fn load_documents(files: &[PathBuf]) -> Vec<(PathBuf, LayoutDocument)> {
    let provider = JsonLayoutProvider::new();
    let pb = progress_bar(files.len());
    let mut docs = Vec::with_capacity(files.len());

    for path in files {
        pb.set_message(path.display().to_string());
        match provider.load(path) {
            Ok(doc) => docs.push((path.clone(), doc)),
            Err(e) => pb.println(format!("{} {}: {}", "Skipped".yellow(), path.display(), e)),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();
    docs
}

fn documents_only(loaded: Vec<(PathBuf, LayoutDocument)>) -> Vec<LayoutDocument> {
    loaded.into_iter().map(|(_, doc)| doc).collect()
}

/// Write `<stem>.json` (and `<stem>.md`) for one document.
fn write_outline(
    output: &Path,
    input: &Path,
    outline: &StructureOutput,
    markdown: bool,
) -> CliResult<PathBuf> {
    let stem = input
        .file_stem()
        .ok_or_else(|| format!("{} has no file name", input.display()))?
        .to_string_lossy();
    let json_path = output.join(format!("{}.json", stem));
    fs::write(&json_path, to_json(outline, JsonFormat::Pretty)?)?;
    if markdown {
        fs::write(output.join(format!("{}.md", stem)), outline_to_markdown(outline))?;
    }
    Ok(json_path)
}

fn cmd_outline(
    input: &Path,
    output: &Path,
    markdown: bool,
    model: Option<&Path>,
    config: Option<&Path>,
    sequential: bool,
) -> CliResult {
    let mut options = load_options(config)?;
    if sequential {
        options = options.sequential();
    }

    let mut analyzer = Analyzer::new(options)?;
    if let Some(path) = model {
        let predictor = CentroidPredictor::from_json(&fs::read(path)?)?;
        analyzer = analyzer.with_predictor(Arc::new(predictor));
        println!("{} {}", "Using model".cyan(), path.display());
    }

    let files = input_files(input)?;
    let (paths, docs): (Vec<PathBuf>, Vec<LayoutDocument>) =
        load_documents(&files).into_iter().unzip();
    fs::create_dir_all(output)?;

    let mut written = 0usize;
    for (path, outcome) in paths.iter().zip(analyzer.outline_batch(&docs)) {
        let result = outcome
            .result
            .map_err(Into::into)
            .and_then(|outline| {
                write_outline(output, path, &outline, markdown)
                    .map(|json_path| (json_path, outline.outline.len()))
            });
        match result {
            Ok((json_path, headings)) => {
                println!(
                    "  {} {} ({} headings)",
                    "├─".dimmed(),
                    json_path.display(),
                    headings
                );
                written += 1;
            }
            Err(e) => println!(
                "  {} {}: {}",
                "├─".dimmed(),
                path.display().to_string().red(),
                e
            ),
        }
    }

    println!(
        "\n{} {} of {} documents",
        "Done:".green().bold(),
        written,
        files.len()
    );
    Ok(())
}

fn cmd_rank(
    input: &Path,
    query: Query,
    output: Option<&Path>,
    top_k: Option<usize>,
    config: Option<&Path>,
) -> CliResult {
    let mut options = load_options(config)?;
    if let Some(k) = top_k {
        options.rank.top_k = k;
    }
    let analyzer = Analyzer::new(options)?;

    let docs = documents_only(load_documents(&input_files(input)?));
    let report = analyzer.rank(&docs, &query)?;
    let json = to_json(&report, JsonFormat::Pretty)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!(
            "{} {} ({} of {} sections)",
            "Saved to".green(),
            path.display(),
            report.metadata.top_sections_returned,
            report.metadata.total_sections_found
        );
    } else {
        println!("{}", json);
    }
    Ok(())
}

fn cmd_collections(root: &Path, config: Option<&Path>) -> CliResult {
    let analyzer = Analyzer::new(load_options(config)?)?;
    let provider = JsonLayoutProvider::new();
    let dirs = discover_collections(root)?;

    if dirs.is_empty() {
        println!("{} no Collection* directories in {}", "Note:".yellow(), root.display());
        return Ok(());
    }

    for dir in &dirs {
        let name = dir.file_name().unwrap_or_default().to_string_lossy();
        let result = Collection::open(dir).and_then(|c| c.run(&analyzer, &provider));
        match result {
            Ok(report) => println!(
                "{} {} ({} sections, {:.2}s)",
                "✓".green(),
                name,
                report.metadata.top_sections_returned,
                report.metadata.processing_time_seconds
            ),
            Err(e) => println!("{} {}: {}", "✗".red(), name, e),
        }
    }
    Ok(())
}

fn cmd_train(input: &Path, output: &Path, config: Option<&Path>) -> CliResult {
    let analyzer = Analyzer::new(load_options(config)?)?;
    let docs = documents_only(load_documents(&input_files(input)?));

    let samples = analyzer.training_samples(&docs);
    let model = CentroidPredictor::fit(&samples)?;
    fs::write(output, to_json(&model, JsonFormat::Pretty)?)?;

    println!(
        "{} {} ({} samples, {} labels)",
        "Saved model to".green(),
        output.display(),
        samples.len(),
        model.centroids.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_layout(path: &Path, name: &str) {
        let json = format!(
            r#"{{"name": "{}", "pages": [{{"number": 1, "width": 612, "height": 792, "blocks": [{{"lines": [
                {{"fragments": [{{"text": "Getting Started", "bbox": [72, 100, 240, 116], "font_size": 16, "bold": true}}]}},
                {{"fragments": [{{"text": "Install the package and run the setup tool.", "bbox": [72, 130, 400, 140], "font_size": 10}}]}}
            ]}}]}}]}}"#,
            name
        );
        fs::write(path, json).unwrap();
    }

    #[test]
    fn test_outline_files_named_after_input_stem() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_layout(&input.path().join("a.json"), "sub/dir/report");
        write_layout(&input.path().join("b.json"), "good");

        cmd_outline(input.path(), output.path(), true, None, None, true).unwrap();

        assert!(output.path().join("a.json").is_file());
        assert!(output.path().join("a.md").is_file());
        assert!(output.path().join("b.json").is_file());
        assert!(!output.path().join("good.json").exists());
    }

    #[test]
    fn test_outline_write_failure_does_not_stop_batch() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_layout(&input.path().join("a.json"), "a");
        write_layout(&input.path().join("b.json"), "b");
        // A directory where a.json should go makes that one write fail
        fs::create_dir(output.path().join("a.json")).unwrap();

        assert!(cmd_outline(input.path(), output.path(), false, None, None, true).is_ok());
        assert!(output.path().join("a.json").is_dir());
        assert!(output.path().join("b.json").is_file());
    }
}
