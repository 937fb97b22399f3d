//! Batch processing command for multiple documents.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use insx_core::error::{BatchError, InsxError};
use insx_core::{BatchItemError, DocumentLoader, ExtractionResult, Upload, extract_batch};

use super::output::{OutputFormat, format_result};
use super::{Extractor, FileLoader, content_type_for, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Use the mock extractor (filename-only, canned values)
    #[arg(long)]
    mock: bool,

    /// Seed for the mock extractor
    #[arg(long, requires = "mock")]
    seed: Option<u64>,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

/// Advances the progress bar as each file is loaded.
struct ProgressLoader<'a> {
    inner: FileLoader,
    pb: &'a ProgressBar,
}

impl DocumentLoader for ProgressLoader<'_> {
    fn load(&self, id: &str) -> insx_core::Result<Upload> {
        self.pb.inc(1);
        self.pb.set_message(display_name(id));
        self.inner.load(id)
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(model_dir) = &args.model_dir {
        config.ocr.model_dir = model_dir.clone();
    }

    // Expand glob pattern
    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    // Create output directory if specified
    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let extractor = Extractor::build(&config, args.mock, args.seed);
    let has_images = files
        .iter()
        .any(|p| content_type_for(p).starts_with("image/"));
    if extractor.lacks_ocr_engine() && has_images {
        eprintln!(
            "{} OCR engine not loaded (check ocr.model_dir); image files will yield no text",
            style("⚠").yellow()
        );
    }
    let loader = ProgressLoader {
        inner: FileLoader,
        pb: &pb,
    };
    let ids: Vec<String> = files.iter().map(|p| p.to_string_lossy().into_owned()).collect();

    let outcome = extract_batch(&extractor, &loader, &ids);
    pb.finish_and_clear();

    let (results, errors) = match outcome {
        Ok(report) => (report.results, report.errors),
        Err(InsxError::Batch(BatchError::AllFailed(errors))) => (Vec::new(), errors),
        Err(e) => return Err(e.into()),
    };

    // Write outputs
    if let Some(output_dir) = &args.output_dir {
        let mut taken = HashSet::new();
        for result in &results {
            let name = output_name(&result.filename, args.format.extension(), &mut taken);
            let output_path = output_dir.join(&name);

            fs::write(&output_path, format_result(result, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    // Generate summary if requested
    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results, &errors)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    // Print summary
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len() + errors.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(results.len()).green(),
        style(errors.len()).red()
    );

    if !errors.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for error in &errors {
            println!("  - {}: {}", error.id, error.message);
        }
    }

    if results.is_empty() {
        anyhow::bail!("All {} files failed to process", errors.len());
    }

    Ok(())
}

/// Output file name for a result, unique within one batch.
///
/// `a.pdf` becomes `a.json`; a later `a.png` becomes `a.png.json`, and any
/// further clash gets a numeric suffix.
fn output_name(filename: &str, extension: &str, taken: &mut HashSet<String>) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");

    let preferred = format!("{}.{}", stem, extension);
    let mut name = preferred.clone();
    if taken.contains(&name) {
        name = format!("{}.{}", filename, extension);
    }
    let mut n = 2;
    while taken.contains(&name) {
        name = format!("{}-{}.{}", stem, n, extension);
        n += 1;
    }

    if name != preferred {
        eprintln!(
            "{} Output for {} written as {} to avoid overwriting",
            style("⚠").yellow(),
            filename,
            name
        );
    }

    taken.insert(name.clone());
    name
}

fn display_name(id: &str) -> String {
    Path::new(id)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| id.to_string())
}

fn write_summary(
    path: &Path,
    results: &[ExtractionResult],
    errors: &[BatchItemError],
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "document_type",
        "confidence",
        "field_count",
        "error",
    ])?;

    for result in results {
        let confidence = format!("{:.2}", result.confidence);
        let field_count = result.extracted_fields.len().to_string();
        wtr.write_record([
            result.filename.as_str(),
            "success",
            result.document_type.as_str(),
            confidence.as_str(),
            field_count.as_str(),
            "",
        ])?;
    }

    for error in errors {
        wtr.write_record([
            display_name(&error.id).as_str(),
            "failed",
            "",
            "",
            "",
            error.message.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
