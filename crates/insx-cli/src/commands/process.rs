//! Process command - extract fields from a single document.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use insx_core::DocumentLoader;

use super::output::{OutputFormat, format_result};
use super::{Extractor, FileLoader, load_config};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, PNG or JPEG; Word and Excel with --mock)
    #[arg(required = true)]
    input: PathBuf,

    /// Use the mock extractor (filename-only, canned values)
    #[arg(long)]
    mock: bool,

    /// Seed for the mock extractor
    #[arg(long, requires = "mock")]
    seed: Option<u64>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Show extraction confidence scores
    #[arg(long)]
    show_confidence: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(model_dir) = &args.model_dir {
        config.ocr.model_dir = model_dir.clone();
    }

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Loading document...");
    let upload = FileLoader.load(&args.input.to_string_lossy())?;

    pb.set_message(if args.mock {
        "Generating mock result..."
    } else {
        "Extracting fields..."
    });
    let extractor = Extractor::build(&config, args.mock, args.seed);
    let (result, cause) = extractor.extract_with_cause(&upload)?;

    pb.finish_and_clear();

    if let Some(cause) = cause {
        eprintln!(
            "{} No text could be read from {}: {}",
            style("⚠").yellow(),
            upload.filename,
            cause
        );
    }

    // Format output
    let output = format_result(&result, args.format)?;

    // Write output
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_confidence {
        println!();
        println!(
            "{} Overall confidence: {:.0}%{}",
            style("ℹ").blue(),
            result.confidence * 100.0,
            if extractor.is_mock() { " (mock)" } else { "" }
        );
        for field in &result.extracted_fields {
            println!("   {}: {:.0}%", field.field_name, field.confidence * 100.0);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
