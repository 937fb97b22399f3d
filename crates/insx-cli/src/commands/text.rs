//! Text command - run the extraction pipeline on raw text, skipping acquisition.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use console::style;

use insx_core::DocumentPipeline;

use super::output::{OutputFormat, format_result};

/// Arguments for the text command.
#[derive(Args)]
pub struct TextArgs {
    /// Text file to read, or "-" for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// File name to classify with (default: the input's file name)
    #[arg(long)]
    filename: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

pub async fn run(args: TextArgs) -> anyhow::Result<()> {
    let from_stdin = args.input.as_os_str() == "-";

    let text = if from_stdin {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(&args.input)?
    };

    let filename = match args.filename {
        Some(name) => name,
        None if from_stdin => String::new(),
        None => args
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    let result = DocumentPipeline::new().extract_text(&filename, &text);
    let output = format_result(&result, args.format)?;

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

    Ok(())
}
