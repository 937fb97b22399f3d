//! Rendering extraction results as JSON, CSV or text.

use chrono::SecondsFormat;

use insx_core::ExtractionResult;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per field
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for outputs written to disk.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["filename", "document_type", "field_name", "value", "confidence"])?;

    for field in &result.extracted_fields {
        let confidence = format!("{:.2}", field.confidence);
        wtr.write_record([
            result.filename.as_str(),
            result.document_type.as_str(),
            field.field_name.as_str(),
            field.value.as_str(),
            confidence.as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("File: {}\n", result.filename));
    output.push_str(&format!("Type: {}\n", result.document_type));
    output.push_str(&format!("Confidence: {:.2}\n", result.confidence));
    output.push_str(&format!(
        "Processed: {}\n",
        result.processed_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    output.push('\n');

    if result.extracted_fields.is_empty() {
        output.push_str("No fields extracted\n");
        return output;
    }

    output.push_str("Fields:\n");
    let width = result
        .extracted_fields
        .iter()
        .map(|f| f.field_name.len())
        .max()
        .unwrap_or(0);

    for field in &result.extracted_fields {
        // Multi-line captures stay on one line.
        let value = field.value.replace('\n', " ");
        output.push_str(&format!(
            "  {:<width$}  {}  ({:.2})\n",
            field.field_name,
            value,
            field.confidence,
            width = width
        ));
    }

    output
}
