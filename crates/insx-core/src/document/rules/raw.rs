//! Fallback for unclassified documents: surface the raw text itself.

use super::FieldExtractor;
use crate::models::document::{DocumentType, ExtractedField};

/// Characters of raw text kept for unknown documents.
pub const RAW_TEXT_LIMIT: usize = 500;

const TRUNCATION_MARKER: &str = "...";

/// Emits a single "Raw Text" field holding a prefix of the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawTextExtractor;

impl FieldExtractor for RawTextExtractor {
    fn document_type(&self) -> DocumentType {
        DocumentType::Unknown
    }

    fn extract(&self, text: &str) -> Vec<ExtractedField> {
        let value = match text.char_indices().nth(RAW_TEXT_LIMIT) {
            Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
            None => text.to_string(),
        };

        vec![ExtractedField::new("Raw Text", value, 1.0)]
    }
}
