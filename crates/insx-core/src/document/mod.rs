//! Insurance document classification and field extraction.

mod batch;
mod classifier;
mod confidence;
mod mock;
mod parser;
pub mod rules;

pub use batch::{BatchReport, DocumentLoader, extract_batch};
pub use classifier::{CategoryProfile, KeywordClassifier, KeywordScores, PROFILES};
pub use confidence::aggregate_confidence;
pub use mock::MockExtractionService;
pub use parser::{DocumentPipeline, OcrExtractionService};

pub use crate::error::BatchItemError;

use crate::error::Result;
use crate::models::document::ExtractionResult;
use crate::source::Upload;

/// Trait for services that turn an upload into an extraction result.
pub trait UploadExtractor {
    /// Extract a result from an uploaded document.
    fn extract_upload(&self, upload: &Upload) -> Result<ExtractionResult>;
}
