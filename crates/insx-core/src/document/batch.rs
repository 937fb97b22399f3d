//! Sequential batch extraction that survives per-item failures.

use tracing::{debug, warn};

use crate::error::{BatchError, BatchItemError, Result};
use crate::models::document::ExtractionResult;
use crate::source::Upload;

use super::UploadExtractor;

/// Resolves a batch item identifier (usually a path) to an upload.
pub trait DocumentLoader {
    fn load(&self, id: &str) -> Result<Upload>;
}

/// Outcome of a batch run: successes in submission order, plus failures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub results: Vec<ExtractionResult>,
    pub errors: Vec<BatchItemError>,
}

impl BatchReport {
    /// Items submitted.
    pub fn total(&self) -> usize {
        self.results.len() + self.errors.len()
    }

    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Load and extract every item in `ids`.
///
/// A failing item is recorded and skipped. The run fails with
/// [`BatchError::AllFailed`] only when items were submitted and none succeeded.
pub fn extract_batch<E, L, I>(extractor: &E, loader: &L, ids: I) -> Result<BatchReport>
where
    E: UploadExtractor + ?Sized,
    L: DocumentLoader + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut report = BatchReport::default();

    for id in ids {
        let id = id.as_ref();
        let outcome = loader
            .load(id)
            .and_then(|upload| extractor.extract_upload(&upload));

        match outcome {
            Ok(result) => {
                debug!("Batch item {} -> {}", id, result.document_type);
                report.results.push(result);
            }
            Err(e) => {
                warn!("Batch item {} failed: {}", id, e);
                report.errors.push(BatchItemError {
                    id: id.to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    if report.results.is_empty() && !report.errors.is_empty() {
        return Err(BatchError::AllFailed(report.errors).into());
    }

    Ok(report)
}
