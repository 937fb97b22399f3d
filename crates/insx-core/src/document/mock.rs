//! Mock extraction service.
//!
//! This service never looks at document content. It classifies by filename
//! hints alone and returns a canned field set per type with a randomly drawn
//! confidence, so callers can exercise the result contract without an OCR
//! engine. Its confidence model is unrelated to [`aggregate_confidence`].
//!
//! [`aggregate_confidence`]: super::aggregate_confidence

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::models::config::InsxConfig;
use crate::models::document::{DocumentType, ExtractedField, ExtractionResult};
use crate::source::{ContentType, Upload};

use super::classifier::KeywordClassifier;
use super::UploadExtractor;

/// Lowest confidence the mock reports.
const CONFIDENCE_FLOOR: f64 = 0.85;

/// Width of the mock confidence range above the floor.
const CONFIDENCE_SPREAD: f64 = 0.14;

/// Filename-only extraction with canned values.
pub struct MockExtractionService<R = StdRng> {
    rng: Mutex<R>,
    clock: Box<dyn Clock>,
    classifier: KeywordClassifier,
}

impl MockExtractionService<StdRng> {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic output for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Honor `mock.seed` when it is set.
    pub fn from_config(config: &InsxConfig) -> Self {
        match config.mock.seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(),
        }
    }
}

impl Default for MockExtractionService<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng + Send> MockExtractionService<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
            clock: Box::new(SystemClock),
            classifier: KeywordClassifier::new(),
        }
    }

    /// Use a different clock for `processed_at`.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Produce a canned result for an upload.
    ///
    /// Every known content type is accepted, including Word and Excel.
    pub fn extract(
        &self,
        filename: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<ExtractionResult> {
        Upload::new(filename, content, content_type).validate(&ContentType::ALL)?;

        // A poisoned lock only means another caller panicked mid-draw.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        let document_type = match self.classifier.classify_filename(filename) {
            Some(doc_type) => doc_type,
            None => *DocumentType::TYPED
                .choose(&mut *rng)
                .unwrap_or(&DocumentType::Unknown),
        };

        let extracted_fields = canned_fields(document_type, &mut *rng);
        let confidence = draw_confidence(&mut *rng);

        info!(
            "Mock extraction for {}: {} with {} canned fields",
            filename,
            document_type,
            extracted_fields.len()
        );

        Ok(ExtractionResult {
            filename: filename.to_string(),
            document_type,
            confidence,
            extracted_fields,
            processed_at: self.clock.now(),
        })
    }
}

impl<R: Rng + Send> UploadExtractor for MockExtractionService<R> {
    fn extract_upload(&self, upload: &Upload) -> Result<ExtractionResult> {
        self.extract(&upload.filename, &upload.content, &upload.content_type)
    }
}

/// A confidence in `[0.85, 0.99]` at two decimal places.
fn draw_confidence<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let raw = CONFIDENCE_FLOOR + rng.r#gen::<f64>() * CONFIDENCE_SPREAD;
    (raw * 100.0).round() / 100.0
}

/// Six-digit reference number.
fn reference_number<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(100_000..=999_999)
}

fn canned_fields<R: Rng + ?Sized>(document_type: DocumentType, rng: &mut R) -> Vec<ExtractedField> {
    match document_type {
        DocumentType::Policy => vec![
            ExtractedField::new("Policy Number", format!("POL-2024-{}", reference_number(rng)), 0.98),
            ExtractedField::new("Policy Holder", "John Smith", 0.95),
            ExtractedField::new("Coverage Type", "Comprehensive Auto Insurance", 0.92),
            ExtractedField::new("Effective Date", "01/15/2024", 0.97),
            ExtractedField::new("Expiration Date", "01/15/2025", 0.97),
            ExtractedField::new("Premium Amount", "$1,250.00", 0.94),
        ],
        DocumentType::Claim => vec![
            ExtractedField::new("Claim Number", format!("CLM-{}", reference_number(rng)), 0.98),
            ExtractedField::new("Date of Loss", "12/10/2024", 0.96),
            ExtractedField::new("Claimant Name", "John Smith", 0.94),
            ExtractedField::new("Loss Description", "Rear-end collision at intersection", 0.88),
            ExtractedField::new("Claim Amount", "$4,500.00", 0.92),
            ExtractedField::new("Claim Status", "Under Review", 0.95),
        ],
        DocumentType::Submission => vec![
            ExtractedField::new("Application ID", format!("APP-{}", reference_number(rng)), 0.97),
            ExtractedField::new("Applicant Name", "John Smith", 0.96),
            ExtractedField::new("Application Date", "01/05/2024", 0.98),
            ExtractedField::new("Requested Coverage", "Full Coverage Auto", 0.91),
            ExtractedField::new("Vehicle Year", "2022", 0.95),
            ExtractedField::new("Vehicle Make/Model", "Toyota Camry", 0.94),
        ],
        DocumentType::Unknown => vec![ExtractedField::new("Document Type", "Unknown", 0.50)],
    }
}
