//! Extraction pipeline: classify, extract fields, aggregate confidence.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{AcquisitionError, Result};
use crate::models::document::ExtractionResult;
use crate::source::{ContentType, TextSource, Upload};

use super::classifier::KeywordClassifier;
use super::confidence::aggregate_confidence;
use super::rules::extractor_for;
use super::UploadExtractor;

/// Turns raw document text into an [`ExtractionResult`].
pub struct DocumentPipeline {
    classifier: KeywordClassifier,
    clock: Box<dyn Clock>,
}

impl DocumentPipeline {
    /// Create a pipeline stamping results with the system clock.
    pub fn new() -> Self {
        Self {
            classifier: KeywordClassifier::new(),
            clock: Box::new(SystemClock),
        }
    }

    /// Use a different clock for `processed_at`.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Run classification, field extraction and confidence aggregation on `text`.
    pub fn extract_text(&self, filename: &str, text: &str) -> ExtractionResult {
        let start = Instant::now();

        let document_type = self.classifier.classify(text, filename);
        let extracted_fields = extractor_for(document_type).extract(text);
        let confidence = aggregate_confidence(&extracted_fields);

        info!(
            "Extracted {} fields from {} as {} (confidence {:.2}) in {}us",
            extracted_fields.len(),
            filename,
            document_type,
            confidence,
            start.elapsed().as_micros()
        );

        ExtractionResult {
            filename: filename.to_string(),
            document_type,
            confidence,
            extracted_fields,
            processed_at: self.clock.now(),
        }
    }
}

impl Default for DocumentPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Validates uploads, acquires their text and runs the [`DocumentPipeline`].
///
/// Acquisition failures never fail an extraction: the document is processed
/// as if it had no text and comes back as `unknown`.
pub struct OcrExtractionService<S: TextSource> {
    pipeline: DocumentPipeline,
    source: S,
}

impl<S: TextSource> OcrExtractionService<S> {
    pub fn new(source: S) -> Self {
        Self {
            pipeline: DocumentPipeline::new(),
            source,
        }
    }

    /// Use a different clock for `processed_at`.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.pipeline = self.pipeline.with_clock(clock);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Extract fields from an uploaded document.
    ///
    /// Only PDF, PNG and JPEG uploads are accepted; empty uploads are rejected.
    pub fn extract(
        &self,
        filename: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<ExtractionResult> {
        self.extract_with_cause(filename, content, content_type)
            .map(|(result, _)| result)
    }

    /// Like [`extract`](Self::extract), also returning the acquisition error
    /// that was absorbed as empty text, if any.
    pub fn extract_with_cause(
        &self,
        filename: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<(ExtractionResult, Option<AcquisitionError>)> {
        let upload = Upload::new(filename, content, content_type);
        let content_type = upload.validate(&ContentType::OCR_SUPPORTED)?;

        let (text, cause) = match self.source.acquire_text(content, content_type) {
            Ok(text) => (text, None),
            Err(e) => {
                warn!("Text acquisition failed for {}: {}", filename, e);
                (String::new(), Some(e))
            }
        };
        debug!("Acquired {} chars of text from {}", text.len(), filename);

        Ok((self.pipeline.extract_text(filename, &text), cause))
    }
}

impl<S: TextSource> UploadExtractor for OcrExtractionService<S> {
    fn extract_upload(&self, upload: &Upload) -> Result<ExtractionResult> {
        self.extract(&upload.filename, &upload.content, &upload.content_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::{InputError, InsxError};
    use crate::models::document::{DocumentType, ExtractedField};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    /// Returns the same text for every document.
    struct StaticText(&'static str);

    impl TextSource for StaticText {
        fn acquire_text(
            &self,
            _content: &[u8],
            _content_type: ContentType,
        ) -> std::result::Result<String, AcquisitionError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingSource;

    impl TextSource for FailingSource {
        fn acquire_text(
            &self,
            _content: &[u8],
            _content_type: ContentType,
        ) -> std::result::Result<String, AcquisitionError> {
            Err(AcquisitionError::Ocr("engine crashed".to_string()))
        }
    }

    const POLICY_TEXT: &str =
        "Policy Number: POL-998877\nInsured: Jane Doe\nPremium: $1,200.00\nEffective 03/01/2023";

    #[test]
    fn test_policy_end_to_end() {
        let result = DocumentPipeline::new().extract_text("upload.pdf", POLICY_TEXT);

        assert_eq!(result.document_type, DocumentType::Policy);
        assert_eq!(
            result.extracted_fields,
            vec![
                ExtractedField::new("Policy Number", "POL-998877", 0.90),
                ExtractedField::new("Policy Holder", "Jane Doe\nPremium", 0.85),
                ExtractedField::new("Effective Date", "03/01/2023", 0.80),
                ExtractedField::new("Premium Amount", "$1,200.00", 0.85),
            ]
        );
        assert_eq!(result.confidence, 0.93);
    }

    #[test]
    fn test_empty_text_is_unknown_with_capped_confidence() {
        let result = DocumentPipeline::new().extract_text("random.pdf", "");

        assert_eq!(result.document_type, DocumentType::Unknown);
        assert_eq!(
            result.extracted_fields,
            vec![ExtractedField::new("Raw Text", "", 1.0)]
        );
        assert_eq!(result.confidence, 0.99);
    }

    #[test]
    fn test_processed_at_comes_from_clock() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
        let pipeline = DocumentPipeline::new().with_clock(FixedClock(at));

        let result = pipeline.extract_text("a.pdf", POLICY_TEXT);
        assert_eq!(result.processed_at, at);
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
        let pipeline = DocumentPipeline::new().with_clock(FixedClock(at));

        assert_eq!(
            pipeline.extract_text("a.pdf", POLICY_TEXT),
            pipeline.extract_text("a.pdf", POLICY_TEXT)
        );
    }

    #[test]
    fn test_service_runs_pipeline_on_acquired_text() {
        let service = OcrExtractionService::new(StaticText(POLICY_TEXT));

        let result = service
            .extract("scan.png", b"\x89PNG", "image/png")
            .unwrap();

        assert_eq!(result.filename, "scan.png");
        assert_eq!(result.document_type, DocumentType::Policy);
        assert_eq!(result.value("Policy Number"), Some("POL-998877"));
    }

    #[test]
    fn test_acquisition_failure_degrades_to_unknown() {
        let service = OcrExtractionService::new(FailingSource);

        let result = service
            .extract("random.pdf", b"%PDF-1.4", "application/pdf")
            .unwrap();

        assert_eq!(result.document_type, DocumentType::Unknown);
        assert_eq!(result.value("Raw Text"), Some(""));
        assert_eq!(result.confidence, 0.99);
    }

    #[test]
    fn test_acquisition_failure_still_honors_filename_hint() {
        let service = OcrExtractionService::new(FailingSource);

        let result = service
            .extract("claim_0042.jpg", b"\xff\xd8", "image/jpg")
            .unwrap();

        assert_eq!(result.document_type, DocumentType::Claim);
        assert!(result.extracted_fields.is_empty());
        assert_eq!(result.confidence, 0.5);
    }

    #[test]
    fn test_absorbed_failure_is_reported_for_hinted_filename() {
        let service = OcrExtractionService::new(FailingSource);

        let (result, cause) = service
            .extract_with_cause("claim_01.png", b"\x89PNG", "image/png")
            .unwrap();

        assert_eq!(result.document_type, DocumentType::Claim);
        assert_eq!(cause.unwrap().to_string(), "OCR error: engine crashed");

        let service = OcrExtractionService::new(StaticText(""));
        let (_, cause) = service
            .extract_with_cause("claim_01.png", b"\x89PNG", "image/png")
            .unwrap();
        assert!(cause.is_none());
    }

    #[test]
    fn test_service_rejects_office_documents() {
        let service = OcrExtractionService::new(StaticText(POLICY_TEXT));

        let err = service
            .extract("policy.docx", b"PK", ContentType::WordOpenXml.mime())
            .unwrap_err();

        assert!(matches!(
            err,
            InsxError::Input(InputError::UnsupportedContentType { .. })
        ));
    }

    #[test]
    fn test_service_rejects_empty_upload() {
        let service = OcrExtractionService::new(StaticText(POLICY_TEXT));

        let err = service.extract("policy.pdf", b"", "application/pdf").unwrap_err();
        assert!(matches!(err, InsxError::Input(InputError::Empty)));
    }

    #[test]
    fn test_upload_extractor_delegates() {
        let service = OcrExtractionService::new(StaticText("Claim Number: CLM-1\nclaimant: Al"));
        let upload = Upload::new("doc.pdf", b"%PDF".to_vec(), "application/pdf");

        let result = service.extract_upload(&upload).unwrap();
        assert_eq!(result.document_type, DocumentType::Claim);
        assert_eq!(result.value("Claim Number"), Some("CLM-1"));
    }
}
