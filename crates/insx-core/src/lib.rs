//! Core library for insurance document extraction.
//!
//! This crate provides:
//! - Keyword classification of raw document text into policy, claim or submission
//! - Rule-based field extraction (numbers, names, dates, amounts) per document type
//! - Confidence aggregation over extracted fields
//! - Text acquisition adapters (embedded PDF text, image OCR)
//! - A filename-only mock pipeline for exercising the response contract

pub mod clock;
pub mod document;
pub mod error;
pub mod models;
pub mod source;

pub use clock::{Clock, FixedClock, SystemClock};
pub use document::{
    BatchItemError, BatchReport, DocumentLoader, DocumentPipeline, KeywordClassifier,
    MockExtractionService, OcrExtractionService, UploadExtractor, aggregate_confidence,
    extract_batch,
};
pub use error::{InsxError, Result};
pub use models::document::{DocumentType, ExtractedField, ExtractionResult};
pub use source::{
    ContentType, DocumentTextSource, ImageRecognizer, PdfTextSource, TextSource, Upload,
};

#[cfg(feature = "native")]
pub use source::PureOcrRecognizer;
