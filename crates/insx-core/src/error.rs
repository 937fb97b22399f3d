//! Error types for the insx-core library.

use thiserror::Error;

/// Main error type for the insx library.
#[derive(Error, Debug)]
pub enum InsxError {
    /// The upload was rejected before extraction.
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    /// Text acquisition error.
    #[error("text acquisition failed: {0}")]
    Acquisition(#[from] AcquisitionError),

    /// Batch processing error.
    #[error("batch error: {0}")]
    Batch(#[from] BatchError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while validating an upload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The declared content type is outside the accepted set.
    #[error("unsupported file type: {content_type}. Allowed types: {allowed}")]
    UnsupportedContentType {
        content_type: String,
        allowed: String,
    },

    /// The upload carried no bytes.
    #[error("empty file uploaded")]
    Empty,
}

/// Errors from the text acquisition capability.
///
/// The OCR-backed service absorbs these as empty text; they are only surfaced
/// to callers that drive a [`TextSource`](crate::source::TextSource) directly.
#[derive(Error, Debug)]
pub enum AcquisitionError {
    /// Failed to open or read the PDF.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Failed to decode an image.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// The OCR engine failed.
    #[error("OCR error: {0}")]
    Ocr(String),

    /// No OCR engine is configured for image content.
    #[error("no OCR engine available for {0}")]
    OcrUnavailable(String),

    /// The content type has no text source.
    #[error("no text source for {0}")]
    Unsupported(String),
}

/// A single failed item in a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItemError {
    /// Identifier of the item (usually a filename or path).
    pub id: String,
    /// Human-readable failure message.
    pub message: String,
}

impl std::fmt::Display for BatchItemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.id, self.message)
    }
}

/// Errors related to batch processing.
#[derive(Error, Debug)]
pub enum BatchError {
    /// Every submitted item failed.
    #[error("all {} files failed to process", .0.len())]
    AllFailed(Vec<BatchItemError>),
}

/// Result type for the insx library.
pub type Result<T> = std::result::Result<T, InsxError>;
