//! Text acquisition: turning uploaded document bytes into raw text.
//!
//! Recognition itself is delegated to external crates; this module only
//! validates uploads and routes content to the right adapter.

mod pdf;
#[cfg(feature = "native")]
mod ocr;

pub use pdf::PdfTextSource;
#[cfg(feature = "native")]
pub use ocr::PureOcrRecognizer;

use std::fmt;
use std::sync::Arc;

use image::DynamicImage;
use tracing::debug;

use crate::error::{AcquisitionError, InputError};
use crate::models::config::InsxConfig;

/// Declared content type of an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Pdf,
    Png,
    Jpeg,
    Word,
    WordOpenXml,
    Excel,
    ExcelOpenXml,
}

impl ContentType {
    /// Types the OCR-backed pipeline accepts.
    pub const OCR_SUPPORTED: [ContentType; 3] = [Self::Pdf, Self::Png, Self::Jpeg];

    /// Every recognized type (the mock pipeline accepts all of them).
    pub const ALL: [ContentType; 7] = [
        Self::Pdf,
        Self::Png,
        Self::Jpeg,
        Self::Word,
        Self::WordOpenXml,
        Self::Excel,
        Self::ExcelOpenXml,
    ];

    /// Parse a MIME type. `image/jpg` is accepted as an alias of `image/jpeg`.
    pub fn parse(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_lowercase();
        match essence.as_str() {
            "application/pdf" => Some(Self::Pdf),
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "application/msword" => Some(Self::Word),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::WordOpenXml)
            }
            "application/vnd.ms-excel" => Some(Self::Excel),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => {
                Some(Self::ExcelOpenXml)
            }
            _ => None,
        }
    }

    /// Guess the content type from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "doc" => Some(Self::Word),
            "docx" => Some(Self::WordOpenXml),
            "xls" => Some(Self::Excel),
            "xlsx" => Some(Self::ExcelOpenXml),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Word => "application/msword",
            Self::WordOpenXml => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Excel => "application/vnd.ms-excel",
            Self::ExcelOpenXml => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// Short name used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::Word => "Word",
            Self::WordOpenXml => "Word (docx)",
            Self::Excel => "Excel",
            Self::ExcelOpenXml => "Excel (xlsx)",
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::Png | Self::Jpeg)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// An uploaded document: name, bytes and declared content type.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub content: Vec<u8>,
    pub content_type: String,
}

impl Upload {
    pub fn new(
        filename: impl Into<String>,
        content: impl Into<Vec<u8>>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            content_type: content_type.into(),
        }
    }

    /// Check the declared type against `accepted`, then reject empty content.
    pub fn validate(&self, accepted: &[ContentType]) -> Result<ContentType, InputError> {
        let content_type = ContentType::parse(&self.content_type)
            .filter(|ct| accepted.contains(ct))
            .ok_or_else(|| InputError::UnsupportedContentType {
                content_type: self.content_type.clone(),
                allowed: accepted
                    .iter()
                    .map(|ct| ct.label())
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;

        if self.content.is_empty() {
            return Err(InputError::Empty);
        }

        Ok(content_type)
    }
}

/// The external text acquisition capability.
pub trait TextSource: Send + Sync {
    /// Produce raw text for document bytes of a known content type.
    fn acquire_text(&self, content: &[u8], content_type: ContentType)
        -> Result<String, AcquisitionError>;
}

/// Recognizes text in a decoded image.
pub trait ImageRecognizer: Send + Sync {
    fn recognize(&self, image: &DynamicImage) -> Result<String, AcquisitionError>;
}

/// Routes content to the PDF adapter or the image recognizer.
pub struct DocumentTextSource {
    pdf: PdfTextSource,
    recognizer: Option<Arc<dyn ImageRecognizer>>,
}

impl DocumentTextSource {
    /// A source with PDF text extraction only.
    pub fn new(pdf: PdfTextSource) -> Self {
        Self {
            pdf,
            recognizer: None,
        }
    }

    /// Attach an image recognizer, shared with the PDF adapter for scanned pages.
    pub fn with_recognizer(mut self, recognizer: Arc<dyn ImageRecognizer>) -> Self {
        self.pdf = self.pdf.with_recognizer(recognizer.clone());
        self.recognizer = Some(recognizer);
        self
    }

    /// Build from configuration, loading the OCR engine when it is enabled
    /// and its models are present.
    pub fn from_config(config: &InsxConfig) -> Self {
        let source = Self::new(PdfTextSource::new(config.pdf.clone()));

        #[cfg(feature = "native")]
        {
            if config.ocr.enabled {
                match PureOcrRecognizer::from_config(config) {
                    Ok(recognizer) => return source.with_recognizer(Arc::new(recognizer)),
                    Err(e) => tracing::warn!("OCR engine unavailable, images will yield no text: {}", e),
                }
            }
        }

        source
    }

    /// Whether images can be read at all.
    pub fn has_recognizer(&self) -> bool {
        self.recognizer.is_some()
    }
}

impl TextSource for DocumentTextSource {
    fn acquire_text(
        &self,
        content: &[u8],
        content_type: ContentType,
    ) -> Result<String, AcquisitionError> {
        match content_type {
            ContentType::Pdf => self.pdf.acquire_text(content, content_type),
            ct if ct.is_image() => {
                let recognizer = self
                    .recognizer
                    .as_ref()
                    .ok_or_else(|| AcquisitionError::OcrUnavailable(ct.mime().to_string()))?;
                let image = image::load_from_memory(content)?;
                debug!("Decoded {} image {}x{}", ct, image.width(), image.height());
                recognizer.recognize(&image)
            }
            ct => Err(AcquisitionError::Unsupported(ct.mime().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct EchoRecognizer;

    impl ImageRecognizer for EchoRecognizer {
        fn recognize(&self, image: &DynamicImage) -> Result<String, AcquisitionError> {
            Ok(format!("image {}x{}", image.width(), image.height()))
        }
    }

    fn png_bytes() -> Vec<u8> {
        let image = DynamicImage::new_rgb8(4, 3);
        let mut data = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut data), image::ImageFormat::Png)
            .unwrap();
        data
    }

    #[test]
    fn test_parse_content_types() {
        assert_eq!(ContentType::parse("application/pdf"), Some(ContentType::Pdf));
        assert_eq!(ContentType::parse("image/jpg"), Some(ContentType::Jpeg));
        assert_eq!(ContentType::parse("IMAGE/JPEG"), Some(ContentType::Jpeg));
        assert_eq!(
            ContentType::parse("application/pdf; charset=binary"),
            Some(ContentType::Pdf)
        );
        assert_eq!(ContentType::parse("text/plain"), None);
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(ContentType::from_extension("JPG"), Some(ContentType::Jpeg));
        assert_eq!(ContentType::from_extension("xlsx"), Some(ContentType::ExcelOpenXml));
        assert_eq!(ContentType::from_extension("tiff"), None);
    }

    #[test]
    fn test_validate_rejects_unsupported_type() {
        let upload = Upload::new("notes.docx", b"data".to_vec(), ContentType::WordOpenXml.mime());

        let err = upload.validate(&ContentType::OCR_SUPPORTED).unwrap_err();
        assert_eq!(
            err,
            InputError::UnsupportedContentType {
                content_type: ContentType::WordOpenXml.mime().to_string(),
                allowed: "PDF, PNG, JPEG".to_string(),
            }
        );
        assert!(upload.validate(&ContentType::ALL).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_content() {
        let upload = Upload::new("policy.pdf", Vec::new(), "application/pdf");

        assert_eq!(
            upload.validate(&ContentType::OCR_SUPPORTED),
            Err(InputError::Empty)
        );
    }

    #[test]
    fn test_image_without_recognizer_is_unavailable() {
        let source = DocumentTextSource::new(PdfTextSource::default());
        assert!(!source.has_recognizer());

        let err = source.acquire_text(&png_bytes(), ContentType::Png).unwrap_err();
        assert!(matches!(err, AcquisitionError::OcrUnavailable(_)));
    }

    #[test]
    fn test_image_routes_to_recognizer() {
        let source = DocumentTextSource::new(PdfTextSource::default())
            .with_recognizer(Arc::new(EchoRecognizer));
        assert!(source.has_recognizer());

        let text = source.acquire_text(&png_bytes(), ContentType::Png).unwrap();
        assert_eq!(text, "image 4x3");
    }

    #[test]
    fn test_office_documents_have_no_source() {
        let source = DocumentTextSource::new(PdfTextSource::default());

        let err = source.acquire_text(b"PK", ContentType::Excel).unwrap_err();
        assert!(matches!(err, AcquisitionError::Unsupported(_)));
    }
}
