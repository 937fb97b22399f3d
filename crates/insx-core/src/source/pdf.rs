//! PDF text acquisition using lopdf and pdf-extract.
//!
//! Embedded text is preferred. When a document carries little or no text
//! (a scanned PDF), its embedded page images are handed to the image
//! recognizer instead.

use std::sync::Arc;

use image::{DynamicImage, ImageBuffer, Luma, Rgb};
use lopdf::{Document, Object};
use tracing::{debug, trace, warn};

use super::{ContentType, ImageRecognizer, TextSource};
use crate::error::AcquisitionError;
use crate::models::config::PdfConfig;

/// Text source for PDF content.
pub struct PdfTextSource {
    config: PdfConfig,
    recognizer: Option<Arc<dyn ImageRecognizer>>,
}

impl PdfTextSource {
    pub fn new(config: PdfConfig) -> Self {
        Self {
            config,
            recognizer: None,
        }
    }

    /// Recognizer used for scanned pages.
    pub fn with_recognizer(mut self, recognizer: Arc<dyn ImageRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Parse the document, decrypting PDFs protected by an empty password.
    ///
    /// Returns the document and the bytes pdf-extract should read.
    fn load(&self, data: &[u8]) -> Result<(Document, Vec<u8>), AcquisitionError> {
        let mut doc = Document::load_mem(data).map_err(|e| AcquisitionError::Pdf(e.to_string()))?;

        let raw = if doc.is_encrypted() {
            doc.decrypt("")
                .map_err(|_| AcquisitionError::Pdf("document is password protected".to_string()))?;
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| AcquisitionError::Pdf(format!("failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(AcquisitionError::Pdf("document has no pages".to_string()));
        }

        debug!("Loaded PDF with {} pages", page_count);
        Ok((doc, raw))
    }

    fn embedded_text(&self, raw: &[u8]) -> String {
        if !self.config.prefer_embedded_text {
            return String::new();
        }

        match pdf_extract::extract_text_from_mem(raw) {
            Ok(text) => text,
            Err(e) => {
                warn!("Embedded text extraction failed: {}", e);
                String::new()
            }
        }
    }

    /// OCR every decodable image in the document, in object order.
    fn recognize_images(
        &self,
        doc: &Document,
        recognizer: &dyn ImageRecognizer,
    ) -> Result<String, AcquisitionError> {
        let mut images: Vec<DynamicImage> = doc
            .objects
            .values()
            .filter_map(|object| decode_image_object(doc, object))
            .collect();

        if self.config.max_images > 0 && images.len() > self.config.max_images {
            debug!(
                "Limiting OCR to {} of {} images",
                self.config.max_images,
                images.len()
            );
            images.truncate(self.config.max_images);
        }

        debug!("Running OCR on {} embedded images", images.len());

        let mut parts = Vec::with_capacity(images.len());
        for image in &images {
            let text = recognizer.recognize(image)?;
            if !text.trim().is_empty() {
                parts.push(text);
            }
        }

        Ok(parts.join("\n\n"))
    }
}

impl Default for PdfTextSource {
    fn default() -> Self {
        Self::new(PdfConfig::default())
    }
}

impl TextSource for PdfTextSource {
    fn acquire_text(
        &self,
        content: &[u8],
        _content_type: ContentType,
    ) -> Result<String, AcquisitionError> {
        let (doc, raw) = self.load(content)?;
        let text = self.embedded_text(&raw);

        let text_len = text.trim().chars().count();
        if text_len >= self.config.min_text_length || !self.config.ocr_embedded_images {
            return Ok(text);
        }

        let Some(recognizer) = self.recognizer.as_deref() else {
            debug!("PDF has {} chars of text and no OCR engine", text_len);
            return Ok(text);
        };

        debug!("PDF has {} chars of text, treating as scanned", text_len);
        let recognized = self.recognize_images(&doc, recognizer)?;

        if recognized.trim().is_empty() {
            Ok(text)
        } else {
            Ok(recognized)
        }
    }
}

/// Decode an image XObject. Returns `None` for anything that is not an
/// image or uses an unsupported encoding.
fn decode_image_object(doc: &Document, object: &Object) -> Option<DynamicImage> {
    let Object::Stream(stream) = object else {
        return None;
    };
    let dict = &stream.dict;

    if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Image" {
        return None;
    }

    let width = u32::try_from(dict.get(b"Width").ok()?.as_i64().ok()?).ok()?;
    let height = u32::try_from(dict.get(b"Height").ok()?.as_i64().ok()?).ok()?;
    if width == 0 || height == 0 {
        return None;
    }
    trace!("Found image object: {}x{}", width, height);

    let filter = dict.get(b"Filter").ok().and_then(|f| match f {
        Object::Name(name) => Some(name.as_slice()),
        Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
        _ => None,
    });

    match filter {
        Some(b"DCTDecode") => {
            return image::load_from_memory_with_format(&stream.content, image::ImageFormat::Jpeg)
                .ok();
        }
        Some(b"JPXDecode") | Some(b"CCITTFaxDecode") | Some(b"JBIG2Decode") => {
            trace!("Skipping image with unsupported filter");
            return None;
        }
        _ => {}
    }

    let data = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());

    let color_space = dict
        .get(b"ColorSpace")
        .ok()
        .and_then(|o| match o {
            Object::Name(name) => Some(name.as_slice()),
            Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
            Object::Reference(r) => doc.get_object(*r).ok().and_then(|o| o.as_name().ok()),
            _ => None,
        })
        .unwrap_or(b"DeviceRGB");

    let bits = dict
        .get(b"BitsPerComponent")
        .ok()
        .and_then(|o| o.as_i64().ok())
        .unwrap_or(8);

    if bits != 8 {
        trace!("Unsupported bits per component: {}", bits);
        return None;
    }

    let pixels = (width as usize).checked_mul(height as usize)?;
    let (channels, rgb) = match color_space {
        b"DeviceRGB" | b"RGB" => (3, true),
        b"DeviceGray" | b"G" => (1, false),
        _ => {
            trace!("Unsupported color space");
            return None;
        }
    };

    // Declared dimensions must fit the decoded stream.
    let len = pixels.checked_mul(channels)?;
    if data.len() < len {
        trace!("Could not decode raw image data ({} bytes, need {})", data.len(), len);
        return None;
    }

    let raw = data[..len].to_vec();
    if rgb {
        ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, raw).map(DynamicImage::ImageRgb8)
    } else {
        ImageBuffer::<Luma<u8>, _>::from_raw(width, height, raw).map(DynamicImage::ImageLuma8)
    }
}
