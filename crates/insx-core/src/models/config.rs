//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for insx.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InsxConfig {
    /// PDF text acquisition configuration.
    pub pdf: PdfConfig,

    /// Image OCR configuration.
    pub ocr: OcrConfig,

    /// Mock pipeline configuration.
    pub mock: MockConfig,
}

/// PDF text acquisition configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Use the PDF's embedded text layer when it has one.
    pub prefer_embedded_text: bool,

    /// Embedded text shorter than this is treated as a scanned document.
    pub min_text_length: usize,

    /// OCR the embedded page images of scanned PDFs.
    pub ocr_embedded_images: bool,

    /// Maximum embedded images to OCR per document (0 = unlimited).
    pub max_images: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            prefer_embedded_text: true,
            min_text_length: 50,
            ocr_embedded_images: true,
            max_images: 20,
        }
    }
}

/// Image OCR configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Load an OCR engine for image content.
    pub enabled: bool,

    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Keep `[UNK]` tokens in recognized text instead of replacing them with spaces.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            keep_unk: false,
        }
    }
}

/// Mock pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Seed for the mock's random source (unset = OS entropy).
    pub seed: Option<u64>,
}

impl InsxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Get full path to a model file.
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.ocr.model_dir.join(model_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: InsxConfig =
            serde_json::from_str(r#"{ "pdf": { "min_text_length": 10 }, "mock": { "seed": 7 } }"#)
                .unwrap();

        assert_eq!(config.pdf.min_text_length, 10);
        assert!(config.pdf.prefer_embedded_text);
        assert_eq!(config.ocr.detection_model, "det.onnx");
        assert_eq!(config.mock.seed, Some(7));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = InsxConfig::default();
        config.ocr.model_dir = PathBuf::from("/opt/models");
        config.save(&path).unwrap();

        let loaded = InsxConfig::from_file(&path).unwrap();
        assert_eq!(loaded.ocr.model_dir, PathBuf::from("/opt/models"));
        assert_eq!(
            loaded.model_path("det.onnx"),
            PathBuf::from("/opt/models/det.onnx")
        );
    }

    #[test]
    fn test_invalid_json_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = InsxConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
