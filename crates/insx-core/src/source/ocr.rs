//! Image recognizer backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).

use std::path::Path;
use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use super::ImageRecognizer;
use crate::error::AcquisitionError;
use crate::models::config::InsxConfig;

/// Lines whose top edges fall in the same band of this many pixels are read left to right.
const ROW_HEIGHT: f64 = 20.0;

/// OCR engine wrapper producing plain text in reading order.
pub struct PureOcrRecognizer {
    engine: pure_onnx_ocr::engine::OcrEngine,
    keep_unk: bool,
}

impl PureOcrRecognizer {
    /// Load detection, recognition and dictionary files from a directory.
    pub fn from_dir(
        model_dir: &Path,
        detection_model: &str,
        recognition_model: &str,
        dictionary: &str,
        keep_unk: bool,
    ) -> Result<Self, AcquisitionError> {
        let det_path = model_dir.join(detection_model);
        let rec_path = model_dir.join(recognition_model);
        let dict_path = model_dir.join(dictionary);

        for path in [&det_path, &rec_path, &dict_path] {
            if !path.exists() {
                return Err(AcquisitionError::Ocr(format!(
                    "model file not found: {}",
                    path.display()
                )));
            }
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| AcquisitionError::Ocr(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", model_dir.display());

        Ok(Self { engine, keep_unk })
    }

    /// Load the engine named by the `ocr` section of the configuration.
    pub fn from_config(config: &InsxConfig) -> Result<Self, AcquisitionError> {
        let ocr = &config.ocr;
        Self::from_dir(
            &ocr.model_dir,
            &ocr.detection_model,
            &ocr.recognition_model,
            &ocr.dictionary,
            ocr.keep_unk,
        )
    }
}

impl ImageRecognizer for PureOcrRecognizer {
    fn recognize(&self, image: &DynamicImage) -> Result<String, AcquisitionError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();
        debug!("Recognizing image: {}x{}", width, height);

        let results = self
            .engine
            .run_from_image(image)
            .map_err(|e| AcquisitionError::Ocr(format!("pure-onnx-ocr: {}", e)))?;

        let mut lines: Vec<(f64, f64, String)> = results
            .iter()
            .map(|r| {
                let (x, y) = top_left(&r.bounding_box);
                let text = if self.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                };
                (x, y, text)
            })
            .collect();

        lines.sort_by(|a, b| {
            let row_a = (a.1 / ROW_HEIGHT) as i64;
            let row_b = (b.1 / ROW_HEIGHT) as i64;
            row_a
                .cmp(&row_b)
                .then(a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        });

        debug!(
            "OCR complete: {} text regions in {}ms",
            lines.len(),
            start.elapsed().as_millis()
        );

        Ok(lines
            .into_iter()
            .map(|(_, _, text)| text)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Smallest x and y over the polygon's exterior.
fn top_left(polygon: &pure_onnx_ocr::Polygon<f64>) -> (f64, f64) {
    polygon
        .exterior()
        .coords()
        .fold((f64::MAX, f64::MAX), |(x, y), c| (x.min(c.x), y.min(c.y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::OcrConfig;

    #[test]
    fn test_missing_models_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = InsxConfig {
            ocr: OcrConfig {
                model_dir: dir.path().to_path_buf(),
                ..OcrConfig::default()
            },
            ..InsxConfig::default()
        };

        let err = PureOcrRecognizer::from_config(&config).err().unwrap();
        assert!(err.to_string().contains("model file not found"));
        assert!(err.to_string().contains("det.onnx"));
    }
}
