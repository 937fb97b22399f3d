//! CLI subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod output;
pub mod process;
pub mod text;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use insx_core::models::config::InsxConfig;
use insx_core::{
    ContentType, DocumentLoader, DocumentTextSource, ExtractionResult, MockExtractionService,
    OcrExtractionService, Upload, UploadExtractor,
};

/// Declared type for files whose extension maps to nothing we know.
const UNKNOWN_MIME: &str = "application/octet-stream";

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("insx")
        .join("config.json")
}

/// Load the config named on the command line, else the default file if it
/// exists, else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<InsxConfig> {
    if let Some(path) = config_path {
        return Ok(InsxConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(InsxConfig::from_file(&default_path)?)
    } else {
        Ok(InsxConfig::default())
    }
}

/// MIME type implied by a path's extension.
pub fn content_type_for(path: &Path) -> &'static str {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(ContentType::from_extension)
        .map(|ct| ct.mime())
        .unwrap_or(UNKNOWN_MIME)
}

/// Reads uploads from the filesystem, using the file name as the upload name.
pub struct FileLoader;

impl DocumentLoader for FileLoader {
    fn load(&self, id: &str) -> insx_core::Result<Upload> {
        let path = Path::new(id);
        let content = fs::read(path)?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(id)
            .to_string();

        Ok(Upload::new(filename, content, content_type_for(path)))
    }
}

/// The extraction service selected on the command line.
pub enum Extractor {
    Ocr(OcrExtractionService<DocumentTextSource>),
    Mock(MockExtractionService),
}

impl Extractor {
    /// Mock when requested (seeded from `--seed`, else `mock.seed`), OCR-backed otherwise.
    pub fn build(config: &InsxConfig, mock: bool, seed: Option<u64>) -> Self {
        if mock {
            let service = match seed {
                Some(seed) => MockExtractionService::seeded(seed),
                None => MockExtractionService::from_config(config),
            };
            return Self::Mock(service);
        }

        Self::Ocr(OcrExtractionService::new(DocumentTextSource::from_config(config)))
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, Self::Mock(_))
    }

    /// True when the OCR-backed service has no engine for images.
    pub fn lacks_ocr_engine(&self) -> bool {
        match self {
            Self::Ocr(service) => !service.source().has_recognizer(),
            Self::Mock(_) => false,
        }
    }

    /// Extract an upload, also returning why no text was acquired when the
    /// OCR-backed service absorbed an acquisition error.
    pub fn extract_with_cause(
        &self,
        upload: &Upload,
    ) -> insx_core::Result<(ExtractionResult, Option<String>)> {
        match self {
            Self::Ocr(service) => {
                let (result, cause) = service.extract_with_cause(
                    &upload.filename,
                    &upload.content,
                    &upload.content_type,
                )?;
                Ok((result, cause.map(|e| e.to_string())))
            }
            Self::Mock(service) => Ok((service.extract_upload(upload)?, None)),
        }
    }
}

impl UploadExtractor for Extractor {
    fn extract_upload(&self, upload: &Upload) -> insx_core::Result<ExtractionResult> {
        match self {
            Self::Ocr(service) => service.extract_upload(upload),
            Self::Mock(service) => service.extract_upload(upload),
        }
    }
}
