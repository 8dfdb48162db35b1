//! Extraction configuration.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Supported document types, detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Text-native or scanned PDF documents (.pdf).
    Pdf,
    /// Modern word-processor documents (.docx).
    Docx,
    /// Legacy word-processor documents (.doc), converted before extraction.
    Doc,
    /// Unknown/unsupported file type.
    Unknown,
}

impl FileType {
    /// Detects file type from an extension (with or without leading dot).
    pub fn from_extension(ext: &str) -> Self {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "doc" => Self::Doc,
            _ => Self::Unknown,
        }
    }

    /// Detects file type from a path.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .map(|ext| Self::from_extension(&ext.to_string_lossy()))
            .unwrap_or(Self::Unknown)
    }

    /// Gets the display name for this file type.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "Word (docx)",
            Self::Doc => "Word (legacy doc)",
            Self::Unknown => "Unknown",
        }
    }

    /// Checks if this file type is supported.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Configuration for the extraction pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Pages inspected when deciding whether a PDF is scanned (default: 5).
    pub probe_page_limit: usize,

    /// Raster width in pixels for OCR page bitmaps.
    ///
    /// Pages are rendered to exactly `raster_width` × `raster_height`
    /// regardless of their native aspect ratio; stretch artifacts are an
    /// accepted accuracy trade-off.
    pub raster_width: u32,

    /// Raster height in pixels for OCR page bitmaps.
    pub raster_height: u32,

    /// Tesseract language code (e.g. "vie", "eng").
    pub ocr_language: String,

    /// Directory holding Tesseract language data.
    pub tessdata_dir: PathBuf,

    /// Newline-delimited word list scoring OCR output. Must match the OCR
    /// language: a mismatched lexicon degrades scoring to near-random.
    pub lexicon_path: PathBuf,

    /// Path of the LibreOffice binary used for legacy .doc conversion.
    pub soffice_path: PathBuf,

    /// Directory probed for a bundled pdfium library before falling back to
    /// the system one.
    pub pdfium_lib_dir: PathBuf,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            probe_page_limit: 5,
            raster_width: 1080,
            raster_height: 1920,
            ocr_language: "vie".to_string(),
            tessdata_dir: PathBuf::from("tessdata"),
            lexicon_path: PathBuf::from("tessdata/Viet74K.txt"),
            soffice_path: PathBuf::from("soffice"),
            pdfium_lib_dir: PathBuf::from("./lib"),
        }
    }
}

impl ExtractionConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the scan-probe page limit.
    pub fn with_probe_page_limit(mut self, limit: usize) -> Self {
        self.probe_page_limit = limit.max(1);
        self
    }

    /// Builder: set the OCR raster size.
    pub fn with_raster_size(mut self, width: u32, height: u32) -> Self {
        self.raster_width = width;
        self.raster_height = height;
        self
    }

    /// Builder: set the OCR language.
    pub fn with_ocr_language(mut self, lang: &str) -> Self {
        self.ocr_language = lang.to_string();
        self
    }

    /// Builder: set the tessdata directory.
    pub fn with_tessdata_dir(mut self, dir: PathBuf) -> Self {
        self.tessdata_dir = dir;
        self
    }

    /// Builder: set the lexicon file path.
    pub fn with_lexicon_path(mut self, path: PathBuf) -> Self {
        self.lexicon_path = path;
        self
    }

    /// Builder: set the LibreOffice binary path.
    pub fn with_soffice_path(mut self, path: PathBuf) -> Self {
        self.soffice_path = path;
        self
    }

    /// Creates configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("REQSIFT_PROBE_PAGE_LIMIT") {
            if let Ok(limit) = val.parse::<usize>() {
                config.probe_page_limit = limit.max(1);
            }
        }

        if let Ok(val) = std::env::var("REQSIFT_RASTER_WIDTH") {
            if let Ok(width) = val.parse::<u32>() {
                config.raster_width = width;
            }
        }

        if let Ok(val) = std::env::var("REQSIFT_RASTER_HEIGHT") {
            if let Ok(height) = val.parse::<u32>() {
                config.raster_height = height;
            }
        }

        if let Ok(val) = std::env::var("REQSIFT_OCR_LANGUAGE") {
            config.ocr_language = val;
        }

        if let Ok(val) = std::env::var("REQSIFT_TESSDATA_DIR") {
            config.tessdata_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("REQSIFT_LEXICON_PATH") {
            config.lexicon_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("REQSIFT_SOFFICE_PATH") {
            config.soffice_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("REQSIFT_PDFIUM_LIB_DIR") {
            config.pdfium_lib_dir = PathBuf::from(val);
        }

        config
    }

    /// Validates configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe_page_limit == 0 {
            return Err(ConfigError::ZeroProbeLimit);
        }
        if self.raster_width == 0 || self.raster_height == 0 {
            return Err(ConfigError::ZeroRasterSize);
        }
        if self.ocr_language.trim().is_empty() {
            return Err(ConfigError::EmptyLanguage);
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ZeroProbeLimit,
    ZeroRasterSize,
    EmptyLanguage,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroProbeLimit => write!(f, "Probe page limit must be at least 1"),
            Self::ZeroRasterSize => write!(f, "Raster dimensions must be non-zero"),
            Self::EmptyLanguage => write!(f, "OCR language must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_from_extension() {
        assert_eq!(FileType::from_extension("pdf"), FileType::Pdf);
        assert_eq!(FileType::from_extension(".PDF"), FileType::Pdf);
        assert_eq!(FileType::from_extension("docx"), FileType::Docx);
        assert_eq!(FileType::from_extension(".doc"), FileType::Doc);
        assert_eq!(FileType::from_extension("xls"), FileType::Unknown);
    }

    #[test]
    fn test_file_type_from_path() {
        assert_eq!(FileType::from_path(Path::new("/tmp/a.pdf")), FileType::Pdf);
        assert_eq!(FileType::from_path(Path::new("b.DOCX")), FileType::Docx);
        assert_eq!(FileType::from_path(Path::new("noext")), FileType::Unknown);
    }

    #[test]
    fn test_config_default() {
        let config = ExtractionConfig::default();
        assert_eq!(config.probe_page_limit, 5);
        assert_eq!(config.raster_width, 1080);
        assert_eq!(config.raster_height, 1920);
        assert_eq!(config.ocr_language, "vie");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ExtractionConfig::new()
            .with_probe_page_limit(3)
            .with_raster_size(800, 600)
            .with_ocr_language("eng");

        assert_eq!(config.probe_page_limit, 3);
        assert_eq!(config.raster_width, 800);
        assert_eq!(config.raster_height, 600);
        assert_eq!(config.ocr_language, "eng");
    }

    #[test]
    fn test_probe_limit_floor() {
        let config = ExtractionConfig::new().with_probe_page_limit(0);
        assert_eq!(config.probe_page_limit, 1);
    }

    #[test]
    fn test_config_validation() {
        let mut config = ExtractionConfig::new();
        config.raster_width = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroRasterSize));

        let mut config = ExtractionConfig::new();
        config.ocr_language = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigError::EmptyLanguage));

        let mut config = ExtractionConfig::new();
        config.probe_page_limit = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroProbeLimit));
    }
}
