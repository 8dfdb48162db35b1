//! Orientation-aware OCR extraction for scanned PDFs.
//!
//! Scanned tender documents arrive in any of the four cardinal
//! orientations. Each page is rasterized once, recognized in all four
//! rotations, and the transcript that scores best against the lexicon wins.
//! That costs 4× recognition work per page but frees callers from
//! pre-correcting orientation.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use pdfium_render::prelude::*;
use tesseract::Tesseract;
use tracing::{debug, info};

use crate::error::{PipelineError, PipelineResult};

use super::config::ExtractionConfig;
use super::lexicon::Lexicon;
use super::{PageExtractor, PageText};

/// Axis-aligned rotations tried per page, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    None,
    Quarter,
    Half,
    ThreeQuarter,
}

impl Rotation {
    /// All rotations in the order they are tried. Earlier entries win ties.
    pub const ALL: [Rotation; 4] = [
        Rotation::None,
        Rotation::Quarter,
        Rotation::Half,
        Rotation::ThreeQuarter,
    ];

    pub fn degrees(&self) -> u32 {
        match self {
            Self::None => 0,
            Self::Quarter => 90,
            Self::Half => 180,
            Self::ThreeQuarter => 270,
        }
    }

    pub fn apply(&self, image: &DynamicImage) -> DynamicImage {
        match self {
            Self::None => image.clone(),
            Self::Quarter => image.rotate90(),
            Self::Half => image.rotate180(),
            Self::ThreeQuarter => image.rotate270(),
        }
    }
}

/// Recognition engine interface, injected so tests can substitute fakes.
pub trait TextRecognizer: Send + Sync {
    /// Recognizes text in a PNG-encoded bitmap.
    fn recognize(&self, png: &[u8]) -> PipelineResult<String>;
}

/// Tesseract-backed recognizer.
pub struct TesseractRecognizer {
    tessdata_dir: PathBuf,
    language: String,
}

impl TesseractRecognizer {
    /// Creates a recognizer, verifying the language data directory exists.
    /// Missing tessdata is fatal before any page work begins.
    pub fn new(tessdata_dir: &Path, language: &str) -> PipelineResult<Self> {
        if !tessdata_dir.is_dir() {
            return Err(PipelineError::RecognitionSetup(format!(
                "tessdata directory {} not found",
                tessdata_dir.display()
            )));
        }

        Ok(Self {
            tessdata_dir: tessdata_dir.to_path_buf(),
            language: language.to_string(),
        })
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, png: &[u8]) -> PipelineResult<String> {
        // Tesseract's builder consumes self, so a fresh engine is created
        // per call; sessions never outlive the page being recognized.
        let datapath = self.tessdata_dir.to_string_lossy();
        let mut tess = Tesseract::new(Some(&datapath), Some(&self.language))
            .map_err(|e| PipelineError::RecognitionSetup(format!("tesseract init failed: {e}")))?;

        tess = tess
            .set_image_from_mem(png)
            .map_err(|e| PipelineError::Extraction(format!("failed to set OCR image: {e}")))?;

        tess.get_text()
            .map_err(|e| PipelineError::Extraction(format!("OCR failed: {e}")))
    }
}

/// Extractor for scanned PDFs.
pub struct OcrExtractor<R: TextRecognizer> {
    recognizer: R,
    lexicon: Lexicon,
    raster_width: u32,
    raster_height: u32,
    pdfium_lib_dir: PathBuf,
}

impl OcrExtractor<TesseractRecognizer> {
    /// Builds the production extractor. Missing tessdata or lexicon abort
    /// here, before any page is processed.
    pub fn from_config(config: &ExtractionConfig) -> PipelineResult<Self> {
        let recognizer = TesseractRecognizer::new(&config.tessdata_dir, &config.ocr_language)?;
        let lexicon = Lexicon::load(&config.lexicon_path)?;

        if lexicon.is_empty() {
            return Err(PipelineError::RecognitionSetup(format!(
                "lexicon {} is empty",
                config.lexicon_path.display()
            )));
        }

        Ok(Self {
            recognizer,
            lexicon,
            raster_width: config.raster_width,
            raster_height: config.raster_height,
            pdfium_lib_dir: config.pdfium_lib_dir.clone(),
        })
    }
}

impl<R: TextRecognizer> OcrExtractor<R> {
    /// Creates an extractor with an injected recognizer (tests).
    pub fn with_recognizer(recognizer: R, lexicon: Lexicon, width: u32, height: u32) -> Self {
        Self {
            recognizer,
            lexicon,
            raster_width: width,
            raster_height: height,
            pdfium_lib_dir: PathBuf::from("./lib"),
        }
    }

    fn bind_pdfium(&self) -> PipelineResult<Pdfium> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
            &self.pdfium_lib_dir,
        ))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| {
            PipelineError::RecognitionSetup(format!("pdfium library unavailable: {e}"))
        })?;
        Ok(Pdfium::new(bindings))
    }

    /// Recognizes one page bitmap in all four rotations and keeps the text
    /// with the strictly highest meaning score. The first rotation tried
    /// wins ties: later rotations must score strictly greater to replace
    /// the incumbent.
    pub fn best_rotation_text(&self, page_image: &DynamicImage) -> PipelineResult<String> {
        let mut best_text = String::new();
        let mut best_score: Option<usize> = None;

        for rotation in Rotation::ALL {
            let rotated = rotation.apply(page_image);
            let png = encode_png(&rotated)?;
            let text = self.recognizer.recognize(&png)?;
            let score = self.lexicon.score(&text);

            debug!(degrees = rotation.degrees(), score, "OCR rotation scored");

            if best_score.map_or(true, |best| score > best) {
                best_score = Some(score);
                best_text = text;
            }
        }

        Ok(best_text)
    }

    fn extract_pages(&self, data: &[u8]) -> PipelineResult<Vec<PageText>> {
        let pdfium = self.bind_pdfium()?;
        let document = pdfium
            .load_pdf_from_byte_slice(data, None)
            .map_err(|e| PipelineError::Extraction(format!("failed to open PDF: {e}")))?;

        // Fixed target size, independent of the page's native aspect ratio.
        let render_config = PdfRenderConfig::new()
            .set_target_size(self.raster_width as i32, self.raster_height as i32);

        let mut pages = Vec::new();
        for (index, page) in document.pages().iter().enumerate() {
            let bitmap = page.render_with_config(&render_config).map_err(|e| {
                PipelineError::Extraction(format!("failed to rasterize page {}: {e}", index + 1))
            })?;
            let image = bitmap.as_image();

            // Any rotation failing fails the document; a silently dropped
            // page would truncate the transcript.
            let text = self.best_rotation_text(&image)?;
            pages.push(PageText::new(index + 1, text));
        }

        info!(pages = pages.len(), "OCR extraction complete");
        Ok(pages)
    }
}

#[async_trait]
impl<R: TextRecognizer> PageExtractor for OcrExtractor<R> {
    async fn extract(&self, data: &[u8]) -> PipelineResult<Vec<PageText>> {
        self.extract_pages(data)
    }

    fn name(&self) -> &str {
        "OcrExtractor"
    }
}

fn encode_png(image: &DynamicImage) -> PipelineResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| PipelineError::Extraction(format!("PNG encoding failed: {e}")))?;
    Ok(buffer.into_inner())
}
