//! Document text extraction.
//!
//! The pipeline classifies a document, picks an extraction strategy and
//! produces a page-tagged transcript:
//! - text-native PDFs go through [`pdf_text::TextPdfExtractor`],
//! - scanned PDFs go through [`ocr::OcrExtractor`] (rotation search scored
//!   against a [`lexicon::Lexicon`]),
//! - `.docx` goes through [`word::WordExtractor`],
//! - `.doc` is converted first via a [`converter::LegacyConverter`].
//!
//! Page order in the transcript always matches source page order.

pub mod classifier;
pub mod config;
pub mod converter;
pub mod lexicon;
pub mod ocr;
pub mod pdf_text;
pub mod word;

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{PipelineError, PipelineResult};

// Re-exports
pub use classifier::{classify, classify_pdf, is_scanned, DocumentKind};
pub use config::{ConfigError, ExtractionConfig, FileType};
pub use converter::{LegacyConverter, SofficeConverter};
pub use lexicon::Lexicon;
pub use ocr::{OcrExtractor, Rotation, TesseractRecognizer, TextRecognizer};
pub use pdf_text::TextPdfExtractor;
pub use word::WordExtractor;

/// Text of one source page. Page numbers are 1-based and contiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub page_number: usize,
    pub text: String,
}

impl PageText {
    pub fn new(page_number: usize, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
        }
    }
}

/// Ordered sequence of page texts; the hand-off artifact to the
/// text-generation service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    pages: Vec<PageText>,
}

impl Transcript {
    pub fn new(pages: Vec<PageText>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[PageText] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Renders the transcript as plain text, each page preceded by a line
    /// of the exact form `[PAGE n]` and separated by blank lines. No
    /// escaping is performed.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for page in &self.pages {
            out.push_str(&format!("[PAGE {}]\n", page.page_number));
            out.push_str(page.text.trim_end());
            out.push_str("\n\n");
        }
        while out.ends_with('\n') {
            out.pop();
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

/// Trait for page-oriented extractors.
#[async_trait]
pub trait PageExtractor: Send + Sync {
    /// Extracts page texts from raw document bytes, in source page order.
    async fn extract(&self, data: &[u8]) -> PipelineResult<Vec<PageText>>;

    /// Returns the extractor name.
    fn name(&self) -> &str;
}

/// Classifies documents and dispatches to the right extractor.
pub struct ExtractionService {
    config: ExtractionConfig,
}

impl ExtractionService {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(ExtractionConfig::default())
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extracts the transcript of one document.
    ///
    /// Classification and recognition-setup errors abort before any page is
    /// processed; a legacy conversion failure aborts the document with no
    /// fallback.
    pub async fn extract_document(
        &self,
        path: &Path,
        converter: &dyn LegacyConverter,
    ) -> PipelineResult<Transcript> {
        let file_type = FileType::from_path(path);
        if !file_type.is_supported() {
            return Err(PipelineError::UnsupportedFormat(format!(
                "{}: only .pdf, .docx and .doc are supported",
                path.display()
            )));
        }

        let data = tokio::fs::read(path).await?;
        if data.is_empty() {
            return Err(PipelineError::Extraction(format!(
                "{} is empty",
                path.display()
            )));
        }

        let kind = classify(file_type, &data, self.config.probe_page_limit)?;
        debug!(?kind, file = %path.display(), "document classified");

        let pages = match kind {
            DocumentKind::TextPdf => TextPdfExtractor::new().extract(&data).await?,
            DocumentKind::ScannedPdf => {
                let extractor = OcrExtractor::from_config(&self.config)?;
                extractor.extract(&data).await?
            }
            DocumentKind::ModernWord => WordExtractor::new().extract(&data).await?,
            DocumentKind::LegacyWord => {
                let out_dir = path.parent().ok_or_else(|| {
                    PipelineError::ConversionFailure(format!(
                        "{} has no parent directory",
                        path.display()
                    ))
                })?;
                let converted = converter.convert(path, out_dir).await?;
                let converted_data = tokio::fs::read(&converted).await?;
                WordExtractor::new().extract(&converted_data).await?
            }
        };

        info!(
            file = %path.display(),
            pages = pages.len(),
            strategy = ?kind,
            "extraction complete"
        );

        Ok(Transcript::new(pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_render_markers_in_order() {
        let transcript = Transcript::new(vec![
            PageText::new(1, "trang một"),
            PageText::new(2, "trang hai\n"),
            PageText::new(3, ""),
        ]);

        let rendered = transcript.render();
        assert_eq!(
            rendered,
            "[PAGE 1]\ntrang một\n\n[PAGE 2]\ntrang hai\n\n[PAGE 3]\n"
        );
        assert_eq!(rendered.matches("[PAGE ").count(), 3);
    }

    #[test]
    fn test_transcript_render_empty() {
        assert_eq!(Transcript::default().render(), "");
    }

    #[test]
    fn test_page_marker_exact_form() {
        let transcript = Transcript::new(vec![PageText::new(7, "x")]);
        assert!(transcript.render().starts_with("[PAGE 7]\n"));
    }

    #[tokio::test]
    async fn test_unsupported_extension_fails() {
        let service = ExtractionService::with_defaults();
        let converter = SofficeConverter::new("soffice".into());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.xlsx");
        tokio::fs::write(&path, b"data").await.unwrap();

        let result = service.extract_document(&path, &converter).await;
        assert!(matches!(result, Err(PipelineError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn test_empty_file_fails() {
        let service = ExtractionService::with_defaults();
        let converter = SofficeConverter::new("soffice".into());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.docx");
        tokio::fs::write(&path, b"").await.unwrap();

        let result = service.extract_document(&path, &converter).await;
        assert!(result.is_err());
    }
}
