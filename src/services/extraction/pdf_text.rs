//! Text-native PDF extraction.

use async_trait::async_trait;

use crate::error::{PipelineError, PipelineResult};

use super::{PageExtractor, PageText};

/// Extractor for PDFs that carry a text layer.
///
/// Uses `pdf-extract`'s positioned text output so multi-column and
/// table-like content comes out in reading order as far as the engine
/// supports. Pages are emitted strictly in source order; no re-ordering or
/// de-duplication is performed.
#[derive(Debug, Default)]
pub struct TextPdfExtractor;

impl TextPdfExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(&self, data: &[u8]) -> PipelineResult<Vec<PageText>> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(data)
            .map_err(|e| PipelineError::Extraction(format!("PDF text extraction failed: {e}")))?;

        Ok(pages
            .into_iter()
            .enumerate()
            .map(|(i, text)| PageText::new(i + 1, text.trim_end()))
            .collect())
    }
}

#[async_trait]
impl PageExtractor for TextPdfExtractor {
    async fn extract(&self, data: &[u8]) -> PipelineResult<Vec<PageText>> {
        self.extract_pages(data)
    }

    fn name(&self) -> &str {
        "TextPdfExtractor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_pdf_fails() {
        let extractor = TextPdfExtractor::new();
        let result = extractor.extract(b"definitely not a pdf").await;
        assert!(matches!(result, Err(PipelineError::Extraction(_))));
    }

    #[test]
    fn test_extractor_name() {
        assert_eq!(TextPdfExtractor::new().name(), "TextPdfExtractor");
    }
}
