//! Format and scan classification.
//!
//! The scan check is a bounded-cost heuristic: only the first
//! `probe_page_limit` pages are inspected, so a document whose leading pages
//! are image-only covers will be routed through OCR even if the rest is
//! text-native. Probe failures also route to OCR, the slower but defensive
//! fallback.

use anyhow::Context;
use tracing::{debug, warn};

use crate::error::{PipelineError, PipelineResult};

use super::config::FileType;

/// Extraction strategy chosen for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// PDF with an extractable text layer.
    TextPdf,
    /// PDF without a text layer; needs OCR.
    ScannedPdf,
    /// Legacy .doc; converted to .docx before extraction.
    LegacyWord,
    /// Modern .docx.
    ModernWord,
}

/// Scan verdict over already-probed page texts: scanned only if every
/// inspected page is blank. An empty probe counts as scanned.
pub fn is_scanned(page_texts: &[String]) -> bool {
    page_texts.iter().all(|text| text.trim().is_empty())
}

/// Extracts the text of the first `limit` pages of a PDF.
fn probe_page_texts(data: &[u8], limit: usize) -> anyhow::Result<Vec<String>> {
    let mut pages = pdf_extract::extract_text_from_mem_by_pages(data)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("probing PDF page text")?;
    pages.truncate(limit);
    Ok(pages)
}

/// Classifies a PDF as text-native or scanned.
pub fn classify_pdf(data: &[u8], probe_limit: usize) -> DocumentKind {
    match probe_page_texts(data, probe_limit) {
        Ok(pages) => {
            let scanned = is_scanned(&pages);
            debug!(
                probed_pages = pages.len(),
                scanned, "PDF scan probe complete"
            );
            if scanned {
                DocumentKind::ScannedPdf
            } else {
                DocumentKind::TextPdf
            }
        }
        Err(e) => {
            // Unreadable text layer: let the OCR path take over.
            warn!("PDF probe failed, defaulting to scanned: {e:#}");
            DocumentKind::ScannedPdf
        }
    }
}

/// Classifies a document given its declared type and raw content.
pub fn classify(file_type: FileType, data: &[u8], probe_limit: usize) -> PipelineResult<DocumentKind> {
    match file_type {
        FileType::Pdf => Ok(classify_pdf(data, probe_limit)),
        FileType::Docx => Ok(DocumentKind::ModernWord),
        FileType::Doc => Ok(DocumentKind::LegacyWord),
        FileType::Unknown => Err(PipelineError::UnsupportedFormat(
            "only .pdf, .docx and .doc are supported".to_string(),
        )),
    }
}
