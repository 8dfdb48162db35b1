use std::path::{Path, PathBuf};

use async_trait::async_trait;

use reqsift::error::{PipelineError, PipelineResult};
use reqsift::services::extraction::{
    classify_pdf, DocumentKind, ExtractionConfig, LegacyConverter, PageExtractor, TextPdfExtractor,
};
use reqsift::services::generation::MockGenerator;
use reqsift::services::pipeline::ProcessingService;

/// Builds a minimal text-layer PDF, one Helvetica line per page. Object
/// offsets are recorded while the body is assembled so the xref table is
/// always consistent.
fn text_pdf(pages: &[&str]) -> Vec<u8> {
    // Object numbering: 1 catalog, 2 page tree, 3 font, then for page i a
    // page object (4 + 2i) followed by its content stream (5 + 2i).
    let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", 4 + 2 * i)).collect();

    let mut objects: Vec<String> = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            pages.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    for (i, text) in pages.iter().enumerate() {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            5 + 2 * i
        ));
        let stream = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
        objects.push(format!(
            "<< /Length {} >>\nstream\n{stream}\nendstream",
            stream.len()
        ));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::new();
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{body}\nendobj\n", i + 1));
    }

    let xref_offset = out.len();
    out.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    out.push_str("0000000000 65535 f \n");
    for offset in offsets {
        out.push_str(&format!("{offset:010} 00000 n \n"));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF",
        objects.len() + 1
    ));

    out.into_bytes()
}

struct RejectingConverter;

#[async_trait]
impl LegacyConverter for RejectingConverter {
    async fn convert(&self, _input: &Path, _out_dir: &Path) -> PipelineResult<PathBuf> {
        Err(PipelineError::ConversionFailure("unavailable".to_string()))
    }
}

#[test]
fn test_text_layer_pdf_classified_as_text() {
    let data = text_pdf(&["Noi dung trang mot"]);
    assert_eq!(classify_pdf(&data, 5), DocumentKind::TextPdf);
}

#[tokio::test]
async fn test_text_pdf_extractor_keeps_page_order() {
    let data = text_pdf(&["Noi dung trang mot", "Noi dung trang hai"]);

    let pages = TextPdfExtractor::new().extract(&data).await.unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].page_number, 1);
    assert_eq!(pages[1].page_number, 2);
    assert!(pages[0].text.contains("trang mot"));
    assert!(pages[1].text.contains("trang hai"));
}

#[tokio::test]
async fn test_pdf_transcript_has_one_marker_per_page() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tender.pdf");
    tokio::fs::write(&path, text_pdf(&["Thong so may chu", "Thong so phan mem"]))
        .await
        .unwrap();

    let generator = MockGenerator::new("1. May chu (Trang 1)\n- CPU 8 loi (Trang 1)\n");
    let service = ProcessingService::new(ExtractionConfig::default(), RejectingConverter, generator);

    let outcome = service.process_file(&path).await.unwrap();

    let rendered = outcome.transcript.render();
    assert_eq!(outcome.transcript.page_count(), 2);
    assert_eq!(rendered.matches("[PAGE ").count(), 2);
    assert!(rendered.contains("[PAGE 1]"));
    assert!(rendered.contains("[PAGE 2]"));
    assert_eq!(outcome.items.len(), 1);
}
