//! Word (.docx) extraction.
//!
//! Streams `word/document.xml` and linearizes body paragraphs and tables in
//! document order. Page numbering is a synthetic counter advanced only by
//! explicit page-break runs (`<w:br w:type="page"/>`); it does not track
//! print layout of documents that rely on flow-based pagination. Accepted
//! limitation, not re-derived from layout.

use std::io::{Cursor, Read};

use async_trait::async_trait;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader as XmlReader;
use zip::ZipArchive;

use crate::error::{PipelineError, PipelineResult};

use super::{PageExtractor, PageText};

/// Extractor for modern word-processor documents.
#[derive(Debug, Default)]
pub struct WordExtractor;

impl WordExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PageExtractor for WordExtractor {
    async fn extract(&self, data: &[u8]) -> PipelineResult<Vec<PageText>> {
        let xml = read_document_xml(data)?;
        parse_document_xml(&xml)
    }

    fn name(&self) -> &str {
        "WordExtractor"
    }
}

/// Pulls `word/document.xml` out of the docx container.
fn read_document_xml(data: &[u8]) -> PipelineResult<String> {
    let mut archive = ZipArchive::new(Cursor::new(data))
        .map_err(|e| PipelineError::Extraction(format!("not a docx container: {e}")))?;

    let mut entry = archive
        .by_name("word/document.xml")
        .map_err(|e| PipelineError::Extraction(format!("word/document.xml missing: {e}")))?;

    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| PipelineError::Extraction(format!("word/document.xml unreadable: {e}")))?;
    Ok(xml)
}

fn is_page_break(element: &BytesStart<'_>) -> bool {
    element.attributes().flatten().any(|attr| {
        attr.key.as_ref() == b"w:type" && attr.value.as_ref() == b"page"
    })
}

/// Walks the document body and accumulates page texts.
///
/// A paragraph whose runs contain an explicit page break closes the current
/// page before that paragraph's own text is emitted, so the break paragraph
/// lands on the new page. Table rows join cell texts with a ` | ` separator
/// per cell and a newline per row; one extra newline follows each table.
pub fn parse_document_xml(xml: &str) -> PipelineResult<Vec<PageText>> {
    let mut reader = XmlReader::from_str(xml);

    let mut pages: Vec<String> = vec![String::new()];

    let mut table_depth = 0usize;
    let mut in_text = false;

    let mut para_text = String::new();
    let mut para_has_break = false;

    let mut table_buf = String::new();
    let mut cell_text = String::new();

    loop {
        match reader.read_event() {
            Err(e) => {
                return Err(PipelineError::Extraction(format!(
                    "malformed document xml: {e}"
                )))
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:tbl" => table_depth += 1,
                b"w:tc" if table_depth > 0 => cell_text.clear(),
                b"w:p" if table_depth == 0 => {
                    para_text.clear();
                    para_has_break = false;
                }
                b"w:t" => in_text = true,
                b"w:br" if table_depth == 0 && is_page_break(&e) => para_has_break = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"w:br" && table_depth == 0 && is_page_break(&e) {
                    para_has_break = true;
                }
            }
            Ok(Event::Text(t)) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| PipelineError::Extraction(format!("bad xml text: {e}")))?;
                if table_depth > 0 {
                    cell_text.push_str(&text);
                } else {
                    para_text.push_str(&text);
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" if table_depth == 0 => {
                    if para_has_break {
                        pages.push(String::new());
                    }
                    let current = pages.last_mut().expect("at least one page");
                    current.push_str(&para_text);
                    current.push('\n');
                }
                b"w:tc" if table_depth > 0 => {
                    table_buf.push_str(&cell_text);
                    table_buf.push_str(" | ");
                }
                b"w:tr" if table_depth > 0 => table_buf.push('\n'),
                b"w:tbl" => {
                    table_depth = table_depth.saturating_sub(1);
                    if table_depth == 0 {
                        let current = pages.last_mut().expect("at least one page");
                        current.push_str(&table_buf);
                        current.push('\n');
                        table_buf.clear();
                    }
                }
                _ => {}
            },
            Ok(_) => {}
        }
    }

    Ok(pages
        .into_iter()
        .enumerate()
        .map(|(i, text)| PageText::new(i + 1, text))
        .collect())
}
