//! End-to-end document processing.
//!
//! Orchestrates extraction, generation and normalization for one document.
//! Both external capabilities (legacy conversion, text generation) are
//! injected so the whole pipeline runs against fakes in tests.

use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::error::PipelineResult;
use crate::models::Item;
use crate::services::extraction::{ExtractionConfig, ExtractionService, LegacyConverter, Transcript};
use crate::services::generation::TextGenerator;
use crate::services::normalizer;

/// Result of processing one document end to end.
#[derive(Debug)]
pub struct ProcessingOutcome {
    pub transcript: Transcript,
    pub markdown: String,
    pub items: Vec<Item>,
    pub time_ms: u64,
}

/// Runs a document through extraction, generation and normalization.
pub struct ProcessingService<C, G>
where
    C: LegacyConverter,
    G: TextGenerator,
{
    extraction: ExtractionService,
    converter: C,
    generator: G,
}

impl<C, G> ProcessingService<C, G>
where
    C: LegacyConverter,
    G: TextGenerator,
{
    pub fn new(config: ExtractionConfig, converter: C, generator: G) -> Self {
        Self {
            extraction: ExtractionService::new(config),
            converter,
            generator,
        }
    }

    /// Extracts the page transcript without calling the generator.
    pub async fn extract_only(&self, path: &Path) -> PipelineResult<Transcript> {
        self.extraction.extract_document(path, &self.converter).await
    }

    /// Full run: transcript, requirement markdown, structured items.
    pub async fn process_file(&self, path: &Path) -> PipelineResult<ProcessingOutcome> {
        let start = Instant::now();

        let transcript = self.extract_only(path).await?;
        let rendered = transcript.render();

        let markdown = self.generator.generate(&rendered).await?;
        let items = normalizer::normalize(&markdown);

        let time_ms = start.elapsed().as_millis() as u64;
        info!(
            file = %path.display(),
            pages = transcript.page_count(),
            items = items.len(),
            model = self.generator.model_name(),
            time_ms,
            "document processed"
        );

        Ok(ProcessingOutcome {
            transcript,
            markdown,
            items,
            time_ms,
        })
    }
}
