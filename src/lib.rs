//! reqsift: trích xuất yêu cầu kỹ thuật từ hồ sơ mời thầu
//!
//! Turns tender documents (.pdf, .docx, .doc) into structured technical
//! requirement records: classify the format, extract a page-tagged
//! transcript (native text or OCR), generate requirement markdown with
//! page citations, and normalize it into items.

#![allow(dead_code)] // Permitir código no usado durante desarrollo

pub mod error;
pub mod models;
pub mod services;

// Re-exportar tipos principales
pub use error::{PipelineError, PipelineResult};
pub use models::{DocumentRecord, DocumentStatus, Item, ItemRequirement, UNDETERMINED_PAGE};
pub use services::archive::{ArchiveExtractor, ZipExtractor};
pub use services::extraction::{
    DocumentKind, ExtractionConfig, ExtractionService, FileType, LegacyConverter, PageText,
    SofficeConverter, Transcript,
};
pub use services::generation::{GenerationConfig, MockGenerator, OpenAiGenerator, TextGenerator};
pub use services::pipeline::{ProcessingOutcome, ProcessingService};
