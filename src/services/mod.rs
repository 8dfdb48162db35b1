//! Business services for reqsift.
//!
//! This module provides:
//! - **Archive**: Batch zip unpacking into per-document files
//! - **Extraction**: Format classification and page-tagged text extraction
//! - **Generation**: Requirement-markdown generation from transcripts
//! - **Normalizer**: Markdown-to-structured-record parsing
//! - **Pipeline**: End-to-end orchestration of the three stages
//!
//! # Processing a document
//!
//! ```ignore
//! use reqsift::services::pipeline::ProcessingService;
//! use reqsift::services::extraction::{ExtractionConfig, SofficeConverter};
//! use reqsift::services::generation::{GenerationConfig, OpenAiGenerator};
//!
//! let config = ExtractionConfig::from_env();
//! let converter = SofficeConverter::from_config(&config);
//! let generator = OpenAiGenerator::new(GenerationConfig::from_env()?);
//!
//! let service = ProcessingService::new(config, converter, generator);
//! let outcome = service.process_file(path).await?;
//! ```

#![allow(dead_code)]

pub mod archive;
pub mod extraction;
pub mod generation;
pub mod normalizer;
pub mod pipeline;

// Re-exports
pub use archive::{ArchiveExtractor, ZipExtractor};
pub use extraction::{
    DocumentKind, ExtractionConfig, ExtractionService, FileType, LegacyConverter, PageText,
    SofficeConverter, Transcript,
};
pub use generation::{GenerationConfig, MockGenerator, OpenAiGenerator, TextGenerator};
pub use pipeline::{ProcessingOutcome, ProcessingService};
