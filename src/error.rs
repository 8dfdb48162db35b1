//! Pipeline error taxonomy.
//!
//! Classification and setup errors abort the whole document; per-page
//! recognition errors propagate instead of being logged and swallowed, so a
//! truncated transcript can never reach the text-generation service.

use thiserror::Error;

/// Errors surfaced by the extraction and normalization pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("legacy conversion failed: {0}")]
    ConversionFailure(String),

    #[error("recognition setup error: {0}")]
    RecognitionSetup(String),

    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("text generation failed: {0}")]
    Generation(String),

    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Io(err.to_string())
    }
}

impl From<anyhow::Error> for PipelineError {
    fn from(err: anyhow::Error) -> Self {
        PipelineError::Extraction(err.to_string())
    }
}

/// Result type used throughout the pipeline.
pub type PipelineResult<T> = Result<T, PipelineError>;
