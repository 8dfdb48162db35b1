//! Legacy .doc conversion.
//!
//! The only part of extraction that depends on an external executable. The
//! converter is an injected capability so tests can substitute fakes, and a
//! native legacy-format parser could replace the LibreOffice shell-out
//! without touching callers.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{PipelineError, PipelineResult};

use super::config::ExtractionConfig;

/// Converts a legacy document into the modern structured format.
#[async_trait]
pub trait LegacyConverter: Send + Sync {
    /// Converts `input` into `out_dir`, returning the converted file path.
    ///
    /// Failure is fatal for the document: no fallback extraction exists for
    /// the legacy format.
    async fn convert(&self, input: &Path, out_dir: &Path) -> PipelineResult<PathBuf>;
}

/// LibreOffice-backed converter (`soffice --headless --convert-to docx`).
pub struct SofficeConverter {
    soffice_path: PathBuf,
}

impl SofficeConverter {
    pub fn new(soffice_path: PathBuf) -> Self {
        Self { soffice_path }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(config.soffice_path.clone())
    }

    fn expected_output(input: &Path, out_dir: &Path) -> PipelineResult<PathBuf> {
        let stem = input.file_stem().ok_or_else(|| {
            PipelineError::ConversionFailure(format!("no file stem in {}", input.display()))
        })?;
        Ok(out_dir.join(format!("{}.docx", stem.to_string_lossy())))
    }
}

#[async_trait]
impl LegacyConverter for SofficeConverter {
    async fn convert(&self, input: &Path, out_dir: &Path) -> PipelineResult<PathBuf> {
        if !out_dir.is_dir() {
            tokio::fs::create_dir_all(out_dir).await?;
        }

        debug!(
            input = %input.display(),
            out_dir = %out_dir.display(),
            "running headless conversion"
        );

        let output = Command::new(&self.soffice_path)
            .arg("--headless")
            .arg("--convert-to")
            .arg("docx")
            .arg("--outdir")
            .arg(out_dir)
            .arg(input)
            .output()
            .await
            .map_err(|e| {
                PipelineError::ConversionFailure(format!(
                    "could not launch {}: {e}",
                    self.soffice_path.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("converter exited with {}: {}", output.status, stderr.trim());
            return Err(PipelineError::ConversionFailure(format!(
                "converter exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let converted = Self::expected_output(input, out_dir)?;
        if !converted.is_file() {
            return Err(PipelineError::ConversionFailure(format!(
                "converter produced no output at {}",
                converted.display()
            )));
        }

        Ok(converted)
    }
}
