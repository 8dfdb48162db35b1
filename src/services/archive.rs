//! Batch archive unpacking.
//!
//! Tender packages often arrive as one zip holding several documents. The
//! unpacker is an injected capability like persistence and generation: the
//! pipeline only needs file paths back, so tests can substitute fakes and a
//! different container format can be added without touching callers.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};
use zip::ZipArchive;

use crate::error::{PipelineError, PipelineResult};

/// Unpacks a document archive into a working directory.
#[async_trait]
pub trait ArchiveExtractor: Send + Sync {
    /// Unpacks `archive` into `work_dir` and returns the extracted file
    /// paths in archive order. Directory entries yield no path.
    async fn unpack(&self, archive: &Path, work_dir: &Path) -> PipelineResult<Vec<PathBuf>>;
}

/// Zip-backed archive unpacker.
#[derive(Debug, Default)]
pub struct ZipExtractor;

impl ZipExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ArchiveExtractor for ZipExtractor {
    async fn unpack(&self, archive: &Path, work_dir: &Path) -> PipelineResult<Vec<PathBuf>> {
        let data = tokio::fs::read(archive).await?;

        let mut zip = ZipArchive::new(Cursor::new(data))
            .map_err(|e| PipelineError::Extraction(format!("not a zip archive: {e}")))?;

        tokio::fs::create_dir_all(work_dir).await?;

        let mut extracted = Vec::new();
        for index in 0..zip.len() {
            let mut entry = zip
                .by_index(index)
                .map_err(|e| PipelineError::Extraction(format!("bad zip entry {index}: {e}")))?;

            // enclosed_name rejects entries that would escape work_dir.
            let Some(relative) = entry.enclosed_name() else {
                warn!(name = entry.name(), "skipping unsafe archive entry");
                continue;
            };

            if entry.is_dir() {
                continue;
            }

            let target = work_dir.join(relative);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let mut file = std::fs::File::create(&target)?;
            std::io::copy(&mut entry, &mut file)?;

            debug!(path = %target.display(), "archive entry extracted");
            extracted.push(target);
        }

        Ok(extracted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            for (name, data) in entries {
                writer
                    .start_file(*name, SimpleFileOptions::default())
                    .unwrap();
                writer.write_all(data).unwrap();
            }
            writer.finish().unwrap();
        }
        cursor.into_inner()
    }

    #[tokio::test]
    async fn test_unpack_returns_files_in_archive_order() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("package.zip");
        let bytes = zip_bytes(&[
            ("tender.docx", b"docx bytes".as_slice()),
            ("phu-luc/scan.pdf", b"pdf bytes".as_slice()),
        ]);
        tokio::fs::write(&archive, bytes).await.unwrap();

        let work_dir = dir.path().join("unpacked");
        let files = ZipExtractor::new().unpack(&archive, &work_dir).await.unwrap();

        assert_eq!(
            files,
            vec![
                work_dir.join("tender.docx"),
                work_dir.join("phu-luc/scan.pdf"),
            ]
        );
        let content = tokio::fs::read(&files[1]).await.unwrap();
        assert_eq!(content, b"pdf bytes");
    }

    #[tokio::test]
    async fn test_directory_entries_yield_no_path() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("package.zip");

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            writer
                .add_directory("docs/", SimpleFileOptions::default())
                .unwrap();
            writer
                .start_file("docs/a.pdf", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"x").unwrap();
            writer.finish().unwrap();
        }
        tokio::fs::write(&archive, cursor.into_inner()).await.unwrap();

        let work_dir = dir.path().join("unpacked");
        let files = ZipExtractor::new().unpack(&archive, &work_dir).await.unwrap();

        assert_eq!(files, vec![work_dir.join("docs/a.pdf")]);
    }

    #[tokio::test]
    async fn test_not_a_zip_fails() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("broken.zip");
        tokio::fs::write(&archive, b"plain bytes").await.unwrap();

        let result = ZipExtractor::new()
            .unpack(&archive, &dir.path().join("out"))
            .await;
        assert!(matches!(result, Err(PipelineError::Extraction(_))));
    }
}
