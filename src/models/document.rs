//! Document metadata records and the external store interface.
//!
//! Persistence is an external collaborator: the pipeline only needs the
//! `DocumentStore` trait. An in-memory implementation is provided for
//! tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::{PipelineError, PipelineResult};

/// Processing state of an uploaded document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Uploaded, not yet processed.
    Pending,
    /// Transcript and structured record produced.
    Processed,
    /// Processing aborted with an error.
    Failed,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processed => "processed",
            Self::Failed => "failed",
        }
    }
}

/// Metadata of an ingested document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Store-assigned identifier (0 until inserted).
    pub id: u64,

    /// File name, including extension.
    pub name: String,

    /// File extension with leading dot (".pdf", ".docx", ".doc").
    pub doc_type: String,

    /// Absolute path of the stored file.
    pub path: PathBuf,

    /// Current processing state.
    pub status: DocumentStatus,

    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
}

impl DocumentRecord {
    /// Creates a pending record for a freshly stored file.
    pub fn new(name: &str, doc_type: &str, path: PathBuf) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            doc_type: doc_type.to_string(),
            path,
            status: DocumentStatus::Pending,
            uploaded_at: Utc::now(),
        }
    }
}

/// Interface to the external metadata store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts a record and returns the assigned id.
    async fn insert(&self, record: DocumentRecord) -> PipelineResult<u64>;

    /// Fetches a record by id.
    async fn get(&self, id: u64) -> PipelineResult<Option<DocumentRecord>>;

    /// Updates the processing status of a record.
    async fn set_status(&self, id: u64, status: DocumentStatus) -> PipelineResult<()>;

    /// Lists records, optionally filtered by status.
    async fn list(&self, status: Option<DocumentStatus>) -> PipelineResult<Vec<DocumentRecord>>;

    /// Removes a record.
    async fn remove(&self, id: u64) -> PipelineResult<()>;
}

/// In-memory store used in tests.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    records: RwLock<HashMap<u64, DocumentRecord>>,
    next_id: AtomicU64,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert(&self, mut record: DocumentRecord) -> PipelineResult<u64> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        record.id = id;
        self.records.write().await.insert(id, record);
        Ok(id)
    }

    async fn get(&self, id: u64) -> PipelineResult<Option<DocumentRecord>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn set_status(&self, id: u64, status: DocumentStatus) -> PipelineResult<()> {
        let mut records = self.records.write().await;
        match records.get_mut(&id) {
            Some(record) => {
                record.status = status;
                Ok(())
            }
            None => Err(PipelineError::Io(format!("document {} not found", id))),
        }
    }

    async fn list(&self, status: Option<DocumentStatus>) -> PipelineResult<Vec<DocumentRecord>> {
        let records = self.records.read().await;
        let mut result: Vec<DocumentRecord> = records
            .values()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        result.sort_by_key(|r| r.id);
        Ok(result)
    }

    async fn remove(&self, id: u64) -> PipelineResult<()> {
        self.records.write().await.remove(&id);
        Ok(())
    }
}
