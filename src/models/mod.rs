//! Data models for reqsift.

pub mod document;
pub mod requirement;

// Re-exports
pub use document::{DocumentRecord, DocumentStatus, DocumentStore, InMemoryDocumentStore};
pub use requirement::{Item, ItemRequirement, UNDETERMINED_PAGE};
