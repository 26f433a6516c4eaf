//! Storage abstraction for kbase.
//!
//! The [`ChunkStore`] trait is the boundary between the pure
//! ingestion/retrieval core and whatever actually persists chunks —
//! SQLite in the application crate, [`memory::MemoryStore`] in tests.
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{DocumentChunk, SourceDocument};

/// Abstract chunk storage backend.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`put_chunks`](ChunkStore::put_chunks) | Replace all chunks for one document |
/// | [`put_document_metadata`](ChunkStore::put_document_metadata) | Upsert a document's metadata record |
/// | [`list_chunks`](ChunkStore::list_chunks) | List all chunks, or one document's |
///
/// # Guarantees expected of implementations
///
/// `put_chunks` must be atomic per call: either the whole replacement
/// lands or none of it does. Concurrent calls for *different*
/// documents are independent. Concurrent calls for the *same*
/// document are a last-write-wins race — the core does not arbitrate
/// it, and callers should not assume snapshot isolation between an
/// in-progress re-ingestion and a concurrent read.
#[async_trait]
pub trait ChunkStore: Send + Sync {
    /// Replace every chunk owned by `document_id` with `chunks`.
    ///
    /// An empty slice clears the document's chunks (a degenerate
    /// ingestion still supersedes whatever was stored before).
    async fn put_chunks(&self, document_id: &str, chunks: &[DocumentChunk]) -> Result<()>;

    /// Insert or update the metadata record for a document.
    async fn put_document_metadata(&self, doc: &SourceDocument) -> Result<()>;

    /// List chunks — all of them, or only those owned by one document.
    ///
    /// Order is stable: documents in first-insertion order, then
    /// `chunk_index` ascending within each document.
    async fn list_chunks(&self, document_id: Option<&str>) -> Result<Vec<DocumentChunk>>;
}
