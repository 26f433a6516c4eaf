//! Ingestion pipeline: validate → normalize → chunk → persist.
//!
//! One call ingests one document as a single logical unit of work.
//! Chunks are written first (an atomic per-document replacement at
//! the store), then the parent [`SourceDocument`] record. Ingesting
//! under an existing `document_id` fully replaces that document's
//! chunks; concurrent re-ingestion of the same id is last-write-wins
//! at the store and is not arbitrated here.
//!
//! Text that normalizes to nothing is not an error: the document is
//! recorded with `total_chunks = 0` and a `processed` status, and the
//! receipt reports `chunks_created: 0`.

use chrono::Utc;

use crate::chunk::{chunk_document, clean_text};
use crate::error::IngestError;
use crate::models::{DocumentStatus, IngestReceipt, IngestRequest, SourceDocument};
use crate::store::ChunkStore;

/// Run the ingestion pipeline for one document.
///
/// `max_tokens` is the per-chunk token budget (see
/// [`crate::chunk::DEFAULT_MAX_TOKENS`]).
pub async fn ingest<S: ChunkStore + ?Sized>(
    store: &S,
    request: IngestRequest,
    max_tokens: usize,
) -> Result<IngestReceipt, IngestError> {
    if request.document_id.trim().is_empty() {
        return Err(IngestError::invalid("document_id is required"));
    }
    if request.file_name.trim().is_empty() {
        return Err(IngestError::invalid("file_name is required"));
    }

    let cleaned = clean_text(&request.raw_text);
    let text_length = cleaned.chars().count();

    let chunks = chunk_document(
        &request.document_id,
        &request.file_name,
        &request.file_type,
        &cleaned,
        max_tokens,
    );

    store
        .put_chunks(&request.document_id, &chunks)
        .await
        .map_err(IngestError::store)?;

    let doc = SourceDocument {
        document_id: request.document_id.clone(),
        file_name: request.file_name,
        file_type: request.file_type,
        total_chunks: chunks.len() as i64,
        status: DocumentStatus::Processed,
        text_length: text_length as i64,
        processed_at: Utc::now(),
    };
    store
        .put_document_metadata(&doc)
        .await
        .map_err(IngestError::store)?;

    Ok(IngestReceipt {
        document_id: request.document_id,
        chunks_created: chunks.len(),
        text_length,
    })
}
