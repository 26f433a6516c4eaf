//! Core data models used throughout kbase.
//!
//! These types represent the documents, chunks, and retrieval results
//! that flow through the ingestion and retrieval pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Processing state of a [`SourceDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Processed,
    Pending,
    Error,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Processed => "processed",
            DocumentStatus::Pending => "pending",
            DocumentStatus::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "processed" => Some(DocumentStatus::Processed),
            "pending" => Some(DocumentStatus::Pending),
            "error" => Some(DocumentStatus::Error),
            _ => None,
        }
    }
}

/// Metadata record for an ingested document.
///
/// Written exactly once per ingestion, after chunking completes.
/// Re-ingesting under the same `document_id` is a full replace: the
/// old chunks are superseded, never merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    pub document_id: String,
    pub file_name: String,
    pub file_type: String,
    /// Number of chunk records owned by this document. Zero means the
    /// input normalized to nothing usable; the document is still
    /// recorded rather than silently dropped.
    pub total_chunks: i64,
    pub status: DocumentStatus,
    /// Character count of the cleaned text.
    pub text_length: i64,
    pub processed_at: DateTime<Utc>,
}

/// Denormalized descriptors carried on every chunk so results can be
/// displayed without fetching the parent document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub file_name: String,
    pub file_type: String,
    /// Estimated token count of the chunk's own text.
    pub chunk_tokens: i64,
}

/// A bounded-size slice of a document's text — the unit of storage
/// and retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// Deterministic composite id: `{document_id}_chunk_{chunk_index}`.
    /// Re-chunking identical input produces identical ids, so
    /// re-ingestion overwrites rather than duplicates.
    pub id: String,
    pub document_id: String,
    /// Zero-based position within the document. Contiguous, no gaps.
    pub chunk_index: i64,
    /// Non-empty, trimmed text.
    pub text: String,
    pub metadata: ChunkMetadata,
    pub created_at: DateTime<Utc>,
}

impl DocumentChunk {
    /// Build the deterministic composite id for a chunk.
    pub fn composite_id(document_id: &str, chunk_index: i64) -> String {
        format!("{}_chunk_{}", document_id, chunk_index)
    }
}

/// A scored chunk produced by retrieval. Ephemeral — owned by the
/// calling request and never persisted.
#[derive(Debug, Clone)]
pub struct RetrievalResult<'a> {
    pub chunk: &'a DocumentChunk,
    /// Fraction of query words found in the chunk text, in `[0, 1]`.
    pub relevance_score: f64,
}

/// A retrieval hit in the shape chat/UI callers consume.
#[derive(Debug, Clone, Serialize)]
pub struct SourceHit {
    pub file_name: String,
    /// The matched chunk's full text.
    pub snippet: String,
    pub relevance_score: f64,
}

/// Input to the ingestion entry point.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestRequest {
    pub document_id: String,
    pub file_name: String,
    pub file_type: String,
    pub raw_text: String,
}

/// Successful ingestion summary.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReceipt {
    pub document_id: String,
    pub chunks_created: usize,
    /// Character count of the cleaned text.
    pub text_length: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_id_format() {
        assert_eq!(DocumentChunk::composite_id("doc-9", 0), "doc-9_chunk_0");
        assert_eq!(DocumentChunk::composite_id("doc-9", 12), "doc-9_chunk_12");
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            DocumentStatus::Processed,
            DocumentStatus::Pending,
            DocumentStatus::Error,
        ] {
            assert_eq!(DocumentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(DocumentStatus::parse("unknown"), None);
    }
}
