//! SQLite-backed [`ChunkStore`].
//!
//! `put_chunks` is a transactional delete-then-insert per document,
//! which gives the atomic replacement the ingestion pipeline expects.
//! `list_chunks` joins through the documents table so the full listing
//! comes back in document first-insertion order (documents keep their
//! rowid across metadata upserts), then `chunk_index`.
//!
//! Two writers racing on the same `document_id` are last-write-wins;
//! nothing here arbitrates that.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use kbase_core::models::{ChunkMetadata, DocumentChunk, SourceDocument};
use kbase_core::store::ChunkStore;

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_chunk(row: &SqliteRow) -> DocumentChunk {
    let created_ts: i64 = row.get("created_at");
    DocumentChunk {
        id: row.get("id"),
        document_id: row.get("document_id"),
        chunk_index: row.get("chunk_index"),
        text: row.get("text"),
        metadata: ChunkMetadata {
            file_name: row.get("file_name"),
            file_type: row.get("file_type"),
            chunk_tokens: row.get("chunk_tokens"),
        },
        created_at: DateTime::<Utc>::from_timestamp(created_ts, 0).unwrap_or_else(Utc::now),
    }
}

#[async_trait]
impl ChunkStore for SqliteStore {
    async fn put_chunks(&self, document_id: &str, chunks: &[DocumentChunk]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM chunks WHERE document_id = ?")
            .bind(document_id)
            .execute(&mut *tx)
            .await?;

        for chunk in chunks {
            sqlx::query(
                r#"
                INSERT INTO chunks (id, document_id, chunk_index, text, file_name, file_type, chunk_tokens, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&chunk.id)
            .bind(&chunk.document_id)
            .bind(chunk.chunk_index)
            .bind(&chunk.text)
            .bind(&chunk.metadata.file_name)
            .bind(&chunk.metadata.file_type)
            .bind(chunk.metadata.chunk_tokens)
            .bind(chunk.created_at.timestamp())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn put_document_metadata(&self, doc: &SourceDocument) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO documents (document_id, file_name, file_type, total_chunks, status, text_length, processed_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(document_id) DO UPDATE SET
                file_name = excluded.file_name,
                file_type = excluded.file_type,
                total_chunks = excluded.total_chunks,
                status = excluded.status,
                text_length = excluded.text_length,
                processed_at = excluded.processed_at
            "#,
        )
        .bind(&doc.document_id)
        .bind(&doc.file_name)
        .bind(&doc.file_type)
        .bind(doc.total_chunks)
        .bind(doc.status.as_str())
        .bind(doc.text_length)
        .bind(doc.processed_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_chunks(&self, document_id: Option<&str>) -> Result<Vec<DocumentChunk>> {
        let rows = match document_id {
            Some(id) => {
                sqlx::query(
                    r#"
                    SELECT id, document_id, chunk_index, text, file_name, file_type, chunk_tokens, created_at
                    FROM chunks
                    WHERE document_id = ?
                    ORDER BY chunk_index ASC
                    "#,
                )
                .bind(id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT c.id, c.document_id, c.chunk_index, c.text, c.file_name, c.file_type, c.chunk_tokens, c.created_at
                    FROM chunks c
                    LEFT JOIN documents d ON d.document_id = c.document_id
                    ORDER BY d.rowid ASC, c.chunk_index ASC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.iter().map(row_to_chunk).collect())
    }
}
