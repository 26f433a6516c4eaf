//! In-memory [`ChunkStore`] implementation for tests and seeded
//! (store-less) contexts.
//!
//! Uses `HashMap` and `Vec` behind `std::sync::RwLock` for thread
//! safety. Listing preserves document first-insertion order; chunks
//! within a document come back sorted by `chunk_index`.

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{DocumentChunk, SourceDocument};

use super::ChunkStore;

/// In-memory store. Replacement semantics match the SQLite backend:
/// `put_chunks` drops a document's previous chunks before appending
/// the new set.
#[derive(Default)]
pub struct MemoryStore {
    docs: RwLock<HashMap<String, SourceDocument>>,
    doc_order: RwLock<Vec<String>>,
    chunks: RwLock<Vec<DocumentChunk>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a stored document record (test convenience).
    pub fn document(&self, document_id: &str) -> Option<SourceDocument> {
        self.docs.read().unwrap().get(document_id).cloned()
    }

    /// Total number of stored chunks (test convenience).
    pub fn chunk_count(&self) -> usize {
        self.chunks.read().unwrap().len()
    }
}

#[async_trait]
impl ChunkStore for MemoryStore {
    async fn put_chunks(&self, document_id: &str, chunks: &[DocumentChunk]) -> Result<()> {
        let mut stored = self.chunks.write().unwrap();
        stored.retain(|c| c.document_id != document_id);
        stored.extend(chunks.iter().cloned());

        let mut order = self.doc_order.write().unwrap();
        if !order.iter().any(|id| id == document_id) {
            order.push(document_id.to_string());
        }
        Ok(())
    }

    async fn put_document_metadata(&self, doc: &SourceDocument) -> Result<()> {
        let mut order = self.doc_order.write().unwrap();
        if !order.iter().any(|id| id == &doc.document_id) {
            order.push(doc.document_id.clone());
        }
        self.docs
            .write()
            .unwrap()
            .insert(doc.document_id.clone(), doc.clone());
        Ok(())
    }

    async fn list_chunks(&self, document_id: Option<&str>) -> Result<Vec<DocumentChunk>> {
        let stored = self.chunks.read().unwrap();
        let out: Vec<DocumentChunk> = match document_id {
            Some(id) => {
                let mut group: Vec<DocumentChunk> =
                    stored.iter().filter(|c| c.document_id == id).cloned().collect();
                group.sort_by_key(|c| c.chunk_index);
                group
            }
            None => {
                let order = self.doc_order.read().unwrap();
                let mut all = Vec::with_capacity(stored.len());
                for id in order.iter() {
                    let mut group: Vec<DocumentChunk> =
                        stored.iter().filter(|c| &c.document_id == id).cloned().collect();
                    group.sort_by_key(|c| c.chunk_index);
                    all.extend(group);
                }
                all
            }
        };
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::chunk_document;

    fn sample_chunks(doc_id: &str, text: &str) -> Vec<DocumentChunk> {
        chunk_document(doc_id, "sample.txt", "txt", text, 8)
    }

    #[tokio::test]
    async fn test_put_replaces_previous_chunks() {
        let store = MemoryStore::new();
        let first = sample_chunks("d1", "One sentence here. Another sentence here. A third one.");
        store.put_chunks("d1", &first).await.unwrap();
        assert_eq!(store.chunk_count(), first.len());

        let second = sample_chunks("d1", "Shorter now.");
        store.put_chunks("d1", &second).await.unwrap();
        assert_eq!(store.chunk_count(), second.len());
    }

    #[tokio::test]
    async fn test_list_orders_by_insertion_then_index() {
        let store = MemoryStore::new();
        store
            .put_chunks("b", &sample_chunks("b", "B one here. B two here. B three here."))
            .await
            .unwrap();
        store
            .put_chunks("a", &sample_chunks("a", "A one here. A two here."))
            .await
            .unwrap();

        let all = store.list_chunks(None).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|c| c.document_id.as_str()).collect();
        // Document "b" was inserted first, so its chunks lead.
        assert!(ids.starts_with(&["b"]));
        let first_a = ids.iter().position(|id| *id == "a").unwrap();
        assert!(ids[first_a..].iter().all(|id| *id == "a"));

        for pair in all.windows(2) {
            if pair[0].document_id == pair[1].document_id {
                assert!(pair[0].chunk_index < pair[1].chunk_index);
            }
        }
    }

    #[tokio::test]
    async fn test_list_single_document() {
        let store = MemoryStore::new();
        store
            .put_chunks("a", &sample_chunks("a", "A one here. A two here."))
            .await
            .unwrap();
        store
            .put_chunks("b", &sample_chunks("b", "B one here."))
            .await
            .unwrap();

        let only_a = store.list_chunks(Some("a")).await.unwrap();
        assert!(!only_a.is_empty());
        assert!(only_a.iter().all(|c| c.document_id == "a"));
    }
}
