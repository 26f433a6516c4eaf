//! Query-time retrieval over a loaded chunk set.
//!
//! [`KnowledgeBase`] holds the full chunk collection available for
//! retrieval, in a stable order (document first-insertion order, then
//! `chunk_index`). Retrieval is pure computation over that in-memory
//! set: score every chunk against the query, drop the zero-overlap
//! ones, sort by score, cap at `top_k`. The sort is stable, so ties
//! keep the knowledge base's own ordering and repeated calls return
//! identical lists.
//!
//! Retrieval never fails. A blank query and a query that matches
//! nothing are both normal outcomes, surfaced as
//! [`RetrievalOutcome::NoRelevantSources`] so the caller can fall
//! back to its canned "I don't have that information" response
//! instead of fabricating one.

use std::collections::HashMap;

use anyhow::Result;

use crate::models::{DocumentChunk, RetrievalResult, SourceHit};
use crate::score::relevance_score;
use crate::store::ChunkStore;

/// Default number of sources returned per query.
pub const DEFAULT_TOP_K: usize = 3;

/// The collection of chunks available at query time.
///
/// Built either from a [`ChunkStore`] (the live path) or from an
/// explicit chunk set (tests, demo data) — never from implicit global
/// state. Read-only once constructed; ingestion mutates the store,
/// not a loaded knowledge base.
pub struct KnowledgeBase {
    chunks: Vec<DocumentChunk>,
}

impl KnowledgeBase {
    /// Build a knowledge base from an explicit chunk set.
    ///
    /// Chunks are regrouped by document (first-appearance order) and
    /// sorted by `chunk_index` within each document, so the stable
    /// retrieval order holds regardless of input order.
    pub fn from_chunks(chunks: Vec<DocumentChunk>) -> Self {
        let mut order: Vec<String> = Vec::new();
        let mut by_doc: HashMap<String, Vec<DocumentChunk>> = HashMap::new();
        for chunk in chunks {
            if !by_doc.contains_key(&chunk.document_id) {
                order.push(chunk.document_id.clone());
            }
            by_doc.entry(chunk.document_id.clone()).or_default().push(chunk);
        }

        let mut ordered = Vec::new();
        for id in order {
            if let Some(mut group) = by_doc.remove(&id) {
                group.sort_by_key(|c| c.chunk_index);
                ordered.extend(group);
            }
        }
        Self { chunks: ordered }
    }

    /// Load every chunk from a store.
    pub async fn load<S: ChunkStore + ?Sized>(store: &S) -> Result<Self> {
        let chunks = store.list_chunks(None).await?;
        Ok(Self::from_chunks(chunks))
    }

    pub fn all_chunks(&self) -> &[DocumentChunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Rank chunks against `query` and return at most `top_k` scored
    /// references.
    ///
    /// A blank or whitespace-only query returns an empty list — the
    /// defined "no query" case, not an error. Chunks with zero
    /// overlap are discarded; ties are broken by the knowledge base's
    /// `(document, chunk_index)` order.
    pub fn retrieve(&self, query: &str, top_k: usize) -> Vec<RetrievalResult<'_>> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let mut results: Vec<RetrievalResult<'_>> = self
            .chunks
            .iter()
            .filter_map(|chunk| {
                let score = relevance_score(&chunk.text, query);
                (score > 0.0).then_some(RetrievalResult {
                    chunk,
                    relevance_score: score,
                })
            })
            .collect();

        // Stable sort keeps insertion order for equal scores.
        results.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);
        results
    }

    /// Retrieval entry point for chat/UI callers: ranked hits in
    /// display shape, or an explicit no-sources signal.
    pub fn search(&self, query: &str, top_k: usize) -> RetrievalOutcome {
        let hits: Vec<SourceHit> = self
            .retrieve(query, top_k)
            .into_iter()
            .map(|r| SourceHit {
                file_name: r.chunk.metadata.file_name.clone(),
                snippet: r.chunk.text.clone(),
                relevance_score: r.relevance_score,
            })
            .collect();

        if hits.is_empty() {
            RetrievalOutcome::NoRelevantSources
        } else {
            RetrievalOutcome::Sources(hits)
        }
    }
}

/// Policy decision returned by [`KnowledgeBase::search`]: either an
/// ordered, capped source list, or "nothing relevant" — which is a
/// normal result, distinct from any error.
#[derive(Debug, Clone)]
pub enum RetrievalOutcome {
    Sources(Vec<SourceHit>),
    NoRelevantSources,
}

impl RetrievalOutcome {
    pub fn into_hits(self) -> Vec<SourceHit> {
        match self {
            RetrievalOutcome::Sources(hits) => hits,
            RetrievalOutcome::NoRelevantSources => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RetrievalOutcome::NoRelevantSources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::chunk_document;
    use crate::store::memory::MemoryStore;

    fn policy_kb() -> KnowledgeBase {
        let mut chunks =
            chunk_document("handbook", "Employee Handbook.pdf", "pdf", "Remote work allowed 3 days per week.", 512);
        chunks.extend(chunk_document(
            "security",
            "IT Security Policies.docx",
            "docx",
            "Password must be 12 characters.",
            512,
        ));
        KnowledgeBase::from_chunks(chunks)
    }

    #[test]
    fn test_blank_query_returns_empty() {
        let kb = policy_kb();
        assert!(kb.retrieve("", 3).is_empty());
        assert!(kb.retrieve("   ", 3).is_empty());
        assert!(kb.search("   ", 3).is_empty());
    }

    #[test]
    fn test_zero_score_chunks_excluded() {
        let kb = policy_kb();
        let results = kb.retrieve("remote work policy", 3);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chunk.document_id, "handbook");
        assert!((results[0].relevance_score - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_search_hit_shape() {
        let kb = policy_kb();
        let hits = kb.search("remote work policy", 3).into_hits();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].file_name, "Employee Handbook.pdf");
        assert_eq!(hits[0].snippet, "Remote work allowed 3 days per week.");
        assert!((hits[0].relevance_score - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_relevant_sources_outcome() {
        let kb = policy_kb();
        assert!(kb.search("quarterly parking rota", 3).is_empty());
    }

    #[test]
    fn test_top_k_cap() {
        let text = "Alpha retrieval point. Beta retrieval point. Gamma retrieval point. \
                    Delta retrieval point. Epsilon retrieval point.";
        let kb = KnowledgeBase::from_chunks(chunk_document("d", "d.txt", "txt", text, 6));
        assert!(kb.len() > 3);
        let results = kb.retrieve("retrieval", 3);
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_deterministic_tie_break() {
        let text = "Alpha retrieval point. Beta retrieval point. Gamma retrieval point.";
        let kb = KnowledgeBase::from_chunks(chunk_document("d", "d.txt", "txt", text, 6));
        // Every chunk scores identically, so order must follow
        // chunk_index, and repeated calls must agree.
        let first = kb.retrieve("retrieval point", 10);
        let again = kb.retrieve("retrieval point", 10);
        let indices: Vec<i64> = first.iter().map(|r| r.chunk.chunk_index).collect();
        assert_eq!(indices, (0..first.len() as i64).collect::<Vec<_>>());
        assert_eq!(
            indices,
            again.iter().map(|r| r.chunk.chunk_index).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_from_chunks_regroups_out_of_order_input() {
        let mut chunks = chunk_document("a", "a.txt", "txt", "One point here. Two point here.", 4);
        chunks.reverse();
        let kb = KnowledgeBase::from_chunks(chunks);
        let indices: Vec<i64> = kb.all_chunks().iter().map(|c| c.chunk_index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[tokio::test]
    async fn test_load_from_store() {
        let store = MemoryStore::new();
        let chunks = chunk_document("doc", "doc.txt", "txt", "Remote work guidance sentence.", 512);
        store.put_chunks("doc", &chunks).await.unwrap();

        let kb = KnowledgeBase::load(&store).await.unwrap();
        assert_eq!(kb.len(), chunks.len());
        let hits = kb.search("remote", 3).into_hits();
        assert_eq!(hits.len(), 1);
    }
}
