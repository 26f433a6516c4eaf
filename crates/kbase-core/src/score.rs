//! Lexical relevance scoring.
//!
//! Scores a chunk against a query by token-overlap ratio: the query
//! is lowercased and split on spaces, and each query word that occurs
//! anywhere in the lowercased chunk text counts as one match. The
//! score is `matches / query_words`, always in `[0, 1]`.
//!
//! Matching is substring containment, not token-boundary matching —
//! deliberately permissive ("work" matches "workshop"). No stop-word
//! removal, no stemming.

/// Score `chunk_text` against `query`.
///
/// A query with zero words (empty or whitespace-only) scores `0.0`
/// for every chunk.
pub fn relevance_score(chunk_text: &str, query: &str) -> f64 {
    let query_lower = query.to_lowercase();
    let words: Vec<&str> = query_lower.split(' ').filter(|w| !w.is_empty()).collect();
    if words.is_empty() {
        return 0.0;
    }

    let chunk_lower = chunk_text.to_lowercase();
    let matches = words.iter().filter(|w| chunk_lower.contains(*w)).count();

    matches as f64 / words.len() as f64
}
