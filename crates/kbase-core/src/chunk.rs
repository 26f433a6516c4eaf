//! Text normalization and sentence-boundary chunking.
//!
//! Splits cleaned document text into chunks that respect a
//! configurable token budget while preserving sentence boundaries.
//!
//! # Algorithm
//!
//! 1. [`clean_text`] normalizes the raw input (CRLF, blank-line runs,
//!    whitespace runs, outer trim).
//! 2. The text is split into sentence-like units on `.`, `!`, or `?`
//!    followed by whitespace. The punctuation stays attached to the
//!    preceding unit; the whitespace is consumed.
//! 3. Sentences accumulate greedily into a buffer. When appending the
//!    next sentence would push the buffer's estimated token total past
//!    the budget, the buffer is flushed as a chunk and the sentence
//!    starts a new one.
//! 4. The budget is a soft target for merging, not a hard ceiling: a
//!    single sentence that alone exceeds the budget is emitted whole
//!    as its own chunk, never force-split or truncated.
//! 5. Input that normalizes to the empty string produces zero chunks.
//!
//! The sentence split is intentionally naive — abbreviations, decimal
//! numbers, and ellipses are mishandled. That matches the behavior
//! retrieval was tuned against; do not swap in a smarter segmenter.

use chrono::Utc;

use crate::models::{ChunkMetadata, DocumentChunk};
use crate::token::estimate_tokens;

/// Default per-chunk token budget.
pub const DEFAULT_MAX_TOKENS: usize = 512;

/// Normalize raw document text before chunking.
///
/// Three passes, applied in order: `\r\n` becomes `\n`; runs of three
/// or more newlines collapse to exactly two; runs of two or more
/// whitespace characters collapse to a single space. The result is
/// trimmed. Note the third pass also collapses the double newlines
/// the second pass produced — single newlines are the only vertical
/// whitespace that survives.
pub fn clean_text(input: &str) -> String {
    let unified = input.replace("\r\n", "\n");

    let mut collapsed = String::with_capacity(unified.len());
    let mut newline_run = 0usize;
    for ch in unified.chars() {
        if ch == '\n' {
            newline_run += 1;
            if newline_run <= 2 {
                collapsed.push(ch);
            }
        } else {
            newline_run = 0;
            collapsed.push(ch);
        }
    }

    let mut out = String::with_capacity(collapsed.len());
    let mut chars = collapsed.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch.is_whitespace() && chars.peek().is_some_and(|c| c.is_whitespace()) {
            while chars.peek().is_some_and(|c| c.is_whitespace()) {
                chars.next();
            }
            out.push(' ');
        } else {
            out.push(ch);
        }
    }

    out.trim().to_string()
}

/// Split text into sentence-like units.
///
/// A boundary is a `.`, `!`, or `?` immediately followed by
/// whitespace. The punctuation stays with the preceding unit and the
/// whitespace run between units is consumed.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut chars = text.char_indices().peekable();

    while let Some((_, ch)) = chars.next() {
        if matches!(ch, '.' | '!' | '?')
            && chars.peek().is_some_and(|&(_, next)| next.is_whitespace())
        {
            let end = chars.peek().map(|&(j, _)| j).unwrap_or(text.len());
            sentences.push(&text[start..end]);
            while chars.peek().is_some_and(|&(_, c)| c.is_whitespace()) {
                chars.next();
            }
            start = chars.peek().map(|&(j, _)| j).unwrap_or(text.len());
        }
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }

    sentences
}

/// Split cleaned text into chunk texts bounded by `max_tokens`.
///
/// Sentences are joined with single spaces. The running token total
/// is the sum of per-sentence estimates, compared against the budget
/// before each append. A flush only happens when the buffer is
/// non-empty, which is what lets an oversized single sentence pass
/// through whole as its own chunk.
///
/// Pure and total: no input raises an error, and input that is empty
/// (or whitespace-only) after trimming yields an empty vec.
pub fn chunk_text(text: &str, max_tokens: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_tokens = 0usize;

    for sentence in split_sentences(text) {
        let sentence_tokens = estimate_tokens(sentence);
        if current_tokens + sentence_tokens > max_tokens && !current.is_empty() {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                chunks.push(trimmed.to_string());
            }
            current.clear();
            current.push_str(sentence);
            current_tokens = sentence_tokens;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(sentence);
            current_tokens += sentence_tokens;
        }
    }

    let trimmed = current.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }

    chunks
}

/// Chunk cleaned text into [`DocumentChunk`] records for a document.
///
/// Indices are contiguous from zero and ids are the deterministic
/// `{document_id}_chunk_{index}` composites, so re-chunking identical
/// input reproduces the same ids.
pub fn chunk_document(
    document_id: &str,
    file_name: &str,
    file_type: &str,
    cleaned_text: &str,
    max_tokens: usize,
) -> Vec<DocumentChunk> {
    let created_at = Utc::now();
    chunk_text(cleaned_text, max_tokens)
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let index = i as i64;
            let chunk_tokens = estimate_tokens(&text) as i64;
            DocumentChunk {
                id: DocumentChunk::composite_id(document_id, index),
                document_id: document_id.to_string(),
                chunk_index: index,
                metadata: ChunkMetadata {
                    file_name: file_name.to_string(),
                    file_type: file_type.to_string(),
                    chunk_tokens,
                },
                text,
                created_at,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_crlf() {
        assert_eq!(clean_text("a\r\nb"), "a\nb");
    }

    #[test]
    fn test_clean_text_collapses_blank_runs() {
        // Four newlines collapse to two, then the whitespace pass
        // collapses those two to a single space.
        assert_eq!(clean_text("alpha\n\n\n\nbeta"), "alpha beta");
        // A single newline survives both passes.
        assert_eq!(clean_text("alpha\nbeta"), "alpha\nbeta");
    }

    #[test]
    fn test_clean_text_collapses_spaces_and_trims() {
        assert_eq!(clean_text("  hello    world \t there "), "hello world there");
    }

    #[test]
    fn test_clean_text_empty_variants() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("   \n\n \t "), "");
    }

    #[test]
    fn test_split_sentences_basic() {
        let units = split_sentences("One. Two! Three? Four");
        assert_eq!(units, vec!["One.", "Two!", "Three?", "Four"]);
    }

    #[test]
    fn test_split_sentences_keeps_terminal_punctuation() {
        let units = split_sentences("Done. Next.");
        assert_eq!(units, vec!["Done.", "Next."]);
    }

    #[test]
    fn test_split_sentences_no_boundary_without_whitespace() {
        // Decimal points and inline dots do not split.
        let units = split_sentences("Version 1.2 shipped. See notes.acme.dev today");
        assert_eq!(units, vec!["Version 1.2 shipped.", "See notes.acme.dev today"]);
    }

    #[test]
    fn test_chunk_empty_input() {
        assert!(chunk_text("", 512).is_empty());
        assert!(chunk_text("   ", 512).is_empty());
    }

    #[test]
    fn test_single_chunk_under_budget() {
        // Three short sentences under a generous budget merge into one.
        let chunks = chunk_text("AI is great. Machine learning helps. Cloud is useful.", 1000);
        assert_eq!(chunks.len(), 1);
        assert_eq!(
            chunks[0],
            "AI is great. Machine learning helps. Cloud is useful."
        );
    }

    #[test]
    fn test_splits_when_budget_exceeded() {
        let chunks = chunk_text("AI is great. Machine learning helps. Cloud is useful.", 5);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(!chunk.trim().is_empty());
        }
    }

    #[test]
    fn test_oversized_sentence_emitted_whole() {
        // One sentence estimating well past the budget still comes out
        // as a single chunk.
        let long_sentence = format!("{} end.", "word ".repeat(480));
        let sentence = long_sentence.trim();
        assert!(estimate_tokens(sentence) > 512);
        let chunks = chunk_text(sentence, 512);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], sentence);
    }

    #[test]
    fn test_token_budget_soft() {
        let text = (0..40)
            .map(|i| format!("Sentence number {} talks about chunking.", i))
            .collect::<Vec<_>>()
            .join(" ");
        // Each sentence estimates to 10 tokens; a 21-token budget fits
        // two per chunk.
        let max_tokens = 21;
        let chunks = chunk_text(&text, max_tokens);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(estimate_tokens(chunk) <= max_tokens, "over budget: {}", chunk);
        }
    }

    #[test]
    fn test_reconstruction_preserves_sentence_sequence() {
        let text = "First point. Second point! Third question? Fourth trailing";
        let chunks = chunk_text(text, 6);
        let rejoined = chunks.join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_chunk_document_ids_deterministic() {
        let first = chunk_document("doc-1", "notes.txt", "txt", "A point. B point. C point.", 3);
        let second = chunk_document("doc-1", "notes.txt", "txt", "A point. B point. C point.", 3);
        assert!(!first.is_empty());
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.text, b.text);
        }
        for (i, chunk) in first.iter().enumerate() {
            assert_eq!(chunk.chunk_index, i as i64);
            assert_eq!(chunk.id, format!("doc-1_chunk_{}", i));
            assert_eq!(chunk.metadata.chunk_tokens, estimate_tokens(&chunk.text) as i64);
        }
    }
}
