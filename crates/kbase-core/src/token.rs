//! Token cost estimation.
//!
//! Approximates the language-model token cost of a text span as
//! `ceil(characters / 4)`. This is a deliberate cheap proxy, not a
//! real tokenizer; the absolute numbers are inexact but every budget
//! comparison in the pipeline uses the same estimate, so chunk-size
//! decisions stay self-consistent.

/// Approximate characters-per-token ratio.
const CHARS_PER_TOKEN: usize = 4;

/// Estimate the token cost of `text`. Empty input costs zero.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn test_rounds_up() {
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
        assert_eq!(estimate_tokens("a"), 1);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        // Four characters, twelve bytes.
        assert_eq!(estimate_tokens("日本語だ"), 1);
    }
}
