//! Thematic similarity: cosine over raw term-frequency vectors

use std::collections::{BTreeSet, HashMap};

/// Tokens of this many characters or fewer are ignored
const MAX_IGNORED_TOKEN_LEN: usize = 2;

/// Cosine similarity between the bag-of-words vectors of two texts.
///
/// Counts and norms are accumulated as integers over a sorted union
/// vocabulary, so `similarity(a, b) == similarity(b, a)` and
/// `similarity(t, t) == 1.0` hold exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityEngine;

impl SimilarityEngine {
    pub fn new() -> Self {
        Self
    }

    /// Similarity in [0, 1]; 0 when either text has no qualifying token
    pub fn similarity(&self, text_a: &str, text_b: &str) -> f64 {
        let freq_a = Self::term_frequencies(text_a);
        let freq_b = Self::term_frequencies(text_b);

        if freq_a.is_empty() || freq_b.is_empty() {
            return 0.0;
        }

        let vocabulary: BTreeSet<&str> = freq_a
            .keys()
            .chain(freq_b.keys())
            .map(String::as_str)
            .collect();

        let mut dot: u64 = 0;
        let mut norm_a: u64 = 0;
        let mut norm_b: u64 = 0;
        for token in vocabulary {
            let a = freq_a.get(token).copied().unwrap_or(0);
            let b = freq_b.get(token).copied().unwrap_or(0);
            dot += a * b;
            norm_a += a * a;
            norm_b += b * b;
        }

        let magnitude = (norm_a as f64 * norm_b as f64).sqrt();
        if magnitude == 0.0 {
            return 0.0;
        }

        (dot as f64 / magnitude).min(1.0)
    }

    /// Lowercased tokens split on non-alphanumeric runs, short ones dropped
    pub fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| token.chars().count() > MAX_IGNORED_TOKEN_LEN)
            .map(str::to_string)
            .collect()
    }

    fn term_frequencies(text: &str) -> HashMap<String, u64> {
        let mut frequencies = HashMap::new();
        for token in Self::tokenize(text) {
            *frequencies.entry(token).or_insert(0) += 1;
        }
        frequencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let tokens = SimilarityEngine::tokenize("Node.js, C++ & AWS; 10 years of Rust/Go");
        assert_eq!(tokens, vec!["node", "aws", "years", "rust"]);
    }

    #[test]
    fn test_self_similarity_is_exactly_one() {
        let engine = SimilarityEngine::new();
        for text in [
            "python",
            "Python developer with Python and Docker experience",
            "the the the quick brown fox, the lazy dog again and again",
        ] {
            assert_eq!(engine.similarity(text, text), 1.0);
        }
    }

    #[test]
    fn test_no_qualifying_tokens_is_zero() {
        let engine = SimilarityEngine::new();
        assert_eq!(engine.similarity("", ""), 0.0);
        assert_eq!(engine.similarity("a b c! go to", "a b c! go to"), 0.0);
        assert_eq!(engine.similarity("python", ""), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let engine = SimilarityEngine::new();
        let pairs = [
            ("Looking for a Python developer", "Experienced Python engineer, Python daily"),
            ("rust rust tokio axum", "tokio services in rust with serde"),
            ("completely different words", "nothing shared whatsoever here"),
        ];
        for (a, b) in pairs {
            assert_eq!(engine.similarity(a, b), engine.similarity(b, a));
        }
    }

    #[test]
    fn test_known_value() {
        let engine = SimilarityEngine::new();
        // vectors over {aaa, bbb, ccc}: (2, 1, 0) and (1, 0, 1)
        let similarity = engine.similarity("aaa aaa bbb", "aaa ccc");
        let expected = 2.0 / (5.0_f64 * 2.0).sqrt();
        assert!((similarity - expected).abs() < 1e-12);
    }

    #[test]
    fn test_disjoint_texts() {
        let engine = SimilarityEngine::new();
        assert_eq!(engine.similarity("kotlin android", "pandas numpy"), 0.0);
    }

    #[test]
    fn test_case_folding() {
        let engine = SimilarityEngine::new();
        assert_eq!(engine.similarity("DOCKER Python", "docker PYTHON"), 1.0);
    }
}
