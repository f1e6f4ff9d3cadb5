//! Lexical similarity via TF-IDF cosine over a two-document corpus

use std::collections::HashMap;

/// TF-IDF scorer treating the resume and job description as the entire
/// corpus, so document frequencies reflect only these two texts.
pub struct TfIdfScorer;

impl TfIdfScorer {
    /// Cosine similarity between the TF-IDF vectors of two term streams
    /// (unigrams + bigrams, stop words already removed).
    ///
    /// Returns 0.0 when either document yields no terms. Symmetric in its
    /// arguments.
    pub fn similarity(terms_a: &[String], terms_b: &[String]) -> f32 {
        if terms_a.is_empty() || terms_b.is_empty() {
            return 0.0;
        }

        let counts_a = Self::term_counts(terms_a);
        let counts_b = Self::term_counts(terms_b);

        // Smoothed idf over the two-document corpus: terms shared by both
        // documents get idf 1.0, single-document terms ln(3/2) + 1.
        let idf = |in_a: bool, in_b: bool| -> f32 {
            let df = (in_a as u32 + in_b as u32) as f32;
            ((1.0 + 2.0) / (1.0 + df)).ln() + 1.0
        };

        let mut dot = 0.0f32;
        let mut norm_a = 0.0f32;
        let mut norm_b = 0.0f32;

        for (term, &tf_a) in &counts_a {
            let tf_b = counts_b.get(term).copied().unwrap_or(0);
            let w = idf(true, tf_b > 0);
            let weight_a = tf_a as f32 * w;
            norm_a += weight_a * weight_a;
            if tf_b > 0 {
                dot += weight_a * (tf_b as f32 * w);
            }
        }

        for (term, &tf_b) in &counts_b {
            let in_a = counts_a.contains_key(term);
            let weight_b = tf_b as f32 * idf(in_a, true);
            norm_b += weight_b * weight_b;
        }

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot / (norm_a.sqrt() * norm_b.sqrt())
    }

    fn term_counts(terms: &[String]) -> HashMap<&str, u32> {
        let mut counts = HashMap::new();
        for term in terms {
            *counts.entry(term.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_identical_documents_score_one() {
        let doc = terms(&["rust", "systems", "programming", "rust systems"]);
        let score = TfIdfScorer::similarity(&doc, &doc);
        assert!((score - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let a = terms(&["rust", "developer", "backend", "api"]);
        let b = terms(&["rust", "engineer", "backend", "database"]);

        let ab = TfIdfScorer::similarity(&a, &b);
        let ba = TfIdfScorer::similarity(&b, &a);

        assert_eq!(ab, ba);
    }

    #[test]
    fn test_disjoint_documents_score_zero() {
        let a = terms(&["rust", "tokio"]);
        let b = terms(&["marketing", "sales"]);
        assert_eq!(TfIdfScorer::similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_empty_document_scores_zero() {
        let a = terms(&["rust"]);
        assert_eq!(TfIdfScorer::similarity(&a, &[]), 0.0);
        assert_eq!(TfIdfScorer::similarity(&[], &a), 0.0);
        assert_eq!(TfIdfScorer::similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_identical_beats_near_identical() {
        let a = terms(&["rust", "backend", "api", "postgres"]);
        let near = terms(&["rust", "backend", "api", "redis"]);

        let exact = TfIdfScorer::similarity(&a, &a);
        let close = TfIdfScorer::similarity(&a, &near);

        assert!(exact >= close);
        assert!(close > 0.0);
    }

    #[test]
    fn test_overlap_increases_similarity() {
        let job = terms(&["rust", "backend", "kubernetes", "grpc"]);
        let strong = terms(&["rust", "backend", "kubernetes", "python"]);
        let weak = terms(&["rust", "frontend", "css", "design"]);

        assert!(
            TfIdfScorer::similarity(&job, &strong) > TfIdfScorer::similarity(&job, &weak)
        );
    }
}
