//! Text normalization and tokenization shared by all match signals

use regex::Regex;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// A document held in both its original and normalized forms. The raw text is
/// never mutated; the normalized form is derived from it exactly once.
#[derive(Debug, Clone)]
pub struct TextDocument {
    pub raw_text: String,
    pub normalized_text: String,
}

impl TextDocument {
    pub fn new(raw_text: &str, normalizer: &TextNormalizer) -> Self {
        Self {
            raw_text: raw_text.to_string(),
            normalized_text: normalizer.normalize(raw_text),
        }
    }
}

/// Deterministic text cleaner backing every signal computation.
///
/// Normalization is a pure function of its input: running it twice yields the
/// same string as running it once.
pub struct TextNormalizer {
    stop_words: HashSet<String>,
    html_regex: Regex,
    url_regex: Regex,
    email_regex: Regex,
    punct_regex: Regex,
    whitespace_regex: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        let html_regex = Regex::new(r"<[^>]+>").expect("Invalid HTML tag regex");

        let url_regex = Regex::new(r"(?:https?://|www\.)[^\s]+").expect("Invalid URL regex");

        let email_regex = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
            .expect("Invalid email regex");

        // Keep . + # - so tokens like node.js, c++ and c# survive
        let punct_regex = Regex::new(r"[^\w\s.+#-]").expect("Invalid punctuation regex");

        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");

        Self {
            stop_words: Self::create_stop_words(),
            html_regex,
            url_regex,
            email_regex,
            punct_regex,
            whitespace_regex,
        }
    }

    /// Lower-case, strip HTML-like tags, URLs, email-like tokens and most
    /// punctuation, collapse whitespace and trim. Empty input yields an empty
    /// string.
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut cleaned = text.to_lowercase();
        cleaned = self.html_regex.replace_all(&cleaned, " ").to_string();
        cleaned = self.url_regex.replace_all(&cleaned, " ").to_string();
        cleaned = self.email_regex.replace_all(&cleaned, " ").to_string();
        cleaned = self.punct_regex.replace_all(&cleaned, " ").to_string();
        self.whitespace_regex
            .replace_all(&cleaned, " ")
            .trim()
            .to_string()
    }

    /// Tokenize normalized text into lower-cased words, filtering stop words
    /// and single-character tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();

        for word in text.unicode_words() {
            let normalized = word.to_lowercase();

            if normalized.len() > 1
                && !self.stop_words.contains(&normalized)
                && normalized.chars().any(|c| c.is_alphabetic())
            {
                tokens.push(normalized);
            }
        }

        tokens
    }

    /// Unigrams plus adjacent bigrams over the filtered token stream, in
    /// document order.
    pub fn terms_with_bigrams(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenize(text);
        let mut terms = Vec::with_capacity(tokens.len() * 2);

        for (i, token) in tokens.iter().enumerate() {
            terms.push(token.clone());
            if let Some(next) = tokens.get(i + 1) {
                terms.push(format!("{} {}", token, next));
            }
        }

        terms
    }

    /// Standard English stop-word list
    fn create_stop_words() -> HashSet<String> {
        let stop_words = [
            "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
            "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
            "both", "but", "by", "can", "did", "do", "does", "doing", "down", "during", "each",
            "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here",
            "hers", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "just", "me",
            "more", "most", "my", "no", "nor", "not", "now", "of", "off", "on", "once", "only",
            "or", "other", "our", "ours", "out", "over", "own", "same", "she", "should", "so",
            "some", "such", "than", "that", "the", "their", "theirs", "them", "then", "there",
            "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
            "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom",
            "why", "will", "with", "you", "your", "yours",
        ];

        stop_words.iter().map(|&s| s.to_string()).collect()
    }
}
