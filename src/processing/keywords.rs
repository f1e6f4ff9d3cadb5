//! Keyword importance extraction from job text and resume coverage analysis

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A distinctive job-description term and its presence in the resume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobKeyword {
    pub term: String,
    /// Normalized single-document term weight in (0, 1]
    pub importance: f32,
    pub in_resume: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordCoverageDetail {
    /// Top terms kept for display, ranked by importance
    pub job_keywords: Vec<JobKeyword>,
    pub coverage_percentage: f32,
    /// Number of important terms considered for coverage
    pub total_keywords: usize,
    pub matched_keywords: usize,
}

/// Extracts the job description's most distinctive terms and measures their
/// presence in the normalized resume text.
pub struct KeywordAnalyzer {
    top_terms: usize,
    display_terms: usize,
}

impl KeywordAnalyzer {
    pub fn new(top_terms: usize, display_terms: usize) -> Self {
        Self {
            top_terms,
            display_terms,
        }
    }

    /// Rank job terms by single-document weight (L2-normalized term
    /// frequency over unigrams + bigrams), check each of the top K against
    /// the resume by substring containment, and report coverage.
    ///
    /// Ties rank by first occurrence in the job text. No extractable terms
    /// yields an empty detail with 0% coverage.
    pub fn analyze(&self, resume_normalized: &str, job_terms: &[String]) -> KeywordCoverageDetail {
        let mut counts: HashMap<&str, (u32, usize)> = HashMap::new();
        for (position, term) in job_terms.iter().enumerate() {
            let entry = counts.entry(term.as_str()).or_insert((0, position));
            entry.0 += 1;
        }

        if counts.is_empty() {
            return KeywordCoverageDetail {
                job_keywords: Vec::new(),
                coverage_percentage: 0.0,
                total_keywords: 0,
                matched_keywords: 0,
            };
        }

        let norm = counts
            .values()
            .map(|&(count, _)| (count as f32).powi(2))
            .sum::<f32>()
            .sqrt();

        let mut ranked: Vec<(&str, f32, usize)> = counts
            .into_iter()
            .map(|(term, (count, first_seen))| (term, count as f32 / norm, first_seen))
            .collect();

        // Descending by importance, ascending by first occurrence on ties
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.2.cmp(&b.2))
        });
        ranked.truncate(self.top_terms);

        let keywords: Vec<JobKeyword> = ranked
            .into_iter()
            .map(|(term, importance, _)| JobKeyword {
                term: term.to_string(),
                importance,
                in_resume: resume_normalized.contains(term),
            })
            .collect();

        let total_keywords = keywords.len();
        let matched_keywords = keywords.iter().filter(|k| k.in_resume).count();
        let coverage_percentage = if total_keywords == 0 {
            0.0
        } else {
            matched_keywords as f32 / total_keywords as f32 * 100.0
        };

        let mut job_keywords = keywords;
        job_keywords.truncate(self.display_terms);

        KeywordCoverageDetail {
            job_keywords,
            coverage_percentage,
            total_keywords,
            matched_keywords,
        }
    }
}
