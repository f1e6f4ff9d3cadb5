//! Match scoring engine combining lexical, semantic, skill, and keyword signals

use crate::config::{Config, InsightConfig};
use crate::error::{MatcherError, Result};
use crate::processing::keywords::{KeywordAnalyzer, KeywordCoverageDetail};
use crate::processing::lexical::TfIdfScorer;
use crate::processing::semantic::{self, EmbeddingProvider, SemanticScorer};
use crate::processing::skills::{SkillCollection, SkillMatchDetail, SkillMatcher};
use crate::processing::text::{TextDocument, TextNormalizer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The four signal scores, each on the 0-100 scale. A score of 0 can mean
/// either a poor match or an unavailable signal; it is never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreVector {
    pub lexical: f32,
    pub semantic: f32,
    pub skill_match: f32,
    pub keyword_coverage: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceLevel::High => write!(f, "High"),
            ConfidenceLevel::Medium => write!(f, "Medium"),
            ConfidenceLevel::Low => write!(f, "Low"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Strong Recommend")]
    StrongRecommend,
    Recommend,
    Consider,
    #[serde(rename = "Not Recommended")]
    NotRecommended,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::StrongRecommend => write!(f, "Strong Recommend"),
            Recommendation::Recommend => write!(f, "Recommend"),
            Recommendation::Consider => write!(f, "Consider"),
            Recommendation::NotRecommended => write!(f, "Not Recommended"),
        }
    }
}

/// Complete outcome of one scoring call. Constructed fresh per call, never
/// mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub overall_score: f32,
    pub confidence_level: ConfidenceLevel,
    pub scores: ScoreVector,
    pub skill_analysis: SkillMatchDetail,
    pub keyword_analysis: KeywordCoverageDetail,
    pub insights: Vec<String>,
    pub recommendation: Recommendation,
}

/// Inputs available to the insight rule cascade
struct InsightContext<'a> {
    overall_score: f32,
    skill_analysis: &'a SkillMatchDetail,
    keyword_analysis: &'a KeywordCoverageDetail,
    thresholds: &'a InsightConfig,
}

/// The match scoring engine.
///
/// Each scoring call is a pure function of its inputs and the static
/// configuration; the only shared state is the embedding provider handle,
/// selected once at construction and read-only afterward, so concurrent
/// callers need no synchronization.
pub struct MatchEngine {
    normalizer: TextNormalizer,
    semantic_scorer: SemanticScorer,
    keyword_analyzer: KeywordAnalyzer,
    config: Config,
}

impl MatchEngine {
    /// Create an engine, validating configuration and selecting the embedding
    /// provider. Configuration failures are fatal here rather than surfacing
    /// per request; an unavailable provider is not a failure and degrades to
    /// the null provider.
    pub fn new(config: Config) -> Result<Self> {
        let provider = semantic::select_provider(&config.embedding);
        Self::with_provider(config, provider)
    }

    /// Create an engine with an explicit embedding provider
    pub fn with_provider(config: Config, provider: Arc<dyn EmbeddingProvider>) -> Result<Self> {
        config.validate()?;

        let keyword_analyzer =
            KeywordAnalyzer::new(config.keywords.top_terms, config.keywords.display_terms);

        Ok(Self {
            normalizer: TextNormalizer::new(),
            semantic_scorer: SemanticScorer::new(provider),
            keyword_analyzer,
            config,
        })
    }

    pub fn provider_name(&self) -> &str {
        self.semantic_scorer.provider_name()
    }

    /// Score how well a resume matches a job description.
    ///
    /// Missing resume or job text is the only validation failure. Every
    /// per-signal failure degrades to a 0 sub-score and scoring proceeds
    /// with the remaining signals under their original weights.
    pub async fn score(
        &self,
        resume_text: &str,
        job_text: &str,
        resume_skills: &SkillCollection,
        job_skills: &SkillCollection,
    ) -> Result<MatchResult> {
        if resume_text.trim().is_empty() {
            return Err(MatcherError::InvalidInput(
                "Missing resume text".to_string(),
            ));
        }
        if job_text.trim().is_empty() {
            return Err(MatcherError::InvalidInput(
                "Missing job description text".to_string(),
            ));
        }

        let resume = TextDocument::new(resume_text, &self.normalizer);
        let job = TextDocument::new(job_text, &self.normalizer);

        let resume_terms = self.normalizer.terms_with_bigrams(&resume.normalized_text);
        let job_terms = self.normalizer.terms_with_bigrams(&job.normalized_text);

        let lexical = TfIdfScorer::similarity(&resume_terms, &job_terms) * 100.0;
        let semantic = self
            .semantic_scorer
            .similarity(&resume.normalized_text, &job.normalized_text)
            .await
            * 100.0;

        let skill_analysis = SkillMatcher::match_skills(resume_skills, job_skills);
        let keyword_analysis = self
            .keyword_analyzer
            .analyze(&resume.normalized_text, &job_terms);

        let scores = ScoreVector {
            lexical: round2(lexical),
            semantic: round2(semantic),
            skill_match: round2(skill_analysis.skill_match_percentage),
            keyword_coverage: round2(keyword_analysis.coverage_percentage),
        };

        let weights = &self.config.scoring;
        let overall_score = round2(
            lexical * weights.lexical_weight
                + semantic * weights.semantic_weight
                + skill_analysis.skill_match_percentage * weights.skill_weight
                + keyword_analysis.coverage_percentage * weights.keyword_weight,
        );

        log::debug!(
            "Signal scores: lexical={:.2} semantic={:.2} skill={:.2} keyword={:.2} overall={:.2}",
            scores.lexical,
            scores.semantic,
            scores.skill_match,
            scores.keyword_coverage,
            overall_score
        );

        let insights = generate_insights(&InsightContext {
            overall_score,
            skill_analysis: &skill_analysis,
            keyword_analysis: &keyword_analysis,
            thresholds: &self.config.insights,
        });

        Ok(MatchResult {
            overall_score,
            confidence_level: confidence_level(overall_score),
            scores,
            skill_analysis,
            keyword_analysis,
            insights,
            recommendation: recommendation(overall_score),
        })
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

fn confidence_level(overall_score: f32) -> ConfidenceLevel {
    if overall_score >= 60.0 {
        ConfidenceLevel::High
    } else if overall_score >= 40.0 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

fn recommendation(overall_score: f32) -> Recommendation {
    if overall_score >= 80.0 {
        Recommendation::StrongRecommend
    } else if overall_score >= 60.0 {
        Recommendation::Recommend
    } else if overall_score >= 40.0 {
        Recommendation::Consider
    } else {
        Recommendation::NotRecommended
    }
}

/// Ordered rule cascade; each rule contributes at most one insight and none
/// may fail. Rules with no data to speak about contribute nothing.
fn generate_insights(ctx: &InsightContext) -> Vec<String> {
    let rules: &[fn(&InsightContext) -> Option<String>] = &[
        overall_band_insight,
        skill_fit_insight,
        keyword_alignment_insight,
        focus_areas_insight,
    ];

    rules.iter().filter_map(|rule| rule(ctx)).collect()
}

fn overall_band_insight(ctx: &InsightContext) -> Option<String> {
    let text = if ctx.overall_score >= 80.0 {
        "Excellent match! This candidate shows strong alignment with the job requirements."
    } else if ctx.overall_score >= 60.0 {
        "Good match. The candidate meets most of the key requirements."
    } else if ctx.overall_score >= 40.0 {
        "Moderate match. Some relevant experience but may need development in key areas."
    } else {
        "Limited match. Significant gaps in required skills and experience."
    };
    Some(text.to_string())
}

fn skill_fit_insight(ctx: &InsightContext) -> Option<String> {
    let analysis = ctx.skill_analysis;
    if analysis.total_job_skills == 0 {
        return None;
    }

    let pct = analysis.skill_match_percentage;
    let text = if pct >= ctx.thresholds.strong_skill_threshold {
        format!(
            "Strong technical fit with {} relevant skills matched.",
            analysis.matched_skills.len()
        )
    } else if pct >= ctx.thresholds.partial_skill_threshold {
        format!(
            "Partial technical fit. Has {} required skills but missing {} key skills.",
            analysis.matched_skills.len(),
            analysis.missing_skills.len()
        )
    } else {
        format!(
            "Limited technical match. Missing {} critical skills.",
            analysis.missing_skills.len()
        )
    };
    Some(text)
}

fn keyword_alignment_insight(ctx: &InsightContext) -> Option<String> {
    if ctx.keyword_analysis.total_keywords == 0 {
        return None;
    }

    let coverage = ctx.keyword_analysis.coverage_percentage;
    let text = if coverage >= ctx.thresholds.strong_keyword_threshold {
        "Resume language closely matches job requirements."
    } else if coverage >= ctx.thresholds.partial_keyword_threshold {
        "Some alignment in resume language, but could be improved."
    } else {
        "Resume language needs optimization for this role."
    };
    Some(text.to_string())
}

fn focus_areas_insight(ctx: &InsightContext) -> Option<String> {
    let missing = &ctx.skill_analysis.missing_skills;
    if missing.is_empty() {
        return None;
    }

    let top_missing: Vec<&str> = missing.iter().take(3).map(|s| s.as_str()).collect();
    Some(format!(
        "Focus areas for improvement: {}",
        top_missing.join(", ")
    ))
}
