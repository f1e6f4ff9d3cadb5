//! Integration tests for the match scoring engine

use resume_matcher::config::Config;
use resume_matcher::engine::{ConfidenceLevel, MatchEngine};
use resume_matcher::error::MatcherError;
use resume_matcher::processing::semantic::NullProvider;
use resume_matcher::processing::skills::SkillExtractor;
use resume_matcher::SkillCollection;
use std::sync::Arc;

const RESUME_TEXT: &str = "Jane Doe, Senior Software Engineer. \
    Eight years building backend services in Rust and Python. \
    Led migration to Kubernetes on AWS, designed PostgreSQL schemas, \
    and built CI pipelines with Docker and Jenkins. \
    Experience with React frontends and REST API design.";

const JOB_TEXT: &str = "We are hiring a Senior Backend Engineer. \
    Requirements: strong Rust experience, PostgreSQL, Kubernetes, and AWS. \
    You will design backend services, build REST APIs, and own the CI pipeline. \
    Experience with Kafka and Terraform is a plus.";

fn null_engine() -> MatchEngine {
    MatchEngine::with_provider(Config::default(), Arc::new(NullProvider))
        .expect("default config is valid")
}

fn extracted_skills() -> (SkillCollection, SkillCollection) {
    let extractor = SkillExtractor::new();
    (extractor.extract(RESUME_TEXT), extractor.extract(JOB_TEXT))
}

#[tokio::test]
async fn test_scoring_produces_complete_result() {
    let engine = null_engine();
    let (resume_skills, job_skills) = extracted_skills();

    let result = engine
        .score(RESUME_TEXT, JOB_TEXT, &resume_skills, &job_skills)
        .await
        .unwrap();

    assert!(result.overall_score >= 0.0 && result.overall_score <= 100.0);
    assert!(result.scores.lexical > 0.0);
    assert!(result.scores.skill_match > 0.0);
    assert!(result.scores.keyword_coverage > 0.0);
    assert!(!result.insights.is_empty());
    assert!(!result.skill_analysis.matched_skills.is_empty());
}

#[tokio::test]
async fn test_missing_resume_text_is_validation_failure() {
    let engine = null_engine();
    let skills = SkillCollection::new();

    let result = engine.score("", JOB_TEXT, &skills, &skills).await;

    match result {
        Err(MatcherError::InvalidInput(msg)) => assert!(msg.contains("resume")),
        other => panic!("Expected InvalidInput, got {:?}", other.map(|r| r.overall_score)),
    }

    // Whitespace-only counts as missing too
    assert!(engine.score("   \n ", JOB_TEXT, &skills, &skills).await.is_err());
}

#[tokio::test]
async fn test_missing_job_text_is_validation_failure() {
    let engine = null_engine();
    let skills = SkillCollection::new();

    let result = engine.score(RESUME_TEXT, "", &skills, &skills).await;

    match result {
        Err(MatcherError::InvalidInput(msg)) => assert!(msg.contains("job")),
        other => panic!("Expected InvalidInput, got {:?}", other.map(|r| r.overall_score)),
    }
}

#[tokio::test]
async fn test_unavailable_provider_zeroes_semantic_only() {
    let engine = null_engine();
    let (resume_skills, job_skills) = extracted_skills();

    let result = engine
        .score(RESUME_TEXT, JOB_TEXT, &resume_skills, &job_skills)
        .await
        .unwrap();

    // Semantic signal is exactly 0, other signals keep their original weights
    assert_eq!(result.scores.semantic, 0.0);
    let config = Config::default();
    let expected = result.scores.lexical * config.scoring.lexical_weight
        + result.scores.skill_match * config.scoring.skill_weight
        + result.scores.keyword_coverage * config.scoring.keyword_weight;
    assert!((result.overall_score - expected).abs() < 0.05);
}

#[tokio::test]
async fn test_empty_resume_skills_still_scores_other_signals() {
    let engine = null_engine();
    let extractor = SkillExtractor::new();
    let job_skills = extractor.extract(JOB_TEXT);
    let resume_skills = SkillCollection::new();

    let result = engine
        .score(RESUME_TEXT, JOB_TEXT, &resume_skills, &job_skills)
        .await
        .unwrap();

    assert_eq!(result.scores.skill_match, 0.0);
    assert!(result.scores.lexical > 0.0);
    assert!(result.scores.keyword_coverage > 0.0);
}

#[tokio::test]
async fn test_short_job_text_returns_defined_values() {
    let engine = null_engine();
    let skills = SkillCollection::new();

    // Under the usual minimum analyzable length; must not fail
    let result = engine
        .score(RESUME_TEXT, "Rust developer.", &skills, &skills)
        .await
        .unwrap();

    assert!(result.overall_score >= 0.0 && result.overall_score <= 100.0);
}

#[tokio::test]
async fn test_identical_documents_score_high_lexical() {
    let engine = null_engine();
    let (_, job_skills) = extracted_skills();

    let result = engine
        .score(JOB_TEXT, JOB_TEXT, &job_skills, &job_skills)
        .await
        .unwrap();

    assert!((result.scores.lexical - 100.0).abs() < 0.01);
    assert_eq!(result.scores.skill_match, 100.0);
    // Bigram terms spanning removed stop words can miss substring
    // containment, so coverage of a document against itself is high but not
    // necessarily exact.
    assert!(result.scores.keyword_coverage >= 80.0);
}

#[tokio::test]
async fn test_lexical_score_is_symmetric() {
    let engine = null_engine();
    let skills = SkillCollection::new();

    let forward = engine
        .score(RESUME_TEXT, JOB_TEXT, &skills, &skills)
        .await
        .unwrap();
    let backward = engine
        .score(JOB_TEXT, RESUME_TEXT, &skills, &skills)
        .await
        .unwrap();

    assert_eq!(forward.scores.lexical, backward.scores.lexical);
}

#[tokio::test]
async fn test_confidence_follows_overall_score() {
    let engine = null_engine();
    let (resume_skills, job_skills) = extracted_skills();

    let result = engine
        .score(RESUME_TEXT, JOB_TEXT, &resume_skills, &job_skills)
        .await
        .unwrap();

    let expected = if result.overall_score >= 60.0 {
        ConfidenceLevel::High
    } else if result.overall_score >= 40.0 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    };
    assert_eq!(result.confidence_level, expected);
}

#[tokio::test]
async fn test_unrelated_documents_score_low() {
    let engine = null_engine();
    let skills = SkillCollection::new();

    let pastry_job = "Head pastry chef wanted for artisan bakery. \
        Laminated dough, sourdough starters, and wedding cake decoration experience required.";

    let result = engine
        .score(RESUME_TEXT, pastry_job, &skills, &skills)
        .await
        .unwrap();

    assert!(result.overall_score < 40.0);
    assert_eq!(result.recommendation, resume_matcher::Recommendation::NotRecommended);
}

#[test]
fn test_engine_rejects_invalid_weights() {
    let mut config = Config::default();
    config.scoring.semantic_weight = 0.45; // weights sum to 1.1

    match MatchEngine::new(config) {
        Err(MatcherError::Configuration(_)) => {}
        _ => panic!("Expected configuration failure"),
    }
}

#[tokio::test]
async fn test_result_serializes_to_expected_shape() {
    let engine = null_engine();
    let (resume_skills, job_skills) = extracted_skills();

    let result = engine
        .score(RESUME_TEXT, JOB_TEXT, &resume_skills, &job_skills)
        .await
        .unwrap();

    let value = serde_json::to_value(&result).unwrap();
    assert!(value["overall_score"].is_number());
    assert!(value["confidence_level"].is_string());
    assert!(value["scores"]["keyword_coverage"].is_number());
    assert!(value["skill_analysis"]["missing_skills"].is_array());
    assert!(value["keyword_analysis"]["job_keywords"].is_array());
    assert!(value["insights"].is_array());
    assert!(value["recommendation"].is_string());
}
