//! Configuration management for the resume matcher

use crate::error::{MatcherError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub embedding: EmbeddingConfig,
    pub keywords: KeywordConfig,
    pub insights: InsightConfig,
}

/// Weights for the four match signals. Must sum to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub lexical_weight: f32,
    pub semantic_weight: f32,
    pub skill_weight: f32,
    pub keyword_weight: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Which embedding provider to use for semantic similarity
    pub provider: EmbeddingProviderKind,
    /// Local Model2Vec model directory (repo layout on disk)
    pub model_path: PathBuf,
    /// Hosted embeddings endpoint
    pub api_url: String,
    /// Hosted embeddings model name
    pub api_model: String,
    /// Environment variable holding the hosted API key
    pub api_key_env: String,
    /// Per-call timeout for hosted embedding requests, in seconds
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProviderKind {
    /// Local Model2Vec model, falls back to hosted then null if it fails to load
    Local,
    /// Hosted embeddings API, falls back to null without a key
    Hosted,
    /// No semantic signal; similarity is always 0.0
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordConfig {
    /// How many top job terms to consider for coverage
    pub top_terms: usize,
    /// How many of those to keep in the displayed detail
    pub display_terms: usize,
}

/// Banding thresholds used by the insight rules, on the 0-100 scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightConfig {
    pub strong_skill_threshold: f32,
    pub partial_skill_threshold: f32,
    pub strong_keyword_threshold: f32,
    pub partial_keyword_threshold: f32,
}

impl Default for Config {
    fn default() -> Self {
        let model_path = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-matcher")
            .join("models")
            .join("M2V_base_output");

        Self {
            scoring: ScoringConfig {
                lexical_weight: 0.25,
                semantic_weight: 0.35,
                skill_weight: 0.25,
                keyword_weight: 0.15,
            },
            embedding: EmbeddingConfig {
                provider: EmbeddingProviderKind::Local,
                model_path,
                api_url: "https://api.openai.com/v1/embeddings".to_string(),
                api_model: "text-embedding-ada-002".to_string(),
                api_key_env: "OPENAI_API_KEY".to_string(),
                request_timeout_secs: 20,
            },
            keywords: KeywordConfig {
                top_terms: 20,
                display_terms: 10,
            },
            insights: InsightConfig {
                strong_skill_threshold: 70.0,
                partial_skill_threshold: 40.0,
                strong_keyword_threshold: 70.0,
                partial_keyword_threshold: 40.0,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| MatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| MatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    /// Fail fast on configurations that would silently produce wrong scores.
    pub fn validate(&self) -> Result<()> {
        let sum = self.scoring.lexical_weight
            + self.scoring.semantic_weight
            + self.scoring.skill_weight
            + self.scoring.keyword_weight;
        if (sum - 1.0).abs() > 1e-4 {
            return Err(MatcherError::Configuration(format!(
                "Scoring weights must sum to 1.0, got {:.4}",
                sum
            )));
        }

        for (name, w) in [
            ("lexical_weight", self.scoring.lexical_weight),
            ("semantic_weight", self.scoring.semantic_weight),
            ("skill_weight", self.scoring.skill_weight),
            ("keyword_weight", self.scoring.keyword_weight),
        ] {
            if w < 0.0 {
                return Err(MatcherError::Configuration(format!(
                    "{} must be non-negative, got {}",
                    name, w
                )));
            }
        }

        if self.keywords.top_terms == 0 {
            return Err(MatcherError::Configuration(
                "keywords.top_terms must be at least 1".to_string(),
            ));
        }
        if self.keywords.display_terms > self.keywords.top_terms {
            return Err(MatcherError::Configuration(format!(
                "keywords.display_terms ({}) cannot exceed keywords.top_terms ({})",
                self.keywords.display_terms, self.keywords.top_terms
            )));
        }

        if self.embedding.request_timeout_secs == 0 {
            return Err(MatcherError::Configuration(
                "embedding.request_timeout_secs must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}
