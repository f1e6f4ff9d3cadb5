//! Semantic similarity backed by a pluggable embedding provider
//!
//! Provider precedence: a configured local Model2Vec model wins; otherwise a
//! hosted embeddings API is used when a key is present; otherwise the null
//! provider makes the semantic signal a deterministic 0.0. Provider failures
//! never cross this module's boundary.

use crate::config::{EmbeddingConfig, EmbeddingProviderKind};
use crate::error::{MatcherError, Result};
use async_trait::async_trait;
use model2vec_rs::model::StaticModel;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Dimension of the zero vector substituted when a hosted call fails
const HOSTED_EMBEDDING_DIM: usize = 1536;

/// Hosted requests are truncated to this many characters per text
const MAX_HOSTED_INPUT_CHARS: usize = 8000;

#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Embed each text into a fixed-length vector.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Local Model2Vec static embeddings
pub struct LocalProvider {
    model: StaticModel,
}

impl LocalProvider {
    pub fn load(model_path: &std::path::Path) -> Result<Self> {
        log::info!("Loading Model2Vec embedding model from: {}", model_path.display());
        let model = StaticModel::from_pretrained(model_path, None, None, None)
            .map_err(|e| MatcherError::Embedding(format!("Failed to load model: {}", e)))?;
        Ok(Self { model })
    }
}

#[async_trait]
impl EmbeddingProvider for LocalProvider {
    fn name(&self) -> &str {
        "local-model2vec"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(self.model.encode(texts))
    }
}

/// Hosted embeddings API (OpenAI-style /v1/embeddings)
pub struct HostedProvider {
    client: reqwest::Client,
    api_url: String,
    api_model: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl HostedProvider {
    pub fn new(config: &EmbeddingConfig, api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| MatcherError::Embedding(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_model: config.api_model.clone(),
            api_key,
        })
    }

    async fn embed_single(&self, text: &str) -> Result<Vec<f32>> {
        let input: String = text.chars().take(MAX_HOSTED_INPUT_CHARS).collect();

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "input": input,
                "model": self.api_model,
            }))
            .send()
            .await
            .map_err(|e| MatcherError::Embedding(format!("Embeddings request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| MatcherError::Embedding(format!("Embeddings request failed: {}", e)))?;

        let body: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| MatcherError::Embedding(format!("Invalid embeddings response: {}", e)))?;

        body.data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| MatcherError::Embedding("Embeddings response was empty".to_string()))
    }
}

#[async_trait]
impl EmbeddingProvider for HostedProvider {
    fn name(&self) -> &str {
        "hosted-api"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());

        for text in texts {
            match self.embed_single(text).await {
                Ok(embedding) => embeddings.push(embedding),
                Err(e) => {
                    // Per-call failure degrades that text to a zero vector so
                    // the pair stays computable.
                    log::warn!("Hosted embedding call failed, substituting zero vector: {}", e);
                    embeddings.push(vec![0.0; HOSTED_EMBEDDING_DIM]);
                }
            }
        }

        Ok(embeddings)
    }
}

/// Null provider used when no embedding source is available
pub struct NullProvider;

#[async_trait]
impl EmbeddingProvider for NullProvider {
    fn name(&self) -> &str {
        "null"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![0.0]).collect())
    }
}

/// Select the embedding provider once at startup, applying the fallback
/// policy. Never fails: anything unloadable degrades to the null provider.
pub fn select_provider(config: &EmbeddingConfig) -> Arc<dyn EmbeddingProvider> {
    let api_key = std::env::var(&config.api_key_env).ok().filter(|k| !k.is_empty());

    match config.provider {
        EmbeddingProviderKind::Local => match LocalProvider::load(&config.model_path) {
            Ok(provider) => {
                log::info!("Semantic similarity using local embedding model");
                return Arc::new(provider);
            }
            Err(e) => {
                log::warn!("Local embedding model unavailable: {}", e);
            }
        },
        EmbeddingProviderKind::Hosted => {}
        EmbeddingProviderKind::None => {
            log::info!("Semantic similarity disabled by configuration");
            return Arc::new(NullProvider);
        }
    }

    if let Some(key) = api_key {
        match HostedProvider::new(config, key) {
            Ok(provider) => {
                log::info!("Semantic similarity using hosted embeddings API");
                return Arc::new(provider);
            }
            Err(e) => {
                log::warn!("Hosted embedding provider unavailable: {}", e);
            }
        }
    } else {
        log::warn!(
            "No embedding provider available ({} not set); semantic signal will be 0",
            config.api_key_env
        );
    }

    Arc::new(NullProvider)
}

/// Semantic scorer wrapping the selected provider. Shared read-only across
/// concurrent scoring calls.
pub struct SemanticScorer {
    provider: Arc<dyn EmbeddingProvider>,
}

impl SemanticScorer {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Embedding cosine similarity in [0, 1]. Degrades to 0.0 on any provider
    /// failure instead of surfacing an error.
    pub async fn similarity(&self, text_a: &str, text_b: &str) -> f32 {
        let texts = vec![text_a.to_string(), text_b.to_string()];

        match self.provider.embed(&texts).await {
            Ok(embeddings) if embeddings.len() >= 2 => {
                cosine_similarity(&embeddings[0], &embeddings[1]).max(0.0)
            }
            Ok(_) => {
                log::warn!("Embedding provider returned too few vectors");
                0.0
            }
            Err(e) => {
                log::warn!("Semantic similarity degraded to 0.0: {}", e);
                0.0
            }
        }
    }
}

/// Cosine similarity between two embedding vectors. Zero-norm or mismatched
/// vectors score 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
