use crate::config::EmbeddingSettings;
use crate::core::normalize::{collapse_whitespace, words};
use crate::services::cache::{CacheKey, CacheStats, EmbeddingStore, MemoryEmbeddingStore};
use serde::{Deserialize, Serialize};
use siphasher::sip::SipHasher13;
use std::hash::Hasher;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Fixed SipHash keys. Changing them changes every hash embedding, so bump
/// `HASH_MODEL_VERSION` together with them.
const HASH_SEED_K0: u64 = 0x0123_4567_89ab_cdef;
const HASH_SEED_K1: u64 = 0xfedc_ba98_7654_3210;
const HASH_MODEL_VERSION: &str = "hash-v1";

pub const DEFAULT_DIMENSION: usize = 384;

/// Weight of a bigram feature relative to a unigram
const BIGRAM_WEIGHT: f32 = 0.5;

/// The embedding capability could not produce a vector for a document
///
/// Every variant is a per-document failure: the document cannot be scored,
/// but other documents in the same batch are unaffected.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Embedding unavailable: text is empty after normalization")]
    EmptyText,

    #[error("Embedding unavailable: {0}")]
    Unavailable(String),

    #[error("Embedding request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid embedding response: {0}")]
    InvalidResponse(String),
}

/// Dense embedding vector, cheap to clone
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    vector: Arc<[f32]>,
}

impl Embedding {
    pub fn new(vector: Vec<f32>) -> Self {
        Self {
            vector: vector.into(),
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.vector
    }

    pub fn dimension(&self) -> usize {
        self.vector.len()
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(vector: Vec<f32>) -> Self {
        Self::new(vector)
    }
}

/// Text -> fixed-dimension vector
///
/// Implementations must be deterministic for identical text and model
/// version. They may be slow or remote; they must not retry on their own.
pub trait EmbeddingProvider: Send + Sync {
    /// Model identity, including its version; part of every cache key
    fn model_id(&self) -> &str;

    fn dimension(&self) -> usize;

    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError>;

    fn cache_stats(&self) -> Option<CacheStats> {
        None
    }
}

/// Deterministic feature-hashing embedder
///
/// Unigrams and bigrams of the normalized words are hashed with SipHash-1-3
/// under fixed keys into signed buckets, then L2-normalized. No model files
/// are needed and results are stable across Rust versions.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
    model_id: String,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        let dimension = dimension.max(1);
        Self {
            dimension,
            model_id: format!("{}-{}", HASH_MODEL_VERSION, dimension),
        }
    }

    #[inline]
    fn bucket(&self, feature: &str) -> (usize, f32) {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        hasher.write(feature.as_bytes());
        let hash = hasher.finish();
        let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
        ((hash % self.dimension as u64) as usize, sign)
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl EmbeddingProvider for HashEmbedder {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let tokens = words(text);
        if tokens.is_empty() {
            return Err(EmbeddingError::EmptyText);
        }

        let mut vector = vec![0.0f32; self.dimension];
        for token in &tokens {
            let (idx, sign) = self.bucket(token);
            vector[idx] += sign;
        }
        for pair in tokens.windows(2) {
            let (idx, sign) = self.bucket(&format!("{} {}", pair[0], pair[1]));
            vector[idx] += sign * BIGRAM_WEIGHT;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm == 0.0 {
            return Err(EmbeddingError::Unavailable(
                "hashed features cancelled out".to_string(),
            ));
        }
        vector.iter_mut().for_each(|v| *v /= norm);

        Ok(Embedding::new(vector))
    }
}

/// Connection settings for a remote embedding backend
#[derive(Debug, Clone)]
pub struct RemoteEmbedderConfig {
    pub endpoint: String,
    pub model: String,
    pub dimension: usize,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
}

/// Blocking client for an OpenAI-compatible `/embeddings` endpoint
pub struct RemoteEmbedder {
    config: RemoteEmbedderConfig,
    model_id: String,
    client: reqwest::blocking::Client,
}

impl RemoteEmbedder {
    pub fn new(config: RemoteEmbedderConfig) -> Result<Self, EmbeddingError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            model_id: format!("remote:{}", config.model),
            config,
            client,
        })
    }
}

impl EmbeddingProvider for RemoteEmbedder {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let input = collapse_whitespace(text);
        if input.is_empty() {
            return Err(EmbeddingError::EmptyText);
        }

        tracing::debug!("Requesting embedding from: {}", self.config.endpoint);

        let mut request = self.client.post(&self.config.endpoint).json(&EmbeddingRequest {
            model: &self.config.model,
            input: &input,
        });
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send()?;
        if !response.status().is_success() {
            return Err(EmbeddingError::Unavailable(format!(
                "backend returned {}",
                response.status()
            )));
        }

        let body: EmbeddingResponse = response
            .json()
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;
        let vector = body
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| EmbeddingError::InvalidResponse("Missing data array".into()))?;

        if vector.len() != self.config.dimension {
            return Err(EmbeddingError::InvalidResponse(format!(
                "expected {} dimensions, got {}",
                self.config.dimension,
                vector.len()
            )));
        }

        Ok(Embedding::new(vector))
    }
}

/// Wraps a provider with a content-addressed embedding store
///
/// Failures are never cached; a later call for the same text tries again.
pub struct CachedEmbedder<P> {
    inner: P,
    store: Arc<dyn EmbeddingStore>,
}

impl<P: EmbeddingProvider> CachedEmbedder<P> {
    pub fn new(inner: P, store: Arc<dyn EmbeddingStore>) -> Self {
        Self { inner, store }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: EmbeddingProvider> EmbeddingProvider for CachedEmbedder<P> {
    fn model_id(&self) -> &str {
        self.inner.model_id()
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let key = CacheKey::embedding(self.inner.model_id(), text);
        if let Some(embedding) = self.store.get(&key) {
            return Ok(embedding);
        }

        let embedding = self.inner.embed(text)?;
        self.store.insert(key, embedding.clone());
        Ok(embedding)
    }

    fn cache_stats(&self) -> Option<CacheStats> {
        Some(self.store.stats())
    }
}

/// Build the configured provider, wrapped in an in-memory cache
pub fn create_embedder(
    settings: &EmbeddingSettings,
) -> Result<Arc<dyn EmbeddingProvider>, EmbeddingError> {
    let store: Arc<dyn EmbeddingStore> =
        Arc::new(MemoryEmbeddingStore::from_capacity(settings.cache_capacity));

    match settings.provider.as_str() {
        "hash" => Ok(Arc::new(CachedEmbedder::new(
            HashEmbedder::new(settings.dimension),
            store,
        ))),
        "remote" => {
            let endpoint = settings.endpoint.clone().ok_or_else(|| {
                EmbeddingError::Unavailable("remote provider requires embedding.endpoint".into())
            })?;
            let remote = RemoteEmbedder::new(RemoteEmbedderConfig {
                endpoint,
                model: settings.model.clone(),
                dimension: settings.dimension,
                api_key: settings.api_key.clone(),
                timeout: Duration::from_secs(settings.timeout_secs),
            })?;
            Ok(Arc::new(CachedEmbedder::new(remote, store)))
        }
        other => Err(EmbeddingError::Unavailable(format!(
            "unknown embedding provider '{}'",
            other
        ))),
    }
}
