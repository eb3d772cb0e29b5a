use crate::core::normalize::collapse_whitespace;
use crate::services::embedding::Embedding;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};

/// Content-addressed store for embedding vectors
///
/// Implementations must allow concurrent readers without a global lock.
/// Writes are idempotent: every writer of a key holds the same vector, so
/// whichever write lands is equivalent.
pub trait EmbeddingStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Embedding>;

    fn insert(&self, key: String, embedding: Embedding);

    fn stats(&self) -> CacheStats;
}

/// In-process embedding store backed by moka
///
/// Unbounded unless a capacity is given, in which case least-recently-used
/// entries are evicted.
pub struct MemoryEmbeddingStore {
    entries: moka::sync::Cache<String, Embedding>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryEmbeddingStore {
    pub fn unbounded() -> Self {
        Self::from_cache(moka::sync::Cache::builder().build())
    }

    pub fn with_capacity(max_entries: u64) -> Self {
        Self::from_cache(moka::sync::Cache::builder().max_capacity(max_entries).build())
    }

    /// Bounded when `capacity` is set, unbounded otherwise
    pub fn from_capacity(capacity: Option<u64>) -> Self {
        match capacity {
            Some(max_entries) => Self::with_capacity(max_entries),
            None => Self::unbounded(),
        }
    }

    fn from_cache(entries: moka::sync::Cache<String, Embedding>) -> Self {
        Self {
            entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

impl Default for MemoryEmbeddingStore {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl EmbeddingStore for MemoryEmbeddingStore {
    fn get(&self, key: &str) -> Option<Embedding> {
        match self.entries.get(key) {
            Some(embedding) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("Embedding cache hit: {}", key);
                Some(embedding)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("Embedding cache miss: {}", key);
                None
            }
        }
    }

    fn insert(&self, key: String, embedding: Embedding) {
        self.entries.insert(key, embedding);
    }

    fn stats(&self) -> CacheStats {
        self.entries.run_pending_tasks();
        CacheStats::new(
            self.entries.entry_count(),
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
    pub hit_count: u64,
    pub miss_count: u64,
    pub hit_rate: f64,
}

impl CacheStats {
    pub fn new(entries: u64, hit_count: u64, miss_count: u64) -> Self {
        let lookups = hit_count + miss_count;
        let hit_rate = if lookups == 0 {
            0.0
        } else {
            hit_count as f64 / lookups as f64
        };
        Self {
            entries,
            hit_count,
            miss_count,
            hit_rate,
        }
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Key for the embedding of `text` under a given model
    ///
    /// Whitespace is collapsed before hashing so layout-only differences share
    /// an entry; the model id keeps vectors of different models apart.
    pub fn embedding(model_id: &str, text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(model_id.as_bytes());
        hasher.update([0u8]);
        hasher.update(collapse_whitespace(text).as_bytes());
        format!("emb:{}", hex::encode(hasher.finalize()))
    }
}
