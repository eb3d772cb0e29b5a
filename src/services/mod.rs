// Service exports
pub mod cache;
pub mod embedding;

pub use cache::{CacheKey, CacheStats, EmbeddingStore, MemoryEmbeddingStore};
pub use embedding::{
    create_embedder, CachedEmbedder, Embedding, EmbeddingError, EmbeddingProvider, HashEmbedder,
    RemoteEmbedder, RemoteEmbedderConfig,
};
