use crate::core::ontology::OntologyStats;
use crate::models::domain::{RankFailure, RankedBatch, RankedEntry, ScoringWeights};
use crate::services::cache::CacheStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response for a ranking run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    #[serde(rename = "batchId")]
    pub batch_id: uuid::Uuid,
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    pub results: Vec<RankedEntry>,
    pub failures: Vec<RankFailure>,
}

impl RankResponse {
    pub fn new(batch: RankedBatch) -> Self {
        Self {
            batch_id: uuid::Uuid::new_v4(),
            generated_at: chrono::Utc::now(),
            total_candidates: batch.total_candidates,
            results: batch.entries,
            failures: batch.failures,
        }
    }
}

/// Skills found in a single document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub skills: Vec<String>,
    #[serde(rename = "byCategory")]
    pub by_category: BTreeMap<String, Vec<String>>,
}

/// Engine configuration and cache state
#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub ontology: OntologyStats,
    #[serde(rename = "embeddingModel")]
    pub embedding_model: String,
    #[serde(rename = "embeddingDimension")]
    pub embedding_dimension: usize,
    pub cache: Option<CacheStats>,
    pub weights: ScoringWeights,
}
