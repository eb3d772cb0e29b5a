//! Resume Match - skill-aware matching of resumes against job descriptions
//!
//! Skills are extracted against a curated ontology, documents are embedded
//! through a pluggable provider, and each resume is scored on semantic
//! similarity, skill coverage and skill density. Batches are ranked with
//! deterministic tie-breaks.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use core::{MatchError, Matcher, Ontology, OntologyDefinition, SkillExtractor};
pub use models::{MatchResult, RankRequest, RankedBatch, ResumeInput, ScoringWeights};
pub use services::{create_embedder, EmbeddingProvider, HashEmbedder};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_library_exports() {
        let ontology = Ontology::from_yaml_str("languages:\n  - Rust\n").unwrap();
        let matcher = Matcher::with_default_weights(Arc::new(ontology), Arc::new(HashEmbedder::default()));
        let result = matcher.score("Rust developer", "Rust role").unwrap();
        assert_eq!(result.matched_skills, vec!["Rust"]);
    }
}
