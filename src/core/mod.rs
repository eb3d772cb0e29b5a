// Core algorithm exports
pub mod evaluation;
pub mod explain;
pub mod extractor;
pub mod matcher;
pub mod normalize;
pub mod ontology;
pub mod ranker;
pub mod scoring;
pub mod similarity;
pub mod trie;

pub use evaluation::{EvaluationMetrics, MetricsReport};
pub use extractor::{SkillExtractor, SkillSet};
pub use matcher::{DocumentRole, MatchError, Matcher};
pub use ontology::{Ontology, OntologyDefinition, OntologyError, OntologyStats, Skill, SkillEntry};
pub use ranker::rank_results;
pub use scoring::calculate_match_score;
pub use similarity::{cosine_similarity, DimensionMismatch};
