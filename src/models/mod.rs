// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Document, InvalidWeights, MatchResult, RankFailure, RankedBatch, RankedEntry, ScoringWeights};
pub use requests::{RankRequest, ResumeInput};
pub use responses::{EngineStats, ExtractResponse, RankResponse};
