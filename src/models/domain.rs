use crate::core::extractor::SkillSet;
use crate::services::embedding::Embedding;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Source text together with its derived artifacts
///
/// Built per request and dropped with it; only the embedding vector is
/// cached, by content hash.
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    skills: SkillSet,
    embedding: Embedding,
}

impl Document {
    pub fn new(text: impl Into<String>, skills: SkillSet, embedding: Embedding) -> Self {
        Self {
            text: text.into(),
            skills,
            embedding,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }

    pub fn embedding(&self) -> &Embedding {
        &self.embedding
    }
}

/// Outcome of comparing one resume against one job description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "compositeScore")]
    pub composite_score: f64,
    #[serde(rename = "semanticScore")]
    pub semantic_score: f64,
    #[serde(rename = "skillCoverage")]
    pub skill_coverage: f64,
    #[serde(rename = "skillDensity")]
    pub skill_density: f64,
    #[serde(rename = "matchedSkills")]
    pub matched_skills: Vec<String>,
    #[serde(rename = "missingSkills")]
    pub missing_skills: Vec<String>,
    pub explanation: String,
}

/// One ranked resume in a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based position in the ranking
    pub rank: usize,
    /// Position of the resume in the input batch
    pub index: usize,
    pub id: String,
    pub result: MatchResult,
}

/// A resume that could not be scored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankFailure {
    pub index: usize,
    pub id: String,
    pub error: String,
}

/// Ranked results for many resumes against one job description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedBatch {
    pub entries: Vec<RankedEntry>,
    pub failures: Vec<RankFailure>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid scoring weights: {0}")]
pub struct InvalidWeights(pub String);

/// Weights of the three sub-scores in the composite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub semantic: f64,
    pub coverage: f64,
    pub density: f64,
}

impl ScoringWeights {
    /// Each weight must lie in [0, 1] and together they must sum to 1, which
    /// keeps the composite inside [0, 1].
    pub fn new(semantic: f64, coverage: f64, density: f64) -> Result<Self, InvalidWeights> {
        let weights = Self {
            semantic,
            coverage,
            density,
        };
        weights.validate()?;
        Ok(weights)
    }

    pub fn validate(&self) -> Result<(), InvalidWeights> {
        for (name, value) in [
            ("semantic", self.semantic),
            ("coverage", self.coverage),
            ("density", self.density),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(InvalidWeights(format!("{} weight {} is outside [0, 1]", name, value)));
            }
        }

        let sum = self.semantic + self.coverage + self.density;
        if (sum - 1.0).abs() > 1e-6 {
            return Err(InvalidWeights(format!("weights sum to {}, expected 1", sum)));
        }
        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            semantic: 0.4,
            coverage: 0.4,
            density: 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_are_valid() {
        assert!(ScoringWeights::default().validate().is_ok());
    }

    #[test]
    fn test_weights_out_of_range() {
        assert!(ScoringWeights::new(1.2, -0.1, -0.1).is_err());
        assert!(ScoringWeights::new(f64::NAN, 0.5, 0.5).is_err());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        assert!(ScoringWeights::new(0.5, 0.5, 0.5).is_err());
        assert!(ScoringWeights::new(0.5, 0.3, 0.2).is_ok());
    }
}
