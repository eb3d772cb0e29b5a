use crate::core::{
    extractor::{SkillExtractor, SkillSet},
    ontology::Ontology,
    ranker::rank_results,
    scoring::calculate_match_score,
    similarity::DimensionMismatch,
};
use crate::models::{
    Document, EngineStats, InvalidWeights, MatchResult, RankFailure, RankedBatch, ResumeInput,
    ScoringWeights,
};
use crate::services::embedding::{EmbeddingError, EmbeddingProvider};
use rayon::prelude::*;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Which side of a comparison a document plays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    Resume,
    Job,
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentRole::Resume => write!(f, "resume"),
            DocumentRole::Job => write!(f, "job description"),
        }
    }
}

/// Errors surfaced by the matching engine
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Failed to embed {role}: {source}")]
    Embedding {
        role: DocumentRole,
        #[source]
        source: EmbeddingError,
    },

    #[error(transparent)]
    DimensionMismatch(#[from] DimensionMismatch),

    #[error(transparent)]
    InvalidWeights(#[from] InvalidWeights),

    #[error("Ranking cancelled")]
    Cancelled,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Skill extraction against the shared ontology
/// 2. Embedding (through the provider's cache)
/// 3. Scoring of every resume against the job
/// 4. Ranking with deterministic tie-breaks
///
/// Cloning is cheap: the ontology and the embedder are shared.
#[derive(Clone)]
pub struct Matcher {
    ontology: Arc<Ontology>,
    embedder: Arc<dyn EmbeddingProvider>,
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(
        ontology: Arc<Ontology>,
        embedder: Arc<dyn EmbeddingProvider>,
        weights: ScoringWeights,
    ) -> Result<Self, MatchError> {
        weights.validate()?;
        Ok(Self {
            ontology,
            embedder,
            weights,
        })
    }

    pub fn with_default_weights(ontology: Arc<Ontology>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            ontology,
            embedder,
            weights: ScoringWeights::default(),
        }
    }

    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn extractor(&self) -> SkillExtractor<'_> {
        SkillExtractor::new(&self.ontology)
    }

    pub fn extract(&self, text: &str) -> SkillSet {
        self.extractor().extract(text)
    }

    /// Build a document: extracted skills plus embedding
    pub fn document(&self, text: &str, role: DocumentRole) -> Result<Document, MatchError> {
        let skills = self.extract(text);
        let embedding = self
            .embedder
            .embed(text)
            .map_err(|source| MatchError::Embedding { role, source })?;
        Ok(Document::new(text, skills, embedding))
    }

    pub fn score_documents(&self, resume: &Document, job: &Document) -> Result<MatchResult, MatchError> {
        Ok(calculate_match_score(resume, job, &self.weights)?)
    }

    /// Compare one resume text with one job description text
    pub fn score(&self, resume_text: &str, job_text: &str) -> Result<MatchResult, MatchError> {
        let job = self.document(job_text, DocumentRole::Job)?;
        let resume = self.document(resume_text, DocumentRole::Resume)?;
        self.score_documents(&resume, &job)
    }

    /// Rank resumes against a job description
    ///
    /// Resumes whose embedding fails are reported in `failures` and the rest
    /// of the batch is still scored. A failure to embed the job description,
    /// or a dimension mismatch, aborts the whole batch.
    pub fn rank(&self, job_text: &str, resumes: &[ResumeInput]) -> Result<RankedBatch, MatchError> {
        self.rank_cancellable(job_text, resumes, &AtomicBool::new(false))
    }

    /// Like [`Matcher::rank`], but gives up with [`MatchError::Cancelled`]
    /// once `cancel` is raised. The flag is checked before each resume.
    pub fn rank_cancellable(
        &self,
        job_text: &str,
        resumes: &[ResumeInput],
        cancel: &AtomicBool,
    ) -> Result<RankedBatch, MatchError> {
        let job = self.document(job_text, DocumentRole::Job)?;

        let outcomes = resumes
            .par_iter()
            .enumerate()
            .map(|(index, resume)| {
                if cancel.load(Ordering::Relaxed) {
                    return Err(MatchError::Cancelled);
                }
                let outcome = self
                    .document(&resume.text, DocumentRole::Resume)
                    .and_then(|doc| self.score_documents(&doc, &job));
                Ok((index, outcome))
            })
            .collect::<Result<Vec<_>, MatchError>>()?;

        let mut scored = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();

        for (index, outcome) in outcomes {
            let id = resumes[index].id.clone();
            match outcome {
                Ok(result) => scored.push((index, id, result)),
                Err(MatchError::Embedding { source, .. }) => {
                    tracing::warn!("Skipping resume {} ({}): {}", index, id, source);
                    failures.push(RankFailure {
                        index,
                        id,
                        error: source.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        let entries = rank_results(scored);

        tracing::info!(
            "Ranked {} resumes ({} failed) against {} required skills",
            entries.len(),
            failures.len(),
            job.skills().len()
        );

        Ok(RankedBatch {
            entries,
            failures,
            total_candidates: resumes.len(),
        })
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            ontology: self.ontology.stats(),
            embedding_model: self.embedder.model_id().to_string(),
            embedding_dimension: self.embedder.dimension(),
            cache: self.embedder.cache_stats(),
            weights: self.weights,
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("ontology", &self.ontology.stats())
            .field("embedder", &self.embedder.model_id())
            .field("weights", &self.weights)
            .finish()
    }
}
