use crate::core::explain::explain;
use crate::core::extractor::SkillSet;
use crate::core::similarity::{rescaled_similarity, DimensionMismatch};
use crate::models::{Document, MatchResult, ScoringWeights};

/// Score a resume against a job description
///
/// Scoring formula (default weights):
/// composite = (
///     semantic * 0.4 +     # rescaled cosine of the two embeddings
///     coverage * 0.4 +     # share of required skills the resume has
///     density  * 0.2       # share of resume skills that are required
/// )
pub fn calculate_match_score(
    resume: &Document,
    job: &Document,
    weights: &ScoringWeights,
) -> Result<MatchResult, DimensionMismatch> {
    let semantic_score =
        rescaled_similarity(resume.embedding().as_slice(), job.embedding().as_slice())?;

    let required = job.skills();
    let possessed = resume.skills();

    let skill_coverage = calculate_skill_coverage(required, possessed);
    let skill_density = calculate_skill_density(possessed, required);

    let composite_score = (semantic_score * weights.semantic
        + skill_coverage * weights.coverage
        + skill_density * weights.density)
        .clamp(0.0, 1.0);

    let matched_skills: Vec<String> = required.intersection(possessed).cloned().collect();
    let missing_skills: Vec<String> = required.difference(possessed).cloned().collect();

    tracing::debug!(
        "Scored resume: composite={:.3} semantic={:.3} coverage={:.3} density={:.3}",
        composite_score,
        semantic_score,
        skill_coverage,
        skill_density
    );

    let explanation = explain(
        composite_score,
        semantic_score,
        skill_coverage,
        &matched_skills,
        &missing_skills,
    );

    Ok(MatchResult {
        composite_score,
        semantic_score,
        skill_coverage,
        skill_density,
        matched_skills,
        missing_skills,
        explanation,
    })
}

/// |required ∩ possessed| / |required|; vacuously 1.0 with no requirements
#[inline]
pub fn calculate_skill_coverage(required: &SkillSet, possessed: &SkillSet) -> f64 {
    if required.is_empty() {
        return 1.0;
    }
    required.intersection(possessed).count() as f64 / required.len() as f64
}

/// |possessed ∩ required| / |possessed|; 0.0 for a resume with no skills
#[inline]
pub fn calculate_skill_density(possessed: &SkillSet, required: &SkillSet) -> f64 {
    if possessed.is_empty() {
        return 0.0;
    }
    possessed.intersection(required).count() as f64 / possessed.len() as f64
}

/// Jaccard overlap |a ∩ b| / |a ∪ b|; 0.0 when both sets are empty
#[inline]
pub fn calculate_skill_overlap(a: &SkillSet, b: &SkillSet) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}
