use crate::models::{MatchResult, RankedEntry};
use std::cmp::Ordering;

/// Ordering of two results, best first
///
/// Composite score descending, then skill coverage descending, then semantic
/// score descending. Callers break remaining ties by input position.
#[inline]
pub fn compare_results(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.composite_score
        .total_cmp(&a.composite_score)
        .then_with(|| b.skill_coverage.total_cmp(&a.skill_coverage))
        .then_with(|| b.semantic_score.total_cmp(&a.semantic_score))
}

/// Sort scored resumes into a ranking
///
/// `scored` holds `(input index, resume id, result)`; it may arrive in any
/// order. Fully tied results keep their input order.
pub fn rank_results(mut scored: Vec<(usize, String, MatchResult)>) -> Vec<RankedEntry> {
    scored.sort_by(|(ia, _, a), (ib, _, b)| compare_results(a, b).then(ia.cmp(ib)));

    scored
        .into_iter()
        .enumerate()
        .map(|(position, (index, id, result))| RankedEntry {
            rank: position + 1,
            index,
            id,
            result,
        })
        .collect()
}
