//! Offline ranking quality metrics
//!
//! Relevance judgements are given in ranked order: `relevant[i]` says whether
//! the item ranked at position `i` is relevant, and `scores[i]` is its graded
//! relevance.

use serde::Serialize;

/// Share of relevant items among the top `k`
///
/// `k` is capped at the list length. Empty lists and `k == 0` give 0.0.
pub fn precision_at_k(relevant: &[bool], k: usize) -> f64 {
    let k = k.min(relevant.len());
    if k == 0 {
        return 0.0;
    }
    relevant[..k].iter().filter(|&&r| r).count() as f64 / k as f64
}

/// Mean of the precision at each relevant position; 0.0 with no relevant items
pub fn average_precision(relevant: &[bool]) -> f64 {
    let mut hits = 0usize;
    let mut sum = 0.0;

    for (i, &is_relevant) in relevant.iter().enumerate() {
        if is_relevant {
            hits += 1;
            sum += hits as f64 / (i + 1) as f64;
        }
    }

    if hits == 0 {
        0.0
    } else {
        sum / hits as f64
    }
}

pub fn mean_average_precision(queries: &[Vec<bool>]) -> f64 {
    mean(queries.iter().map(|q| average_precision(q)))
}

/// DCG of the first `k` scores divided by the DCG of the ideal ordering
///
/// `k = None` uses the whole list. Returns 0.0 when the ideal DCG is zero.
pub fn normalized_dcg(scores: &[f64], k: Option<usize>) -> f64 {
    let k = k.unwrap_or(scores.len());

    let mut ideal = scores.to_vec();
    ideal.sort_by(|a, b| b.total_cmp(a));

    let ideal_dcg = dcg(&ideal, k);
    if ideal_dcg > 0.0 {
        dcg(scores, k) / ideal_dcg
    } else {
        0.0
    }
}

fn dcg(scores: &[f64], k: usize) -> f64 {
    scores
        .iter()
        .take(k)
        .enumerate()
        .map(|(i, score)| score / ((i + 2) as f64).log2())
        .sum()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Aggregated metrics over every recorded query
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsReport {
    pub k: usize,
    #[serde(rename = "precisionAtK")]
    pub precision_at_k: f64,
    #[serde(rename = "meanAveragePrecision")]
    pub mean_average_precision: f64,
    #[serde(rename = "ndcgAtK")]
    pub ndcg_at_k: f64,
}

/// Accumulates per-query judgements for a whole evaluation run
#[derive(Debug, Clone, Default)]
pub struct EvaluationMetrics {
    relevant: Vec<Vec<bool>>,
    scores: Vec<Vec<f64>>,
}

impl EvaluationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_query_results(&mut self, relevant: Vec<bool>, scores: Vec<f64>) {
        self.relevant.push(relevant);
        self.scores.push(scores);
    }

    pub fn query_count(&self) -> usize {
        self.relevant.len()
    }

    pub fn report(&self, k: usize) -> MetricsReport {
        MetricsReport {
            k,
            precision_at_k: mean(self.relevant.iter().map(|r| precision_at_k(r, k))),
            mean_average_precision: mean_average_precision(&self.relevant),
            ndcg_at_k: mean(self.scores.iter().map(|s| normalized_dcg(s, Some(k)))),
        }
    }
}
