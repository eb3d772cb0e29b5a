use thiserror::Error;

/// Two vectors of different length were compared
///
/// Embeddings from different models (or model versions) were mixed. This is a
/// contract violation and is never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Embedding dimension mismatch: {left} vs {right}")]
pub struct DimensionMismatch {
    pub left: usize,
    pub right: usize,
}

/// Cosine similarity in [-1, 1]
///
/// A zero vector has no direction; its similarity to anything is 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, DimensionMismatch> {
    if a.len() != b.len() {
        return Err(DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let (dot, norm_a, norm_b) = a.iter().zip(b).fold(
        (0.0f64, 0.0f64, 0.0f64),
        |(dot, na, nb), (&x, &y)| {
            let (x, y) = (f64::from(x), f64::from(y));
            (dot + x * y, na + x * x, nb + y * y)
        },
    );

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok((dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0))
}

/// Cosine similarity mapped onto [0, 1] via `(cosine + 1) / 2`
#[inline]
pub fn rescaled_similarity(a: &[f32], b: &[f32]) -> Result<f64, DimensionMismatch> {
    cosine_similarity(a, b).map(|cos| ((cos + 1.0) / 2.0).clamp(0.0, 1.0))
}
