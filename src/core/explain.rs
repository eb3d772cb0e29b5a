/// Skills named in the "strong skills" sentence
const MAX_MATCHED_NAMED: usize = 5;
/// Skills named in the "consider developing" sentence
const MAX_MISSING_NAMED: usize = 3;

/// Human-readable summary of a match
pub fn explain(
    composite: f64,
    semantic: f64,
    coverage: f64,
    matched: &[String],
    missing: &[String],
) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(5);

    parts.push(
        match composite {
            s if s >= 0.8 => "Excellent overall match for this position.",
            s if s >= 0.6 => "Good match with some areas for improvement.",
            s if s >= 0.4 => "Moderate match - consider additional preparation.",
            _ => "Limited match - significant gaps identified.",
        }
        .to_string(),
    );

    parts.push(
        match semantic {
            s if s >= 0.7 => "Excellent semantic alignment with the job description.",
            s if s >= 0.5 => "Good semantic similarity with the role requirements.",
            _ => "Limited semantic similarity with the job description.",
        }
        .to_string(),
    );

    parts.push(
        match coverage {
            s if s >= 0.8 => "Excellent skill coverage for this role.",
            s if s >= 0.6 => "Good skill match for most requirements.",
            s if s >= 0.4 => "Moderate skill coverage - some gaps exist.",
            _ => "Significant skill gaps for this position.",
        }
        .to_string(),
    );

    if !matched.is_empty() {
        let named: Vec<&str> = matched.iter().take(MAX_MATCHED_NAMED).map(String::as_str).collect();
        parts.push(format!("Strong skills in: {}.", named.join(", ")));
    }

    if !missing.is_empty() {
        let named: Vec<&str> = missing.iter().take(MAX_MISSING_NAMED).map(String::as_str).collect();
        parts.push(format!("Consider developing skills in: {}.", named.join(", ")));
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_strong_match() {
        let text = explain(0.9, 0.8, 1.0, &names(&["Rust", "SQL"]), &[]);
        assert_eq!(
            text,
            "Excellent overall match for this position. \
             Excellent semantic alignment with the job description. \
             Excellent skill coverage for this role. \
             Strong skills in: Rust, SQL."
        );
    }

    #[test]
    fn test_weak_match_lists_at_most_three_missing() {
        let text = explain(0.2, 0.3, 0.0, &[], &names(&["A", "B", "C", "D"]));
        assert!(text.starts_with("Limited match"));
        assert!(text.contains("Significant skill gaps"));
        assert!(text.ends_with("Consider developing skills in: A, B, C."));
    }

    #[test]
    fn test_threshold_boundaries() {
        assert!(explain(0.6, 0.5, 0.6, &[], &[]).starts_with("Good match"));
        assert!(explain(0.4, 0.5, 0.4, &[], &[]).contains("Moderate skill coverage"));
    }
}
