// Unit tests for Resume Match

use resume_match::core::{
    cosine_similarity,
    evaluation::{average_precision, normalized_dcg, precision_at_k},
    ranker::rank_results,
    scoring::{calculate_match_score, calculate_skill_coverage, calculate_skill_density},
    similarity::rescaled_similarity,
    Ontology, OntologyError, SkillExtractor, SkillSet,
};
use resume_match::models::{Document, MatchResult, ScoringWeights};
use resume_match::services::Embedding;

const ONTOLOGY: &str = r#"
languages:
  - Python
  - SQL
  - name: C++
    aliases: [cpp]
  - C
  - name: JavaScript
    aliases: [js]
frameworks:
  - name: Node.js
    aliases: [node]
  - Machine Learning
  - Deep Learning
  - scikit-learn
cloud:
  - name: Amazon Web Services
    aliases: [aws]
"#;

fn ontology() -> Ontology {
    Ontology::from_yaml_str(ONTOLOGY).expect("valid ontology")
}

fn skills(names: &[&str]) -> SkillSet {
    names.iter().map(|s| s.to_string()).collect()
}

fn document(names: &[&str], vector: Vec<f32>) -> Document {
    Document::new("", skills(names), Embedding::new(vector))
}

fn result(composite: f64, coverage: f64, semantic: f64) -> MatchResult {
    MatchResult {
        composite_score: composite,
        semantic_score: semantic,
        skill_coverage: coverage,
        skill_density: 0.0,
        matched_skills: vec![],
        missing_skills: vec![],
        explanation: String::new(),
    }
}

#[test]
fn test_extraction_is_case_insensitive() {
    let ontology = ontology();
    let extractor = SkillExtractor::new(&ontology);

    assert_eq!(extractor.extract("PYTHON and sql"), skills(&["Python", "SQL"]));
    assert_eq!(extractor.extract("python AND SQL"), extractor.extract("Python and SQL"));
}

#[test]
fn test_extraction_prefers_longest_span() {
    let ontology = ontology();
    let extractor = SkillExtractor::new(&ontology);

    // "deep learning" wins; "learning" alone is not a skill
    assert_eq!(
        extractor.extract("Deep learning research"),
        skills(&["Deep Learning"])
    );
    assert_eq!(
        extractor.extract("machine learning and deep learning"),
        skills(&["Deep Learning", "Machine Learning"])
    );
}

#[test]
fn test_extraction_keeps_symbol_tokens_apart() {
    let ontology = ontology();
    let extractor = SkillExtractor::new(&ontology);

    assert_eq!(extractor.extract("Modern C++ only"), skills(&["C++"]));
    assert_eq!(extractor.extract("Embedded C, some cpp"), skills(&["C", "C++"]));
    assert_eq!(extractor.extract("Node.js backend"), skills(&["Node.js"]));
    assert_eq!(extractor.extract("js, node"), skills(&["JavaScript", "Node.js"]));
}

#[test]
fn test_extraction_handles_hyphen_variants() {
    let ontology = ontology();
    let extractor = SkillExtractor::new(&ontology);

    assert_eq!(extractor.extract("scikit-learn"), skills(&["scikit-learn"]));
    assert_eq!(extractor.extract("scikit learn"), skills(&["scikit-learn"]));
}

#[test]
fn test_extraction_of_empty_text() {
    let ontology = ontology();
    assert!(SkillExtractor::new(&ontology).extract("").is_empty());
    assert!(SkillExtractor::new(&ontology).extract("   \n\t").is_empty());
}

#[test]
fn test_ontology_rejects_duplicate_aliases() {
    let err = Ontology::from_yaml_str(
        "a:\n  - name: Go\n    aliases: [golang]\nb:\n  - name: Golang Tools\n    aliases: [golang]\n",
    )
    .unwrap_err();
    assert!(matches!(err, OntologyError::AliasCollision { .. }));
}

#[test]
fn test_cosine_similarity_basics() {
    assert!((cosine_similarity(&[1.0, 2.0], &[2.0, 4.0]).unwrap() - 1.0).abs() < 1e-9);
    assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]).unwrap() + 1.0).abs() < 1e-9);
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).unwrap(), 0.0);
    assert!(cosine_similarity(&[1.0], &[1.0, 0.0]).is_err());
}

#[test]
fn test_rescaled_similarity_range() {
    assert_eq!(rescaled_similarity(&[1.0, 0.0], &[-1.0, 0.0]).unwrap(), 0.0);
    assert_eq!(rescaled_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap(), 0.5);
    assert_eq!(rescaled_similarity(&[1.0, 0.0], &[1.0, 0.0]).unwrap(), 1.0);
}

#[test]
fn test_coverage_and_density_values() {
    let required = skills(&["Python", "SQL", "AWS", "C"]);
    let possessed = skills(&["Python", "AWS", "JavaScript"]);

    assert_eq!(calculate_skill_coverage(&required, &possessed), 0.5);
    assert!((calculate_skill_density(&possessed, &required) - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_composite_uses_weights() {
    let job = document(&["Python", "SQL"], vec![1.0, 0.0]);
    let resume = document(&["Python"], vec![1.0, 0.0]);

    let result = calculate_match_score(&resume, &job, &ScoringWeights::default()).unwrap();
    // 0.4 * 1.0 + 0.4 * 0.5 + 0.2 * 1.0
    assert!((result.composite_score - 0.8).abs() < 1e-12);
    assert!(result.explanation.contains("Strong skills in: Python."));
    assert!(result.explanation.contains("Consider developing skills in: SQL."));
}

#[test]
fn test_vacuous_coverage_for_skill_free_job() {
    let job = document(&[], vec![0.0, 1.0]);
    let resume = document(&["Python"], vec![0.0, 1.0]);

    let result = calculate_match_score(&resume, &job, &ScoringWeights::default()).unwrap();
    assert_eq!(result.skill_coverage, 1.0);
    assert_eq!(result.skill_density, 0.0);
    assert!(result.missing_skills.is_empty());
}

#[test]
fn test_ranking_is_stable() {
    let ranked = rank_results(vec![
        (0, "a".into(), result(0.5, 0.5, 0.5)),
        (1, "b".into(), result(0.7, 0.1, 0.1)),
        (2, "c".into(), result(0.5, 0.5, 0.5)),
        (3, "d".into(), result(0.5, 0.6, 0.1)),
    ]);

    let ids: Vec<&str> = ranked.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "d", "a", "c"]);
    assert_eq!(ranked.iter().map(|e| e.rank).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
}

#[test]
fn test_weights_validation() {
    assert!(ScoringWeights::new(0.4, 0.4, 0.2).is_ok());
    assert!(ScoringWeights::new(0.4, 0.4, 0.4).is_err());
    assert!(ScoringWeights::new(-0.2, 0.6, 0.6).is_err());
}

#[test]
fn test_evaluation_metrics() {
    assert_eq!(precision_at_k(&[true, true, false, false], 2), 1.0);
    assert_eq!(average_precision(&[true, true]), 1.0);
    assert!((normalized_dcg(&[1.0, 1.0, 0.0], Some(2)) - 1.0).abs() < 1e-12);
}
