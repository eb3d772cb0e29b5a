use crate::core::ontology::Ontology;
use std::collections::{BTreeMap, BTreeSet};

/// Set of canonical skill names
pub type SkillSet = BTreeSet<String>;

/// Ontology-driven skill extraction
///
/// Matching is longest-match-first: every alias occurrence is collected,
/// longer spans are accepted before shorter ones (leftmost first among equal
/// lengths), and a span is rejected once any of its tokens has been consumed.
#[derive(Debug, Clone, Copy)]
pub struct SkillExtractor<'a> {
    ontology: &'a Ontology,
}

impl<'a> SkillExtractor<'a> {
    pub fn new(ontology: &'a Ontology) -> Self {
        Self { ontology }
    }

    /// Extract the set of canonical skill names present in `text`
    pub fn extract(&self, text: &str) -> SkillSet {
        self.matched_ids(text)
            .into_iter()
            .map(|id| self.ontology.skill_by_id(id).name.clone())
            .collect()
    }

    /// Extract skills grouped by their category
    pub fn extract_by_category(&self, text: &str) -> BTreeMap<String, SkillSet> {
        let mut grouped: BTreeMap<String, SkillSet> = BTreeMap::new();
        for id in self.matched_ids(text) {
            let skill = self.ontology.skill_by_id(id);
            grouped
                .entry(skill.category.clone())
                .or_default()
                .insert(skill.name.clone());
        }
        grouped
    }

    fn matched_ids(&self, text: &str) -> BTreeSet<usize> {
        let tokens = self.ontology.tokenize(text);
        if tokens.is_empty() {
            return BTreeSet::new();
        }

        let mut hits = self.ontology.scan(&tokens);
        hits.sort_by(|a, b| b.len.cmp(&a.len).then(a.start.cmp(&b.start)));

        let mut consumed = vec![false; tokens.len()];
        let mut found = BTreeSet::new();

        for hit in hits {
            let span = hit.start..hit.start + hit.len;
            if consumed[span.clone()].iter().any(|&taken| taken) {
                continue;
            }
            consumed[span].iter_mut().for_each(|taken| *taken = true);
            found.insert(hit.skill);
        }

        tracing::debug!(
            "Extracted {} skills from {} tokens",
            found.len(),
            tokens.len()
        );
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ontology::{OntologyDefinition, SkillEntry};

    fn entry(name: &str, aliases: &[&str]) -> SkillEntry {
        SkillEntry::Detailed {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn ontology() -> Ontology {
        let definition = OntologyDefinition::default()
            .with_skill("languages", entry("Python", &["py"]))
            .with_skill("languages", SkillEntry::Name("SQL".to_string()))
            .with_skill("languages", entry("C++", &["cpp"]))
            .with_skill("languages", SkillEntry::Name("C".to_string()))
            .with_skill("ml", entry("Machine Learning", &["ML"]))
            .with_skill("ml", SkillEntry::Name("Deep Learning".to_string()))
            .with_skill("ml", SkillEntry::Name("Learning".to_string()))
            .with_skill("ml", SkillEntry::Name("Machine".to_string()))
            .with_skill("web", entry("JavaScript", &["js", "node.js"]))
            .with_skill("devops", SkillEntry::Name("CI/CD".to_string()));
        Ontology::load(&definition).expect("valid ontology")
    }

    fn names(set: &SkillSet) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_extracts_canonical_names() {
        let ontology = ontology();
        let extractor = SkillExtractor::new(&ontology);
        let skills = extractor.extract("Looking for a Python and SQL engineer");
        assert_eq!(names(&skills), vec!["Python", "SQL"]);
    }

    #[test]
    fn test_aliases_resolve_to_canonical() {
        let ontology = ontology();
        let extractor = SkillExtractor::new(&ontology);
        let skills = extractor.extract("py scripts, cpp services and Node.js.");
        assert_eq!(names(&skills), vec!["C++", "JavaScript", "Python"]);
    }

    #[test]
    fn test_multi_word_alias_consumes_its_span() {
        let ontology = ontology();
        let extractor = SkillExtractor::new(&ontology);
        let skills = extractor.extract("Five years of machine learning research");
        assert_eq!(names(&skills), vec!["Machine Learning"]);
    }

    #[test]
    fn test_constituents_match_when_multi_word_form_absent() {
        let ontology = ontology();
        let extractor = SkillExtractor::new(&ontology);
        let skills = extractor.extract("machine shop, continuous learning");
        assert_eq!(names(&skills), vec!["Learning", "Machine"]);
    }

    #[test]
    fn test_longest_span_wins_overlap() {
        let ontology = ontology();
        let extractor = SkillExtractor::new(&ontology);
        // "deep learning" and "machine learning" overlap on "learning"
        let skills = extractor.extract("deep learning");
        assert_eq!(names(&skills), vec!["Deep Learning"]);
        let skills = extractor.extract("deep machine learning");
        assert_eq!(names(&skills), vec!["Machine Learning"]);
    }

    #[test]
    fn test_cpp_does_not_match_c() {
        let ontology = ontology();
        let extractor = SkillExtractor::new(&ontology);
        assert_eq!(names(&extractor.extract("C++ only")), vec!["C++"]);
        assert_eq!(names(&extractor.extract("C, and C++")), vec!["C", "C++"]);
    }

    #[test]
    fn test_joined_alias_with_hyphenated_suffix() {
        let ontology = ontology();
        let extractor = SkillExtractor::new(&ontology);
        assert_eq!(names(&extractor.extract("CI/CD-based deployments")), vec!["CI/CD"]);
        assert_eq!(names(&extractor.extract("Node.js-powered services")), vec!["JavaScript"]);
    }

    #[test]
    fn test_empty_and_no_hits() {
        let ontology = ontology();
        let extractor = SkillExtractor::new(&ontology);
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("gardening and cooking").is_empty());
    }

    #[test]
    fn test_repeated_mentions_are_deduplicated() {
        let ontology = ontology();
        let extractor = SkillExtractor::new(&ontology);
        let skills = extractor.extract("Python, python, PY and python again");
        assert_eq!(names(&skills), vec!["Python"]);
    }

    #[test]
    fn test_extract_by_category() {
        let ontology = ontology();
        let extractor = SkillExtractor::new(&ontology);
        let grouped = extractor.extract_by_category("Python, ML and node.js");
        assert_eq!(grouped.len(), 3);
        assert_eq!(names(&grouped["languages"]), vec!["Python"]);
        assert_eq!(names(&grouped["ml"]), vec!["Machine Learning"]);
        assert_eq!(names(&grouped["web"]), vec!["JavaScript"]);
    }
}
