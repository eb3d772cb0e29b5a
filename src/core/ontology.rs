use crate::core::normalize::{collapse_whitespace, fold, joined_tokens, tokenize};
use crate::core::trie::{AliasHit, AliasTrie};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a skill ontology
///
/// Loading is all-or-nothing: any of these aborts the whole load.
#[derive(Debug, Error)]
pub enum OntologyError {
    #[error("Failed to read ontology file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse ontology definition: {0}")]
    Parse(String),

    #[error("Unsupported ontology format: {0}")]
    UnsupportedFormat(String),

    #[error("Category name must not be empty")]
    EmptyCategory,

    #[error("Skill name must not be empty (category '{category}')")]
    EmptySkillName { category: String },

    #[error("Skill '{skill}' appears in both '{first}' and '{second}'")]
    DuplicateSkill {
        skill: String,
        first: String,
        second: String,
    },

    #[error("Alias of skill '{skill}' is empty after normalization")]
    EmptyAlias { skill: String },

    #[error("Alias '{alias}' resolves to both '{first}' and '{second}'")]
    AliasCollision {
        alias: String,
        first: String,
        second: String,
    },
}

/// One skill entry in a taxonomy definition: a bare name or a name with aliases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillEntry {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        aliases: Vec<String>,
    },
}

impl SkillEntry {
    pub fn name(&self) -> &str {
        match self {
            SkillEntry::Name(name) => name,
            SkillEntry::Detailed { name, .. } => name,
        }
    }

    pub fn aliases(&self) -> &[String] {
        match self {
            SkillEntry::Name(_) => &[],
            SkillEntry::Detailed { aliases, .. } => aliases,
        }
    }
}

/// Taxonomy definition: category name -> skill entries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OntologyDefinition {
    pub categories: BTreeMap<String, Vec<SkillEntry>>,
}

impl OntologyDefinition {
    pub fn from_yaml_str(text: &str) -> Result<Self, OntologyError> {
        serde_yaml::from_str(text).map_err(|e| OntologyError::Parse(e.to_string()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self, OntologyError> {
        toml::from_str(text).map_err(|e| OntologyError::Parse(e.to_string()))
    }

    /// Read a definition file, picking the format from its extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, OntologyError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| OntologyError::Io {
            path: path.display().to_string(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => Self::from_yaml_str(&text),
            Some("toml") => Self::from_toml_str(&text),
            _ => Err(OntologyError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Add a skill entry, creating the category if needed
    pub fn with_skill(mut self, category: &str, entry: SkillEntry) -> Self {
        self.categories
            .entry(category.to_string())
            .or_default()
            .push(entry);
        self
    }
}

/// A canonical skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skill {
    pub name: String,
    pub category: String,
    /// Surface forms, canonical name first
    pub aliases: Vec<String>,
}

/// Ontology size summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OntologyStats {
    pub categories: usize,
    pub skills: usize,
    pub aliases: usize,
}

/// Immutable skill taxonomy with an alias index
///
/// Built once with [`Ontology::load`] and shared read-only afterwards.
#[derive(Debug)]
pub struct Ontology {
    categories: Vec<String>,
    skills: Vec<Skill>,
    by_name: HashMap<String, usize>,
    trie: AliasTrie,
    joined: HashSet<String>,
    alias_count: usize,
}

impl Ontology {
    /// Build an ontology from a definition, validating every invariant
    pub fn load(definition: &OntologyDefinition) -> Result<Self, OntologyError> {
        let mut categories = Vec::with_capacity(definition.categories.len());
        let mut skills: Vec<Skill> = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for (category, entries) in &definition.categories {
            let category = collapse_whitespace(category);
            if category.is_empty() {
                return Err(OntologyError::EmptyCategory);
            }

            for entry in entries {
                let name = collapse_whitespace(entry.name());
                if name.is_empty() {
                    return Err(OntologyError::EmptySkillName { category });
                }

                let key = fold(&name);
                if let Some(&existing) = seen.get(&key) {
                    return Err(OntologyError::DuplicateSkill {
                        skill: name,
                        first: skills[existing].category.clone(),
                        second: category,
                    });
                }
                seen.insert(key, skills.len());

                let mut aliases = vec![name.clone()];
                for alias in entry.aliases() {
                    let alias = collapse_whitespace(alias);
                    if !aliases.contains(&alias) {
                        aliases.push(alias);
                    }
                }

                skills.push(Skill {
                    name,
                    category: category.clone(),
                    aliases,
                });
            }

            categories.push(category);
        }

        let joined: HashSet<String> = skills
            .iter()
            .flat_map(|skill| skill.aliases.iter())
            .flat_map(|alias| joined_tokens(alias))
            .collect();

        let mut trie = AliasTrie::new();
        let mut alias_count = 0;

        for (id, skill) in skills.iter().enumerate() {
            for alias in &skill.aliases {
                let tokens = tokenize(alias, &joined);
                if tokens.is_empty() {
                    return Err(OntologyError::EmptyAlias {
                        skill: skill.name.clone(),
                    });
                }
                match trie.insert(&tokens, id) {
                    None => alias_count += 1,
                    Some(existing) if existing == id => {}
                    Some(existing) => {
                        return Err(OntologyError::AliasCollision {
                            alias: alias.clone(),
                            first: skills[existing].name.clone(),
                            second: skill.name.clone(),
                        });
                    }
                }
            }
        }

        // Space-separated variants of hyphenated aliases; explicit aliases win
        for (id, skill) in skills.iter().enumerate() {
            for alias in skill.aliases.iter().filter(|a| a.contains('-')) {
                let variant = alias.replace('-', " ");
                let tokens = tokenize(&variant, &joined);
                if !tokens.is_empty() && trie.insert(&tokens, id).is_none() {
                    alias_count += 1;
                }
            }
        }

        let by_name = skills
            .iter()
            .enumerate()
            .map(|(id, skill)| (skill.name.clone(), id))
            .collect();

        tracing::info!(
            "Loaded ontology with {} categories, {} skills, {} aliases",
            categories.len(),
            skills.len(),
            alias_count
        );

        Ok(Self {
            categories,
            skills,
            by_name,
            trie,
            joined,
            alias_count,
        })
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, OntologyError> {
        Self::load(&OntologyDefinition::from_yaml_str(text)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, OntologyError> {
        Self::load(&OntologyDefinition::from_path(path)?)
    }

    /// Exact, case- and whitespace-insensitive alias lookup
    pub fn resolve(&self, fragment: &str) -> Option<&Skill> {
        let tokens = self.tokenize(fragment);
        self.trie.get(&tokens).map(|id| &self.skills[id])
    }

    /// Tokenize text the same way aliases were tokenized at load time
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        tokenize(text, &self.joined)
    }

    pub(crate) fn scan(&self, tokens: &[String]) -> Vec<AliasHit> {
        self.trie.scan(tokens)
    }

    pub(crate) fn skill_by_id(&self, id: usize) -> &Skill {
        &self.skills[id]
    }

    /// Category names, sorted alphabetically
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// Look up a skill by its canonical name
    pub fn skill(&self, name: &str) -> Option<&Skill> {
        self.by_name.get(name).map(|&id| &self.skills[id])
    }

    pub fn skills_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Skill> + 'a {
        self.skills.iter().filter(move |s| s.category == category)
    }

    /// Longest alias length, in tokens
    pub fn max_alias_tokens(&self) -> usize {
        self.trie.max_depth()
    }

    pub fn stats(&self) -> OntologyStats {
        OntologyStats {
            categories: self.categories.len(),
            skills: self.skills.len(),
            aliases: self.alias_count,
        }
    }
}
