use crate::models::ScoringWeights;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub ontology: OntologySettings,
    #[serde(default)]
    pub embedding: EmbeddingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OntologySettings {
    #[serde(default = "default_ontology_path")]
    pub path: String,
}

impl Default for OntologySettings {
    fn default() -> Self {
        Self {
            path: default_ontology_path(),
        }
    }
}

fn default_ontology_path() -> String { "data/skills_ontology.yml".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingSettings {
    /// "hash" or "remote"
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_dimension")]
    pub dimension: usize,
    pub endpoint: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Unbounded when unset
    pub cache_capacity: Option<u64>,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            dimension: default_dimension(),
            endpoint: None,
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            cache_capacity: None,
        }
    }
}

fn default_provider() -> String { "hash".to_string() }
fn default_dimension() -> usize { crate::services::embedding::DEFAULT_DIMENSION }
fn default_model() -> String { "all-MiniLM-L6-v2".to_string() }
fn default_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_semantic_weight")]
    pub semantic: f64,
    #[serde(default = "default_coverage_weight")]
    pub coverage: f64,
    #[serde(default = "default_density_weight")]
    pub density: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            semantic: default_semantic_weight(),
            coverage: default_coverage_weight(),
            density: default_density_weight(),
        }
    }
}

impl WeightsConfig {
    pub fn to_weights(&self) -> Result<ScoringWeights, crate::models::InvalidWeights> {
        ScoringWeights::new(self.semantic, self.coverage, self.density)
    }
}

fn default_semantic_weight() -> f64 { 0.4 }
fn default_coverage_weight() -> f64 { 0.4 }
fn default_density_weight() -> f64 { 0.2 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RankingSettings {
    /// Worker threads for batch scoring; rayon's default when unset
    pub threads: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with RESUME_MATCH__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., RESUME_MATCH__EMBEDDING__DIMENSION -> embedding.dimension
            .add_source(environment())
            .build()?;

        substitute_env_vars(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        substitute_env_vars(settings)?.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("RESUME_MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Apply well-known environment variables that do not follow the prefix scheme
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(api_key) = std::env::var("EMBEDDING_API_KEY") {
        builder = builder.set_override("embedding.api_key", api_key)?;
    }
    if let Ok(endpoint) = std::env::var("EMBEDDING_ENDPOINT") {
        builder = builder.set_override("embedding.endpoint", endpoint)?;
    }

    builder.build()
}
