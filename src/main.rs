use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use resume_match::config::Settings;
use resume_match::core::{Matcher, Ontology};
use resume_match::models::{ExtractResponse, RankRequest, RankResponse, ResumeInput};
use resume_match::services::create_embedder;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use validator::Validate;

/// Match resumes against job descriptions
#[derive(Debug, Parser)]
#[command(name = "resume-match", version, about)]
struct Cli {
    /// Configuration file; defaults to config/default.toml + config/local.toml
    #[arg(long, global = true, env = "RESUME_MATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Override the ontology file from the configuration
    #[arg(long, global = true)]
    ontology: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract canonical skills from a text file
    Extract { file: PathBuf },

    /// Score one resume against one job description
    Score {
        #[arg(long)]
        job: PathBuf,
        #[arg(long)]
        resume: PathBuf,
    },

    /// Rank resumes against a job description
    Rank {
        #[arg(long, required_unless_present = "request", conflicts_with = "request")]
        job: Option<PathBuf>,

        /// JSON rank request with jobText and resumes
        #[arg(long)]
        request: Option<PathBuf>,

        /// Resume files; each file path is used as the resume id
        resumes: Vec<PathBuf>,
    },

    /// Print ontology, embedding and cache statistics
    Stats,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .context("Failed to load configuration")?;

    init_tracing(&settings);
    info!("Configuration loaded successfully");

    if let Some(threads) = settings.ranking.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure ranking thread pool")?;
    }

    let ontology_path = cli
        .ontology
        .clone()
        .unwrap_or_else(|| PathBuf::from(&settings.ontology.path));
    let ontology = Ontology::from_path(&ontology_path)
        .with_context(|| format!("Failed to load ontology from {}", ontology_path.display()))?;

    let embedder = create_embedder(&settings.embedding).context("Failed to create embedder")?;
    let weights = settings
        .scoring
        .weights
        .to_weights()
        .context("Invalid scoring weights")?;

    let matcher = Matcher::new(Arc::new(ontology), embedder, weights)?;
    info!("Matcher initialized with weights: {:?}", weights);

    match cli.command {
        Commands::Extract { file } => {
            let text = read_text(&file)?;
            let extractor = matcher.extractor();
            let response = ExtractResponse {
                skills: extractor.extract(&text).into_iter().collect(),
                by_category: extractor
                    .extract_by_category(&text)
                    .into_iter()
                    .map(|(category, skills)| (category, skills.into_iter().collect()))
                    .collect(),
            };
            print_json(&response)
        }
        Commands::Score { job, resume } => {
            let result = matcher.score(&read_text(&resume)?, &read_text(&job)?)?;
            print_json(&result)
        }
        Commands::Rank {
            job,
            request,
            resumes,
        } => {
            let request = match (request, job) {
                (Some(path), _) => {
                    if !resumes.is_empty() {
                        bail!("Resume files cannot be combined with --request");
                    }
                    let request: RankRequest = serde_json::from_str(&read_text(&path)?)
                        .with_context(|| format!("Invalid rank request in {}", path.display()))?;
                    request.validate().context("Invalid rank request")?;
                    request
                }
                (None, Some(job)) => RankRequest {
                    job_text: read_text(&job)?,
                    resumes: resumes
                        .iter()
                        .map(|path| {
                            Ok(ResumeInput {
                                id: path.display().to_string(),
                                text: read_text(path)?,
                            })
                        })
                        .collect::<Result<Vec<_>>>()?,
                },
                (None, None) => bail!("Either --job or --request is required"),
            };

            let batch = matcher.rank(&request.job_text, &request.resumes)?;
            print_json(&RankResponse::new(batch))
        }
        Commands::Stats => print_json(&matcher.stats()),
    }
}

/// Logs go to stderr so stdout carries only JSON output
fn init_tracing(settings: &Settings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if log_format == "json" {
        registry
            .with(fmt::layer().json().with_target(false).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
