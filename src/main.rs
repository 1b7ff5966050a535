//! Synapse Knowledge - agent proficiency scoring and knowledge-brief injection.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use synapse_knowledge::config::{ConfigLoader, KnowledgeConfig};
use synapse_knowledge::evidence::EvidenceAggregator;
use synapse_knowledge::injection::KnowledgeInjectionStage;
use synapse_knowledge::pipeline::{ContextStage, StageContext};
use synapse_knowledge::score::{AgentProfile, ScoreCalculator, ScoreHints};

#[derive(Parser)]
#[command(
    name = "synapse-knowledge",
    about = "Agent proficiency scoring and knowledge-brief injection",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Config file path (otherwise searched in default locations).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one (agent, domain) pair.
    Assess {
        /// Agent identifier.
        agent: String,
        /// Hyphen-tokenized domain identifier (e.g. security-owasp).
        domain: String,
    },
    /// Score every domain in the agent's profile.
    AssessAll {
        /// Agent identifier.
        agent: String,
    },
    /// Run the knowledge injection stage over a context bundle read from stdin.
    Inject,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn load_config(path: Option<PathBuf>) -> KnowledgeConfig {
    let loader = match path {
        Some(path) => ConfigLoader::with_path(path),
        None => ConfigLoader::new(),
    };
    match loader.load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    }
}

fn calculator_for(config: &KnowledgeConfig) -> ScoreCalculator {
    let aggregator =
        EvidenceAggregator::new(config.evidence_sources()).with_thresholds(config.coverage);
    ScoreCalculator::new(aggregator).with_weights(config.weights)
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!(error = %e, "Failed to serialize output"),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(cli.config);

    match cli.command {
        Commands::Assess { agent, domain } => {
            // Use the persisted assessment date as a hint when a profile
            // is on disk; without one the confidence cap applies.
            let hints = match AgentProfile::load(&config.profile_path(&agent)).await {
                Ok(profile) => ScoreHints {
                    last_updated: profile
                        .domains
                        .get(&domain)
                        .and_then(|entry| entry.last_updated),
                },
                Err(e) => {
                    tracing::debug!(error = %e, "No usable profile, scoring without hints");
                    ScoreHints::default()
                }
            };

            let result = calculator_for(&config).score(&agent, &domain, hints).await;
            print_json(&result);
        }
        Commands::AssessAll { agent } => {
            let profile_path = config.profile_path(&agent);
            let profile = match AgentProfile::load(&profile_path).await {
                Ok(profile) => profile,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to load agent profile");
                    std::process::exit(1);
                }
            };

            let results = calculator_for(&config).score_all(&agent, &profile).await;
            print_json(&results);
        }
        Commands::Inject => {
            let mut input = String::new();
            if let Err(e) = tokio::io::stdin().read_to_string(&mut input).await {
                tracing::error!(error = %e, "Failed to read context bundle from stdin");
                std::process::exit(1);
            }

            let mut context: StageContext = match serde_json::from_str(&input) {
                Ok(context) => context,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to parse context bundle");
                    std::process::exit(1);
                }
            };

            // Bundles from the orchestrator carry synapsePath themselves;
            // fall back to the configured root for local runs.
            if context.config.synapse_path.is_none() {
                tracing::debug!(
                    root = %config.synapse_root.display(),
                    "Context bundle has no synapsePath, using configured root"
                );
                context.config.synapse_path = Some(config.synapse_root.clone());
            }

            let stage = KnowledgeInjectionStage::new().with_brief_budget(config.brief_budget);
            let output = stage.process(&context).await;
            print_json(&output);
        }
    }
}
