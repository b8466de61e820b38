//! # hearth-cli
//!
//! Command-line interface for validating maintainable items, properties, and
//! maintenance logs, and for previewing subtype onboarding questions.
//!
//! Exit codes: 0 on success, 1 when the input fails validation, 2 for usage
//! or configuration errors.

mod commands;
mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use commands::RecordKind;
use config::CliConfig;
use hearth_schema::{SubtypeLoader, SubtypeRegistry};
use hearth_validation::ValidationEngine;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

const EXIT_USAGE: u8 = 2;

#[derive(Parser)]
#[command(name = "hearth")]
#[command(about = "Home maintenance record validation CLI")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a JSON file
    Validate {
        /// Input file path
        input: PathBuf,

        /// Validate a maintainable item against this subtype's schema
        #[arg(short, long)]
        subtype: Option<String>,

        /// Kind of record in the file
        #[arg(short, long, value_enum, default_value_t = RecordKind::Item)]
        kind: RecordKind,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List registered subtypes
    Subtypes {
        /// Only subtypes of this category (e.g. appliance, system)
        #[arg(short = 't', long = "type")]
        maintainable_type: Option<String>,
    },

    /// Print the onboarding questions for a subtype
    Questions {
        subtype: String,

        /// Print the questions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run an answer file through a subtype's onboarding and validate the result
    Onboard {
        subtype: String,

        /// JSON object of answers keyed by field path, e.g. "metadata.fuel"
        #[arg(short, long)]
        answers: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("hearth error: {error:#}");
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    init_tracing(&config)?;

    let registry = build_registry(&config)?;
    let engine = ValidationEngine::with_registry(&registry).with_config(config.validation());

    match cli.command {
        Commands::Validate {
            input,
            subtype,
            kind,
            json,
        } => commands::validate(&engine, &input, kind, subtype.as_deref(), json),
        Commands::Subtypes { maintainable_type } => {
            commands::subtypes(&registry, maintainable_type.as_deref())
        }
        Commands::Questions { subtype, json } => commands::questions(&registry, &subtype, json),
        Commands::Onboard {
            subtype,
            answers,
            json,
        } => commands::onboard(&engine, &subtype, &answers, json),
    }
}

/// Filter precedence: `RUST_LOG`, then the config file, then `warn`
fn init_tracing(config: &CliConfig) -> anyhow::Result<()> {
    let fallback = config.log_filter.as_deref().unwrap_or("warn");
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .with_context(|| format!("invalid log filter '{fallback}'"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Built-in subtypes first, then any configured directories. A configured
/// subtype reusing a built-in name is ignored.
fn build_registry(config: &CliConfig) -> anyhow::Result<SubtypeRegistry> {
    let mut registry = SubtypeRegistry::builtin().context("built-in subtype catalog is malformed")?;
    if config.subtype_dirs.is_empty() {
        return Ok(registry);
    }

    let loader = SubtypeLoader::new(config.subtype_dirs.clone());
    let entries = loader.load_all().context("failed to load subtype definitions")?;
    let added = registry.register_all(entries);
    info!("Loaded {} subtypes from configured directories", added);
    Ok(registry)
}
