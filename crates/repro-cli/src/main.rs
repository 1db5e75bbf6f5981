//! repro - PolicyEngine reproducibility script generator
//!
//! Reads a simulation request (the JSON the web app holds for a household
//! or population run) and writes the Python script that reproduces it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use repro_codegen::{start_end_dates, ReproEngine, ReproRequest, SchemaNormaliser, Year};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::{CliConfig, LoggingConfig};

/// repro CLI
#[derive(Parser)]
#[command(name = "repro")]
#[command(about = "Generate Python scripts that reproduce PolicyEngine simulations", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "REPRO_CONFIG")]
    config: Option<String>,

    /// Log level (overrides the configured level)
    #[arg(long, global = true, env = "REPRO_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the script for a request
    Generate {
        /// Request JSON file
        request: PathBuf,

        /// Write the script here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Year used when the request names none
        #[arg(long)]
        default_year: Option<u32>,
    },
    /// Validate a request and summarise it
    Check {
        /// Request JSON file
        request: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    // Override with CLI args
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.json_logs {
        config.logging.json = true;
    }
    init_logging(&config.logging);

    match cli.command {
        Commands::Generate {
            request,
            output,
            default_year,
        } => {
            if let Some(year) = default_year {
                config.codegen.default_year = Year(year);
            }
            generate(&config, &request, output.as_deref())
        }
        Commands::Check { request } => check(&request),
    }
}

fn init_logging(logging: &LoggingConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.level.as_str().into());

    if logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn read_request(path: &Path) -> Result<ReproRequest> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read request {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid request {}", path.display()))
}

fn generate(config: &CliConfig, request_path: &Path, output: Option<&Path>) -> Result<()> {
    let request = read_request(request_path)?;
    let engine = ReproEngine::new(Box::new(SchemaNormaliser)).with_config(config.codegen.clone());
    let script = engine
        .generate(&request)
        .context("failed to generate script")?;

    match output {
        Some(path) => {
            fs::write(path, script.to_source())
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), lines = script.len(), "wrote script");
        }
        None => print!("{}", script.to_source()),
    }
    Ok(())
}

fn check(request_path: &Path) -> Result<()> {
    let request = read_request(request_path)?;
    let range = start_end_dates(&request.policy).context("invalid reform")?;

    println!("scope:      {}", request.scope);
    println!(
        "region:     {}",
        if request.region.is_empty() { "-" } else { request.region.as_str() }
    );
    println!("parameters: {}", request.policy.reform.parameter_count());
    match range {
        Some(range) => println!("active:     {} to {}", range.earliest_start, range.latest_end),
        None => println!("active:     -"),
    }
    Ok(())
}
