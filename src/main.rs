//! Prolly - command line entry point
//!
//! `prolly generate` runs the full search, completion and extraction
//! pipeline. `prolly extract` parses an existing completion offline.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prolly::{AppError, ConfigService, ErrorResponse, OutcomeService, OutcomesResponse};

#[derive(Parser, Debug)]
#[command(name = "prolly")]
#[command(about = "Generate probability-weighted outcomes for a scenario", version)]
struct Cli {
    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search, prompt the model and extract outcomes for a scenario
    Generate {
        /// The scenario to predict outcomes for
        query: String,

        /// Config file (defaults to ~/.prolly/config.json)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Extract outcomes from a saved completion
    Extract {
        /// File holding the completion text, or `-` for stdin
        input: PathBuf,

        /// URL accepted for hyperlinks (repeatable)
        #[arg(long = "allow")]
        allow: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prolly=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let pretty = cli.pretty;

    let result = run(cli.command).await.and_then(|response| {
        let json = if pretty {
            serde_json::to_string_pretty(&response)
        } else {
            serde_json::to_string(&response)
        };
        json.context("Failed to serialize outcomes")
    });

    match result {
        Ok(json) => println!("{}", json),
        Err(e) => {
            let body = match e.downcast_ref::<AppError>() {
                Some(app_err) => ErrorResponse::from(app_err),
                None => ErrorResponse::new(format!("{:#}", e)),
            };
            tracing::error!("[prolly] {}", body.detail);
            match serde_json::to_string(&body) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("{}", body.detail),
            }
            std::process::exit(1);
        }
    }
}

async fn run(command: Command) -> anyhow::Result<OutcomesResponse> {
    match command {
        Command::Generate { query, config } => {
            let config_service = match config {
                Some(path) => ConfigService::open(path)?,
                None => ConfigService::new()?,
            };
            tracing::debug!(
                "[prolly] Using config {}",
                config_service.path().display()
            );
            let service = OutcomeService::from_config(&config_service.resolved_config())?;
            Ok(service.generate(&query).await?)
        }
        Command::Extract { input, allow } => {
            let text = read_input(&input)?;
            Ok(OutcomeService::extract_only(&text, &allow)?)
        }
    }
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read completion from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read completion from {}", input.display()))
}
