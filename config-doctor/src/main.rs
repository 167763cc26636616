//! config-doctor - Prints the site configuration an environment resolves to.
//!
//! Run it in a deployment's shell (or against a dotenv file) to see which
//! connection-string variable matched, what was parsed out of it, and which
//! fields are still missing. The password is never printed.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use siteconfig::{Report, SiteConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "config-doctor",
    about = "Inspect the site configuration resolved from the environment",
    version
)]
struct Args {
    #[arg(
        short,
        long,
        value_enum,
        default_value = "text",
        help = "Output format"
    )]
    format: Format,

    #[arg(
        long,
        value_name = "PATH",
        help = "Load this dotenv file before resolving (already-set variables win)"
    )]
    env_file: Option<PathBuf>,

    #[arg(long, help = "Exit non-zero when the database configuration is incomplete")]
    strict: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load the dotenv file before the subscriber so a RUST_LOG set there
    // takes effect.
    let loaded = match &args.env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("failed to load env file {}", path.display()))?;
            Some(path.clone())
        }
        // Best effort; no ./.env is fine.
        None => dotenvy::dotenv().ok(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = &loaded {
        debug!("Loaded environment from {}", path.display());
    }

    // Resolve directly instead of going through SiteConfig::global(): the
    // doctor reports on the environment as it is now, without freezing a
    // process-wide configuration.
    let config = SiteConfig::from_env();
    let report = Report::new(&config);

    match args.format {
        Format::Text => print!("{}", report.render_text()),
        Format::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("failed to serialize report")?;
            println!("{}", json);
        }
    }

    if args.strict && !report.warnings.is_empty() {
        process::exit(1);
    }
    Ok(())
}
