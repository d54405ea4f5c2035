//! strfmt-check
//!
//! Validate values against named string formats, list the registered formats,
//! and decode JSON documents through the decode bridge.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

mod commands;
mod config;

use commands::Commands;
use config::{Config, LogFormat};

/// Output format.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per result.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Check strings against named formats.
#[derive(Debug, Parser)]
#[command(name = "strfmt-check")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t, env = "STRFMT_OUTPUT")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.clone().into());
    let layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .boxed(),
    };
    tracing_subscriber::registry().with(layer).with(filter).init();
}

fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config);

    let cli = Cli::parse();
    let registry = strfmt::default_registry();
    if !cli.command.run(registry, cli.output)? {
        std::process::exit(1);
    }
    Ok(())
}
