//! folio-contact - contact-form mail relay
//!
//! # Usage
//!
//! ```bash
//! # Run the relay with the layered configuration
//! folio-contact serve
//!
//! # Run with an explicit configuration file
//! folio-contact serve --config ./relay.toml
//!
//! # Print the effective configuration, secrets masked
//! folio-contact config
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_contact::{config::ContactConfig, observability, serve::serve};

#[derive(Parser)]
#[command(name = "folio-contact")]
#[command(version)]
#[command(about = "Contact-form mail relay for a portfolio site", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the mail relay
    Serve {
        /// Configuration file used instead of the standard locations
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the effective configuration with secrets redacted
    Config {
        /// Configuration file used instead of the standard locations
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn load(path: Option<&Path>) -> Result<ContactConfig> {
    match path {
        Some(path) => ContactConfig::load_from(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => ContactConfig::load().context("loading configuration"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            observability::init()?;
            let config = load(config.as_deref())?;
            serve(config).await?;
        }
        Commands::Config { config } => {
            let config = load(config.as_deref())?;
            print!("{}", toml::to_string_pretty(&config.redacted())?);
        }
    }

    Ok(())
}
