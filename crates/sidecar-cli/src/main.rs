mod commands;
mod config;
mod logging;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sidecar_client::{Format, HttpBlobSidecarClient};
use tracing::debug;

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "blob-sidecar-fetcher")]
#[command(about = "Fetch blob sidecars from a beacon node or blob archiver")]
struct Cli {
    /// Config file (defaults to ~/.config/blob-sidecar-fetcher/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log level for this tool (overridden by RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the sidecars for one slot or block root
    Fetch {
        /// Slot number, block root, or named block (head, finalized)
        id: String,
        /// Response format to request (json, ssz)
        #[arg(long)]
        format: Option<Format>,
        /// Base URL of the node, overriding `beacon_url`
        #[arg(long)]
        url: Option<String>,
        /// Write the decoded sidecars here, encoded in the requested format
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Check that the archiver serves the same sidecars as the beacon node
    Compare {
        /// Slots or block roots to check
        #[arg(required = true)]
        ids: Vec<String>,
        /// Response format to request from both sides (json, ssz)
        #[arg(long)]
        format: Option<Format>,
        /// Overrides `beacon_url`
        #[arg(long)]
        beacon_url: Option<String>,
        /// Overrides `archiver_url`
        #[arg(long)]
        archiver_url: Option<String>,
    },
}

fn client_for(config: &AppConfig, url: &str) -> Result<HttpBlobSidecarClient> {
    Ok(HttpBlobSidecarClient::with_client(url, config.http_client()?))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::load_config(cli.config.as_deref())?;
    let log_level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    logging::init(log_level)?;
    debug!(?config, "loaded config");

    match cli.command {
        Command::Fetch {
            id,
            format,
            url,
            output,
        } => {
            let url = url.unwrap_or_else(|| config.beacon_url.clone());
            let client = client_for(&config, &url)?;
            let format = format.unwrap_or(config.format);
            commands::fetch::run(&client, &id, format, output.as_deref()).await
        }
        Command::Compare {
            ids,
            format,
            beacon_url,
            archiver_url,
        } => {
            let beacon_url = beacon_url.unwrap_or_else(|| config.beacon_url.clone());
            let archiver_url = archiver_url
                .or_else(|| config.archiver_url.clone())
                .context("compare needs an archiver URL: set `archiver_url` or pass --archiver-url")?;

            let beacon = client_for(&config, &beacon_url)?;
            let archiver = client_for(&config, &archiver_url)?;
            let format = format.unwrap_or(config.format);
            commands::compare::run(&beacon, &archiver, &ids, format).await
        }
    }
}
