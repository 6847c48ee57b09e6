// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! relayctl - operate on relay pods

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{chain, pod};
use relay_core::Config;
use std::path::PathBuf;

/// Environment variable holding the log filter
const LOG_ENV: &str = "RELAY_LOG";

#[derive(Parser)]
#[command(
    name = "relayctl",
    version,
    about = "relay - ordered step execution inside a pod"
)]
struct Cli {
    /// Config file (TOML); built-in defaults when omitted
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite step containers into an ordered chain
    Chain(chain::ChainArgs),
    /// Set the ready annotation that releases the first step
    Ready(pod::PodArgs),
    /// Swap running sidecars to the no-op image
    StopSidecars(pod::StopSidecarsArgs),
    /// Show whether a pod is released and its steps are done
    Status(pod::PodArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    let config = match &cli.config {
        Some(path) => {
            Config::load(path).with_context(|| format!("loading config {}", path.display()))?
        }
        None => Config::default(),
    };

    match cli.command {
        Commands::Chain(args) => chain::handle(args, &config),
        Commands::Ready(args) => pod::ready(args, &config).await,
        Commands::StopSidecars(args) => pod::stop_sidecars(args, &config).await,
        Commands::Status(args) => pod::status(args, &config).await,
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
