// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `relayctl chain` - Build the container chain for a list of steps

use anyhow::{Context, Result};
use clap::Args;
use k8s_openapi::api::core::v1::Container;
use relay_core::{build_chain, Config};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct ChainArgs {
    /// JSON array of step containers, in execution order ("-" for stdin)
    #[arg(long, value_name = "PATH")]
    pub steps: PathBuf,

    /// Print compact JSON
    #[arg(long)]
    pub compact: bool,
}

pub fn handle(args: ChainArgs, config: &Config) -> Result<()> {
    let raw = read_steps(&args.steps)?;
    let steps: Vec<Container> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing steps from {}", args.steps.display()))?;

    tracing::debug!(steps = steps.len(), "building chain");
    let chain = build_chain(config, &steps)?;

    let output = if args.compact {
        serde_json::to_string(&chain)?
    } else {
        serde_json::to_string_pretty(&chain)?
    };
    println!("{}", output);
    Ok(())
}

fn read_steps(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("reading steps from stdin")?;
        return Ok(raw);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
