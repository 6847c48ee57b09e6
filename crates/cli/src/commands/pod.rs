// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pod commands: `ready`, `stop-sidecars`, `status`

use anyhow::Result;
use clap::Args;
use relay_adapters::{KubePodClient, TracedPodClient};
use relay_core::{Config, PodConfig};
use relay_engine::Controller;
use serde_json::json;

#[derive(Args)]
pub struct PodArgs {
    /// Pod name
    pub pod: String,

    /// Namespace; the kubeconfig default when omitted
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,
}

#[derive(Args)]
pub struct StopSidecarsArgs {
    #[command(flatten)]
    pub target: PodArgs,

    /// Override the configured no-op image
    #[arg(long, value_name = "IMAGE")]
    pub nop_image: Option<String>,
}

async fn controller(
    namespace: Option<&str>,
    config: PodConfig,
) -> Result<Controller<TracedPodClient<KubePodClient>>> {
    let client = KubePodClient::try_default(namespace).await?;
    Ok(Controller::new(TracedPodClient::new(client), config))
}

pub async fn ready(args: PodArgs, config: &Config) -> Result<()> {
    let controller = controller(args.namespace.as_deref(), config.pod.clone()).await?;
    if controller.update_ready(&args.pod).await? {
        println!("Marked {} ready", args.pod);
    } else {
        println!("{} already ready", args.pod);
    }
    Ok(())
}

pub async fn stop_sidecars(args: StopSidecarsArgs, config: &Config) -> Result<()> {
    let mut pod_config = config.pod.clone();
    if let Some(image) = args.nop_image {
        pod_config.nop_image = image;
    }
    let controller = controller(args.target.namespace.as_deref(), pod_config).await?;
    if controller.stop_sidecars(&args.target.pod).await? {
        println!("Stopped sidecars in {}", args.target.pod);
    } else {
        println!("No running sidecars in {}", args.target.pod);
    }
    Ok(())
}

pub async fn status(args: PodArgs, config: &Config) -> Result<()> {
    let controller = controller(args.namespace.as_deref(), config.pod.clone()).await?;
    let ready = controller.is_ready(&args.pod).await?;
    let steps_finished = controller.steps_finished(&args.pod).await?;
    let status = json!({
        "pod": args.pod,
        "ready": ready,
        "stepsFinished": steps_finished,
    });
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
