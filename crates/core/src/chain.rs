// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container-chain builder
//!
//! Rewrites an ordered list of step containers so each one runs through the
//! staged entrypoint binary, waiting on its predecessor's marker and writing
//! its own. Pure: no I/O, no partial output on error.

use crate::config::{ChainConfig, Config, WaiterConfig};
use crate::invocation::WrappedStep;
use crate::layout::PLACE_TOOLS_CONTAINER;
use k8s_openapi::api::core::v1::{Container, Volume};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("no steps to chain")]
    NoSteps,
    #[error("step {index} ({name}) has no command")]
    EmptyCommand { index: usize, name: String },
}

/// Everything the pod needs to run the steps in order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chain {
    /// Stages the entrypoint binary into the tools volume
    pub init_container: Container,
    /// Wrapped steps, in execution order
    pub steps: Vec<Container>,
    /// Tools and downward volumes referenced by the mounts above
    pub volumes: Vec<Volume>,
}

/// Build the chain for `steps`.
///
/// Step `i` waits on step `i-1`'s post file (step 0 waits for the downward
/// ready file to gain content) and writes `<tools>/i`. The first command
/// element becomes the entrypoint; any further elements are prepended to
/// the step's args.
pub fn build_chain(config: &Config, steps: &[Container]) -> Result<Chain, ChainError> {
    if steps.is_empty() {
        return Err(ChainError::NoSteps);
    }

    let chain = &config.chain;
    let binary = chain.entrypoint_binary().display().to_string();

    let wrapped = steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let invocation = wrap(config, index, step)?;
            let mut mounts = step.volume_mounts.clone().unwrap_or_default();
            mounts.push(chain.tools_mount());
            if index == 0 {
                mounts.push(chain.downward_mount());
            }
            Ok(Container {
                command: Some(vec![binary.clone()]),
                args: Some(invocation.to_args()),
                volume_mounts: Some(mounts),
                ..step.clone()
            })
        })
        .collect::<Result<Vec<_>, ChainError>>()?;

    tracing::debug!(steps = wrapped.len(), tools_dir = %chain.tools_dir.display(), "built chain");

    Ok(Chain {
        init_container: place_tools(chain),
        steps: wrapped,
        volumes: vec![
            chain.tools_volume(),
            chain.downward_volume(&config.pod.ready_annotation),
        ],
    })
}

fn wrap(config: &Config, index: usize, step: &Container) -> Result<WrappedStep, ChainError> {
    let chain = &config.chain;
    let command = step.command.as_deref().unwrap_or_default();
    let (entrypoint, leading) = match command.split_first() {
        Some((entrypoint, leading)) if !entrypoint.is_empty() => (entrypoint, leading),
        _ => {
            return Err(ChainError::EmptyCommand {
                index,
                name: step.name.clone(),
            })
        }
    };

    let mut args = leading.to_vec();
    args.extend(step.args.iter().flatten().cloned());

    let (wait_file, wait_file_content) = match index {
        0 => (chain.ready_path(), true),
        _ => (chain.post_file(index - 1), false),
    };

    Ok(WrappedStep {
        wait_files: vec![wait_file],
        wait_file_content,
        post_file: Some(chain.post_file(index)),
        start_file: None,
        entrypoint: Some(entrypoint.clone()),
        args,
        on_predecessor_failure: chain.on_predecessor_failure,
        wait_poll_interval: (config.waiter != WaiterConfig::default())
            .then_some(config.waiter.poll_interval),
    })
}

fn place_tools(chain: &ChainConfig) -> Container {
    Container {
        name: PLACE_TOOLS_CONTAINER.to_string(),
        image: Some(chain.entrypoint_image.clone()),
        command: Some(vec![
            "cp".to_string(),
            chain.entrypoint_source.display().to_string(),
            chain.entrypoint_binary().display().to_string(),
        ]),
        volume_mounts: Some(vec![chain.tools_mount()]),
        ..Default::default()
    }
}

#[cfg(test)]
#[path = "chain_tests.rs"]
mod tests;
