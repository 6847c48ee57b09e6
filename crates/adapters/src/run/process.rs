// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Child-process runner

use super::{RunError, Runner};
use async_trait::async_trait;
use std::os::unix::process::ExitStatusExt;
use std::process::Stdio;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

/// Runs commands as child processes sharing this process's stdio, so step
/// output lands in the container log unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Runner for ProcessRunner {
    async fn run(&self, args: &[String], cancel: &CancellationToken) -> Result<(), RunError> {
        let Some((program, rest)) = args.split_first() else {
            return Ok(());
        };

        let mut child = Command::new(program)
            .args(rest)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RunError::Spawn {
                program: program.clone(),
                source,
            })?;

        let status = tokio::select! {
            status = child.wait() => status.map_err(|source| RunError::Io {
                program: program.clone(),
                source,
            })?,
            _ = cancel.cancelled() => {
                tracing::info!(program, pid = ?child.id(), "cancelled, stopping child");
                if let Err(e) = child.kill().await {
                    tracing::warn!(program, error = %e, "failed to stop child");
                }
                return Ok(());
            }
        };

        if status.success() {
            return Ok(());
        }
        match status.code() {
            Some(code) => Err(RunError::Exit {
                program: program.clone(),
                code,
            }),
            None => Err(RunError::Signal {
                program: program.clone(),
                signal: status.signal().unwrap_or_default(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
