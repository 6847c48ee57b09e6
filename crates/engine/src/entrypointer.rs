// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step execution inside a container

use crate::StepError;
use chrono::Utc;
use relay_adapters::{Runner, WaitSignal, Waiter, Writer};
use relay_core::{PredecessorFailurePolicy, StepRecord, WrappedStep};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Runs one wrapped step: wait, optionally signal start, run, signal done.
///
/// Every exit path after the first wait writes the step's post file (or its
/// `.err` twin), so successors are never left waiting. The only exception
/// is a failure to write markers at all.
pub struct Entrypointer<W, R, X> {
    step: WrappedStep,
    waiter: W,
    runner: R,
    writer: X,
}

impl<W, R, X> Entrypointer<W, R, X>
where
    W: Waiter,
    R: Runner,
    X: Writer,
{
    pub fn new(step: WrappedStep, waiter: W, runner: R, writer: X) -> Self {
        Self {
            step,
            waiter,
            runner,
            writer,
        }
    }

    /// Execute the step.
    ///
    /// Returns the command's failure, if any, after the post file is
    /// written. Cancellation while waiting is a failure; cancellation while
    /// running stops the command and counts as completion.
    pub async fn go(&self, cancel: &CancellationToken) -> Result<(), StepError> {
        let span = tracing::info_span!(
            "step",
            post_file = ?self.step.post_file,
            entrypoint = self.step.entrypoint.as_deref().unwrap_or_default(),
        );
        self.go_inner(cancel).instrument(span).await
    }

    async fn go_inner(&self, cancel: &CancellationToken) -> Result<(), StepError> {
        if let Err(e) = self.wait(cancel).await {
            self.write_post_file(&StepRecord::failed(e.to_string(), Utc::now()))
                .await?;
            return Err(e);
        }

        if let Some(start_file) = &self.step.start_file {
            self.writer.write(start_file, b"").await?;
        }

        let command = self.step.command();
        let result = if command.is_empty() {
            tracing::debug!("no command, signalling only");
            Ok(())
        } else {
            self.runner.run(&command, cancel).await
        };

        match result {
            Ok(()) => {
                self.write_post_file(&StepRecord::succeeded(Utc::now()))
                    .await?;
                Ok(())
            }
            Err(e) => {
                self.write_post_file(&StepRecord::failed(e.to_string(), Utc::now()))
                    .await?;
                Err(e.into())
            }
        }
    }

    /// Wait for every wait file in order, applying the predecessor policy
    async fn wait(&self, cancel: &CancellationToken) -> Result<(), StepError> {
        for file in &self.step.wait_files {
            let signal = self
                .waiter
                .wait(file, self.step.wait_file_content, cancel)
                .await?;
            if signal == WaitSignal::PredecessorFailed {
                match self.step.on_predecessor_failure {
                    PredecessorFailurePolicy::Run => {
                        tracing::warn!(wait_file = %file.display(), "predecessor failed, running anyway")
                    }
                    PredecessorFailurePolicy::Skip => {
                        return Err(StepError::PredecessorFailed(file.clone()))
                    }
                }
            }
        }
        Ok(())
    }

    async fn write_post_file(&self, record: &StepRecord) -> Result<(), StepError> {
        let Some(post_file) = &self.step.post_file else {
            return Ok(());
        };
        let path = record.marker_path(post_file);
        self.writer.write(&path, record.to_line().as_bytes()).await?;
        tracing::info!(post_file = %path.display(), succeeded = record.is_success(), "signalled");
        Ok(())
    }
}

#[cfg(test)]
#[path = "entrypointer_tests.rs"]
mod tests;
