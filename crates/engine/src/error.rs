// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine

use relay_adapters::{PodError, RunError, WaitError, WriteError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a step
#[derive(Debug, Error)]
pub enum StepError {
    #[error("wait failed: {0}")]
    Wait(#[from] WaitError),
    #[error(transparent)]
    Run(#[from] RunError),
    /// Markers could not be written. Never recovered from: later steps
    /// would wait forever on a marker that will not appear.
    #[error("failed to signal: {0}")]
    SignalWrite(#[from] WriteError),
    #[error("predecessor failed ({}), not running", .0.display())]
    PredecessorFailed(PathBuf),
}

impl StepError {
    /// Exit code for the entrypoint process
    pub fn exit_code(&self) -> i32 {
        match self {
            StepError::Run(e) => e.exit_code(),
            StepError::Wait(_) | StepError::SignalWrite(_) | StepError::PredecessorFailed(_) => 1,
        }
    }
}

/// Errors from controller operations
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("pod error: {0}")]
    Pod(#[from] PodError),
}
