// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Running the wrapped command

mod process;

pub use process::ProcessRunner;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRunner, RunCall};

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors from running a command
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with status {code}")]
    Exit { program: String, code: i32 },
    #[error("{program} was terminated by signal {signal}")]
    Signal { program: String, signal: i32 },
    #[error("failed waiting for {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl RunError {
    /// Process exit code that reflects this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Exit { code, .. } => *code,
            RunError::Signal { signal, .. } => 128 + signal,
            RunError::Spawn { .. } | RunError::Io { .. } => 1,
        }
    }
}

/// Adapter for executing a command line
#[async_trait]
pub trait Runner: Clone + Send + Sync + 'static {
    /// Run `args[0]` with `args[1..]`, forwarding stdout and stderr.
    ///
    /// An empty `args` is a no-op. Cancellation stops the child and is
    /// reported as success; only the command's own failure is an error.
    async fn run(&self, args: &[String], cancel: &CancellationToken) -> Result<(), RunError>;
}
