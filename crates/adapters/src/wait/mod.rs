// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Waiting for marker files

mod fs;

pub use fs::FsWaiter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeWait, FakeWaiter, WaitCall};

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Which marker satisfied a wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitSignal {
    /// The file itself appeared
    Ready,
    /// Only its `.err` twin appeared: the predecessor finished but failed
    PredecessorFailed,
}

/// Errors from waiting
#[derive(Debug, Error)]
pub enum WaitError {
    #[error("cancelled while waiting for {}", .0.display())]
    Cancelled(PathBuf),
    #[error("failed to inspect {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Adapter for blocking until a marker file exists
#[async_trait]
pub trait Waiter: Clone + Send + Sync + 'static {
    /// Wait until `path` exists (and is non-empty if `require_content`), or
    /// until its `.err` twin exists.
    ///
    /// A missing file is the steady state, not an error. Returns
    /// [`WaitError::Cancelled`] promptly once `cancel` fires.
    async fn wait(
        &self,
        path: &Path,
        require_content: bool,
        cancel: &CancellationToken,
    ) -> Result<WaitSignal, WaitError>;
}
