// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake waiter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{WaitError, WaitSignal, Waiter};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// Recorded wait call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitCall {
    pub path: PathBuf,
    pub require_content: bool,
}

/// Scripted result for a path
#[derive(Debug, Clone)]
pub enum FakeWait {
    Ready,
    PredecessorFailed,
    /// Never satisfied; resolves only through cancellation
    Blocked,
    Error(String),
}

/// Fake waiter for testing. Unscripted paths are ready immediately.
#[derive(Clone, Default)]
pub struct FakeWaiter {
    scripted: Arc<Mutex<HashMap<PathBuf, FakeWait>>>,
    calls: Arc<Mutex<Vec<WaitCall>>>,
}

impl FakeWaiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the result for waits on `path`
    pub fn set(&self, path: impl Into<PathBuf>, wait: FakeWait) {
        self.scripted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.into(), wait);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<WaitCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Waiter for FakeWaiter {
    async fn wait(
        &self,
        path: &Path,
        require_content: bool,
        cancel: &CancellationToken,
    ) -> Result<WaitSignal, WaitError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(WaitCall {
                path: path.to_path_buf(),
                require_content,
            });

        let scripted = self
            .scripted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(path)
            .cloned()
            .unwrap_or(FakeWait::Ready);

        match scripted {
            FakeWait::Ready => Ok(WaitSignal::Ready),
            FakeWait::PredecessorFailed => Ok(WaitSignal::PredecessorFailed),
            FakeWait::Blocked => {
                cancel.cancelled().await;
                Err(WaitError::Cancelled(path.to_path_buf()))
            }
            FakeWait::Error(message) => Err(WaitError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::other(message),
            }),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
