// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem waiter: directory watch plus periodic poll

use super::{WaitError, WaitSignal, Waiter};
use async_trait::async_trait;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use relay_core::{error_twin, DEFAULT_POLL_INTERVAL};
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Waits on the real filesystem.
///
/// A watch on the parent directory wakes the loop early; the poll interval
/// bounds latency when the watch cannot be set up or misses a create that
/// raced its registration.
#[derive(Clone, Debug)]
pub struct FsWaiter {
    poll_interval: Duration,
}

impl FsWaiter {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }
}

impl Default for FsWaiter {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

#[async_trait]
impl Waiter for FsWaiter {
    async fn wait(
        &self,
        path: &Path,
        require_content: bool,
        cancel: &CancellationToken,
    ) -> Result<WaitSignal, WaitError> {
        let mut watch = watch_parent(path);

        loop {
            if let Some(signal) = probe(path, require_content)? {
                return Ok(signal);
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Err(WaitError::Cancelled(path.to_path_buf()));
                }
                _ = changed(&mut watch) => {}
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }
    }
}

/// Check once for the file or its error twin
fn probe(path: &Path, require_content: bool) -> Result<Option<WaitSignal>, WaitError> {
    match std::fs::metadata(path) {
        Ok(meta) if !require_content || meta.len() > 0 => return Ok(Some(WaitSignal::Ready)),
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(source) => {
            return Err(WaitError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    let twin = error_twin(path);
    match std::fs::metadata(&twin) {
        Ok(_) => Ok(Some(WaitSignal::PredecessorFailed)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(WaitError::Io { path: twin, source }),
    }
}

struct DirWatch {
    // NOTE(lifetime): dropping the watcher stops event delivery
    _watcher: RecommendedWatcher,
    events: mpsc::Receiver<()>,
}

fn watch_parent(path: &Path) -> Option<DirWatch> {
    let parent = path.parent()?;
    let (tx, events) = mpsc::channel(1);

    let watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if res.is_ok() {
            // A full channel already holds a pending wake-up
            let _ = tx.try_send(());
        }
    });
    let mut watcher = match watcher {
        Ok(w) => w,
        Err(e) => {
            tracing::debug!(error = %e, "file watch unavailable, polling only");
            return None;
        }
    };
    if let Err(e) = watcher.watch(parent, RecursiveMode::NonRecursive) {
        tracing::debug!(dir = %parent.display(), error = %e, "cannot watch directory, polling only");
        return None;
    }

    Some(DirWatch {
        _watcher: watcher,
        events,
    })
}

/// Resolves on the next directory event; never resolves without a watch
async fn changed(watch: &mut Option<DirWatch>) {
    match watch {
        Some(w) => {
            if w.events.recv().await.is_none() {
                std::future::pending::<()>().await;
            }
        }
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
#[path = "fs_tests.rs"]
mod tests;
