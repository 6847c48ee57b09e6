// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::pod::{PodClient, PodError};
use crate::run::{RunError, Runner};
use crate::wait::{WaitError, WaitSignal, Waiter};
use crate::write::{WriteError, Writer};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Wrapper that adds tracing to any Waiter
#[derive(Clone)]
pub struct TracedWaiter<W> {
    inner: W,
}

impl<W> TracedWaiter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<W: Waiter> Waiter for TracedWaiter<W> {
    async fn wait(
        &self,
        path: &Path,
        require_content: bool,
        cancel: &CancellationToken,
    ) -> Result<WaitSignal, WaitError> {
        let span = tracing::info_span!("wait", path = %path.display(), require_content);
        async {
            tracing::debug!("waiting");

            let start = std::time::Instant::now();
            let result = self.inner.wait(path, require_content, cancel).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(WaitSignal::Ready) => tracing::info!(elapsed_ms, "ready"),
                Ok(WaitSignal::PredecessorFailed) => {
                    tracing::warn!(elapsed_ms, "predecessor reported failure")
                }
                Err(WaitError::Cancelled(_)) => tracing::info!(elapsed_ms, "cancelled"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "wait failed"),
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any Runner
#[derive(Clone)]
pub struct TracedRunner<R> {
    inner: R,
}

impl<R> TracedRunner<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<R: Runner> Runner for TracedRunner<R> {
    async fn run(&self, args: &[String], cancel: &CancellationToken) -> Result<(), RunError> {
        let program = args.first().map(String::as_str).unwrap_or_default();
        let span = tracing::info_span!("run", program);
        async {
            tracing::info!(arg_count = args.len().saturating_sub(1), "starting");

            let start = std::time::Instant::now();
            let result = self.inner.run(args, cancel).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            // Command failures are step outcomes, not adapter errors
            match &result {
                Ok(()) if cancel.is_cancelled() => tracing::info!(elapsed_ms, "stopped"),
                Ok(()) => tracing::info!(elapsed_ms, "finished"),
                Err(RunError::Spawn { .. }) | Err(RunError::Io { .. }) => {
                    tracing::error!(elapsed_ms, error = ?result, "could not run")
                }
                Err(e) => tracing::info!(elapsed_ms, exit_code = e.exit_code(), "failed"),
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any Writer
#[derive(Clone)]
pub struct TracedWriter<X> {
    inner: X,
}

impl<X> TracedWriter<X> {
    pub fn new(inner: X) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<X: Writer> Writer for TracedWriter<X> {
    async fn write(&self, path: &Path, contents: &[u8]) -> Result<(), WriteError> {
        let result = self.inner.write(path, contents).await;
        match &result {
            Ok(()) => tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote marker"),
            Err(e) => tracing::error!(path = %path.display(), error = %e, "marker write failed"),
        }
        result
    }
}

/// Wrapper that adds tracing to any PodClient
#[derive(Clone)]
pub struct TracedPodClient<C> {
    inner: C,
}

impl<C> TracedPodClient<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: PodClient> PodClient for TracedPodClient<C> {
    async fn get(&self, name: &str) -> Result<Pod, PodError> {
        let result = self.inner.get(name).await;
        tracing::trace!(
            name,
            resource_version = ?result.as_ref().ok().and_then(|p| p.metadata.resource_version.clone()),
            "fetched pod"
        );
        result
    }

    async fn replace(&self, pod: &Pod) -> Result<Pod, PodError> {
        let name = pod.metadata.name.as_deref().unwrap_or_default();
        let span = tracing::info_span!("pod.replace", name);
        async {
            let start = std::time::Instant::now();
            let result = self.inner.replace(pod).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(updated) => tracing::info!(
                    elapsed_ms,
                    resource_version = ?updated.metadata.resource_version,
                    "pod replaced"
                ),
                // Conflicts are expected under concurrent controllers
                Err(PodError::Conflict(_)) => tracing::warn!(elapsed_ms, "conflict"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "replace failed"),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
