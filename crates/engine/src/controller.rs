// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pod-level operations run from the control plane

use crate::ControllerError;
use relay_adapters::PodClient;
use relay_core::{is_ready, mark_ready, steps_finished, stop_sidecars, PodConfig};

/// Applies the sidecar and readiness policies to pods through a
/// [`PodClient`].
///
/// Each operation reads the pod fresh, computes the change, and writes back
/// only when something changed. Nothing is retried; a concurrent
/// modification surfaces as [`relay_adapters::PodError::Conflict`].
pub struct Controller<C> {
    client: C,
    config: PodConfig,
}

impl<C: PodClient> Controller<C> {
    pub fn new(client: C, config: PodConfig) -> Self {
        Self { client, config }
    }

    /// Swap running sidecars to the no-op image. Returns whether the pod
    /// was updated.
    pub async fn stop_sidecars(&self, pod_name: &str) -> Result<bool, ControllerError> {
        let mut pod = self.client.get(pod_name).await?;
        let (containers, changed) =
            stop_sidecars(&pod, &self.config.sidecar_prefix, &self.config.nop_image);
        if !changed {
            tracing::debug!(pod = pod_name, "no running sidecars to stop");
            return Ok(false);
        }

        if let Some(spec) = pod.spec.as_mut() {
            spec.containers = containers;
        }
        self.client.replace(&pod).await?;
        tracing::info!(pod = pod_name, nop_image = %self.config.nop_image, "stopped sidecars");
        Ok(true)
    }

    /// Set the ready annotation. Returns whether the pod was updated.
    pub async fn update_ready(&self, pod_name: &str) -> Result<bool, ControllerError> {
        let mut pod = self.client.get(pod_name).await?;
        if !mark_ready(
            &mut pod.metadata,
            &self.config.ready_annotation,
            &self.config.ready_value,
        ) {
            tracing::debug!(pod = pod_name, "already ready");
            return Ok(false);
        }

        self.client.replace(&pod).await?;
        tracing::info!(pod = pod_name, annotation = %self.config.ready_annotation, "marked ready");
        Ok(true)
    }

    /// Whether the pod carries the ready annotation
    pub async fn is_ready(&self, pod_name: &str) -> Result<bool, ControllerError> {
        let pod = self.client.get(pod_name).await?;
        Ok(is_ready(
            &pod.metadata,
            &self.config.ready_annotation,
            &self.config.ready_value,
        ))
    }

    /// Whether every step container in the pod has terminated
    pub async fn steps_finished(&self, pod_name: &str) -> Result<bool, ControllerError> {
        let pod = self.client.get(pod_name).await?;
        Ok(steps_finished(&pod, &self.config.step_prefix))
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
