// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sidecar stop policy
//!
//! Sidecars run for the pod's lifetime. Once the steps are done they are
//! stopped by swapping their image for a no-op image; everything else about
//! the container stays as declared so the pod still shows what ran.

use k8s_openapi::api::core::v1::{Container, Pod};

/// Pod phase in which container states are meaningful
pub const POD_RUNNING: &str = "Running";

pub fn is_sidecar(name: &str, sidecar_prefix: &str) -> bool {
    name.starts_with(sidecar_prefix)
}

/// True once the pod reports at least one step and every step has terminated
pub fn steps_finished(pod: &Pod, step_prefix: &str) -> bool {
    let mut steps = pod
        .status
        .iter()
        .flat_map(|status| status.container_statuses.iter().flatten())
        .filter(|s| s.name.starts_with(step_prefix))
        .peekable();
    if steps.peek().is_none() {
        return false;
    }
    steps.all(|s| s.state.as_ref().is_some_and(|state| state.terminated.is_some()))
}

/// Compute the pod's containers with running sidecars stopped.
///
/// Returns the full container list and whether anything changed. Nothing
/// changes unless the pod is Running; within a running pod only sidecars
/// whose status reports Running are touched.
pub fn stop_sidecars(pod: &Pod, sidecar_prefix: &str, nop_image: &str) -> (Vec<Container>, bool) {
    let mut containers = pod
        .spec
        .as_ref()
        .map(|spec| spec.containers.clone())
        .unwrap_or_default();

    let Some(status) = pod.status.as_ref() else {
        return (containers, false);
    };
    if status.phase.as_deref() != Some(POD_RUNNING) {
        return (containers, false);
    }

    let running: Vec<&str> = status
        .container_statuses
        .iter()
        .flatten()
        .filter(|s| s.state.as_ref().is_some_and(|state| state.running.is_some()))
        .map(|s| s.name.as_str())
        .collect();

    let mut changed = false;
    for container in containers.iter_mut() {
        if !is_sidecar(&container.name, sidecar_prefix) || !running.contains(&container.name.as_str())
        {
            continue;
        }
        if container.image.as_deref() == Some(nop_image) {
            continue;
        }
        tracing::debug!(container = %container.name, nop_image, "stopping sidecar");
        container.image = Some(nop_image.to_string());
        changed = true;
    }

    (containers, changed)
}

#[cfg(test)]
#[path = "sidecar_tests.rs"]
mod tests;
