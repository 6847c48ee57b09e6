// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pod API adapters

mod cluster;

pub use cluster::KubePodClient;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakePodClient, PodCall};

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use thiserror::Error;

/// Errors from pod operations
#[derive(Debug, Error)]
pub enum PodError {
    #[error("pod not found: {0}")]
    NotFound(String),
    #[error("pod {0} was modified concurrently")]
    Conflict(String),
    #[error("pod has no name")]
    Unnamed,
    #[error("api error: {0}")]
    Api(String),
}

/// Adapter for reading and replacing pods in one namespace
#[async_trait]
pub trait PodClient: Clone + Send + Sync + 'static {
    /// Fetch the current version of a pod
    async fn get(&self, name: &str) -> Result<Pod, PodError>;

    /// Replace a pod. The pod's resource version guards against
    /// overwriting a newer object.
    async fn replace(&self, pod: &Pod) -> Result<Pod, PodError>;
}
