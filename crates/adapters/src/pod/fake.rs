// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake pod client for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{PodClient, PodError};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Recorded pod call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PodCall {
    Get { name: String },
    Replace { name: String },
}

/// In-memory pod store.
///
/// Like the API server, every stored version gets a fresh resource version
/// and a replace carrying a stale one is rejected with a conflict.
#[derive(Clone, Default)]
pub struct FakePodClient {
    pods: Arc<Mutex<HashMap<String, Pod>>>,
    version: Arc<Mutex<u64>>,
    calls: Arc<Mutex<Vec<PodCall>>>,
}

impl FakePodClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a pod, assigning it a new resource version
    pub fn insert(&self, mut pod: Pod) {
        let name = pod.metadata.name.clone().unwrap_or_default();
        pod.metadata.resource_version = Some(self.next_version());
        self.pods
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name, pod);
    }

    /// Mutate a stored pod as another writer would
    pub fn modify(&self, name: &str, f: impl FnOnce(&mut Pod)) {
        let version = self.next_version();
        let mut pods = self.pods.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(pod) = pods.get_mut(name) {
            f(pod);
            pod.metadata.resource_version = Some(version);
        }
    }

    /// Current stored version of a pod
    pub fn pod(&self, name: &str) -> Option<Pod> {
        self.pods
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .cloned()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<PodCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn next_version(&self) -> String {
        let mut version = self.version.lock().unwrap_or_else(|e| e.into_inner());
        *version += 1;
        version.to_string()
    }
}

#[async_trait]
impl PodClient for FakePodClient {
    async fn get(&self, name: &str) -> Result<Pod, PodError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(PodCall::Get {
                name: name.to_string(),
            });

        self.pod(name)
            .ok_or_else(|| PodError::NotFound(name.to_string()))
    }

    async fn replace(&self, pod: &Pod) -> Result<Pod, PodError> {
        let name = pod.metadata.name.clone().ok_or(PodError::Unnamed)?;
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(PodCall::Replace { name: name.clone() });

        let version = self.next_version();
        let mut pods = self.pods.lock().unwrap_or_else(|e| e.into_inner());
        let stored = pods
            .get_mut(&name)
            .ok_or_else(|| PodError::NotFound(name.clone()))?;

        if pod.metadata.resource_version.is_some()
            && pod.metadata.resource_version != stored.metadata.resource_version
        {
            return Err(PodError::Conflict(name));
        }

        let mut updated = pod.clone();
        updated.metadata.resource_version = Some(version);
        *stored = updated.clone();
        Ok(updated)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
