// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Kubernetes API pod client

use super::{PodClient, PodError};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::api::PostParams;
use kube::{Api, Client};

/// Pod client backed by the cluster API server
#[derive(Clone)]
pub struct KubePodClient {
    api: Api<Pod>,
}

impl KubePodClient {
    /// Connect using the ambient kubeconfig or in-cluster service account.
    ///
    /// Without a namespace, the config's default namespace is used.
    pub async fn try_default(namespace: Option<&str>) -> Result<Self, PodError> {
        let client = Client::try_default()
            .await
            .map_err(|e| PodError::Api(e.to_string()))?;
        let api = match namespace {
            Some(ns) => Api::namespaced(client, ns),
            None => Api::default_namespaced(client),
        };
        Ok(Self { api })
    }
}

fn api_error(name: &str, error: kube::Error) -> PodError {
    match &error {
        kube::Error::Api(response) if response.code == 404 => PodError::NotFound(name.to_string()),
        kube::Error::Api(response) if response.code == 409 => PodError::Conflict(name.to_string()),
        _ => PodError::Api(error.to_string()),
    }
}

#[async_trait]
impl PodClient for KubePodClient {
    async fn get(&self, name: &str) -> Result<Pod, PodError> {
        self.api.get(name).await.map_err(|e| api_error(name, e))
    }

    async fn replace(&self, pod: &Pod) -> Result<Pod, PodError> {
        let name = pod.metadata.name.as_deref().ok_or(PodError::Unnamed)?;
        self.api
            .replace(name, &PostParams::default(), pod)
            .await
            .map_err(|e| api_error(name, e))
    }
}
