// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared volume layout
//!
//! Every step container mounts the same tools volume, so marker paths are a
//! pure function of a step's position in the chain: step `i` writes
//! `<tools>/i` on success and `<tools>/i.err` on failure.

use crate::config::ChainConfig;
use k8s_openapi::api::core::v1::{
    DownwardAPIVolumeFile, DownwardAPIVolumeSource, EmptyDirVolumeSource, ObjectFieldSelector,
    Volume, VolumeMount,
};
use std::path::{Path, PathBuf};

/// File name of the staged entrypoint binary inside the tools directory
pub const ENTRYPOINT_BINARY: &str = "entrypoint";

/// Suffix marking the failure twin of a post file
pub const ERROR_SUFFIX: &str = ".err";

/// Name of the init container that stages the entrypoint binary
pub const PLACE_TOOLS_CONTAINER: &str = "place-tools";

/// Path of the failure twin for a marker (`<path>.err`)
pub fn error_twin(path: &Path) -> PathBuf {
    let mut twin = path.as_os_str().to_owned();
    twin.push(ERROR_SUFFIX);
    PathBuf::from(twin)
}

impl ChainConfig {
    /// Where the init container places the entrypoint binary
    pub fn entrypoint_binary(&self) -> PathBuf {
        self.tools_dir.join(ENTRYPOINT_BINARY)
    }

    /// The externally populated file gating the first step
    pub fn ready_path(&self) -> PathBuf {
        self.downward_dir.join(&self.ready_file)
    }

    /// Completion marker for the step at `index`
    pub fn post_file(&self, index: usize) -> PathBuf {
        self.tools_dir.join(index.to_string())
    }

    pub fn tools_mount(&self) -> VolumeMount {
        VolumeMount {
            name: self.tools_volume.clone(),
            mount_path: self.tools_dir.display().to_string(),
            ..Default::default()
        }
    }

    pub fn downward_mount(&self) -> VolumeMount {
        VolumeMount {
            name: self.downward_volume.clone(),
            mount_path: self.downward_dir.display().to_string(),
            read_only: Some(true),
            ..Default::default()
        }
    }

    pub fn tools_volume(&self) -> Volume {
        Volume {
            name: self.tools_volume.clone(),
            empty_dir: Some(EmptyDirVolumeSource::default()),
            ..Default::default()
        }
    }

    /// Downward-API volume projecting the ready annotation into `ready_file`.
    ///
    /// The file is empty until the annotation is set, which is why the first
    /// step waits on content rather than existence.
    pub fn downward_volume(&self, ready_annotation: &str) -> Volume {
        Volume {
            name: self.downward_volume.clone(),
            downward_api: Some(DownwardAPIVolumeSource {
                items: Some(vec![DownwardAPIVolumeFile {
                    path: self.ready_file.clone(),
                    field_ref: Some(ObjectFieldSelector {
                        field_path: format!("metadata.annotations['{}']", ready_annotation),
                        ..Default::default()
                    }),
                    ..Default::default()
                }]),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}
