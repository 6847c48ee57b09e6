// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration
//!
//! Loaded from TOML. Every field has a default, so an empty document yields
//! the stock layout:
//!
//! ```toml
//! [chain]
//! entrypoint_image = "ghcr.io/relay-dev/entrypoint:latest"
//! tools_dir = "/relay/tools"
//! on_predecessor_failure = "run"
//!
//! [pod]
//! sidecar_prefix = "sidecar-"
//! nop_image = "ghcr.io/relay-dev/nop:latest"
//!
//! [waiter]
//! poll_interval = "50ms"
//! ```

use crate::policy::PredecessorFailurePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Interval between waiter probes when none is configured
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Shortest accepted waiter poll interval
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub chain: ChainConfig,
    pub pod: PodConfig,
    pub waiter: WaiterConfig,
}

/// Shape of the rewritten pod: images, shared directories, volume names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChainConfig {
    /// Image carrying the entrypoint binary, run as the init container
    pub entrypoint_image: String,
    /// Location of the entrypoint binary inside `entrypoint_image`
    pub entrypoint_source: PathBuf,
    /// Writable directory shared by every step (binary + markers)
    pub tools_dir: PathBuf,
    /// Read-only directory holding the downward-API ready file
    pub downward_dir: PathBuf,
    pub ready_file: String,
    pub tools_volume: String,
    pub downward_volume: String,
    /// Policy encoded into every wrapped step
    pub on_predecessor_failure: PredecessorFailurePolicy,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            entrypoint_image: "ghcr.io/relay-dev/entrypoint:latest".to_string(),
            entrypoint_source: PathBuf::from("/ko-app/entrypoint"),
            tools_dir: PathBuf::from("/relay/tools"),
            downward_dir: PathBuf::from("/relay/downward"),
            ready_file: "ready".to_string(),
            tools_volume: "relay-internal-tools".to_string(),
            downward_volume: "relay-internal-downward".to_string(),
            on_predecessor_failure: PredecessorFailurePolicy::default(),
        }
    }
}

/// Conventions the controller relies on when inspecting live pods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PodConfig {
    pub step_prefix: String,
    pub sidecar_prefix: String,
    /// Image swapped in to terminate a sidecar
    pub nop_image: String,
    pub ready_annotation: String,
    pub ready_value: String,
}

impl Default for PodConfig {
    fn default() -> Self {
        Self {
            step_prefix: "step-".to_string(),
            sidecar_prefix: "sidecar-".to_string(),
            nop_image: "ghcr.io/relay-dev/nop:latest".to_string(),
            ready_annotation: "relay.dev/ready".to_string(),
            ready_value: "READY".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaiterConfig {
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
}

impl Default for WaiterConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl Config {
    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let chain = &self.chain;
        for (field, dir) in [
            ("chain.tools_dir", &chain.tools_dir),
            ("chain.downward_dir", &chain.downward_dir),
        ] {
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "{} must be absolute, got {}",
                    field,
                    dir.display()
                )));
            }
        }
        if chain.tools_dir == chain.downward_dir {
            return Err(ConfigError::Invalid(
                "chain.tools_dir and chain.downward_dir must differ".to_string(),
            ));
        }
        if chain.ready_file.is_empty() || chain.ready_file.contains('/') {
            return Err(ConfigError::Invalid(format!(
                "chain.ready_file must be a bare file name, got '{}'",
                chain.ready_file
            )));
        }
        if chain.tools_volume == chain.downward_volume {
            return Err(ConfigError::Invalid(
                "chain.tools_volume and chain.downward_volume must differ".to_string(),
            ));
        }
        if self.pod.sidecar_prefix.is_empty() {
            return Err(ConfigError::Invalid(
                "pod.sidecar_prefix must not be empty".to_string(),
            ));
        }
        if self.pod.nop_image.is_empty() {
            return Err(ConfigError::Invalid("pod.nop_image must not be empty".to_string()));
        }
        if self.waiter.poll_interval < MIN_POLL_INTERVAL {
            return Err(ConfigError::Invalid(format!(
                "waiter.poll_interval must be at least {}, got {}",
                humantime::format_duration(MIN_POLL_INTERVAL),
                humantime::format_duration(self.waiter.poll_interval)
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
