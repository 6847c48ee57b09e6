// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! relay-core: pure building blocks for ordered step execution in a pod
//!
//! This crate provides:
//! - Configuration for the shared volume layout, images and pod conventions
//! - The container-chain builder that rewrites steps into wrapped containers
//! - The wrapped-step invocation encoding understood by the `entrypoint` binary
//! - Step outcome records and marker-file naming
//! - Pure sidecar-stop and readiness-annotation policies

pub mod chain;
pub mod config;
pub mod invocation;
pub mod layout;
pub mod policy;
pub mod readiness;
pub mod record;
pub mod sidecar;

pub use chain::{build_chain, Chain, ChainError};
pub use config::{
    ChainConfig, Config, ConfigError, PodConfig, WaiterConfig, DEFAULT_POLL_INTERVAL,
    MIN_POLL_INTERVAL,
};
pub use invocation::WrappedStep;
pub use layout::error_twin;
pub use policy::{ParsePolicyError, PredecessorFailurePolicy};
pub use readiness::{is_ready, mark_ready};
pub use record::{StepRecord, StepStatus};
pub use sidecar::{is_sidecar, steps_finished, stop_sidecars};
