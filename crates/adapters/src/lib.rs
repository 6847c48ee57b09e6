// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: the shared filesystem, child processes and
//! the Kubernetes pod API

pub mod pod;
pub mod run;
pub mod traced;
pub mod wait;
pub mod write;

pub use pod::{KubePodClient, PodClient, PodError};
pub use run::{ProcessRunner, RunError, Runner};
pub use traced::{TracedPodClient, TracedRunner, TracedWaiter, TracedWriter};
pub use wait::{FsWaiter, WaitError, WaitSignal, Waiter};
pub use write::{FsWriter, WriteError, Writer};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use pod::{FakePodClient, PodCall};
#[cfg(any(test, feature = "test-support"))]
pub use run::{FakeRunner, RunCall};
#[cfg(any(test, feature = "test-support"))]
pub use wait::{FakeWait, FakeWaiter, WaitCall};
#[cfg(any(test, feature = "test-support"))]
pub use write::{FakeWriter, WriteCall};
