// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! relay execution engine
//!
//! [`Entrypointer`] drives one step inside its container: wait for the
//! predecessor, run the command, signal completion. [`Controller`] applies
//! the sidecar and readiness policies to live pods.

mod controller;
mod entrypointer;
mod error;

pub use controller::Controller;
pub use entrypointer::Entrypointer;
pub use error::{ControllerError, StepError};
