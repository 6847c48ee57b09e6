// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake runner for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{RunError, Runner};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// Recorded run call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCall {
    pub args: Vec<String>,
}

#[derive(Debug, Clone)]
enum Outcome {
    Exit(i32),
    Hang,
}

/// Fake runner for testing. Programs succeed unless scripted otherwise.
#[derive(Clone, Default)]
pub struct FakeRunner {
    outcomes: Arc<Mutex<HashMap<String, Outcome>>>,
    calls: Arc<Mutex<Vec<RunCall>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `program` exit with `code`
    pub fn fail(&self, program: &str, code: i32) {
        self.outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(program.to_string(), Outcome::Exit(code));
    }

    /// Make `program` run until cancelled
    pub fn hang(&self, program: &str) {
        self.outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(program.to_string(), Outcome::Hang);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<RunCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Runner for FakeRunner {
    async fn run(&self, args: &[String], cancel: &CancellationToken) -> Result<(), RunError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RunCall {
                args: args.to_vec(),
            });

        let Some(program) = args.first() else {
            return Ok(());
        };
        let outcome = self
            .outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(program)
            .cloned();

        match outcome {
            None => Ok(()),
            Some(Outcome::Exit(code)) => Err(RunError::Exit {
                program: program.clone(),
                code,
            }),
            Some(Outcome::Hang) => {
                cancel.cancelled().await;
                Ok(())
            }
        }
    }
}
