// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wrapped-step invocation
//!
//! The argument vector the chain builder hands to the staged `entrypoint`
//! binary. Flags use single-dash long names, followed by a separator and
//! the original arguments verbatim.

use crate::policy::PredecessorFailurePolicy;
use std::path::PathBuf;
use std::time::Duration;

pub const WAIT_FILE_FLAG: &str = "-wait_file";
pub const WAIT_FILE_CONTENT_FLAG: &str = "-wait_file_content";
pub const POST_FILE_FLAG: &str = "-post_file";
pub const START_FILE_FLAG: &str = "-start_file";
pub const ENTRYPOINT_FLAG: &str = "-entrypoint";
pub const ON_PREDECESSOR_FAILURE_FLAG: &str = "-on_predecessor_failure";
pub const WAIT_POLL_INTERVAL_FLAG: &str = "-wait_poll_interval";
pub const ARGS_SEPARATOR: &str = "--";

/// One step's wait/run/signal instructions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrappedStep {
    /// Files to wait for, in order. Empty means start immediately.
    pub wait_files: Vec<PathBuf>,
    /// Require wait files to be non-empty, not merely present
    pub wait_file_content: bool,
    /// Marker written when the step completes
    pub post_file: Option<PathBuf>,
    /// Marker written after waiting, before running
    pub start_file: Option<PathBuf>,
    /// Original entrypoint; `None` with no args makes a sync-only step
    pub entrypoint: Option<String>,
    pub args: Vec<String>,
    pub on_predecessor_failure: PredecessorFailurePolicy,
    /// Waiter poll interval; the binary's default when unset
    pub wait_poll_interval: Option<Duration>,
}

impl WrappedStep {
    /// Full command line: entrypoint followed by args
    pub fn command(&self) -> Vec<String> {
        self.entrypoint
            .iter()
            .chain(self.args.iter())
            .cloned()
            .collect()
    }

    /// Encode as arguments for the entrypoint binary
    pub fn to_args(&self) -> Vec<String> {
        let mut out = Vec::new();
        for file in &self.wait_files {
            out.push(WAIT_FILE_FLAG.to_string());
            out.push(file.display().to_string());
        }
        if self.wait_file_content {
            out.push(WAIT_FILE_CONTENT_FLAG.to_string());
        }
        if let Some(post_file) = &self.post_file {
            out.push(POST_FILE_FLAG.to_string());
            out.push(post_file.display().to_string());
        }
        if let Some(start_file) = &self.start_file {
            out.push(START_FILE_FLAG.to_string());
            out.push(start_file.display().to_string());
        }
        if self.on_predecessor_failure != PredecessorFailurePolicy::default() {
            out.push(ON_PREDECESSOR_FAILURE_FLAG.to_string());
            out.push(self.on_predecessor_failure.to_string());
        }
        if let Some(interval) = self.wait_poll_interval {
            out.push(WAIT_POLL_INTERVAL_FLAG.to_string());
            out.push(humantime::format_duration(interval).to_string());
        }
        if let Some(entrypoint) = &self.entrypoint {
            out.push(ENTRYPOINT_FLAG.to_string());
            out.push(entrypoint.clone());
        }
        out.push(ARGS_SEPARATOR.to_string());
        out.extend(self.args.iter().cloned());
        out
    }
}
