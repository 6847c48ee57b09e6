// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line surface of the entrypoint binary

use clap::Parser;
use relay_core::invocation::ARGS_SEPARATOR;
use relay_core::{PredecessorFailurePolicy, WrappedStep, MIN_POLL_INTERVAL};
use std::path::PathBuf;
use std::time::Duration;

/// Long flags that may be spelled with a single dash
const LONG_FLAGS: &[&str] = &[
    "wait_file",
    "wait_file_content",
    "post_file",
    "start_file",
    "entrypoint",
    "on_predecessor_failure",
    "wait_poll_interval",
];

#[derive(Debug, Parser)]
#[command(
    name = "entrypoint",
    version,
    about = "Wait for the previous step, run a command, signal the next step"
)]
pub struct EntrypointArgs {
    /// File to wait for before running (repeatable, waited in order)
    #[arg(long = "wait_file", value_name = "PATH")]
    pub wait_files: Vec<PathBuf>,

    /// Wait for wait files to be non-empty, not just present
    #[arg(long = "wait_file_content")]
    pub wait_file_content: bool,

    /// File to write when the command finishes (`.err` appended on failure)
    #[arg(long = "post_file", value_name = "PATH")]
    pub post_file: Option<PathBuf>,

    /// File to write once waiting is over, before the command starts
    #[arg(long = "start_file", value_name = "PATH")]
    pub start_file: Option<PathBuf>,

    /// Command to run; arguments follow `--`
    #[arg(long = "entrypoint", value_name = "COMMAND")]
    pub entrypoint: Option<String>,

    /// What to do when the predecessor failed: run or skip
    #[arg(long = "on_predecessor_failure", default_value_t = PredecessorFailurePolicy::Run)]
    pub on_predecessor_failure: PredecessorFailurePolicy,

    /// How often to re-check wait files [default: 50ms]
    #[arg(
        long = "wait_poll_interval",
        value_name = "DURATION",
        value_parser = parse_poll_interval
    )]
    pub wait_poll_interval: Option<Duration>,

    #[arg(last = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

impl EntrypointArgs {
    pub fn into_step(self) -> WrappedStep {
        WrappedStep {
            wait_files: self.wait_files,
            wait_file_content: self.wait_file_content,
            post_file: self.post_file,
            start_file: self.start_file,
            entrypoint: self.entrypoint,
            args: self.args,
            on_predecessor_failure: self.on_predecessor_failure,
            wait_poll_interval: self.wait_poll_interval,
        }
    }
}

fn parse_poll_interval(value: &str) -> Result<Duration, String> {
    let interval = humantime::parse_duration(value).map_err(|e| e.to_string())?;
    if interval < MIN_POLL_INTERVAL {
        return Err(format!(
            "must be at least {}",
            humantime::format_duration(MIN_POLL_INTERVAL)
        ));
    }
    Ok(interval)
}

/// Rewrite single-dash long flags (`-post_file x`, `-post_file=x`) to the
/// double-dash form. Everything from the first `--` on is left alone.
pub fn normalize_flags<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }
            if arg == ARGS_SEPARATOR {
                passthrough = true;
                return arg;
            }
            match arg.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') && is_long_flag(rest) => format!("-{}", arg),
                _ => arg,
            }
        })
        .collect()
}

fn is_long_flag(flag: &str) -> bool {
    let name = flag.split_once('=').map_or(flag, |(name, _)| name);
    LONG_FLAGS.contains(&name)
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
