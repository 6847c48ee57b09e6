// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! entrypoint - wrapper staged into every step container
//!
//! Waits for the previous step's marker, runs the step's original command,
//! then writes its own marker for the next step.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod args;

use args::{normalize_flags, EntrypointArgs};
use clap::Parser;
use relay_adapters::{
    FsWaiter, FsWriter, ProcessRunner, TracedRunner, TracedWaiter, TracedWriter,
};
use relay_core::DEFAULT_POLL_INTERVAL;
use relay_engine::{Entrypointer, StepError};
use std::process::ExitCode;
use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Environment variable holding the log filter
const LOG_ENV: &str = "RELAY_LOG";

fn main() -> ExitCode {
    let args = EntrypointArgs::parse_from(normalize_flags(std::env::args()));
    setup_logging();

    // One step, one thread
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(run(args))
}

async fn run(args: EntrypointArgs) -> ExitCode {
    let cancel = CancellationToken::new();
    if let Err(e) = forward_signals(cancel.clone()) {
        error!("failed to install signal handlers: {}", e);
        return ExitCode::FAILURE;
    }

    let poll_interval = args.wait_poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL);
    let entrypointer = Entrypointer::new(
        args.into_step(),
        TracedWaiter::new(FsWaiter::new(poll_interval)),
        TracedRunner::new(ProcessRunner::new()),
        TracedWriter::new(FsWriter::new()),
    );

    match entrypointer.go(&cancel).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // The command reports its own failures on its own stderr
            if !matches!(e, StepError::Run(_)) {
                error!("{}", e);
            }
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(u8::MAX))
        }
    }
}

/// Cancel on SIGTERM or SIGINT, so the kubelet's stop reaches the child
fn forward_signals(cancel: CancellationToken) -> std::io::Result<()> {
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => info!("received SIGTERM"),
            _ = sigint.recv() => info!("received SIGINT"),
        }
        cancel.cancel();
    });

    Ok(())
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Quiet by default: stderr belongs to the step
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(false),
        )
        .init();
}
