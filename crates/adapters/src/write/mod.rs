// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Writing marker files

mod fs;

pub use fs::FsWriter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeWriter, WriteCall};

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from writing a marker
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Adapter for creating marker files
#[async_trait]
pub trait Writer: Clone + Send + Sync + 'static {
    /// Create `path` holding `contents`, creating parent directories.
    ///
    /// Markers are write-once: if `path` already exists the call succeeds
    /// and the existing file is left as it is.
    async fn write(&self, path: &Path, contents: &[u8]) -> Result<(), WriteError>;
}
