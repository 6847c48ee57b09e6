// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake writer for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{WriteError, Writer};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Recorded write call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteCall {
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

/// In-memory writer with the same write-once semantics as the filesystem one
#[derive(Clone, Default)]
pub struct FakeWriter {
    files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
    failing: Arc<Mutex<HashSet<PathBuf>>>,
    calls: Arc<Mutex<Vec<WriteCall>>>,
}

impl FakeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make writes to `path` fail
    pub fn fail_on(&self, path: impl Into<PathBuf>) {
        self.failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.into());
    }

    /// Contents of a written file
    pub fn get(&self, path: &Path) -> Option<Vec<u8>> {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(path)
            .cloned()
    }

    pub fn exists(&self, path: &Path) -> bool {
        self.get(path).is_some()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<WriteCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Writer for FakeWriter {
    async fn write(&self, path: &Path, contents: &[u8]) -> Result<(), WriteError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(WriteCall {
                path: path.to_path_buf(),
                contents: contents.to_vec(),
            });

        if self
            .failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(path)
        {
            return Err(WriteError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            });
        }

        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(path.to_path_buf())
            .or_insert_with(|| contents.to_vec());
        Ok(())
    }
}
