// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem marker writer

use super::{WriteError, Writer};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;
use tokio::io::AsyncWriteExt;

#[derive(Clone, Copy, Debug, Default)]
pub struct FsWriter;

impl FsWriter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Writer for FsWriter {
    async fn write(&self, path: &Path, contents: &[u8]) -> Result<(), WriteError> {
        let io_err = |source| WriteError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let mut file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!(path = %path.display(), "marker already present");
                return Ok(());
            }
            Err(e) => return Err(io_err(e)),
        };

        file.write_all(contents).await.map_err(io_err)?;
        file.sync_all().await.map_err(io_err)?;
        Ok(())
    }
}
