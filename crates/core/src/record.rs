// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step outcome records
//!
//! A post file carries one JSON line describing how the step ended. The
//! record's status also decides *which* path is written: the plain marker
//! on success, its `.err` twin on failure. Readers that only check for
//! existence keep working; readers that want detail parse the line.

use crate::layout::error_twin;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub status: StepStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub finished_at: DateTime<Utc>,
}

impl StepRecord {
    pub fn succeeded(finished_at: DateTime<Utc>) -> Self {
        Self {
            status: StepStatus::Succeeded,
            message: None,
            finished_at,
        }
    }

    pub fn failed(message: impl Into<String>, finished_at: DateTime<Utc>) -> Self {
        Self {
            status: StepStatus::Failed,
            message: Some(message.into()),
            finished_at,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == StepStatus::Succeeded
    }

    /// The marker this record belongs in, given the step's post file
    pub fn marker_path(&self, post_file: &Path) -> PathBuf {
        match self.status {
            StepStatus::Succeeded => post_file.to_path_buf(),
            StepStatus::Failed => error_twin(post_file),
        }
    }

    /// Single newline-terminated JSON line
    pub fn to_line(&self) -> String {
        // Serializing a struct of strings and a timestamp cannot fail
        let mut line = serde_json::to_string(self).unwrap_or_default();
        line.push('\n');
        line
    }

    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn success_writes_plain_marker() {
        let record = StepRecord::succeeded(at());
        assert_eq!(
            record.marker_path(Path::new("/relay/tools/1")),
            PathBuf::from("/relay/tools/1")
        );
    }

    #[test]
    fn failure_writes_error_twin() {
        let record = StepRecord::failed("exit status 2", at());
        assert_eq!(
            record.marker_path(Path::new("/relay/tools/1")),
            PathBuf::from("/relay/tools/1.err")
        );
    }

    #[test]
    fn line_is_single_json_object() {
        let line = StepRecord::failed("boom", at()).to_line();
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.contains(r#""status":"failed""#));
        assert!(line.contains(r#""message":"boom""#));
    }

    #[test]
    fn success_line_omits_message() {
        let line = StepRecord::succeeded(at()).to_line();
        assert!(!line.contains("message"));
        assert_eq!(StepRecord::parse(&line).unwrap(), StepRecord::succeeded(at()));
    }

    #[test]
    fn parsed_status_reports_success() {
        let ok = StepRecord::parse(&StepRecord::succeeded(at()).to_line()).unwrap();
        let failed = StepRecord::parse(&StepRecord::failed("boom", at()).to_line()).unwrap();
        assert!(ok.is_success());
        assert!(!failed.is_success());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(StepRecord::parse("not json").is_err());
    }
}
