// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! What a step does when its predecessor reported failure

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Behaviour of a step whose wait file resolved to the error twin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredecessorFailurePolicy {
    /// Run the command anyway; the step's own outcome decides its marker.
    #[default]
    Run,
    /// Do not run; record failure immediately so the rest of the chain
    /// cascades without executing.
    Skip,
}

impl PredecessorFailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for PredecessorFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown predecessor failure policy '{0}' (expected 'run' or 'skip')")]
pub struct ParsePolicyError(pub String);

impl FromStr for PredecessorFailurePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "run" => Ok(Self::Run),
            "skip" => Ok(Self::Skip),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}
