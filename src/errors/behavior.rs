// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Duration;
use thiserror::Error;

/// Failure of a single node's unit of work.
///
/// A behaviour error is isolated to the failing node: the node ends in
/// `Error`, no edges are followed from it, and sibling branches continue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BehaviorError {
    /// The behaviour ran and reported a failure.
    #[error("{0}")]
    Failed(String),

    /// The node's config could not be interpreted by its behaviour.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The invocation exceeded its time budget.
    #[error("timed out after {}ms", .after.as_millis())]
    Timeout { after: Duration },

    /// The run was cancelled while the behaviour was suspended.
    #[error("cancelled")]
    Cancelled,
}

impl BehaviorError {
    /// Short machine-readable tag for logs and snapshots.
    pub fn kind(&self) -> &'static str {
        match self {
            BehaviorError::Failed(_) => "failed",
            BehaviorError::InvalidConfig(_) => "invalid_config",
            BehaviorError::Timeout { .. } => "timeout",
            BehaviorError::Cancelled => "cancelled",
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, BehaviorError::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_kind() {
        let timeout = BehaviorError::Timeout {
            after: Duration::from_millis(250),
        };
        assert_eq!(timeout.to_string(), "timed out after 250ms");
        assert_eq!(timeout.kind(), "timeout");
        assert!(timeout.is_timeout());

        let failed = BehaviorError::Failed("smtp unreachable".to_string());
        assert_eq!(failed.to_string(), "smtp unreachable");
        assert!(!failed.is_timeout());

        assert_eq!(
            BehaviorError::InvalidConfig("missing key".into()).to_string(),
            "invalid config: missing key"
        );
        assert_eq!(BehaviorError::Cancelled.kind(), "cancelled");
    }
}
