// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for run lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Run start and completion
//! * Start node selection
//! * Cancellation and early halts

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Run started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use openflow::observability::messages::engine::RunStarted;
///
/// let starts = vec!["n1".to_string()];
/// let msg = RunStarted {
///     run_id: "3f2a",
///     strategy: "breadth_first",
///     node_count: 5,
///     start_nodes: &starts,
/// };
///
/// assert!(msg.to_string().contains("5 nodes"));
/// ```
pub struct RunStarted<'a> {
    pub run_id: &'a str,
    pub strategy: &'a str,
    pub node_count: usize,
    pub start_nodes: &'a [String],
}

impl Display for RunStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting workflow run ({} traversal): {} nodes, starting from [{}]",
            self.strategy,
            self.node_count,
            self.start_nodes.join(", ")
        )
    }
}

impl StructuredLog for RunStarted<'_> {
    fn log(&self) {
        tracing::info!(
            run_id = self.run_id,
            strategy = self.strategy,
            node_count = self.node_count,
            start_count = self.start_nodes.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "workflow_run",
            span_name = name,
            run_id = self.run_id,
            strategy = self.strategy,
            node_count = self.node_count,
        )
    }
}

/// Run finished, either by draining its queue or by cancellation.
///
/// # Log Level
/// `info!` - Important operational event
pub struct RunCompleted<'a> {
    pub run_id: &'a str,
    pub status: &'a str,
    pub executed: usize,
    pub failed: usize,
    pub duration: Duration,
}

impl Display for RunCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Workflow run {}: {} nodes executed ({} failed) in {:?}",
            self.status, self.executed, self.failed, self.duration
        )
    }
}

impl StructuredLog for RunCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            run_id = self.run_id,
            status = self.status,
            executed = self.executed,
            failed = self.failed,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "workflow_run_completed",
            span_name = name,
            run_id = self.run_id,
            status = self.status,
            duration = ?self.duration,
        )
    }
}

/// Every node has an incoming edge, so the first declared node is used as
/// the start node.
///
/// # Log Level
/// `warn!` - Unexpected but handled
pub struct SourceFallbackApplied<'a> {
    pub node_id: &'a str,
}

impl Display for SourceFallbackApplied<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "No source nodes found; starting from first declared node '{}'",
            self.node_id
        )
    }
}

impl StructuredLog for SourceFallbackApplied<'_> {
    fn log(&self) {
        tracing::warn!(node_id = self.node_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("source_fallback", span_name = name, node_id = self.node_id)
    }
}

/// Nothing to start from; the run completes without work.
///
/// # Log Level
/// `warn!` - Unexpected but handled
pub struct NoStartNodes {
    pub node_count: usize,
}

impl Display for NoStartNodes {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "No start nodes among {} nodes; nothing to run", self.node_count)
    }
}

impl StructuredLog for NoStartNodes {
    fn log(&self) {
        tracing::warn!(node_count = self.node_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("no_start_nodes", span_name = name, node_count = self.node_count)
    }
}

/// Run halted early after a failure because `continue_on_error` is off.
///
/// # Log Level
/// `warn!` - Unexpected but handled
pub struct RunHalted<'a> {
    pub failed_node: &'a str,
    pub abandoned: usize,
}

impl Display for RunHalted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Halting run after failure of '{}'; {} queued items abandoned",
            self.failed_node, self.abandoned
        )
    }
}

impl StructuredLog for RunHalted<'_> {
    fn log(&self) {
        tracing::warn!(
            failed_node = self.failed_node,
            abandoned = self.abandoned,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "run_halted",
            span_name = name,
            failed_node = self.failed_node,
            abandoned = self.abandoned,
        )
    }
}

/// Cancellation observed between work items.
///
/// # Log Level
/// `warn!` - Unexpected but handled
pub struct RunCancelled {
    pub abandoned: usize,
}

impl Display for RunCancelled {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Run cancelled; {} queued items abandoned", self.abandoned)
    }
}

impl StructuredLog for RunCancelled {
    fn log(&self) {
        tracing::warn!(abandoned = self.abandoned, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("run_cancelled", span_name = name, abandoned = self.abandoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats() {
        let starts = vec!["n1".to_string(), "n4".to_string()];
        let started = RunStarted {
            run_id: "r1",
            strategy: "depth_first",
            node_count: 4,
            start_nodes: &starts,
        };
        assert_eq!(
            started.to_string(),
            "Starting workflow run (depth_first traversal): 4 nodes, starting from [n1, n4]"
        );

        let completed = RunCompleted {
            run_id: "r1",
            status: "completed",
            executed: 3,
            failed: 1,
            duration: Duration::from_millis(12),
        };
        assert!(completed.to_string().starts_with("Workflow run completed: 3 nodes executed (1 failed)"));

        assert_eq!(
            SourceFallbackApplied { node_id: "x" }.to_string(),
            "No source nodes found; starting from first declared node 'x'"
        );
    }
}
