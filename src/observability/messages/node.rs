// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for per-node execution events.

use crate::errors::BehaviorError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Node execution started.
///
/// # Log Level
/// `debug!` - Detailed diagnostic information
pub struct NodeExecutionStarted<'a> {
    pub node_id: &'a str,
    pub node_type: &'a str,
    pub label: &'a str,
}

impl Display for NodeExecutionStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Executing node '{}' ({})", self.label, self.node_type)
    }
}

impl StructuredLog for NodeExecutionStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            node_id = self.node_id,
            node_type = self.node_type,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "node_execution",
            span_name = name,
            node_id = self.node_id,
            node_type = self.node_type,
        )
    }
}

/// Node execution completed successfully.
///
/// # Log Level
/// `debug!` - Detailed diagnostic information
pub struct NodeExecutionCompleted<'a> {
    pub node_id: &'a str,
    pub duration: Duration,
}

impl Display for NodeExecutionCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Node '{}' completed in {:?}", self.node_id, self.duration)
    }
}

impl StructuredLog for NodeExecutionCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            node_id = self.node_id,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "node_completed",
            span_name = name,
            node_id = self.node_id,
            duration = ?self.duration,
        )
    }
}

/// Node execution failed.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use openflow::errors::BehaviorError;
/// use openflow::observability::messages::node::NodeExecutionFailed;
///
/// let error = BehaviorError::Failed("smtp unreachable".into());
/// let msg = NodeExecutionFailed { node_id: "n5", error: &error };
/// assert_eq!(msg.to_string(), "Node 'n5' failed: smtp unreachable");
/// ```
pub struct NodeExecutionFailed<'a> {
    pub node_id: &'a str,
    pub error: &'a BehaviorError,
}

impl Display for NodeExecutionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Node '{}' failed: {}", self.node_id, self.error)
    }
}

impl StructuredLog for NodeExecutionFailed<'_> {
    fn log(&self) {
        tracing::error!(
            node_id = self.node_id,
            error = %self.error,
            error_kind = self.error.kind(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "node_failed",
            span_name = name,
            node_id = self.node_id,
            error = %self.error,
            error_kind = self.error.kind(),
        )
    }
}

/// A work item for a node that already ran was dropped.
///
/// # Log Level
/// `debug!` - Detailed diagnostic information
pub struct NodeRevisitSkipped<'a> {
    pub node_id: &'a str,
}

impl Display for NodeRevisitSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Node '{}' already processed; skipping", self.node_id)
    }
}

impl StructuredLog for NodeRevisitSkipped<'_> {
    fn log(&self) {
        tracing::debug!(node_id = self.node_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("node_skipped", span_name = name, node_id = self.node_id)
    }
}

/// Output forwarded along one outgoing edge.
///
/// # Log Level
/// `debug!` - Detailed diagnostic information
///
/// # Example
/// ```
/// use openflow::observability::messages::node::EdgeDispatched;
///
/// let msg = EdgeDispatched { source: "n1", target: "n2", edge_id: "e1", index: 1, total: 2 };
/// assert_eq!(msg.to_string(), "dispatching to 'n2' via 'e1' (1/2)");
/// ```
pub struct EdgeDispatched<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub edge_id: &'a str,
    /// 1-based position among the source's outgoing edges.
    pub index: usize,
    pub total: usize,
}

impl Display for EdgeDispatched<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "dispatching to '{}' via '{}' ({}/{})",
            self.target, self.edge_id, self.index, self.total
        )
    }
}

impl StructuredLog for EdgeDispatched<'_> {
    fn log(&self) {
        tracing::debug!(
            source = self.source,
            target = self.target,
            edge_id = self.edge_id,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "edge_dispatch",
            span_name = name,
            source = self.source,
            target = self.target,
            edge_id = self.edge_id,
        )
    }
}
