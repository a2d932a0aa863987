// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for workflow validation warnings and errors.
//!
//! This module contains message types for logging events related to:
//! * Cycle detection (tolerated by the engine, reported as a warning)
//! * Dangling edges (inert at run time, reported as a warning)
//! * Validation lifecycle (start, completion, failure)

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Cycle found in the workflow graph.
///
/// # Log Level
/// `warn!` - Each node still runs at most once per run
///
/// # Example
/// ```
/// use openflow::observability::messages::validation::CycleDetected;
///
/// let cycle = vec!["a", "b", "a"];
/// let msg = CycleDetected { cycle: &cycle };
///
/// assert_eq!(msg.to_string(), "Cycle detected: a -> b -> a (each node still runs at most once)");
/// ```
pub struct CycleDetected<'a> {
    pub cycle: &'a [&'a str],
}

impl Display for CycleDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Cycle detected: {} (each node still runs at most once)",
            self.cycle.join(" -> ")
        )
    }
}

impl StructuredLog for CycleDetected<'_> {
    fn log(&self) {
        tracing::warn!(
            cycle = self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "span_name",
            name = name,
            cycle = self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
        )
    }
}

/// Edge whose source or target does not exist.
///
/// # Log Level
/// `warn!` - The edge is ignored at run time
///
/// # Example
/// ```
/// use openflow::observability::messages::validation::DanglingEdge;
///
/// let msg = DanglingEdge { edge_id: "e9", source: "n1", target: "gone" };
/// tracing::warn!("{}", msg);
/// ```
pub struct DanglingEdge<'a> {
    pub edge_id: &'a str,
    pub source: &'a str,
    pub target: &'a str,
}

impl Display for DanglingEdge<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Edge '{}' ({} -> {}) references a missing node and will be ignored",
            self.edge_id, self.source, self.target
        )
    }
}

impl StructuredLog for DanglingEdge<'_> {
    fn log(&self) {
        tracing::warn!(
            edge_id = self.edge_id,
            source = self.source,
            target = self.target,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "span_name",
            name = name,
            edge_id = self.edge_id,
            source = self.source,
            target = self.target,
        )
    }
}

/// Workflow validation started.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ValidationStarted {
    pub node_count: usize,
    pub edge_count: usize,
}

impl Display for ValidationStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting workflow validation for {} nodes and {} edges",
            self.node_count, self.edge_count
        )
    }
}

impl StructuredLog for ValidationStarted {
    fn log(&self) {
        tracing::info!(
            node_count = self.node_count,
            edge_count = self.edge_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::INFO,
            "span_name",
            name = name,
            node_count = self.node_count,
            edge_count = self.edge_count,
        )
    }
}

/// Workflow validation completed without errors.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ValidationCompleted {
    pub node_count: usize,
    pub warning_count: usize,
}

impl Display for ValidationCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.warning_count > 0 {
            write!(
                f,
                "Workflow validation completed for {} nodes with {} warnings",
                self.node_count, self.warning_count
            )
        } else {
            write!(
                f,
                "Workflow validation completed successfully for {} nodes",
                self.node_count
            )
        }
    }
}

impl StructuredLog for ValidationCompleted {
    fn log(&self) {
        tracing::info!(
            node_count = self.node_count,
            warning_count = self.warning_count,
            has_warnings = self.warning_count > 0,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::INFO,
            "span_name",
            name = name,
            node_count = self.node_count,
            warning_count = self.warning_count,
        )
    }
}

/// Workflow validation failed.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ValidationFailed {
    pub error_count: usize,
}

impl Display for ValidationFailed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Workflow validation failed with {} errors", self.error_count)
    }
}

impl StructuredLog for ValidationFailed {
    fn log(&self) {
        tracing::error!(error_count = self.error_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            error_count = self.error_count,
        )
    }
}
