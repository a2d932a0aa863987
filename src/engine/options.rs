// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::context::MemoryMap;

/// Order in which the run queue hands out work items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TraversalOrder {
    /// FIFO: nodes closer to the trigger run first.
    #[default]
    BreadthFirst,
    /// LIFO: a branch is followed to its end before its siblings, first
    /// declared edge first.
    DepthFirst,
}

impl TraversalOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            TraversalOrder::BreadthFirst => "breadth_first",
            TraversalOrder::DepthFirst => "depth_first",
        }
    }
}

/// What to start from when every node has an incoming edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFallback {
    /// Start from the first declared node.
    #[default]
    FirstDeclared,
    /// Start from nothing; the run completes without work.
    Disabled,
}

/// Per-run knobs for [`WorkflowExecutor::execute`](crate::traits::WorkflowExecutor::execute).
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Keep draining the queue after a node fails. When `false` the run stops
    /// dequeuing after the first failure.
    pub continue_on_error: bool,
    /// Seed for the run's shared memory, e.g. a previous run's snapshot.
    pub initial_memory: MemoryMap,
    /// Bound on each behaviour invocation unless the node sets `timeout_ms`.
    pub timeout_per_node: Option<Duration>,
    /// Explicit start nodes, overriding source detection.
    pub start_nodes: Option<Vec<String>>,
    pub source_fallback: SourceFallback,
    /// Suspend for each behaviour's nominal latency, as the designer does.
    pub simulate_latency: bool,
    pub cancellation: CancellationToken,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            continue_on_error: true,
            initial_memory: MemoryMap::new(),
            timeout_per_node: None,
            start_nodes: None,
            source_fallback: SourceFallback::default(),
            simulate_latency: false,
            cancellation: CancellationToken::new(),
        }
    }
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_memory(mut self, memory: MemoryMap) -> Self {
        self.initial_memory = memory;
        self
    }

    pub fn with_timeout_per_node(mut self, timeout: Duration) -> Self {
        self.timeout_per_node = Some(timeout);
        self
    }

    pub fn with_start_nodes<I, S>(mut self, start_nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.start_nodes = Some(start_nodes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_source_fallback(mut self, fallback: SourceFallback) -> Self {
        self.source_fallback = fallback;
        self
    }

    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    pub fn with_simulated_latency(mut self, simulate: bool) -> Self {
        self.simulate_latency = simulate;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RunOptions::default();
        assert!(options.continue_on_error);
        assert!(options.initial_memory.is_empty());
        assert!(options.timeout_per_node.is_none());
        assert!(options.start_nodes.is_none());
        assert_eq!(options.source_fallback, SourceFallback::FirstDeclared);
        assert!(!options.simulate_latency);
        assert!(!options.cancellation.is_cancelled());
    }

    #[test]
    fn test_traversal_order_deserializes_snake_case() {
        let order: TraversalOrder = serde_yaml::from_str("depth_first").unwrap();
        assert_eq!(order, TraversalOrder::DepthFirst);
        assert_eq!(TraversalOrder::default().as_str(), "breadth_first");
    }
}
