// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use uuid::Uuid;

use crate::context::{MemoryMap, NodeRunState, NodeStatus, RunContext, RunLog};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// The queue drained, or the run halted after a failure.
    Completed,
    /// The cancellation token fired before the queue drained.
    Cancelled,
}

impl RunStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Completed => "completed",
            RunStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a finished run leaves behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub run_id: Uuid,
    pub status: RunStatus,
    /// Final state of every node, in declaration order.
    pub nodes: Vec<NodeRunState>,
    pub memory: MemoryMap,
    pub log: RunLog,
    /// Node ids in the order they ran.
    pub visit_order: Vec<String>,
    pub duration: Duration,
}

impl RunResult {
    pub(crate) async fn from_context(context: RunContext, status: RunStatus, duration: Duration) -> Self {
        let memory = context.memory.snapshot().await;
        Self {
            run_id: context.run_id,
            status,
            nodes: context.states,
            memory,
            log: context.log,
            visit_order: context.visit_order,
            duration,
        }
    }

    pub fn node(&self, node_id: &str) -> Option<&NodeRunState> {
        self.nodes.iter().find(|state| state.node_id == node_id)
    }

    pub fn status_of(&self, node_id: &str) -> Option<NodeStatus> {
        self.node(node_id).map(|state| state.status)
    }

    pub fn output_of(&self, node_id: &str) -> Option<&Value> {
        self.node(node_id).and_then(NodeRunState::output)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == RunStatus::Cancelled
    }

    pub fn has_errors(&self) -> bool {
        self.nodes.iter().any(|state| state.status == NodeStatus::Error)
    }

    pub fn failed_nodes(&self) -> Vec<&NodeRunState> {
        self.nodes
            .iter()
            .filter(|state| state.status == NodeStatus::Error)
            .collect()
    }

    /// Number of nodes that reached a terminal state.
    pub fn executed_count(&self) -> usize {
        self.nodes.iter().filter(|state| state.status.is_terminal()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BehaviorError;
    use crate::graph::{Graph, Node};
    use serde_json::json;

    #[tokio::test]
    async fn test_from_context_and_queries() {
        let mut graph = Graph::new();
        graph.add_node(Node::new("a", "webhook")).unwrap();
        graph.add_node(Node::new("b", "code")).unwrap();
        graph.add_node(Node::new("c", "wait")).unwrap();

        let mut context = RunContext::new(&graph, MemoryMap::new());
        context.mark_processed("a");
        context.record_success("a", json!(1));
        context.mark_processed("b");
        context.record_failure("b", BehaviorError::Failed("boom".into()));
        context.memory().set("k", json!("v")).await;

        let result = RunResult::from_context(context, RunStatus::Completed, Duration::from_millis(3)).await;

        assert_eq!(result.output_of("a"), Some(&json!(1)));
        assert_eq!(result.status_of("c"), Some(NodeStatus::Idle));
        assert!(result.has_errors());
        assert_eq!(result.failed_nodes().len(), 1);
        assert_eq!(result.executed_count(), 2);
        assert_eq!(result.visit_order, vec!["a", "b"]);
        assert_eq!(result.memory.get("k"), Some(&json!("v")));
        assert!(!result.is_cancelled());
    }
}
