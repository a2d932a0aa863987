// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::{BehaviorContext, LogEntry, LogLevel, MemoryMap, MemoryStore, NodeRunState, NodeStatus, RunLog};
use crate::errors::BehaviorError;
use crate::graph::Graph;

/// Mutable state for a single run, exclusively mutated by the scheduler.
///
/// Creating a context is the reset step of a run: every node of the graph
/// starts `Idle` with no input, output or log.
#[derive(Debug)]
pub struct RunContext {
    pub(crate) run_id: Uuid,
    pub(crate) states: Vec<NodeRunState>,
    index: HashMap<String, usize>,
    processed: HashSet<String>,
    pub(crate) visit_order: Vec<String>,
    pub(crate) memory: MemoryStore,
    pub(crate) log: RunLog,
}

impl RunContext {
    pub fn new(graph: &Graph, initial_memory: MemoryMap) -> Self {
        let states: Vec<NodeRunState> = graph
            .nodes()
            .iter()
            .map(|node| NodeRunState::idle(&node.id, &node.node_type))
            .collect();
        let index = states
            .iter()
            .enumerate()
            .map(|(i, state)| (state.node_id.clone(), i))
            .collect();

        Self {
            run_id: Uuid::new_v4(),
            states,
            index,
            processed: HashSet::new(),
            visit_order: Vec::new(),
            memory: MemoryStore::seeded(initial_memory),
            log: RunLog::new(),
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn states(&self) -> &[NodeRunState] {
        &self.states
    }

    pub fn state(&self, node_id: &str) -> Option<&NodeRunState> {
        self.index.get(node_id).map(|&i| &self.states[i])
    }

    pub fn status(&self, node_id: &str) -> Option<NodeStatus> {
        self.state(node_id).map(|state| state.status)
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    pub fn log(&self) -> &RunLog {
        &self.log
    }

    /// Add `node_id` to the processed set. Returns `false` if it was already
    /// there, which is the re-entry guard for fan-in and cycles.
    pub fn mark_processed(&mut self, node_id: &str) -> bool {
        if !self.processed.insert(node_id.to_string()) {
            return false;
        }
        self.visit_order.push(node_id.to_string());
        true
    }

    pub fn is_processed(&self, node_id: &str) -> bool {
        self.processed.contains(node_id)
    }

    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    /// Set a node's status. Returns `true` when the status actually changed.
    pub fn set_status(&mut self, node_id: &str, status: NodeStatus) -> bool {
        match self.state_mut(node_id) {
            Some(state) if state.status != status => {
                state.status = status;
                true
            }
            _ => false,
        }
    }

    pub fn record_input(&mut self, node_id: &str, input: Value) {
        if let Some(state) = self.state_mut(node_id) {
            state.last_input = Some(input);
        }
    }

    pub fn record_success(&mut self, node_id: &str, output: Value) {
        if let Some(state) = self.state_mut(node_id) {
            state.status = NodeStatus::Success;
            state.last_output = Some(output);
            state.error = None;
            state.error_message = None;
        }
    }

    pub fn record_failure(&mut self, node_id: &str, error: BehaviorError) {
        if let Some(state) = self.state_mut(node_id) {
            state.status = NodeStatus::Error;
            state.last_output = None;
            state.error_message = Some(error.to_string());
            state.error = Some(error);
        }
    }

    /// Node ids currently `Queued`, in declaration order.
    pub fn queued_nodes(&self) -> Vec<String> {
        self.states
            .iter()
            .filter(|state| state.status == NodeStatus::Queued)
            .map(|state| state.node_id.clone())
            .collect()
    }

    pub fn append_log(
        &mut self,
        node_id: Option<&str>,
        level: LogLevel,
        message: impl Into<String>,
    ) -> LogEntry {
        self.log.push(node_id, level, message).clone()
    }

    /// Narrow context handed to the behaviour of `node_id`.
    pub fn behavior_context(
        &self,
        node_id: &str,
        cancellation: &CancellationToken,
        simulate_latency: bool,
    ) -> BehaviorContext {
        BehaviorContext::new(
            node_id,
            self.memory.clone(),
            cancellation.clone(),
            simulate_latency,
        )
    }

    fn state_mut(&mut self, node_id: &str) -> Option<&mut NodeRunState> {
        match self.index.get(node_id) {
            Some(&i) => Some(&mut self.states[i]),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};
    use serde_json::json;

    fn two_node_graph() -> Graph {
        let mut graph = Graph::new();
        graph.add_node(Node::new("a", "webhook")).unwrap();
        graph.add_node(Node::new("b", "passthrough")).unwrap();
        graph.add_edge(Edge::new("e1", "a", "b")).unwrap();
        graph
    }

    #[test]
    fn test_new_context_is_idle() {
        let ctx = RunContext::new(&two_node_graph(), MemoryMap::new());
        assert_eq!(ctx.states().len(), 2);
        assert!(ctx
            .states()
            .iter()
            .all(|s| s.status == NodeStatus::Idle && s.last_output.is_none()));
        assert!(ctx.log().is_empty());
        assert_eq!(ctx.processed_count(), 0);
    }

    #[test]
    fn test_mark_processed_guards_reentry() {
        let mut ctx = RunContext::new(&two_node_graph(), MemoryMap::new());
        assert!(ctx.mark_processed("a"));
        assert!(!ctx.mark_processed("a"));
        assert!(ctx.is_processed("a"));
        assert_eq!(ctx.visit_order, vec!["a".to_string()]);
    }

    #[test]
    fn test_status_transitions_and_outcomes() {
        let mut ctx = RunContext::new(&two_node_graph(), MemoryMap::new());

        assert!(ctx.set_status("a", NodeStatus::Queued));
        assert!(!ctx.set_status("a", NodeStatus::Queued));
        assert!(!ctx.set_status("ghost", NodeStatus::Running));
        assert_eq!(ctx.queued_nodes(), vec!["a".to_string()]);

        ctx.record_input("a", json!({"x": 1}));
        ctx.record_success("a", json!({"x": 2}));
        let a = ctx.state("a").unwrap();
        assert_eq!(a.status, NodeStatus::Success);
        assert_eq!(a.last_input, Some(json!({"x": 1})));
        assert_eq!(a.output(), Some(&json!({"x": 2})));

        ctx.record_failure("b", BehaviorError::Failed("boom".into()));
        let b = ctx.state("b").unwrap();
        assert_eq!(b.status, NodeStatus::Error);
        assert_eq!(b.error_message.as_deref(), Some("boom"));
    }

    #[tokio::test]
    async fn test_behavior_context_shares_memory() {
        let mut seed = MemoryMap::new();
        seed.insert("k".into(), json!("v"));
        let ctx = RunContext::new(&two_node_graph(), seed);

        let behavior_ctx = ctx.behavior_context("a", &CancellationToken::new(), false);
        behavior_ctx.memory().set("written", json!(true)).await;

        assert_eq!(ctx.memory().get("written").await, Some(json!(true)));
        assert_eq!(behavior_ctx.memory().get("k").await, Some(json!("v")));
        assert_eq!(behavior_ctx.node_id(), "a");
    }
}
