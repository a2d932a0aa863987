// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Queue-driven workflow scheduler.
//!
//! The scheduler walks the graph from its start nodes, one work item at a
//! time. Each popped item runs its node's behaviour against the run context;
//! a successful output is pushed to every live outgoing edge's target, in edge
//! declaration order. A processed set makes every node run at most once per
//! run, which is what lets cyclic graphs terminate.
//!
//! ```text
//!   seed(start nodes, trigger)
//!          │
//!          ▼
//!   ┌─ pop ◄──────────────────────────────┐
//!   │   processed? ── yes ──► skip ───────┤
//!   │   Running → invoke behaviour        │
//!   │   ├─ Ok(out)  → Success, push(targets, out)
//!   │   └─ Err(e)   → Error, no edges followed
//!   └─ queue empty / cancelled ──► RunResult
//! ```
//!
//! # Examples
//!
//! ```rust
//! use openflow::config::BehaviorRegistry;
//! use openflow::engine::{RunOptions, RunStatus, WorkflowScheduler};
//! use openflow::graph::{Edge, Graph, Node};
//! use openflow::traits::WorkflowExecutor;
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut graph = Graph::new();
//! graph.add_node(Node::new("n1", "webhook"))?;
//! graph.add_node(Node::new("n2", "wait").with_option("ms", json!(0)))?;
//! graph.add_node(Node::new("n3", "passthrough"))?;
//! graph.add_edge(Edge::new("e1", "n1", "n2"))?;
//! graph.add_edge(Edge::new("e2", "n2", "n3"))?;
//!
//! let scheduler = WorkflowScheduler::new(BehaviorRegistry::with_builtins());
//! let result = scheduler.execute(&graph, json!({"x": 1}), RunOptions::default()).await?;
//!
//! assert_eq!(result.status, RunStatus::Completed);
//! assert_eq!(result.output_of("n3"), Some(&json!({"x": 1})));
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Instrument;

use super::{RunOptions, RunQueue, RunResult, RunStatus, SourceFallback, TraversalOrder, WorkItem};
use crate::config::BehaviorRegistry;
use crate::context::{BehaviorContext, LogLevel, NodeStatus, RunContext};
use crate::errors::{BehaviorError, ExecutionError};
use crate::graph::{Graph, Node};
use crate::observability::messages::engine::{
    NoStartNodes, RunCancelled, RunCompleted, RunHalted, RunStarted, SourceFallbackApplied,
};
use crate::observability::messages::node::{
    EdgeDispatched, NodeExecutionCompleted, NodeExecutionFailed, NodeExecutionStarted,
    NodeRevisitSkipped,
};
use crate::observability::messages::StructuredLog;
use crate::observability::NoopObserver;
use crate::traits::{Behavior, RunObserver, WorkflowExecutor};

/// Why the main loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopExit {
    Drained,
    Halted,
    Cancelled,
}

/// Start set of a run plus the node picked by the fallback, if any.
struct StartSet {
    nodes: Vec<String>,
    fallback: Option<String>,
}

/// Single-threaded, queue-driven executor over a borrowed [`Graph`].
///
/// Node types are dispatched through the [`BehaviorRegistry`]; the scheduler
/// never branches on a type tag. State transitions are reported to the
/// configured [`RunObserver`].
#[derive(Clone)]
pub struct WorkflowScheduler {
    registry: BehaviorRegistry,
    observer: Arc<dyn RunObserver>,
    traversal: TraversalOrder,
}

impl WorkflowScheduler {
    /// Breadth-first scheduler with no observer.
    pub fn new(registry: BehaviorRegistry) -> Self {
        Self {
            registry,
            observer: Arc::new(NoopObserver),
            traversal: TraversalOrder::default(),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn RunObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_traversal(mut self, traversal: TraversalOrder) -> Self {
        self.traversal = traversal;
        self
    }

    pub fn registry(&self) -> &BehaviorRegistry {
        &self.registry
    }

    pub fn traversal(&self) -> TraversalOrder {
        self.traversal
    }

    fn resolve_start_nodes(graph: &Graph, options: &RunOptions) -> Result<StartSet, ExecutionError> {
        if let Some(explicit) = &options.start_nodes {
            if let Some(missing) = explicit.iter().find(|id| !graph.contains_node(id)) {
                return Err(ExecutionError::UnknownStartNode(missing.clone()));
            }
            return Ok(StartSet {
                nodes: explicit.clone(),
                fallback: None,
            });
        }

        let nodes = match options.source_fallback {
            SourceFallback::FirstDeclared => graph.sources(),
            SourceFallback::Disabled => graph.strict_sources(),
        };
        // Strict sources never have incoming edges, so one that does came from the fallback.
        let fallback = nodes
            .first()
            .filter(|id| graph.has_incoming_edges(id))
            .cloned();
        Ok(StartSet { nodes, fallback })
    }

    fn emit_log(&self, context: &mut RunContext, node_id: Option<&str>, level: LogLevel, message: impl Into<String>) {
        let entry = context.append_log(node_id, level, message);
        self.observer.on_log(&entry);
    }

    fn transition(&self, context: &mut RunContext, node_id: &str, status: NodeStatus) {
        if context.set_status(node_id, status) {
            self.observer.on_node_status_changed(node_id, status, None);
        }
    }

    /// Push a batch of work items. Targets that are still `Idle` become `Queued`.
    fn enqueue(&self, context: &mut RunContext, queue: &mut RunQueue, batch: Vec<WorkItem>) {
        for item in &batch {
            if !context.is_processed(&item.node_id) && context.status(&item.node_id) == Some(NodeStatus::Idle) {
                self.transition(context, &item.node_id, NodeStatus::Queued);
            }
        }
        queue.push_batch(batch);
    }

    async fn invoke(
        behavior: &dyn Behavior,
        node: &Node,
        input: Value,
        ctx: &BehaviorContext,
        timeout: Option<Duration>,
    ) -> Result<Value, BehaviorError> {
        match timeout {
            Some(limit) => match tokio::time::timeout(limit, behavior.invoke(&node.config, input, ctx)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(BehaviorError::Timeout { after: limit }),
            },
            None => behavior.invoke(&node.config, input, ctx).await,
        }
    }

    /// Run one popped work item. Returns the error when the node failed.
    async fn run_node(
        &self,
        graph: &Graph,
        behaviors: &HashMap<String, Arc<dyn Behavior>>,
        context: &mut RunContext,
        queue: &mut RunQueue,
        item: WorkItem,
        options: &RunOptions,
    ) -> Option<BehaviorError> {
        let node_id = item.node_id.as_str();
        let (Some(node), Some(behavior)) = (graph.node(node_id), behaviors.get(node_id)) else {
            return None;
        };

        context.mark_processed(node_id);
        context.record_input(node_id, item.input.clone());
        self.transition(context, node_id, NodeStatus::Running);

        let started_msg = NodeExecutionStarted {
            node_id,
            node_type: &node.node_type,
            label: node.display_name(),
        };
        started_msg.log();
        self.emit_log(context, Some(node_id), LogLevel::Info, started_msg.to_string());

        let ctx = context.behavior_context(node_id, &options.cancellation, options.simulate_latency);
        let timeout = node.timeout().or(options.timeout_per_node);
        let started = Instant::now();
        let outcome = Self::invoke(behavior.as_ref(), node, item.input, &ctx, timeout)
            .instrument(started_msg.span("invoke"))
            .await;

        match outcome {
            Ok(output) => {
                NodeExecutionCompleted {
                    node_id,
                    duration: started.elapsed(),
                }
                .log();
                context.record_success(node_id, output.clone());
                self.observer
                    .on_node_status_changed(node_id, NodeStatus::Success, Some(&output));
                self.emit_log(context, Some(node_id), LogLevel::Info, "succeeded");

                let edges: Vec<_> = graph.outgoing_edges(node_id).collect();
                let total = edges.len();
                let mut batch = Vec::with_capacity(total);
                for (i, edge) in edges.into_iter().enumerate() {
                    let dispatched = EdgeDispatched {
                        source: node_id,
                        target: &edge.target,
                        edge_id: &edge.id,
                        index: i + 1,
                        total,
                    };
                    dispatched.log();
                    self.emit_log(context, Some(node_id), LogLevel::Info, dispatched.to_string());
                    batch.push(WorkItem::new(edge.target.clone(), output.clone()));
                }
                self.enqueue(context, queue, batch);
                None
            }
            Err(error) => {
                NodeExecutionFailed {
                    node_id,
                    error: &error,
                }
                .log();
                context.record_failure(node_id, error.clone());
                self.observer
                    .on_node_status_changed(node_id, NodeStatus::Error, None);
                self.emit_log(context, Some(node_id), LogLevel::Error, format!("failed: {}", error));
                Some(error)
            }
        }
    }
}

#[async_trait]
impl WorkflowExecutor for WorkflowScheduler {
    async fn execute(&self, graph: &Graph, trigger: Value, options: RunOptions) -> Result<RunResult, ExecutionError> {
        let started = Instant::now();

        // Preconditions, checked before any node leaves Idle.
        let behaviors = self.registry.resolve_graph(graph)?;
        let start_set = Self::resolve_start_nodes(graph, &options)?;

        // Reset: fresh context, every node Idle.
        let mut context = RunContext::new(graph, options.initial_memory.clone());
        for node in graph.nodes() {
            self.observer
                .on_node_status_changed(&node.id, NodeStatus::Idle, None);
        }

        let run_id = context.run_id().to_string();
        let run_msg = RunStarted {
            run_id: &run_id,
            strategy: self.strategy_name(),
            node_count: graph.len(),
            start_nodes: &start_set.nodes,
        };
        run_msg.log();
        let run_span = run_msg.span("execute");
        self.emit_log(&mut context, None, LogLevel::Info, run_msg.to_string());

        if let Some(node_id) = &start_set.fallback {
            let msg = SourceFallbackApplied { node_id };
            msg.log();
            self.emit_log(&mut context, None, LogLevel::Warn, msg.to_string());
        }
        if start_set.nodes.is_empty() {
            let msg = NoStartNodes {
                node_count: graph.len(),
            };
            msg.log();
            self.emit_log(&mut context, None, LogLevel::Warn, msg.to_string());
        }

        let mut queue = RunQueue::new(self.traversal);
        let seeds = start_set
            .nodes
            .iter()
            .map(|id| WorkItem::new(id.clone(), trigger.clone()))
            .collect();
        self.enqueue(&mut context, &mut queue, seeds);

        let exit = async {
            loop {
                if queue.is_empty() {
                    return LoopExit::Drained;
                }
                if options.cancellation.is_cancelled() {
                    return LoopExit::Cancelled;
                }
                let Some(item) = queue.pop() else {
                    return LoopExit::Drained;
                };
                if context.is_processed(&item.node_id) {
                    NodeRevisitSkipped {
                        node_id: &item.node_id,
                    }
                    .log();
                    continue;
                }

                let failed_node = item.node_id.clone();
                let failure = self
                    .run_node(graph, &behaviors, &mut context, &mut queue, item, &options)
                    .await;

                match failure {
                    Some(BehaviorError::Cancelled) if options.cancellation.is_cancelled() => {
                        return LoopExit::Cancelled;
                    }
                    Some(_) if !options.continue_on_error => {
                        let msg = RunHalted {
                            failed_node: &failed_node,
                            abandoned: queue.len(),
                        };
                        msg.log();
                        self.emit_log(&mut context, None, LogLevel::Warn, msg.to_string());
                        return LoopExit::Halted;
                    }
                    _ => {}
                }
            }
        }
        .instrument(run_span)
        .await;

        let abandoned = queue.drain().len();
        for node_id in context.queued_nodes() {
            self.transition(&mut context, &node_id, NodeStatus::Idle);
        }

        let status = match exit {
            LoopExit::Cancelled => {
                let msg = RunCancelled { abandoned };
                msg.log();
                self.emit_log(&mut context, None, LogLevel::Warn, msg.to_string());
                RunStatus::Cancelled
            }
            LoopExit::Drained | LoopExit::Halted => {
                self.emit_log(&mut context, None, LogLevel::Info, "run completed");
                RunStatus::Completed
            }
        };

        let result = RunResult::from_context(context, status, started.elapsed()).await;
        RunCompleted {
            run_id: &run_id,
            status: status.as_str(),
            executed: result.executed_count(),
            failed: result.failed_nodes().len(),
            duration: result.duration,
        }
        .log();
        self.observer.on_run_finished(&result);
        Ok(result)
    }

    fn strategy_name(&self) -> &'static str {
        self.traversal.as_str()
    }
}

impl std::fmt::Debug for WorkflowScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowScheduler")
            .field("registry", &self.registry)
            .field("traversal", &self.traversal)
            .finish()
    }
}
