// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Ready-made [`RunObserver`] implementations.

use serde::Serialize;
use serde_json::Value;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::mpsc;

use crate::context::{LogEntry, LogLevel, NodeStatus};
use crate::engine::{RunResult, RunStatus};
use crate::traits::RunObserver;

/// Ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {
    fn on_node_status_changed(&self, _node_id: &str, _status: NodeStatus, _output: Option<&Value>) {}

    fn on_log(&self, _entry: &LogEntry) {}

    fn on_run_finished(&self, _result: &RunResult) {}
}

/// Forwards notifications to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    fn on_node_status_changed(&self, node_id: &str, status: NodeStatus, _output: Option<&Value>) {
        tracing::trace!(node_id, status = %status, "node status changed");
    }

    fn on_log(&self, entry: &LogEntry) {
        let node_id = entry.node_id.as_deref().unwrap_or("-");
        match entry.level {
            LogLevel::Info => tracing::info!(node_id, "{}", entry.message),
            LogLevel::Warn => tracing::warn!(node_id, "{}", entry.message),
            LogLevel::Error => tracing::error!(node_id, "{}", entry.message),
        }
    }

    fn on_run_finished(&self, result: &RunResult) {
        tracing::debug!(
            run_id = %result.run_id,
            status = ?result.status,
            has_errors = result.has_errors(),
            "run finished"
        );
    }
}

/// A notification, as delivered to channel subscribers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    NodeStatusChanged {
        node_id: String,
        status: NodeStatus,
        output: Option<Value>,
    },
    Log(LogEntry),
    RunFinished {
        run_id: String,
        status: RunStatus,
        has_errors: bool,
    },
}

/// Streams notifications over an unbounded `tokio` channel, for UIs that
/// animate node status as the run progresses.
///
/// Sends never block the scheduler; events are dropped once the receiver is gone.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: mpsc::UnboundedSender<RunEvent>,
}

impl ChannelObserver {
    pub fn new(sender: mpsc::UnboundedSender<RunEvent>) -> Self {
        Self { sender }
    }

    /// Observer plus the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<RunEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }

    fn send(&self, event: RunEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!("run event receiver dropped");
        }
    }
}

impl RunObserver for ChannelObserver {
    fn on_node_status_changed(&self, node_id: &str, status: NodeStatus, output: Option<&Value>) {
        self.send(RunEvent::NodeStatusChanged {
            node_id: node_id.to_string(),
            status,
            output: output.cloned(),
        });
    }

    fn on_log(&self, entry: &LogEntry) {
        self.send(RunEvent::Log(entry.clone()));
    }

    fn on_run_finished(&self, result: &RunResult) {
        self.send(RunEvent::RunFinished {
            run_id: result.run_id.to_string(),
            status: result.status,
            has_errors: result.has_errors(),
        });
    }
}

/// Keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<RunEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RunEvent> {
        self.lock().clone()
    }

    /// Status transitions of one node, in order.
    pub fn statuses_of(&self, node_id: &str) -> Vec<NodeStatus> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                RunEvent::NodeStatusChanged { node_id: id, status, .. } if id == node_id => Some(*status),
                _ => None,
            })
            .collect()
    }

    pub fn log_messages(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                RunEvent::Log(entry) => Some(entry.message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn finished_count(&self) -> usize {
        self.lock()
            .iter()
            .filter(|event| matches!(event, RunEvent::RunFinished { .. }))
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RunEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, event: RunEvent) {
        self.lock().push(event);
    }
}

impl RunObserver for RecordingObserver {
    fn on_node_status_changed(&self, node_id: &str, status: NodeStatus, output: Option<&Value>) {
        self.record(RunEvent::NodeStatusChanged {
            node_id: node_id.to_string(),
            status,
            output: output.cloned(),
        });
    }

    fn on_log(&self, entry: &LogEntry) {
        self.record(RunEvent::Log(entry.clone()));
    }

    fn on_run_finished(&self, result: &RunResult) {
        self.record(RunEvent::RunFinished {
            run_id: result.run_id.to_string(),
            status: result.status,
            has_errors: result.has_errors(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            node_id: Some("n1".to_string()),
            level: LogLevel::Info,
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn test_channel_observer_forwards_events() {
        let (observer, mut receiver) = ChannelObserver::channel();
        observer.on_node_status_changed("n1", NodeStatus::Success, Some(&json!(1)));
        observer.on_log(&entry("succeeded"));

        assert_eq!(
            receiver.recv().await,
            Some(RunEvent::NodeStatusChanged {
                node_id: "n1".to_string(),
                status: NodeStatus::Success,
                output: Some(json!(1)),
            })
        );
        assert!(matches!(receiver.recv().await, Some(RunEvent::Log(e)) if e.message == "succeeded"));
    }

    #[test]
    fn test_channel_observer_survives_dropped_receiver() {
        let (observer, receiver) = ChannelObserver::channel();
        drop(receiver);
        observer.on_log(&entry("nobody listening"));
    }

    #[test]
    fn test_recording_observer_filters_by_node() {
        let observer = RecordingObserver::new();
        observer.on_node_status_changed("n1", NodeStatus::Queued, None);
        observer.on_node_status_changed("n2", NodeStatus::Queued, None);
        observer.on_node_status_changed("n1", NodeStatus::Running, None);
        observer.on_log(&entry("hello"));

        assert_eq!(observer.statuses_of("n1"), vec![NodeStatus::Queued, NodeStatus::Running]);
        assert_eq!(observer.log_messages(), vec!["hello"]);
        assert_eq!(observer.events().len(), 4);
        assert_eq!(observer.finished_count(), 0);
    }

    #[test]
    fn test_run_event_serializes_with_tag() {
        let event = RunEvent::NodeStatusChanged {
            node_id: "n1".to_string(),
            status: NodeStatus::Running,
            output: None,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], json!("node_status_changed"));
        assert_eq!(json["status"], json!("running"));
    }
}
