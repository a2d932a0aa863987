// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

use crate::context::{LogEntry, NodeStatus};
use crate::engine::RunResult;

/// Subscriber notified of every state transition of a run.
///
/// This is the only channel through which run state reaches the caller while
/// a run is in flight. Callbacks are invoked inline by the scheduler and
/// should return quickly.
pub trait RunObserver: Send + Sync {
    fn on_node_status_changed(&self, node_id: &str, status: NodeStatus, output: Option<&Value>);

    fn on_log(&self, entry: &LogEntry);

    fn on_run_finished(&self, result: &RunResult);
}
