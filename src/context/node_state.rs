// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};

use crate::errors::BehaviorError;

/// Per-node, per-run status: `Idle → Queued → Running → {Success | Error}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Idle,
    Queued,
    Running,
    Success,
    Error,
}

impl NodeStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, NodeStatus::Success | NodeStatus::Error)
    }
}

impl Display for NodeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeStatus::Idle => "idle",
            NodeStatus::Queued => "queued",
            NodeStatus::Running => "running",
            NodeStatus::Success => "success",
            NodeStatus::Error => "error",
        };
        f.pad(name)
    }
}

/// Run-scoped view of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRunState {
    pub node_id: String,
    pub node_type: String,
    pub status: NodeStatus,
    pub last_input: Option<Value>,
    pub last_output: Option<Value>,
    #[serde(skip)]
    pub error: Option<BehaviorError>,
    /// Rendered error message, kept for serialised snapshots.
    pub error_message: Option<String>,
}

impl NodeRunState {
    pub fn idle(node_id: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            node_type: node_type.into(),
            status: NodeStatus::Idle,
            last_input: None,
            last_output: None,
            error: None,
            error_message: None,
        }
    }

    /// Final output, present only for nodes that reached `Success`.
    pub fn output(&self) -> Option<&Value> {
        self.last_output.as_ref()
    }
}
