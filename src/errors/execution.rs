// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Run-level errors returned synchronously from `WorkflowExecutor::execute`.
//!
//! Node-level failures never surface here: they are captured into the node's
//! state and the run log as a [`BehaviorError`](super::BehaviorError), and the
//! run continues over independent branches.

use thiserror::Error;

/// Errors that prevent a run from starting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// A node references a type tag that is not registered.
    ///
    /// Every node type is resolved before the first node is dispatched, so this
    /// error is always reported before any node reaches `Running`.
    #[error("node '{node_id}' has unknown type '{node_type}'")]
    UnknownNodeType { node_id: String, node_type: String },

    /// A bare type tag lookup found nothing registered.
    #[error("unknown node type '{0}'")]
    UnregisteredType(String),

    /// An explicit start node does not exist in the graph.
    #[error("start node '{0}' does not exist in the graph")]
    UnknownStartNode(String),
}
