// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Run Context: the mutable state scoped to one execution of a graph.
//!
//! A run owns node statuses and outputs, the shared memory store and the log
//! sink. Behaviours see a narrower [`BehaviorContext`] that exposes memory and
//! the cancellable suspension point, never the scheduler's bookkeeping.

mod behavior_context;
mod log;
mod memory;
mod node_state;
mod run_context;

pub use behavior_context::BehaviorContext;
pub use log::{LogEntry, LogLevel, RunLog};
pub use memory::{MemoryMap, MemoryStore};
pub use node_state::{NodeRunState, NodeStatus};
pub use run_context::RunContext;
