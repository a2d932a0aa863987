// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod factory;
pub mod options;
pub mod result;
pub mod run_queue;
pub mod scheduler;
pub mod snapshot;

pub use factory::ExecutorFactory;
pub use options::{RunOptions, SourceFallback, TraversalOrder};
pub use result::{RunResult, RunStatus};
pub use run_queue::{RunQueue, WorkItem};
pub use scheduler::WorkflowScheduler;
pub use snapshot::{load_memory, NodeSnapshot, RunSnapshot};
