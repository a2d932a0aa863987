// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod behavior;
mod config;
mod execution;
mod graph;

pub use behavior::BehaviorError;
pub use config::{ConfigError, ValidationError};
pub use execution::ExecutionError;
pub use graph::GraphError;
