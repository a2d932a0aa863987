// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;

use crate::engine::{RunOptions, RunResult};
use crate::errors::ExecutionError;
use crate::graph::Graph;

#[async_trait]
pub trait WorkflowExecutor: Send + Sync {
    /// Run `graph` once, feeding `trigger` to every start node.
    ///
    /// Returns `Err` only for problems detected before any node runs (unknown
    /// node types, unknown start nodes). Node failures are reported through
    /// the returned [`RunResult`].
    async fn execute(
        &self,
        graph: &Graph,
        trigger: Value,
        options: RunOptions,
    ) -> Result<RunResult, ExecutionError>;

    /// Name of the traversal strategy, for logs.
    fn strategy_name(&self) -> &'static str;
}
