// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::context::BehaviorContext;
use crate::errors::BehaviorError;
use crate::graph::NodeConfig;

/// Executable unit resolved from a node's type tag.
///
/// A behaviour is a function of `(config, input, context)`. Any suspension
/// (simulated latency, waiting) must go through [`BehaviorContext::suspend`]
/// so the run can cancel it.
#[async_trait]
pub trait Behavior: Send + Sync {
    async fn invoke(
        &self,
        config: &NodeConfig,
        input: Value,
        ctx: &BehaviorContext,
    ) -> Result<Value, BehaviorError>;

    fn name(&self) -> &'static str;

    /// Expected duration of one invocation.
    fn nominal_latency(&self) -> Duration {
        Duration::ZERO
    }
}
