// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::consts::DEFAULT_WAIT_MS;
use crate::context::BehaviorContext;
use crate::errors::BehaviorError;
use crate::graph::NodeConfig;
use crate::traits::Behavior;
use crate::utils::parse_config;

#[derive(Debug, Default, Deserialize)]
struct WaitConfig {
    ms: Option<u64>,
}

/// Fixed-delay wait (the designer's "Timer" node). Output equals input.
///
/// The delay is a cancellable suspension on the behaviour context.
pub struct WaitBehavior {
    default_delay: Duration,
}

impl WaitBehavior {
    pub fn new() -> Self {
        Self::with_default_delay(Duration::from_millis(DEFAULT_WAIT_MS))
    }

    pub fn with_default_delay(default_delay: Duration) -> Self {
        Self { default_delay }
    }
}

impl Default for WaitBehavior {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Behavior for WaitBehavior {
    async fn invoke(
        &self,
        config: &NodeConfig,
        input: Value,
        ctx: &BehaviorContext,
    ) -> Result<Value, BehaviorError> {
        let config: WaitConfig = parse_config(config)?;
        let delay = config
            .ms
            .map(Duration::from_millis)
            .unwrap_or(self.default_delay);

        ctx.suspend(delay).await?;
        Ok(input)
    }

    fn name(&self) -> &'static str {
        "wait"
    }

    fn nominal_latency(&self) -> Duration {
        self.default_delay
    }
}
