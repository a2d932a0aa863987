// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::consts::MEMORY_STORE_LATENCY_MS;
use crate::context::BehaviorContext;
use crate::errors::BehaviorError;
use crate::graph::NodeConfig;
use crate::traits::Behavior;
use crate::utils::parse_config;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryOperation {
    Read,
    #[default]
    Write,
    Delete,
}

#[derive(Debug, Deserialize)]
struct MemoryStoreConfig {
    #[serde(default)]
    operation: MemoryOperation,
    key: String,
    /// Value to write; the node's input is written when absent.
    value: Option<Value>,
    /// Fail a read of a missing key instead of returning `null`.
    #[serde(default)]
    required: bool,
}

/// Key-value read/write against the run's shared memory (the designer's
/// "Postgres" node).
///
/// Config: `operation` (`read`, `write` or `delete`, default `write`), `key`,
/// optional `value`, optional `required` for reads.
pub struct MemoryStoreBehavior;

impl MemoryStoreBehavior {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MemoryStoreBehavior {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Behavior for MemoryStoreBehavior {
    async fn invoke(
        &self,
        config: &NodeConfig,
        input: Value,
        ctx: &BehaviorContext,
    ) -> Result<Value, BehaviorError> {
        let config: MemoryStoreConfig = parse_config(config)?;
        if config.key.is_empty() {
            return Err(BehaviorError::InvalidConfig("key must not be empty".into()));
        }
        ctx.simulate_latency(self.nominal_latency()).await?;

        let memory = ctx.memory();
        match config.operation {
            MemoryOperation::Read => {
                let value = memory.get(&config.key).await;
                if value.is_none() && config.required {
                    return Err(BehaviorError::Failed(format!(
                        "key '{}' not found in memory",
                        config.key
                    )));
                }
                Ok(json!({
                    "key": config.key,
                    "found": value.is_some(),
                    "value": value.unwrap_or(Value::Null),
                }))
            }
            MemoryOperation::Write => {
                let value = config.value.unwrap_or(input);
                tracing::debug!(node_id = ctx.node_id(), key = %config.key, "writing to run memory");
                let previous = memory.set(config.key.clone(), value.clone()).await;
                Ok(json!({
                    "key": config.key,
                    "value": value,
                    "previous": previous.unwrap_or(Value::Null),
                }))
            }
            MemoryOperation::Delete => {
                let removed = memory.remove(&config.key).await;
                Ok(json!({
                    "key": config.key,
                    "removed": removed.is_some(),
                    "value": removed.unwrap_or(Value::Null),
                }))
            }
        }
    }

    fn name(&self) -> &'static str {
        "memory_store"
    }

    fn nominal_latency(&self) -> Duration {
        Duration::from_millis(MEMORY_STORE_LATENCY_MS)
    }
}
