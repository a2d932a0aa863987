// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;

use crate::context::BehaviorContext;
use crate::errors::BehaviorError;
use crate::graph::NodeConfig;
use crate::traits::Behavior;

/// Pass-through behaviour: output equals input.
///
/// Backs trigger-style nodes (`webhook`) and nodes whose real work is out of
/// the engine's scope (`code`).
pub struct PassthroughBehavior;

impl PassthroughBehavior {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PassthroughBehavior {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Behavior for PassthroughBehavior {
    async fn invoke(
        &self,
        _config: &NodeConfig,
        input: Value,
        _ctx: &BehaviorContext,
    ) -> Result<Value, BehaviorError> {
        Ok(input)
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_returns_input_unchanged() {
        let behavior = PassthroughBehavior::new();
        let ctx = BehaviorContext::standalone("n1");
        let input = json!({"x": 1, "nested": [1, 2]});

        let output = behavior.invoke(&NodeConfig::new(), input.clone(), &ctx).await;
        assert_eq!(output, Ok(input));
        assert!(behavior.nominal_latency().is_zero());
    }
}
