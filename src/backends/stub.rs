// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;
use std::time::Duration;

use crate::context::BehaviorContext;
use crate::errors::BehaviorError;
use crate::graph::NodeConfig;
use crate::traits::Behavior;

/// Returns its input unchanged
pub struct EchoBehavior;

#[async_trait]
impl Behavior for EchoBehavior {
    async fn invoke(
        &self,
        _config: &NodeConfig,
        input: Value,
        _ctx: &BehaviorContext,
    ) -> Result<Value, BehaviorError> {
        Ok(input)
    }

    fn name(&self) -> &'static str {
        "echo"
    }
}

/// A behaviour that always fails for testing fault isolation
pub struct FailingBehavior;

#[async_trait]
impl Behavior for FailingBehavior {
    async fn invoke(
        &self,
        _config: &NodeConfig,
        _input: Value,
        _ctx: &BehaviorContext,
    ) -> Result<Value, BehaviorError> {
        Err(BehaviorError::Failed("Simulated behavior failure".to_string()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Suspends on the context for a fixed duration, then echoes its input
pub struct SleepingBehavior {
    pub duration: Duration,
}

impl SleepingBehavior {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

#[async_trait]
impl Behavior for SleepingBehavior {
    async fn invoke(
        &self,
        _config: &NodeConfig,
        input: Value,
        ctx: &BehaviorContext,
    ) -> Result<Value, BehaviorError> {
        ctx.suspend(self.duration).await?;
        Ok(input)
    }

    fn name(&self) -> &'static str {
        "sleeping"
    }

    fn nominal_latency(&self) -> Duration {
        self.duration
    }
}

/// Records `(node_id, input)` for every invocation, then echoes its input
#[derive(Default)]
pub struct RecordingBehavior {
    calls: Mutex<Vec<(String, Value)>>,
}

impl RecordingBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, node_id: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|(id, _)| id == node_id)
            .map(|(_, input)| input)
            .collect()
    }
}

#[async_trait]
impl Behavior for RecordingBehavior {
    async fn invoke(
        &self,
        _config: &NodeConfig,
        input: Value,
        ctx: &BehaviorContext,
    ) -> Result<Value, BehaviorError> {
        self.calls
            .lock()
            .unwrap()
            .push((ctx.node_id().to_string(), input.clone()));
        Ok(input)
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
