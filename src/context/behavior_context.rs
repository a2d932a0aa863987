// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::MemoryStore;
use crate::errors::BehaviorError;

/// What a behaviour may touch while it runs: the shared memory of its run and
/// the run's cancellation signal.
///
/// Behaviours never reach ambient global state; concurrent runs therefore
/// cannot interfere with each other.
#[derive(Debug, Clone)]
pub struct BehaviorContext {
    node_id: String,
    memory: MemoryStore,
    cancellation: CancellationToken,
    simulate_latency: bool,
}

impl BehaviorContext {
    pub fn new(
        node_id: impl Into<String>,
        memory: MemoryStore,
        cancellation: CancellationToken,
        simulate_latency: bool,
    ) -> Self {
        Self {
            node_id: node_id.into(),
            memory,
            cancellation,
            simulate_latency,
        }
    }

    /// Context detached from any run, for exercising a behaviour on its own.
    pub fn standalone(node_id: impl Into<String>) -> Self {
        Self::new(node_id, MemoryStore::new(), CancellationToken::new(), false)
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Suspend for `duration`, waking early with `Cancelled` if the run is
    /// cancelled meanwhile.
    pub async fn suspend(&self, duration: Duration) -> Result<(), BehaviorError> {
        if duration.is_zero() {
            return Ok(());
        }
        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => Err(BehaviorError::Cancelled),
            _ = tokio::time::sleep(duration) => Ok(()),
        }
    }

    /// Suspend for a behaviour's nominal latency when the run simulates it.
    pub async fn simulate_latency(&self, nominal: Duration) -> Result<(), BehaviorError> {
        if self.simulate_latency {
            self.suspend(nominal).await
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_suspend_completes() {
        let ctx = BehaviorContext::standalone("n1");
        assert_eq!(ctx.suspend(Duration::from_millis(5)).await, Ok(()));
        assert_eq!(ctx.suspend(Duration::ZERO).await, Ok(()));
    }

    #[tokio::test]
    async fn test_suspend_observes_cancellation() {
        let token = CancellationToken::new();
        let ctx = BehaviorContext::new("n1", MemoryStore::new(), token.clone(), false);

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        });

        let result = ctx.suspend(Duration::from_secs(30)).await;
        assert_eq!(result, Err(BehaviorError::Cancelled));
        assert!(ctx.is_cancelled());
        canceller.await.unwrap();
    }

    #[tokio::test]
    async fn test_latency_simulation_is_opt_in() {
        let ctx = BehaviorContext::standalone("n1");
        let start = std::time::Instant::now();
        ctx.simulate_latency(Duration::from_secs(10)).await.unwrap();
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
