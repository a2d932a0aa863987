// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::{BehaviorRegistry, WorkflowConfig};
use crate::engine::WorkflowScheduler;
use crate::traits::{RunObserver, WorkflowExecutor};

/// Factory for creating workflow executors from configuration
pub struct ExecutorFactory;

impl ExecutorFactory {
    /// Create an executor using the configured traversal order
    pub fn from_config(
        cfg: &WorkflowConfig,
        registry: BehaviorRegistry,
        observer: Arc<dyn RunObserver>,
    ) -> Box<dyn WorkflowExecutor> {
        Box::new(
            WorkflowScheduler::new(registry)
                .with_traversal(cfg.executor_options.traversal)
                .with_observer(observer),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TraversalOrder;
    use crate::observability::NoopObserver;

    #[test]
    fn test_factory_honours_traversal() {
        let mut cfg = WorkflowConfig::default();
        let executor = ExecutorFactory::from_config(&cfg, BehaviorRegistry::new(), Arc::new(NoopObserver));
        assert_eq!(executor.strategy_name(), "breadth_first");

        cfg.executor_options.traversal = TraversalOrder::DepthFirst;
        let executor = ExecutorFactory::from_config(&cfg, BehaviorRegistry::new(), Arc::new(NoopObserver));
        assert_eq!(executor.strategy_name(), "depth_first");
    }
}
