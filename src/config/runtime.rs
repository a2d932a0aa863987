// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::{validate_workflow, BehaviorRegistry, WorkflowConfig};
use crate::engine::factory::ExecutorFactory;
use crate::engine::RunOptions;
use crate::errors::ConfigError;
use crate::graph::Graph;
use crate::observability::NoopObserver;
use crate::traits::{RunObserver, WorkflowExecutor};

/// Workflow runtime builder - turns a loaded workflow into something runnable.
///
/// # Examples
///
/// ```
/// use openflow::config::{RuntimeBuilder, WorkflowConfig};
///
/// let config = WorkflowConfig::from_yaml_str(r#"
/// nodes:
///   - { id: n1, type: webhook }
/// "#).unwrap();
///
/// let (graph, executor, options) = RuntimeBuilder::from_config(&config).unwrap();
///
/// assert_eq!(graph.len(), 1);
/// assert_eq!(executor.strategy_name(), "breadth_first");
/// assert!(options.continue_on_error);
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build the graph, executor and run options using the built-in behaviours.
    pub fn from_config(cfg: &WorkflowConfig) -> Result<(Graph, Box<dyn WorkflowExecutor>, RunOptions), ConfigError> {
        Self::from_config_with(cfg, BehaviorRegistry::with_builtins(), Arc::new(NoopObserver))
    }

    /// Build with a caller-supplied registry and observer.
    ///
    /// Validation errors are returned together as `ConfigError::Invalid`.
    pub fn from_config_with(
        cfg: &WorkflowConfig,
        registry: BehaviorRegistry,
        observer: Arc<dyn RunObserver>,
    ) -> Result<(Graph, Box<dyn WorkflowExecutor>, RunOptions), ConfigError> {
        validate_workflow(cfg, &registry).map_err(ConfigError::Invalid)?;
        let graph = cfg.to_graph()?;
        let executor = ExecutorFactory::from_config(cfg, registry, observer);
        Ok((graph, executor, cfg.run_options()))
    }
}
