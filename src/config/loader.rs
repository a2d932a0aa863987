// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::config::consts::{TOML_EXTENSIONS, YAML_EXTENSIONS};
use crate::config::{validate_workflow, BehaviorRegistry};
use crate::context::MemoryMap;
use crate::engine::{RunOptions, SourceFallback, TraversalOrder};
use crate::errors::{ConfigError, GraphError};
use crate::graph::{Edge, Graph, Node, WorkflowDefinition};

/// A workflow file: executor options, initial memory and the graph itself.
///
/// # Fields
/// * `executor_options` - Traversal and run options (optional)
/// * `memory` - Initial shared memory for each run (optional)
/// * `nodes` - Node definitions, in declaration order
/// * `edges` - Edge definitions, in declaration order
///
/// # Example
/// ```yaml
/// executor_options:
///   traversal: breadth_first
///   timeout_ms: 5000
/// memory:
///   greeting: hello
/// nodes:
///   - { id: n1, type: webhook, label: Start Trigger }
///   - { id: n2, type: wait, config: { ms: 0 } }
/// edges:
///   - { id: e1, source: n1, target: n2 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    #[serde(default)]
    pub executor_options: ExecutorOptions,
    #[serde(default)]
    pub memory: MemoryMap,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl WorkflowConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml)?)
    }

    pub fn definition(&self) -> WorkflowDefinition {
        WorkflowDefinition {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    pub fn to_graph(&self) -> Result<Graph, GraphError> {
        Graph::from_definition(self.definition())
    }

    /// Run options described by the file, seeded with its initial memory.
    pub fn run_options(&self) -> RunOptions {
        let options = &self.executor_options;
        RunOptions {
            continue_on_error: options.continue_on_error,
            initial_memory: self.memory.clone(),
            timeout_per_node: options.timeout_ms.map(Duration::from_millis),
            start_nodes: options.start_nodes.clone(),
            source_fallback: options.source_fallback,
            simulate_latency: options.simulate_latency,
            ..RunOptions::default()
        }
    }
}

/// Executor-specific configuration options.
///
/// # Fields
/// * `traversal` - `breadth_first` (default) or `depth_first`
/// * `continue_on_error` - Keep running unrelated branches after a failure (default true)
/// * `timeout_ms` - Per-node timeout unless a node sets its own (optional)
/// * `simulate_latency` - Suspend for each behaviour's nominal latency (default false)
/// * `source_fallback` - `first_declared` (default) or `disabled`
/// * `start_nodes` - Explicit start nodes, overriding source detection (optional)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutorOptions {
    #[serde(default)]
    pub traversal: TraversalOrder,
    #[serde(default = "default_continue_on_error")]
    pub continue_on_error: bool,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub simulate_latency: bool,
    #[serde(default)]
    pub source_fallback: SourceFallback,
    #[serde(default)]
    pub start_nodes: Option<Vec<String>>,
}

fn default_continue_on_error() -> bool {
    true
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self {
            traversal: TraversalOrder::default(),
            continue_on_error: default_continue_on_error(),
            timeout_ms: None,
            simulate_latency: false,
            source_fallback: SourceFallback::default(),
            start_nodes: None,
        }
    }
}

/// Load a workflow from a YAML or TOML file, chosen by extension
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<WorkflowConfig, ConfigError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let is_yaml = YAML_EXTENSIONS.contains(&extension.as_str());
    let is_toml = TOML_EXTENSIONS.contains(&extension.as_str());
    if !is_yaml && !is_toml {
        return Err(ConfigError::UnsupportedFormat(extension));
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if is_yaml {
        WorkflowConfig::from_yaml_str(&content)
    } else {
        WorkflowConfig::from_toml_str(&content)
    }
}

/// Load a workflow and validate it against the registry.
///
/// Every validation error is reported at once; warnings (cycles, dangling
/// edges) are logged but do not fail the load.
pub fn load_and_validate_config<P: AsRef<Path>>(
    path: P,
    registry: &BehaviorRegistry,
) -> Result<WorkflowConfig, ConfigError> {
    let cfg = load_config(path)?;
    validate_workflow(&cfg, registry).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}
