// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use crate::backends::local::LocalBehaviorFactory;
use crate::errors::ExecutionError;
use crate::graph::Graph;
use crate::traits::Behavior;

/// Node Behavior Registry: maps a node type tag to its executable behaviour.
///
/// New node types are added by registering, never by branching inside the
/// scheduler.
///
/// # Examples
///
/// ```rust
/// use openflow::config::BehaviorRegistry;
///
/// let registry = BehaviorRegistry::with_builtins();
/// assert!(registry.contains("wait"));
/// assert!(registry.resolve("bogus").is_err());
/// ```
#[derive(Clone, Default)]
pub struct BehaviorRegistry(HashMap<String, Arc<dyn Behavior>>);

impl BehaviorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Registry pre-populated with the built-in behaviour catalogue
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        LocalBehaviorFactory::register_builtins(&mut registry);
        registry
    }

    /// Register (or replace) the behaviour for a type tag
    pub fn register(&mut self, node_type: impl Into<String>, behavior: Arc<dyn Behavior>) {
        self.0.insert(node_type.into(), behavior);
    }

    pub fn contains(&self, node_type: &str) -> bool {
        self.0.contains_key(node_type)
    }

    pub fn get(&self, node_type: &str) -> Option<&Arc<dyn Behavior>> {
        self.0.get(node_type)
    }

    /// Resolve a type tag for `node_id`, failing with `UnknownNodeType`.
    pub fn resolve_for(&self, node_id: &str, node_type: &str) -> Result<Arc<dyn Behavior>, ExecutionError> {
        self.0
            .get(node_type)
            .cloned()
            .ok_or_else(|| ExecutionError::UnknownNodeType {
                node_id: node_id.to_string(),
                node_type: node_type.to_string(),
            })
    }

    /// Resolve a bare type tag.
    pub fn resolve(&self, node_type: &str) -> Result<Arc<dyn Behavior>, ExecutionError> {
        self.0
            .get(node_type)
            .cloned()
            .ok_or_else(|| ExecutionError::UnregisteredType(node_type.to_string()))
    }

    /// Resolve the behaviour of every node, in declaration order.
    ///
    /// Fails on the first node whose type is not registered, before anything
    /// has run.
    pub fn resolve_graph(&self, graph: &Graph) -> Result<HashMap<String, Arc<dyn Behavior>>, ExecutionError> {
        graph
            .nodes()
            .iter()
            .map(|node| {
                self.resolve_for(&node.id, &node.node_type)
                    .map(|behavior| (node.id.clone(), behavior))
            })
            .collect()
    }

    /// Registered type tags, sorted
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.0.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for BehaviorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorRegistry")
            .field("behavior_count", &self.0.len())
            .field("types", &self.types())
            .finish()
    }
}

impl From<HashMap<String, Arc<dyn Behavior>>> for BehaviorRegistry {
    fn from(map: HashMap<String, Arc<dyn Behavior>>) -> Self {
        Self(map)
    }
}
