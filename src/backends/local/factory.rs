// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use super::behaviors::*;
use crate::config::BehaviorRegistry;
use crate::traits::Behavior;

/// Factory for the built-in (in-process) node behaviours
pub struct LocalBehaviorFactory;

impl LocalBehaviorFactory {
    /// Create the behaviour for a node type tag
    ///
    /// - "passthrough", "webhook", "code" -> PassthroughBehavior
    /// - "wait" -> WaitBehavior
    /// - "db", "memory" -> MemoryStoreBehavior
    /// - "template" -> TemplateBehavior (generic)
    /// - "ai", "gmail", "discord" -> TemplateBehavior with canned output
    pub fn create_behavior(node_type: &str) -> Result<Arc<dyn Behavior>, String> {
        match node_type {
            // Output = input
            "passthrough" | "webhook" | "code" => Ok(Arc::new(PassthroughBehavior::new())),

            "wait" => Ok(Arc::new(WaitBehavior::new())),

            // Shared run memory
            "db" | "memory" => Ok(Arc::new(MemoryStoreBehavior::new())),

            // Templated outputs
            "template" => Ok(Arc::new(TemplateBehavior::generic())),
            "ai" => Ok(Arc::new(TemplateBehavior::ai())),
            "gmail" => Ok(Arc::new(TemplateBehavior::gmail())),
            "discord" => Ok(Arc::new(TemplateBehavior::discord())),

            _ => Err(format!("Unknown built-in node type: '{}'", node_type)),
        }
    }

    /// List all built-in node type tags
    pub fn list_available_types() -> Vec<&'static str> {
        vec![
            "passthrough",
            "webhook",
            "code",
            "wait",
            "db",
            "memory",
            "template",
            "ai",
            "gmail",
            "discord",
        ]
    }

    /// Check if a type tag is built in
    pub fn is_type_available(node_type: &str) -> bool {
        Self::list_available_types().contains(&node_type)
    }

    /// Register every built-in behaviour under its type tag
    pub fn register_builtins(registry: &mut BehaviorRegistry) {
        for node_type in Self::list_available_types() {
            if let Ok(behavior) = Self::create_behavior(node_type) {
                registry.register(node_type, behavior);
            }
        }
    }
}
