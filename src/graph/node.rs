// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

/// Opaque option map interpreted only by the node's behaviour.
pub type NodeConfig = Map<String, Value>;

/// A unit of work in the workflow graph.
///
/// Only identity and definition live here. Run-scoped fields (status, last
/// input/output, log) are owned by the run context so a run never mutates
/// caller-owned graph data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub config: NodeConfig,
    /// Per-node timeout override; takes precedence over the run-wide timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Node {
    pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            label: None,
            config: NodeConfig::new(),
            timeout_ms: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set a single config option.
    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.config.insert(key.into(), value);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Label for logs, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_and_display_name() {
        let node = Node::new("n2", "wait")
            .with_option("ms", json!(250))
            .with_timeout(Duration::from_secs(2));

        assert_eq!(node.display_name(), "n2");
        assert_eq!(node.config.get("ms"), Some(&json!(250)));
        assert_eq!(node.timeout(), Some(Duration::from_secs(2)));

        let labelled = node.with_label("Pause");
        assert_eq!(labelled.display_name(), "Pause");
    }

    #[test]
    fn test_with_timeout_saturates() {
        let node = Node::new("n1", "wait").with_timeout(Duration::MAX);
        assert_eq!(node.timeout_ms, Some(u64::MAX));
    }

    #[test]
    fn test_deserialize_uses_type_key() {
        let node: Node = serde_json::from_value(json!({
            "id": "1",
            "type": "webhook",
            "label": "Start Trigger"
        }))
        .unwrap();

        assert_eq!(node.node_type, "webhook");
        assert_eq!(node.label.as_deref(), Some("Start Trigger"));
        assert!(node.config.is_empty());
        assert_eq!(node.timeout(), None);
    }
}
