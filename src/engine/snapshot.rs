// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use super::{RunResult, RunStatus};
use crate::context::{MemoryMap, NodeStatus};
use crate::errors::ConfigError;

/// Persisted outcome of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub status: NodeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Machine-readable error tag, e.g. `timeout` or `invalid_config`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

/// What survives a run: shared memory plus each node's status and output.
///
/// Saved as a flat JSON document; loading it back seeds the next run's
/// memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub run_id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub memory: MemoryMap,
    #[serde(default)]
    pub nodes: BTreeMap<String, NodeSnapshot>,
}

impl RunSnapshot {
    pub fn from_result(result: &RunResult) -> Self {
        let nodes = result
            .nodes
            .iter()
            .map(|state| {
                (
                    state.node_id.clone(),
                    NodeSnapshot {
                        status: state.status,
                        output: state.last_output.clone(),
                        error: state.error_message.clone(),
                        error_kind: state.error.as_ref().map(|e| e.kind().to_string()),
                    },
                )
            })
            .collect();

        Self {
            run_id: result.run_id.to_string(),
            status: result.status,
            memory: result.memory.clone(),
            nodes,
        }
    }

    /// Memory to seed the next run with.
    pub fn initial_memory(&self) -> MemoryMap {
        self.memory.clone()
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }
}

/// Read seed memory from disk: either a plain JSON object or a saved
/// [`RunSnapshot`], whose `memory` is used. Anything else is rejected.
pub fn load_memory(path: impl AsRef<Path>) -> Result<MemoryMap, ConfigError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Object(map) = serde_json::from_str::<Value>(&contents)? else {
        return Err(ConfigError::InvalidMemory {
            path: path.to_path_buf(),
        });
    };

    if map.contains_key("memory") {
        if let Ok(snapshot) = serde_json::from_value::<RunSnapshot>(Value::Object(map.clone())) {
            return Ok(snapshot.initial_memory());
        }
    }
    Ok(map)
}
