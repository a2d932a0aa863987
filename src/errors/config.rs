// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error;

/// Errors found while validating a workflow definition.
///
/// Cycles and dangling edges are deliberately absent: the engine tolerates
/// both, so validation only reports them as warnings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Duplicate node ID: '{node_id}'")]
    DuplicateNodeId { node_id: String },

    #[error("Duplicate edge ID: '{edge_id}'")]
    DuplicateEdgeId { edge_id: String },

    #[error("Node '{node_id}' has type '{node_type}' which is not registered")]
    UnknownNodeType { node_id: String, node_type: String },

    #[error("Start node '{node_id}' does not exist")]
    UnknownStartNode { node_id: String },
}

/// Errors that can occur while loading a workflow file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML workflow: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse TOML workflow: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid workflow graph: {0}")]
    Graph(#[from] super::GraphError),

    #[error("'{path}' must hold a JSON object or a run snapshot")]
    InvalidMemory { path: PathBuf },

    #[error("unsupported workflow file extension: '{0}'")]
    UnsupportedFormat(String),

    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_lists_every_error() {
        let err = ConfigError::Invalid(vec![
            ValidationError::DuplicateNodeId {
                node_id: "n1".to_string(),
            },
            ValidationError::UnknownNodeType {
                node_id: "n2".to_string(),
                node_type: "bogus".to_string(),
            },
        ]);

        let message = err.to_string();
        assert!(message.starts_with("Configuration validation failed:"));
        assert!(message.contains("Duplicate node ID: 'n1'"));
        assert!(message.contains("type 'bogus' which is not registered"));
    }
}
