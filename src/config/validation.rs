// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Workflow validation.
//!
//! # Validation Pipeline
//!
//! 1. **Uniqueness**: node ids and edge ids are unique
//! 2. **Resolution**: every node type is registered, every explicit start node exists
//! 3. **Structure**: dangling edges and cycles are detected
//!
//! Stages 1 and 2 produce errors, accumulated so that every problem is reported
//! at once. Stage 3 only produces warnings: the scheduler ignores dangling
//! edges and runs each node at most once, so neither stops a run.
//!
//! ## Cycle Detection Algorithm
//! Depth-first search with a recursion stack, started from each node in
//! declaration order. A back edge to a node still on the stack closes a cycle,
//! which is reported as the path from that node back to itself.
//!
//! # Examples
//!
//! ```rust
//! use openflow::config::{validate_workflow, BehaviorRegistry, ValidationWarning, WorkflowConfig};
//!
//! let cfg = WorkflowConfig::from_yaml_str(r#"
//! nodes:
//!   - { id: a, type: passthrough }
//!   - { id: b, type: passthrough }
//! edges:
//!   - { id: e1, source: a, target: b }
//!   - { id: e2, source: b, target: a }
//! "#).unwrap();
//!
//! let warnings = validate_workflow(&cfg, &BehaviorRegistry::with_builtins()).unwrap();
//! assert!(matches!(&warnings[0], ValidationWarning::Cycle { cycle } if cycle.len() == 3));
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter};

use crate::config::{BehaviorRegistry, WorkflowConfig};
use crate::errors::{GraphError, ValidationError};
use crate::graph::Graph;
use crate::observability::messages::validation::{
    CycleDetected, DanglingEdge, ValidationCompleted, ValidationFailed, ValidationStarted,
};
use crate::observability::messages::StructuredLog;

/// Tolerated structural oddity worth telling the author about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// Nodes forming a cycle, first node repeated at the end.
    Cycle { cycle: Vec<String> },
    /// Edge with a missing endpoint; ignored at run time.
    DanglingEdge {
        edge_id: String,
        source: String,
        target: String,
    },
}

impl ValidationWarning {
    fn log(&self) {
        match self {
            ValidationWarning::Cycle { cycle } => {
                let cycle: Vec<&str> = cycle.iter().map(String::as_str).collect();
                CycleDetected { cycle: &cycle }.log();
            }
            ValidationWarning::DanglingEdge {
                edge_id,
                source,
                target,
            } => DanglingEdge {
                edge_id,
                source,
                target,
            }
            .log(),
        }
    }
}

impl Display for ValidationWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationWarning::Cycle { cycle } => {
                let cycle: Vec<&str> = cycle.iter().map(String::as_str).collect();
                CycleDetected { cycle: &cycle }.fmt(f)
            }
            ValidationWarning::DanglingEdge {
                edge_id,
                source,
                target,
            } => DanglingEdge {
                edge_id,
                source,
                target,
            }
            .fmt(f),
        }
    }
}

/// Validate a workflow against a behaviour registry.
///
/// # Returns
///
/// * `Ok(warnings)` - The workflow can run; `warnings` may be empty
/// * `Err(errors)` - Every validation error found
pub fn validate_workflow(
    config: &WorkflowConfig,
    registry: &BehaviorRegistry,
) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
    ValidationStarted {
        node_count: config.nodes.len(),
        edge_count: config.edges.len(),
    }
    .log();

    let (graph, mut errors) = build_graph(config);
    errors.extend(unknown_node_types(config, registry));
    errors.extend(unknown_start_nodes(config, &graph));

    if !errors.is_empty() {
        ValidationFailed {
            error_count: errors.len(),
        }
        .log();
        return Err(errors);
    }

    let mut warnings: Vec<ValidationWarning> = graph
        .dangling_edges()
        .map(|edge| ValidationWarning::DanglingEdge {
            edge_id: edge.id.clone(),
            source: edge.source.clone(),
            target: edge.target.clone(),
        })
        .collect();
    if let Some(cycle) = find_cycle(&graph) {
        warnings.push(ValidationWarning::Cycle { cycle });
    }
    for warning in &warnings {
        warning.log();
    }

    ValidationCompleted {
        node_count: config.nodes.len(),
        warning_count: warnings.len(),
    }
    .log();
    Ok(warnings)
}

/// Build the graph, turning every rejected duplicate into an error instead of
/// stopping at the first one.
fn build_graph(config: &WorkflowConfig) -> (Graph, Vec<ValidationError>) {
    let mut graph = Graph::new();
    let mut node_errors = Vec::new();
    let mut edge_errors = Vec::new();

    for node in &config.nodes {
        if let Err(GraphError::DuplicateNode(node_id)) = graph.add_node(node.clone()) {
            node_errors.push(ValidationError::DuplicateNodeId { node_id });
        }
    }
    for edge in &config.edges {
        if let Err(GraphError::DuplicateEdge(edge_id)) = graph.add_edge(edge.clone()) {
            edge_errors.push(ValidationError::DuplicateEdgeId { edge_id });
        }
    }

    node_errors.extend(edge_errors);
    (graph, node_errors)
}

fn unknown_node_types(config: &WorkflowConfig, registry: &BehaviorRegistry) -> Vec<ValidationError> {
    config
        .nodes
        .iter()
        .filter(|node| !registry.contains(&node.node_type))
        .map(|node| ValidationError::UnknownNodeType {
            node_id: node.id.clone(),
            node_type: node.node_type.clone(),
        })
        .collect()
}

fn unknown_start_nodes(config: &WorkflowConfig, graph: &Graph) -> Vec<ValidationError> {
    config
        .executor_options
        .start_nodes
        .iter()
        .flatten()
        .filter(|id| !graph.contains_node(id))
        .map(|id| ValidationError::UnknownStartNode { node_id: id.clone() })
        .collect()
}

/// First cycle found by DFS over live edges, roots tried in declaration order.
fn find_cycle(graph: &Graph) -> Option<Vec<String>> {
    let adjacency = graph.adjacency();
    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();

    for node in graph.nodes() {
        if !visited.contains(node.id.as_str()) {
            if let Some(cycle) = dfs_cycle_detection(&node.id, &adjacency, &mut visited, &mut rec_stack, &mut path) {
                return Some(cycle);
            }
        }
    }
    None
}

fn dfs_cycle_detection<'a>(
    node: &'a str,
    adjacency: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    rec_stack: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    visited.insert(node);
    rec_stack.insert(node);
    path.push(node);

    if let Some(neighbors) = adjacency.get(node) {
        for &neighbor in neighbors {
            if !visited.contains(neighbor) {
                if let Some(cycle) = dfs_cycle_detection(neighbor, adjacency, visited, rec_stack, path) {
                    return Some(cycle);
                }
            } else if rec_stack.contains(neighbor) {
                let start = path.iter().position(|&id| id == neighbor).unwrap_or(0);
                let mut cycle: Vec<String> = path[start..].iter().map(|id| id.to_string()).collect();
                cycle.push(neighbor.to_string());
                return Some(cycle);
            }
        }
    }

    rec_stack.remove(node);
    path.pop();
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};

    fn config(nodes: &[(&str, &str)], edges: &[(&str, &str, &str)]) -> WorkflowConfig {
        WorkflowConfig {
            nodes: nodes.iter().map(|(id, t)| Node::new(*id, *t)).collect(),
            edges: edges.iter().map(|(id, s, t)| Edge::new(*id, *s, *t)).collect(),
            ..WorkflowConfig::default()
        }
    }

    fn registry() -> BehaviorRegistry {
        BehaviorRegistry::with_builtins()
    }

    #[test]
    fn test_valid_empty_config() {
        assert_eq!(validate_workflow(&WorkflowConfig::default(), &registry()), Ok(vec![]));
    }

    #[test]
    fn test_valid_chain_has_no_warnings() {
        let cfg = config(
            &[("n1", "webhook"), ("n2", "wait"), ("n3", "passthrough")],
            &[("e1", "n1", "n2"), ("e2", "n2", "n3")],
        );
        assert_eq!(validate_workflow(&cfg, &registry()), Ok(vec![]));
    }

    #[test]
    fn test_errors_are_accumulated() {
        let mut cfg = config(
            &[("n1", "webhook"), ("n1", "wait"), ("n2", "bogus")],
            &[("e1", "n1", "n2"), ("e1", "n2", "n1")],
        );
        cfg.executor_options.start_nodes = Some(vec!["ghost".to_string()]);

        let errors = validate_workflow(&cfg, &registry()).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::DuplicateNodeId { node_id: "n1".to_string() },
                ValidationError::DuplicateEdgeId { edge_id: "e1".to_string() },
                ValidationError::UnknownNodeType {
                    node_id: "n2".to_string(),
                    node_type: "bogus".to_string(),
                },
                ValidationError::UnknownStartNode { node_id: "ghost".to_string() },
            ]
        );
    }

    #[test]
    fn test_cycles_are_warnings() {
        struct TestCase {
            name: &'static str,
            edges: Vec<(&'static str, &'static str, &'static str)>,
            expected: Option<Vec<&'static str>>,
        }

        let test_cases = vec![
            TestCase {
                name: "self loop",
                edges: vec![("e1", "a", "a")],
                expected: Some(vec!["a", "a"]),
            },
            TestCase {
                name: "two node cycle",
                edges: vec![("e1", "a", "b"), ("e2", "b", "a")],
                expected: Some(vec!["a", "b", "a"]),
            },
            TestCase {
                name: "cycle not through the root",
                edges: vec![("e1", "a", "b"), ("e2", "b", "c"), ("e3", "c", "b")],
                expected: Some(vec!["b", "c", "b"]),
            },
            TestCase {
                name: "diamond is acyclic",
                edges: vec![("e1", "a", "b"), ("e2", "a", "c"), ("e3", "b", "d"), ("e4", "c", "d")],
                expected: None,
            },
        ];

        for case in test_cases {
            let cfg = config(
                &[("a", "passthrough"), ("b", "passthrough"), ("c", "passthrough"), ("d", "passthrough")],
                &case.edges,
            );
            let warnings = validate_workflow(&cfg, &registry()).unwrap();
            let cycle = warnings.iter().find_map(|w| match w {
                ValidationWarning::Cycle { cycle } => Some(cycle.clone()),
                _ => None,
            });
            let expected = case
                .expected
                .map(|ids| ids.iter().map(|s| s.to_string()).collect::<Vec<_>>());
            assert_eq!(cycle, expected, "case: {}", case.name);
        }
    }

    #[test]
    fn test_cycle_through_missing_node_is_not_reported() {
        let cfg = config(&[("a", "passthrough")], &[("e1", "a", "ghost"), ("e2", "ghost", "a")]);
        let warnings = validate_workflow(&cfg, &registry()).unwrap();

        assert_eq!(warnings.len(), 2);
        assert!(warnings
            .iter()
            .all(|w| matches!(w, ValidationWarning::DanglingEdge { .. })));
    }

    #[test]
    fn test_dangling_edges_are_warnings() {
        let cfg = config(&[("a", "webhook")], &[("e1", "a", "gone")]);
        let warnings = validate_workflow(&cfg, &registry()).unwrap();

        assert_eq!(
            warnings,
            vec![ValidationWarning::DanglingEdge {
                edge_id: "e1".to_string(),
                source: "a".to_string(),
                target: "gone".to_string(),
            }]
        );
        assert!(warnings[0].to_string().contains("will be ignored"));
    }
}
