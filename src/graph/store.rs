// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::{Edge, Node};
use crate::errors::GraphError;

/// Serialisable node/edge lists, as held by the editor or a workflow file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// Node set plus edge set, both kept in declaration order.
///
/// Declaration order is load-bearing: it decides which node the no-source
/// fallback picks and the order in which fan-out targets are dispatched.
///
/// # Examples
///
/// ```rust
/// use openflow::graph::{Edge, Graph, Node};
///
/// let mut graph = Graph::new();
/// graph.add_node(Node::new("a", "webhook")).unwrap();
/// graph.add_node(Node::new("b", "passthrough")).unwrap();
/// graph.add_edge(Edge::new("e1", "a", "b")).unwrap();
///
/// assert_eq!(graph.sources(), vec!["a".to_string()]);
/// assert_eq!(graph.outgoing_edges("a").count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index: HashMap<String, usize>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a definition, rejecting duplicate node or edge ids.
    pub fn from_definition(definition: WorkflowDefinition) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for node in definition.nodes {
            graph.add_node(node)?;
        }
        for edge in definition.edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }

    pub fn to_definition(&self) -> WorkflowDefinition {
        WorkflowDefinition {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.index.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Remove a node together with every edge touching it.
    pub fn remove_node(&mut self, node_id: &str) -> Result<Node, GraphError> {
        let position = self
            .index
            .remove(node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
        let node = self.nodes.remove(position);
        self.edges
            .retain(|edge| edge.source != node_id && edge.target != node_id);
        self.rebuild_index();
        Ok(node)
    }

    /// Add an edge. Endpoints are not checked: dangling edges are inert.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        if self.edges.iter().any(|existing| existing.id == edge.id) {
            return Err(GraphError::DuplicateEdge(edge.id));
        }
        self.edges.push(edge);
        Ok(())
    }

    pub fn remove_edge(&mut self, edge_id: &str) -> Result<Edge, GraphError> {
        let position = self
            .edges
            .iter()
            .position(|edge| edge.id == edge_id)
            .ok_or_else(|| GraphError::EdgeNotFound(edge_id.to_string()))?;
        Ok(self.edges.remove(position))
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.index.get(node_id).map(|&i| &self.nodes[i])
    }

    pub fn contains_node(&self, node_id: &str) -> bool {
        self.index.contains_key(node_id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// An edge participates in traversal only when both endpoints exist.
    pub fn is_live(&self, edge: &Edge) -> bool {
        self.contains_node(&edge.source) && self.contains_node(&edge.target)
    }

    /// Edges whose source or target is missing.
    pub fn dangling_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |edge| !self.is_live(edge))
    }

    /// Live edges leaving `node_id`, in declaration order.
    pub fn outgoing_edges<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges
            .iter()
            .filter(move |edge| edge.source == node_id && self.is_live(edge))
    }

    /// Nodes with no incoming live edge, in declaration order.
    pub fn strict_sources(&self) -> Vec<String> {
        let with_incoming: HashSet<&str> = self
            .edges
            .iter()
            .filter(|edge| self.is_live(edge))
            .map(|edge| edge.target.as_str())
            .collect();

        self.nodes
            .iter()
            .filter(|node| !with_incoming.contains(node.id.as_str()))
            .map(|node| node.id.clone())
            .collect()
    }

    /// Whether some live edge points at `node_id`.
    pub fn has_incoming_edges(&self, node_id: &str) -> bool {
        self.edges
            .iter()
            .any(|edge| edge.target == node_id && self.is_live(edge))
    }

    /// Source nodes, falling back to the first declared node when every node
    /// has an incoming edge (a pure cycle) so a run can still start.
    pub fn sources(&self) -> Vec<String> {
        let sources = self.strict_sources();
        if sources.is_empty() {
            if let Some(first) = self.nodes.first() {
                return vec![first.id.clone()];
            }
        }
        sources
    }

    /// Adjacency list of live edges: node id -> target ids in declaration order.
    pub fn adjacency(&self) -> HashMap<&str, Vec<&str>> {
        let mut adjacency: HashMap<&str, Vec<&str>> = self
            .nodes
            .iter()
            .map(|node| (node.id.as_str(), Vec::new()))
            .collect();
        for edge in self.edges.iter().filter(|edge| self.is_live(edge)) {
            if let Some(targets) = adjacency.get_mut(edge.source.as_str()) {
                targets.push(edge.target.as_str());
            }
        }
        adjacency
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.clone(), i))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(nodes: &[&str], edges: &[(&str, &str, &str)]) -> Graph {
        let mut graph = Graph::new();
        for id in nodes {
            graph.add_node(Node::new(*id, "passthrough")).unwrap();
        }
        for (id, source, target) in edges {
            graph.add_edge(Edge::new(*id, *source, *target)).unwrap();
        }
        graph
    }

    #[test]
    fn test_has_incoming_edges_ignores_dangling() {
        let g = graph(&["a", "b"], &[("e1", "ghost", "a"), ("e2", "a", "b")]);
        assert!(!g.has_incoming_edges("a"));
        assert!(g.has_incoming_edges("b"));
    }

    #[test]
    fn test_sources_table_driven() {
        struct TestCase {
            name: &'static str,
            graph: Graph,
            expected: Vec<&'static str>,
        }

        let test_cases = vec![
            TestCase {
                name: "empty graph",
                graph: graph(&[], &[]),
                expected: vec![],
            },
            TestCase {
                name: "linear chain",
                graph: graph(&["a", "b", "c"], &[("e1", "a", "b"), ("e2", "b", "c")]),
                expected: vec!["a"],
            },
            TestCase {
                name: "two roots in declaration order",
                graph: graph(&["b", "a", "c"], &[("e1", "b", "c"), ("e2", "a", "c")]),
                expected: vec!["b", "a"],
            },
            TestCase {
                name: "pure cycle falls back to first declared",
                graph: graph(&["x", "y"], &[("e1", "x", "y"), ("e2", "y", "x")]),
                expected: vec!["x"],
            },
            TestCase {
                name: "dangling edge does not hide a source",
                graph: graph(&["a", "b"], &[("e1", "ghost", "a"), ("e2", "a", "b")]),
                expected: vec!["a"],
            },
        ];

        for case in test_cases {
            let sources = case.graph.sources();
            let expected: Vec<String> = case.expected.iter().map(|s| s.to_string()).collect();
            assert_eq!(sources, expected, "case: {}", case.name);
        }
    }

    #[test]
    fn test_strict_sources_has_no_fallback() {
        let cyclic = graph(&["x", "y"], &[("e1", "x", "y"), ("e2", "y", "x")]);
        assert!(cyclic.strict_sources().is_empty());
    }

    #[test]
    fn test_outgoing_edges_keep_declaration_order_and_skip_dangling() {
        let g = graph(
            &["a", "b", "c"],
            &[
                ("e1", "a", "c"),
                ("e2", "a", "missing"),
                ("e3", "a", "b"),
            ],
        );

        let ids: Vec<&str> = g.outgoing_edges("a").map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e3"]);
        assert_eq!(g.dangling_edges().count(), 1);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut g = graph(&["a"], &[("e1", "a", "a")]);

        assert_eq!(
            g.add_node(Node::new("a", "wait")),
            Err(GraphError::DuplicateNode("a".to_string()))
        );
        assert_eq!(
            g.add_edge(Edge::new("e1", "a", "b")),
            Err(GraphError::DuplicateEdge("e1".to_string()))
        );
    }

    #[test]
    fn test_remove_node_drops_its_edges_and_reindexes() {
        let mut g = graph(
            &["a", "b", "c"],
            &[("e1", "a", "b"), ("e2", "b", "c"), ("e3", "a", "c")],
        );

        let removed = g.remove_node("b").unwrap();
        assert_eq!(removed.id, "b");
        assert_eq!(g.len(), 2);
        assert_eq!(g.node("c").map(|n| n.id.as_str()), Some("c"));
        let remaining: Vec<&str> = g.edges().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(remaining, vec!["e3"]);

        assert_eq!(
            g.remove_node("b"),
            Err(GraphError::NodeNotFound("b".to_string()))
        );
    }

    #[test]
    fn test_remove_edge() {
        let mut g = graph(&["a", "b"], &[("e1", "a", "b")]);
        assert_eq!(g.remove_edge("e1").unwrap().target, "b");
        assert_eq!(g.sources().len(), 2);
        assert_eq!(
            g.remove_edge("e1"),
            Err(GraphError::EdgeNotFound("e1".to_string()))
        );
    }

    #[test]
    fn test_definition_round_trip_preserves_order() {
        let g = graph(&["n1", "n2"], &[("e1", "n1", "n2")]);
        let rebuilt = Graph::from_definition(g.to_definition()).unwrap();
        let ids: Vec<&str> = rebuilt.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["n1", "n2"]);
        assert_eq!(rebuilt.adjacency().get("n1"), Some(&vec!["n2"]));
    }
}
