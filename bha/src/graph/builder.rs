//! Directed multigraph keyed by path, with typed, optionally-weighted edges.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Tag distinguishing how an edge was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeType {
    /// `source` depends on `target` through a literal `#include`.
    DirectInclude,
    /// Materialized by transitive-closure computation.
    Transitive,
    /// Reserved for future synthetic edge kinds.
    Synthetic,
}

/// A single directed edge between two nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    pub target: String,
    pub edge_type: EdgeType,
    pub weight: Option<f64>,
}

/// A directed graph keyed by a string node identifier (typically a
/// normalized path). Distinct edge types between the same endpoints are
/// distinct edges; inserting an identical `(target, edge_type)` pair twice
/// is a no-op. Iteration over a node's neighbors preserves insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyGraph {
    nodes: Vec<String>,
    node_index: FxHashMap<String, usize>,
    forward: Vec<Vec<GraphEdge>>,
    reverse: Vec<Vec<GraphEdge>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: &str) -> usize {
        if let Some(&idx) = self.node_index.get(node) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(node.to_string());
        self.node_index.insert(node.to_string(), idx);
        self.forward.push(Vec::new());
        self.reverse.push(Vec::new());
        idx
    }

    pub fn has_node(&self, node: &str) -> bool {
        self.node_index.contains_key(node)
    }

    fn index_of(&self, node: &str) -> Option<usize> {
        self.node_index.get(node).copied()
    }

    /// Adds an edge, implicitly creating missing endpoints. Idempotent for
    /// an identical `(source, target, edge_type)` triple.
    pub fn add_edge(&mut self, source: &str, target: &str, edge_type: EdgeType, weight: Option<f64>) {
        let s = self.add_node(source);
        let t = self.add_node(target);

        if self.forward[s]
            .iter()
            .any(|e| e.target == target && e.edge_type == edge_type)
        {
            return;
        }

        self.forward[s].push(GraphEdge {
            target: target.to_string(),
            edge_type,
            weight,
        });
        self.reverse[t].push(GraphEdge {
            target: source.to_string(),
            edge_type,
            weight,
        });
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.index_of(source)
            .map(|s| self.forward[s].iter().any(|e| e.target == target))
            .unwrap_or(false)
    }

    /// Outgoing neighbor node ids, insertion order, may repeat across edge
    /// types.
    pub fn get_dependencies(&self, node: &str) -> Vec<String> {
        self.index_of(node)
            .map(|idx| self.forward[idx].iter().map(|e| e.target.clone()).collect())
            .unwrap_or_default()
    }

    /// Incoming neighbor node ids, insertion order.
    pub fn get_reverse_dependencies(&self, node: &str) -> Vec<String> {
        self.index_of(node)
            .map(|idx| self.reverse[idx].iter().map(|e| e.target.clone()).collect())
            .unwrap_or_default()
    }

    pub fn get_edges(&self, node: &str) -> Vec<GraphEdge> {
        self.index_of(node)
            .map(|idx| self.forward[idx].clone())
            .unwrap_or_default()
    }

    pub fn get_all_nodes(&self) -> Vec<String> {
        self.nodes.clone()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.forward.iter().map(|edges| edges.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_edge_creates_missing_endpoints() {
        let mut g = DependencyGraph::new();
        g.add_edge("a.cpp", "a.h", EdgeType::DirectInclude, None);
        assert!(g.has_node("a.cpp"));
        assert!(g.has_node("a.h"));
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn add_edge_is_idempotent_for_identical_edges() {
        let mut g = DependencyGraph::new();
        g.add_edge("a.cpp", "a.h", EdgeType::DirectInclude, Some(1.0));
        g.add_edge("a.cpp", "a.h", EdgeType::DirectInclude, Some(1.0));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn distinct_edge_types_between_same_endpoints_are_distinct_edges() {
        let mut g = DependencyGraph::new();
        g.add_edge("a.cpp", "a.h", EdgeType::DirectInclude, None);
        g.add_edge("a.cpp", "a.h", EdgeType::Transitive, None);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn reverse_adjacency_is_consistent_with_forward() {
        let mut g = DependencyGraph::new();
        g.add_edge("a.cpp", "a.h", EdgeType::DirectInclude, None);
        assert_eq!(g.get_dependencies("a.cpp"), vec!["a.h".to_string()]);
        assert_eq!(
            g.get_reverse_dependencies("a.h"),
            vec!["a.cpp".to_string()]
        );
    }

    #[test]
    fn tolerates_self_loops() {
        let mut g = DependencyGraph::new();
        g.add_edge("a.h", "a.h", EdgeType::DirectInclude, None);
        assert!(g.has_edge("a.h", "a.h"));
    }

    #[test]
    fn neighbor_iteration_is_insertion_order() {
        let mut g = DependencyGraph::new();
        g.add_edge("a.cpp", "c.h", EdgeType::DirectInclude, None);
        g.add_edge("a.cpp", "b.h", EdgeType::DirectInclude, None);
        assert_eq!(
            g.get_dependencies("a.cpp"),
            vec!["c.h".to_string(), "b.h".to_string()]
        );
    }
}
