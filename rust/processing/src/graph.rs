// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Undirected "is connected to" graph over element identifiers.
//!
//! Edges are symmetric: adding A-B registers B under A and A under B.
//! Inserting an existing edge is a no-op and self-loops are ignored.

use std::collections::VecDeque;
use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::classify::CategoryMap;
use crate::element::DomainElement;

/// Adjacency sets keyed by element identifier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationshipGraph {
    adjacency: FxHashMap<String, FxHashSet<String>>,
}

impl RelationshipGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects two identifiers in both directions.
    ///
    /// Returns `true` if the edge was not present before.
    pub fn add_edge(&mut self, a: &str, b: &str) -> bool {
        if a == b {
            return false;
        }
        let inserted = self
            .adjacency
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
        self.adjacency
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string());
        inserted
    }

    /// Removes an edge in both directions, dropping nodes left without neighbors.
    pub fn remove_edge(&mut self, a: &str, b: &str) -> bool {
        let removed = self.unlink(a, b);
        self.unlink(b, a);
        removed
    }

    fn unlink(&mut self, from: &str, to: &str) -> bool {
        let Some(neighbors) = self.adjacency.get_mut(from) else {
            return false;
        };
        let removed = neighbors.remove(to);
        if neighbors.is_empty() {
            self.adjacency.remove(from);
        }
        removed
    }

    /// Read-only view of the full adjacency mapping
    pub fn connections(&self) -> &FxHashMap<String, FxHashSet<String>> {
        &self.adjacency
    }

    pub fn neighbors(&self, id: &str) -> Option<&FxHashSet<String>> {
        self.adjacency.get(id)
    }

    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        self.adjacency
            .get(a)
            .is_some_and(|neighbors| neighbors.contains(b))
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(FxHashSet::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Groups of mutually reachable identifiers, each sorted, ordered by
    /// their smallest member.
    pub fn connected_components(&self) -> Vec<Vec<String>> {
        let mut nodes: Vec<&String> = self.adjacency.keys().collect();
        nodes.sort();

        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut components = Vec::new();

        for start in nodes {
            if !visited.insert(start.as_str()) {
                continue;
            }
            let mut component = Vec::new();
            let mut queue = VecDeque::from([start.as_str()]);
            while let Some(current) = queue.pop_front() {
                component.push(current.to_string());
                for next in self.adjacency.get(current).into_iter().flatten() {
                    if visited.insert(next.as_str()) {
                        queue.push_back(next.as_str());
                    }
                }
            }
            component.sort();
            components.push(component);
        }

        components
    }

    /// Connects standard-case walls whose axis endpoints coincide.
    pub fn from_wall_endpoints(map: &CategoryMap) -> Self {
        let walls: Vec<_> = map
            .domain_elements()
            .filter_map(DomainElement::as_wall)
            .collect();

        let mut graph = Self::new();
        for (i, a) in walls.iter().enumerate() {
            for b in &walls[i + 1..] {
                if a.profile.center_line.shares_endpoint(&b.profile.center_line) {
                    graph.add_edge(&a.global_id, &b.global_id);
                }
            }
        }

        tracing::debug!(
            walls = walls.len(),
            edges = graph.edge_count(),
            "Built wall connectivity graph"
        );
        graph
    }
}

impl fmt::Display for RelationshipGraph {
    /// One `node: a, b` line per node, sorted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut nodes: Vec<_> = self.adjacency.iter().collect();
        nodes.sort_by(|a, b| a.0.cmp(b.0));
        for (node, neighbors) in nodes {
            let mut neighbors: Vec<&str> = neighbors.iter().map(String::as_str).collect();
            neighbors.sort_unstable();
            writeln!(f, "{}: {}", node, neighbors.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_symmetric() {
        let mut graph = RelationshipGraph::new();
        assert!(graph.add_edge("A", "B"));
        assert!(graph.neighbors("A").unwrap().contains("B"));
        assert!(graph.neighbors("B").unwrap().contains("A"));
        assert!(graph.contains_edge("B", "A"));
    }

    #[test]
    fn test_add_edge_idempotent() {
        let mut graph = RelationshipGraph::new();
        graph.add_edge("A", "B");
        assert!(!graph.add_edge("A", "B"));
        assert!(!graph.add_edge("B", "A"));
        assert_eq!(graph.neighbors("A").unwrap().len(), 1);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_self_loop_ignored() {
        let mut graph = RelationshipGraph::new();
        assert!(!graph.add_edge("A", "A"));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_remove_edge_both_directions() {
        let mut graph = RelationshipGraph::new();
        graph.add_edge("A", "B");
        graph.add_edge("A", "C");

        assert!(graph.remove_edge("B", "A"));
        assert!(!graph.contains_edge("A", "B"));
        assert!(!graph.contains_edge("B", "A"));
        assert!(graph.neighbors("B").is_none());
        assert_eq!(graph.edge_count(), 1);
        assert!(!graph.remove_edge("B", "A"));
    }

    #[test]
    fn test_display_sorted() {
        let mut graph = RelationshipGraph::new();
        graph.add_edge("w2", "w1");
        graph.add_edge("w1", "w3");
        assert_eq!(graph.to_string(), "w1: w2, w3\nw2: w1\nw3: w1\n");
    }

    #[test]
    fn test_connected_components() {
        let mut graph = RelationshipGraph::new();
        graph.add_edge("d", "c");
        graph.add_edge("a", "b");
        graph.add_edge("b", "e");
        assert_eq!(
            graph.connected_components(),
            vec![
                vec!["a".to_string(), "b".into(), "e".into()],
                vec!["c".to_string(), "d".into()],
            ]
        );
    }
}
