//! The directed adjacency relation among cubes.

use std::collections::{HashMap, HashSet};

use lexicube_registry::CubeId;

/// Directed adjacency among cubes, one edge per report.
///
/// An edge `sender -> target` means "target sits immediately to the
/// right of sender". A cube can only sense one right-hand neighbor, so
/// the relation is a plain edge map with at most one outgoing edge per
/// cube; a well-formed graph is a forest of simple directed paths.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    edges: HashMap<CubeId, CubeId>,
}

impl AdjacencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the outgoing edge for `sender`, overwriting any prior one.
    pub fn set_edge(&mut self, sender: CubeId, target: CubeId) {
        self.edges.insert(sender, target);
    }

    /// Remove the outgoing edge from `sender`, returning the old target.
    pub fn clear_edge(&mut self, sender: &CubeId) -> Option<CubeId> {
        self.edges.remove(sender)
    }

    /// The cube `sender` currently points at, if any.
    pub fn target_of(&self, sender: &CubeId) -> Option<&CubeId> {
        self.edges.get(sender)
    }

    /// Cubes that start a chain: sources that are never a target.
    ///
    /// Sorted lexicographically so resolution output is reproducible
    /// for identical input histories.
    pub fn heads(&self) -> Vec<CubeId> {
        let targets: HashSet<&CubeId> = self.edges.values().collect();
        let mut heads: Vec<CubeId> = self
            .edges
            .keys()
            .filter(|cube| !targets.contains(*cube))
            .cloned()
            .collect();
        heads.sort();
        heads
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no edges at all.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Drop all edges.
    pub fn clear(&mut self) {
        self.edges.clear();
    }

    /// Iterate over all edges.
    pub fn edges(&self) -> impl Iterator<Item = (&CubeId, &CubeId)> {
        self.edges.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(i: usize) -> CubeId {
        CubeId::new(format!("BLOCK_{i}"))
    }

    #[test]
    fn set_edge_overwrites_prior_target() {
        let mut graph = AdjacencyGraph::new();
        graph.set_edge(cube(0), cube(1));
        graph.set_edge(cube(0), cube(2));

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.target_of(&cube(0)), Some(&cube(2)));
    }

    #[test]
    fn clear_edge_returns_old_target() {
        let mut graph = AdjacencyGraph::new();
        graph.set_edge(cube(0), cube(1));

        assert_eq!(graph.clear_edge(&cube(0)), Some(cube(1)));
        assert_eq!(graph.clear_edge(&cube(0)), None);
        assert!(graph.is_empty());
    }

    #[test]
    fn heads_are_sources_without_incoming_edges() {
        let mut graph = AdjacencyGraph::new();
        graph.set_edge(cube(0), cube(1));
        graph.set_edge(cube(1), cube(2));
        graph.set_edge(cube(4), cube(5));

        assert_eq!(graph.heads(), vec![cube(0), cube(4)]);
    }

    #[test]
    fn heads_are_sorted_regardless_of_insertion_order() {
        let mut graph = AdjacencyGraph::new();
        graph.set_edge(cube(5), cube(6));
        graph.set_edge(cube(3), cube(4));
        graph.set_edge(cube(0), cube(1));

        assert_eq!(graph.heads(), vec![cube(0), cube(3), cube(5)]);
    }

    #[test]
    fn empty_graph_has_no_heads() {
        assert!(AdjacencyGraph::new().heads().is_empty());
    }
}
