use std::collections::HashMap;

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, EdgeRef};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    Default,
    Conditional,
}

/// Compiled topology of a graph, including the `START` and `END` markers.
#[derive(Clone, Debug, Default)]
pub struct GraphProgram {
    graph: DiGraph<String, EdgeKind>,
    name_to_index: HashMap<String, NodeIndex>,
}

impl GraphProgram {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(index) = self.name_to_index.get(name) {
            return *index;
        }
        let index = self.graph.add_node(name.to_string());
        self.name_to_index.insert(name.to_string(), index);
        index
    }

    pub(crate) fn add_edge(&mut self, from: &str, to: &str, kind: EdgeKind) {
        let from = self.add_node(from);
        let to = self.add_node(to);
        self.graph.update_edge(from, to, kind);
    }

    /// Names of nodes that cannot be reached from `root`.
    pub(crate) fn unreachable_from(&self, root: &str) -> Vec<String> {
        let Some(start) = self.name_to_index.get(root) else {
            return self.node_names();
        };
        let mut seen = vec![false; self.graph.node_count()];
        let mut dfs = Dfs::new(&self.graph, *start);
        while let Some(index) = dfs.next(&self.graph) {
            seen[index.index()] = true;
        }
        let mut missing: Vec<String> = self
            .graph
            .node_indices()
            .filter(|index| !seen[index.index()])
            .map(|index| self.graph[index].clone())
            .collect();
        missing.sort();
        missing
    }

    pub fn node_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.name_to_index.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn edge_names(&self) -> Vec<(String, String)> {
        let mut edges: Vec<(String, String)> = self
            .graph
            .edge_references()
            .filter_map(|edge| {
                let from = self.graph.node_weight(edge.source())?;
                let to = self.graph.node_weight(edge.target())?;
                Some((from.clone(), to.clone()))
            })
            .collect();
        edges.sort();
        edges
    }

    pub fn edge_kind(&self, from: &str, to: &str) -> Option<EdgeKind> {
        let from = self.name_to_index.get(from)?;
        let to = self.name_to_index.get(to)?;
        let edge = self.graph.find_edge(*from, *to)?;
        self.graph.edge_weight(edge).copied()
    }

    pub fn is_acyclic(&self) -> bool {
        !is_cyclic_directed(&self.graph)
    }
}
