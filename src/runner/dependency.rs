//! Dependency graph for task execution ordering.
//!
//! The graph is mutated while a run progresses: a completed task's node is
//! removed, which releases its dependents. Acyclicity is enforced at edge
//! insertion time, so the graph is a DAG at every point of its lifetime.

use std::collections::{HashMap, HashSet};

/// Outcome of [`DependencyGraph::add_edge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeInsertion {
    /// The edge was inserted.
    Added,
    /// The edge was already present; nothing changed.
    AlreadyExists,
    /// The edge would close a cycle; nothing changed.
    IntroducesCycle,
    /// `from` and `to` are the same node; nothing changed.
    SelfEdgeRejected,
}

/// Adjacency record of a single node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Node {
    /// Nodes that must finish before this one.
    in_edges: Vec<String>,
    /// Nodes waiting on this one.
    out_edges: Vec<String>,
}

/// Directed acyclic graph keyed by task name.
///
/// An edge `a -> b` means "`a` must finish before `b` may start".
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: HashMap<String, Node>,
}

impl DependencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Adding an existing node is a no-op.
    pub fn add_node(&mut self, name: &str) {
        if !self.nodes.contains_key(name) {
            self.nodes.insert(name.to_string(), Node::default());
        }
    }

    /// Add the edge `from -> to`.
    ///
    /// The graph is only mutated when [`EdgeInsertion::Added`] is returned.
    /// Missing endpoints are created once all checks have passed.
    pub fn add_edge(&mut self, from: &str, to: &str) -> EdgeInsertion {
        if from == to {
            return EdgeInsertion::SelfEdgeRejected;
        }

        if let Some(node) = self.nodes.get(from) {
            if node.out_edges.iter().any(|n| n == to) {
                return EdgeInsertion::AlreadyExists;
            }
        }

        // `to` reachable backward from `from` means `from` already depends on `to`.
        if self.reaches_backward(from, to) {
            return EdgeInsertion::IntroducesCycle;
        }

        self.add_node(from);
        self.add_node(to);
        if let Some(node) = self.nodes.get_mut(from) {
            node.out_edges.push(to.to_string());
        }
        if let Some(node) = self.nodes.get_mut(to) {
            node.in_edges.push(from.to_string());
        }
        EdgeInsertion::Added
    }

    /// Remove a node and every edge touching it. No-op if absent.
    pub fn remove_node(&mut self, name: &str) {
        let Some(node) = self.nodes.remove(name) else {
            return;
        };

        for target in &node.out_edges {
            if let Some(neighbor) = self.nodes.get_mut(target) {
                neighbor.in_edges.retain(|n| n != name);
            }
        }
        for source in &node.in_edges {
            if let Some(neighbor) = self.nodes.get_mut(source) {
                neighbor.out_edges.retain(|n| n != name);
            }
        }
    }

    /// Direct prerequisites of a node, or `None` if the node is absent.
    pub fn in_edges(&self, name: &str) -> Option<&[String]> {
        self.nodes.get(name).map(|n| n.in_edges.as_slice())
    }

    /// Direct dependents of a node, or `None` if the node is absent.
    pub fn out_edges(&self, name: &str) -> Option<&[String]> {
        self.nodes.get(name).map(|n| n.out_edges.as_slice())
    }

    /// Check if a node exists in the graph.
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Get the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node names, sorted.
    pub fn nodes(&self) -> Vec<String> {
        let mut names: Vec<String> = self.nodes.keys().cloned().collect();
        names.sort();
        names
    }

    /// Nodes without prerequisites, sorted.
    pub fn roots(&self) -> Vec<String> {
        let mut roots: Vec<String> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.in_edges.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        roots.sort();
        roots
    }

    /// Returns groups of nodes that can execute in parallel.
    ///
    /// Each group contains nodes whose prerequisites are all in earlier
    /// groups. The graph itself is left untouched.
    pub fn waves(&self) -> Vec<Vec<String>> {
        let mut remaining = self.clone();
        let mut waves = Vec::new();

        loop {
            let ready = remaining.roots();
            if ready.is_empty() {
                break;
            }
            for name in &ready {
                remaining.remove_node(name);
            }
            waves.push(ready);
        }

        waves
    }

    /// Walk `in_edges` transitively from `start`, looking for `target`.
    fn reaches_backward(&self, start: &str, target: &str) -> bool {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut to_visit = vec![start];

        while let Some(current) = to_visit.pop() {
            if current == target {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(node) = self.nodes.get(current) {
                to_visit.extend(node.in_edges.iter().map(String::as_str));
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(names: &[&str]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for name in names {
            graph.add_node(name);
        }
        for pair in names.windows(2) {
            assert_eq!(graph.add_edge(pair[0], pair[1]), EdgeInsertion::Added);
        }
        graph
    }

    #[test]
    fn new_graph_is_empty() {
        let graph = DependencyGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
    }

    #[test]
    fn add_node_is_idempotent() {
        let mut graph = DependencyGraph::new();
        graph.add_node("a");
        graph.add_edge("a", "b");
        graph.add_node("a");

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.out_edges("a").unwrap(), ["b"]);
    }

    #[test]
    fn add_edge_updates_both_sides() {
        let mut graph = DependencyGraph::new();
        graph.add_node("a");
        graph.add_node("b");

        assert_eq!(graph.add_edge("a", "b"), EdgeInsertion::Added);
        assert_eq!(graph.out_edges("a").unwrap(), ["b"]);
        assert_eq!(graph.in_edges("b").unwrap(), ["a"]);
        assert!(graph.in_edges("a").unwrap().is_empty());
    }

    #[test]
    fn self_edge_is_rejected_without_mutation() {
        let mut graph = DependencyGraph::new();
        graph.add_node("a");

        assert_eq!(graph.add_edge("a", "a"), EdgeInsertion::SelfEdgeRejected);
        assert!(graph.in_edges("a").unwrap().is_empty());
        assert!(graph.out_edges("a").unwrap().is_empty());
    }

    #[test]
    fn self_edge_on_unknown_node_creates_nothing() {
        let mut graph = DependencyGraph::new();
        assert_eq!(graph.add_edge("x", "x"), EdgeInsertion::SelfEdgeRejected);
        assert!(graph.is_empty());
    }

    #[test]
    fn duplicate_edge_reports_already_exists() {
        let mut graph = DependencyGraph::new();
        assert_eq!(graph.add_edge("a", "b"), EdgeInsertion::Added);
        assert_eq!(graph.add_edge("a", "b"), EdgeInsertion::AlreadyExists);

        assert_eq!(graph.out_edges("a").unwrap(), ["b"]);
        assert_eq!(graph.in_edges("b").unwrap(), ["a"]);
    }

    #[test]
    fn direct_cycle_is_rejected() {
        let mut graph = chain(&["a", "b"]);
        assert_eq!(graph.add_edge("b", "a"), EdgeInsertion::IntroducesCycle);
        assert!(graph.out_edges("b").unwrap().is_empty());
        assert!(graph.in_edges("a").unwrap().is_empty());
    }

    #[test]
    fn transitive_cycle_is_rejected() {
        let mut graph = chain(&["a", "b", "c", "d"]);
        assert_eq!(graph.add_edge("d", "a"), EdgeInsertion::IntroducesCycle);
        assert!(graph.out_edges("d").unwrap().is_empty());
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        let mut graph = DependencyGraph::new();
        assert_eq!(graph.add_edge("a", "b"), EdgeInsertion::Added);
        assert_eq!(graph.add_edge("a", "c"), EdgeInsertion::Added);
        assert_eq!(graph.add_edge("b", "d"), EdgeInsertion::Added);
        assert_eq!(graph.add_edge("c", "d"), EdgeInsertion::Added);
        assert_eq!(graph.add_edge("a", "d"), EdgeInsertion::Added);

        assert_eq!(graph.in_edges("d").unwrap(), ["b", "c", "a"]);
    }

    #[test]
    fn remove_node_cascades_edges() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");
        graph.add_edge("x", "b");

        graph.remove_node("b");

        assert!(!graph.contains("b"));
        assert!(graph.out_edges("a").unwrap().is_empty());
        assert!(graph.out_edges("x").unwrap().is_empty());
        assert!(graph.in_edges("c").unwrap().is_empty());
    }

    #[test]
    fn remove_missing_node_is_noop() {
        let mut graph = chain(&["a", "b"]);
        graph.remove_node("zzz");
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn lookups_on_missing_node_return_none() {
        let graph = DependencyGraph::new();
        assert!(graph.in_edges("nope").is_none());
        assert!(graph.out_edges("nope").is_none());
    }

    #[test]
    fn removed_edge_can_be_readded_in_reverse() {
        let mut graph = chain(&["a", "b"]);
        graph.remove_node("a");
        graph.add_node("a");
        assert_eq!(graph.add_edge("b", "a"), EdgeInsertion::Added);
    }

    #[test]
    fn roots_are_sorted() {
        let mut graph = DependencyGraph::new();
        graph.add_node("zeta");
        graph.add_node("alpha");
        graph.add_edge("alpha", "beta");

        assert_eq!(graph.roots(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn waves_of_empty_graph() {
        assert!(DependencyGraph::new().waves().is_empty());
    }

    #[test]
    fn waves_of_diamond() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("a", "c");
        graph.add_edge("b", "d");
        graph.add_edge("c", "d");

        let waves = graph.waves();

        assert_eq!(waves, vec![vec!["a"], vec!["b", "c"], vec!["d"]]);
        // Planning does not consume the graph.
        assert_eq!(graph.len(), 4);
    }

    #[test]
    fn waves_of_independent_nodes() {
        let mut graph = DependencyGraph::new();
        graph.add_node("b");
        graph.add_node("a");
        graph.add_node("c");

        assert_eq!(graph.waves(), vec![vec!["a", "b", "c"]]);
    }
}
