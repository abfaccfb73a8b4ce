use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use ordermap::OrderMap;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::error::{LinextError, Result};
use crate::seed::Seeding;

/// A directed graph of dependencies.
///
/// An edge `(a, b)` means "a depends on b", so `b` comes first in any valid
/// ordering. Every edge target is a node in its own right.
///
/// Serializes as the adjacency map `{node: [successor, ...]}`.
#[derive(Debug, Clone)]
pub struct Digraph<K> {
    /// Stable order-of-appearance: node -> successors
    adj: OrderMap<K, Vec<K>>,
}

impl<K> Default for Digraph<K> {
    fn default() -> Self {
        Self { adj: OrderMap::new() }
    }
}

impl<K: Hash + Eq + Clone> Digraph<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(from, to)` edges. Duplicates collapse.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (K, K)>,
    {
        let mut g = Self::new();
        for (a, b) in edges {
            g.add_edge(a, b);
        }
        g
    }

    pub fn add_node(&mut self, k: K) {
        self.adj.entry(k).or_default();
    }

    pub fn add_edge(&mut self, from: K, to: K) {
        let succ = self.adj.entry(from).or_default();
        if !succ.contains(&to) {
            succ.push(to.clone());
        }
        self.add_node(to);
    }

    /// Returns whether the edge was present.
    pub fn remove_edge(&mut self, from: &K, to: &K) -> bool {
        match self.adj.get_mut(from) {
            Some(succ) => match succ.iter().position(|k| k == to) {
                Some(p) => {
                    succ.remove(p);
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    pub fn contains(&self, k: &K) -> bool {
        self.adj.contains_key(k)
    }

    pub fn len(&self) -> usize {
        self.adj.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &K> {
        self.adj.keys()
    }

    /// Direct successors of `k`; empty for unknown nodes.
    pub fn successors(&self, k: &K) -> &[K] {
        self.adj.get(k).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every edge as `(from, to)`.
    pub fn edges(&self) -> impl Iterator<Item = (&K, &K)> {
        self.adj.iter().flat_map(|(a, succ)| succ.iter().map(move |b| (a, b)))
    }

    /// Every edge reversed into a precedence pair `(before, after)`.
    pub fn partial_order(&self) -> impl Iterator<Item = (&K, &K)> {
        self.edges().map(|(a, b)| (b, a))
    }

    /// Post-order traversal from `root`. Shared descendants are visited
    /// once per path reaching them. The part of the graph reachable from
    /// `root` must be acyclic.
    pub fn postorder<'g>(&'g self, root: &'g K) -> Postorder<'g, K> {
        Postorder { graph: self, stack: self.start(root) }
    }

    /// Post-order traversal from `root` skipping nodes already produced:
    /// a topological order of everything `root` depends on, prerequisites
    /// first.
    pub fn dfs_topsort<'g>(&'g self, root: &'g K) -> impl Iterator<Item = &'g K> + 'g {
        let mut seen = HashSet::new();
        self.postorder(root).filter(move |k| seen.insert(*k))
    }

    /// Every simple path starting at `root`, in depth-first order. A path
    /// stops short of any node it already contains.
    pub fn dfs_paths<'g>(&'g self, root: &'g K) -> DfsPaths<'g, K> {
        DfsPaths { graph: self, start: self.contains(root).then_some(root), stack: Vec::new() }
    }

    /// Edges in the order a depth-first walk from `root` crosses them.
    pub fn dfs_edges<'g>(&'g self, root: &'g K) -> DfsEdges<'g, K> {
        DfsEdges { graph: self, stack: self.start(root) }
    }

    /// The subgraph reachable from `root`.
    pub fn connected_subgraph(&self, root: &K) -> Self {
        let mut g = Self::from_edges(self.dfs_edges(root).map(|(a, b)| (a.clone(), b.clone())));
        if self.contains(root) {
            g.add_node(root.clone());
        }
        g
    }

    fn start<'g>(&'g self, root: &'g K) -> Vec<(&'g K, usize)> {
        if self.contains(root) {
            vec![(root, 0)]
        } else {
            Vec::new()
        }
    }
}

impl<K: Hash + Eq + Clone + Debug> Digraph<K> {
    /// One valid ordering of every node, prerequisites first.
    pub fn topological_order(&self) -> Result<Vec<&K>> {
        // node indices mirror insertion order in `adj`
        let keys: Vec<&K> = self.adj.keys().collect();
        let mut g: DiGraph<(), ()> = DiGraph::with_capacity(self.len(), 0);
        let nodes: Vec<NodeIndex> = (0..self.len()).map(|_| g.add_node(())).collect();
        for (before, after) in self.partial_order() {
            let u = self.adj.get_index_of(before);
            let v = self.adj.get_index_of(after);
            if let (Some(u), Some(v)) = (u, v) {
                g.add_edge(nodes[u], nodes[v], ());
            }
        }
        match toposort(&g, None) {
            Ok(order) => Ok(order.into_iter().map(|ix| keys[ix.index()]).collect()),
            Err(cycle) => Err(LinextError::Cycle(format!("{:?}", keys[cycle.node_id().index()]))),
        }
    }

    /// Index the graph against a topological order of its own.
    pub fn seed(&self) -> Result<Seeding<K>> {
        let order: Vec<K> = self.topological_order()?.into_iter().cloned().collect();
        debug!(nodes = order.len(), "computed seed ordering");
        Seeding::new(order, self.partial_order())
    }

    /// Index the graph against a caller-chosen ordering of its nodes.
    ///
    /// `order` must list every node exactly once and respect every edge;
    /// otherwise this fails with [`LinextError::SeedMismatch`],
    /// [`LinextError::UnknownItem`] or [`LinextError::SeedOrderingInvalid`].
    pub fn seed_with(&self, order: &[K]) -> Result<Seeding<K>> {
        if order.len() != self.len() {
            return Err(LinextError::SeedMismatch { expected: self.len(), found: order.len() });
        }
        let listed: HashSet<&K> = order.iter().collect();
        if let Some(missing) = self.nodes().find(|k| !listed.contains(k)) {
            return Err(LinextError::UnknownItem(format!("{missing:?}")));
        }
        Seeding::new(order.to_vec(), self.partial_order())
    }
}

pub struct Postorder<'g, K> {
    graph: &'g Digraph<K>,
    stack: Vec<(&'g K, usize)>,
}

impl<'g, K: Hash + Eq + Clone> Iterator for Postorder<'g, K> {
    type Item = &'g K;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let graph = self.graph;
            let top = self.stack.last_mut()?;
            let node = top.0;
            match graph.successors(node).get(top.1) {
                Some(child) => {
                    top.1 += 1;
                    self.stack.push((child, 0));
                }
                None => {
                    self.stack.pop();
                    return Some(node);
                }
            }
        }
    }
}

pub struct DfsEdges<'g, K> {
    graph: &'g Digraph<K>,
    stack: Vec<(&'g K, usize)>,
}

impl<'g, K: Hash + Eq + Clone> Iterator for DfsEdges<'g, K> {
    type Item = (&'g K, &'g K);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let graph = self.graph;
            let top = self.stack.last_mut()?;
            let node = top.0;
            match graph.successors(node).get(top.1) {
                Some(child) => {
                    top.1 += 1;
                    self.stack.push((child, 0));
                    return Some((node, child));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

pub struct DfsPaths<'g, K> {
    graph: &'g Digraph<K>,
    start: Option<&'g K>,
    stack: Vec<(&'g K, usize)>,
}

impl<'g, K> DfsPaths<'g, K> {
    fn path(&self) -> Vec<&'g K> {
        self.stack.iter().map(|&(k, _)| k).collect()
    }
}

impl<'g, K: Hash + Eq + Clone> Iterator for DfsPaths<'g, K> {
    type Item = Vec<&'g K>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.start.take() {
            self.stack.push((root, 0));
            return Some(self.path());
        }
        loop {
            let graph = self.graph;
            let top = self.stack.last_mut()?;
            let node = top.0;
            match graph.successors(node).get(top.1) {
                Some(child) => {
                    top.1 += 1;
                    if self.stack.iter().any(|&(k, _)| k == child) {
                        continue;
                    }
                    self.stack.push((child, 0));
                    return Some(self.path());
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl<K: Serialize> Serialize for Digraph<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.adj.serialize(serializer)
    }
}

impl<'de, K> Deserialize<'de> for Digraph<K>
where
    K: Deserialize<'de> + Hash + Eq + Clone,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = OrderMap::<K, Vec<K>>::deserialize(deserializer)?;
        let mut g = Self::new();
        for (a, succ) in raw {
            g.add_node(a.clone());
            for b in succ {
                g.add_edge(a.clone(), b);
            }
        }
        Ok(g)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn sample() -> Digraph<u32> {
        Digraph::from_edges([(1, 2), (1, 3), (2, 3)])
    }

    fn edge_set<K: Ord + Clone + Hash + Eq>(g: &Digraph<K>) -> BTreeSet<(K, K)> {
        g.edges().map(|(a, b)| (a.clone(), b.clone())).collect()
    }

    #[test]
    fn from_edges_builds_successors() {
        let g = sample();
        assert_eq!(g.successors(&1), &[2, 3]);
        assert_eq!(g.successors(&2), &[3]);
        assert!(g.successors(&3).is_empty());
        assert_eq!(g.len(), 3);
    }

    #[test]
    fn edges_round_trip() {
        let edges: BTreeSet<_> = [(1, 2), (1, 3), (2, 3)].into_iter().collect();
        assert_eq!(edge_set(&sample()), edges);
        let with_dup = Digraph::from_edges([(1, 2), (1, 2)]);
        assert_eq!(with_dup.edges().count(), 1);
    }

    #[test]
    fn clone_is_independent() {
        let g = sample();
        let mut gg = g.clone();
        assert_eq!(edge_set(&g), edge_set(&gg));
        assert!(gg.remove_edge(&2, &3));
        assert!(!gg.remove_edge(&2, &3));
        assert_ne!(edge_set(&g), edge_set(&gg));
        assert_eq!(g.successors(&2), &[3]);
    }

    #[test]
    fn partial_order_reverses_edges() {
        let po: Vec<_> = sample().partial_order().map(|(a, b)| (*a, *b)).collect();
        assert_eq!(po, vec![(2, 1), (3, 1), (3, 2)]);
    }

    #[test]
    fn postorder_revisits_shared_nodes() {
        let g = sample();
        assert_eq!(g.postorder(&1).copied().collect::<Vec<_>>(), vec![3, 2, 3, 1]);
    }

    #[test]
    fn dfs_topsort_skips_seen() {
        let g = sample();
        assert_eq!(g.dfs_topsort(&1).copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    #[test]
    fn dfs_edges_in_discovery_order() {
        let g = sample();
        let edges: Vec<_> = g.dfs_edges(&1).map(|(a, b)| (*a, *b)).collect();
        assert_eq!(edges, vec![(1, 2), (2, 3), (1, 3)]);
    }

    #[test]
    fn dfs_paths_cut_cycles() {
        let g = Digraph::from_edges([(1, 2), (2, 3), (3, 1)]);
        let paths: Vec<Vec<u32>> =
            g.dfs_paths(&1).map(|p| p.into_iter().copied().collect()).collect();
        assert_eq!(paths, vec![vec![1], vec![1, 2], vec![1, 2, 3]]);
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        let n = 100_000u32;
        let g = Digraph::from_edges((0..n).map(|i| (i, i + 1)));
        assert_eq!(g.dfs_topsort(&0).count(), n as usize + 1);
        assert_eq!(g.postorder(&0).next(), Some(&n));
    }

    #[test]
    fn connected_subgraph_from_root() {
        let g = sample();
        assert_eq!(edge_set(&g.connected_subgraph(&1)), edge_set(&g));
        let sub = g.connected_subgraph(&2);
        assert_eq!(edge_set(&sub), edge_set(&Digraph::from_edges([(2, 3)])));
        assert!(!sub.contains(&1));
        let leaf = g.connected_subgraph(&3);
        assert_eq!(leaf.len(), 1);
        assert!(g.connected_subgraph(&9).is_empty());
    }

    #[test]
    fn topological_order_puts_prerequisites_first() {
        let g = sample();
        let order: Vec<u32> = g.topological_order().unwrap().into_iter().copied().collect();
        assert_eq!(order, vec![3, 2, 1]);
    }

    #[test]
    fn topological_order_reports_cycle() {
        let g = Digraph::from_edges([("a", "b"), ("b", "a")]);
        assert!(matches!(g.topological_order(), Err(LinextError::Cycle(_))));
    }

    #[test]
    fn seed_with_rejects_bad_seeds() {
        let g = sample();
        assert_eq!(
            g.seed_with(&[3, 2]).unwrap_err(),
            LinextError::SeedMismatch { expected: 3, found: 2 }
        );
        assert_eq!(g.seed_with(&[3, 2, 9]).unwrap_err(), LinextError::UnknownItem("1".into()));
        assert!(matches!(
            g.seed_with(&[3, 1, 2]).unwrap_err(),
            LinextError::SeedOrderingInvalid { .. }
        ));
    }

    #[test]
    fn serializes_as_adjacency_map() {
        let g = Digraph::from_edges([("b", "a"), ("c", "a")]);
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, r#"{"b":["a"],"a":[],"c":["a"]}"#);
    }

    #[test]
    fn deserialize_adds_missing_targets() {
        let g: Digraph<String> = serde_json::from_str(r#"{"x":["y","z"]}"#).unwrap();
        assert_eq!(g.len(), 3);
        assert!(g.contains(&"z".to_string()));
    }
}
