use rustc_hash::{FxHashMap, FxHashSet};

use crate::edge::Edge;

/// Adjacency view of the edges currently held in the sample.
///
/// Invariant: symmetric, `v in neighbours(u)` iff `u in neighbours(v)`, and
/// the edge set is exactly the sample contents.
#[derive(Debug, Clone, Default)]
pub struct SampledGraph {
    adj: FxHashMap<u64, FxHashSet<u64>>,
    n_edges: usize,
}

impl SampledGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Links both endpoints, creating vertex entries on demand. Re-inserting
    /// an edge already present leaves the graph unchanged.
    pub fn insert_edge(&mut self, edge: &Edge) {
        let fresh = self.adj.entry(edge.u()).or_default().insert(edge.v());
        self.adj.entry(edge.v()).or_default().insert(edge.u());
        if fresh {
            self.n_edges += 1;
        }
    }

    /// Unlinks both endpoints, dropping vertex entries that become isolated.
    /// Removing an absent edge is a no-op: the improved counting policy lets
    /// the sample drop edges whose contributions the counters keep.
    pub fn remove_edge(&mut self, edge: &Edge) {
        let mut present = false;
        if let Some(ns) = self.adj.get_mut(&edge.u()) {
            present = ns.remove(&edge.v());
            if ns.is_empty() {
                self.adj.remove(&edge.u());
            }
        }
        if let Some(ns) = self.adj.get_mut(&edge.v()) {
            ns.remove(&edge.u());
            if ns.is_empty() {
                self.adj.remove(&edge.v());
            }
        }
        if present {
            self.n_edges -= 1;
        }
    }

    /// Neighbours of `v` in the sampled graph; empty for unknown vertices.
    pub fn neighbours(&self, v: u64) -> impl Iterator<Item = u64> + '_ {
        self.adj.get(&v).into_iter().flatten().copied()
    }

    /// Vertices adjacent to both `u` and `v`. Each one closes a triangle
    /// with the edge `{u, v}`.
    pub fn common_neighbours(&self, u: u64, v: u64) -> Vec<u64> {
        match (self.adj.get(&u), self.adj.get(&v)) {
            (Some(a), Some(b)) => {
                let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
                small.iter().filter(|w| large.contains(w)).copied().collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn has_edge(&self, edge: &Edge) -> bool {
        self.adj
            .get(&edge.u())
            .map_or(false, |ns| ns.contains(&edge.v()))
    }

    pub fn degree(&self, v: u64) -> usize {
        self.adj.get(&v).map_or(0, |ns| ns.len())
    }

    pub fn len_vertices(&self) -> usize {
        self.adj.len()
    }

    pub fn len_edges(&self) -> usize {
        self.n_edges
    }
}
