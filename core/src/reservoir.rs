use rand::Rng;
use rustc_hash::FxHashMap;

use crate::edge::Edge;
use crate::error::GraphError;

/// Outcome of offering one stream edge to the reservoir.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    /// Capacity not yet reached; the edge was admitted outright.
    Kept,
    /// The coin came up heads; the edge was admitted and the returned edge
    /// was evicted to make room.
    Replaced(Edge),
    /// The coin came up tails; the sample is unchanged.
    Rejected,
}

/// Fixed-capacity uniform sample of the edges seen so far.
///
/// Backed by a vector mirrored by an edge-to-index map: eviction picks are
/// uniform over the current contents via a random index and swap-remove,
/// never via set-iteration order.
#[derive(Debug, Clone)]
pub struct EdgeReservoir {
    capacity: usize,
    edges: Vec<Edge>,
    index: FxHashMap<Edge, usize>,
}

impl EdgeReservoir {
    pub fn new(capacity: usize) -> Result<Self, GraphError> {
        if capacity == 0 {
            return Err(GraphError::InvalidCapacity(capacity));
        }
        Ok(EdgeReservoir {
            capacity,
            edges: Vec::with_capacity(capacity),
            index: FxHashMap::default(),
        })
    }

    /// Decides the fate of the edge arriving at stream time `t` and updates
    /// the sample bookkeeping accordingly. Graph and counter maintenance are
    /// the caller's job: the required ordering differs per counting policy.
    pub fn admit<R: Rng>(&mut self, edge: Edge, t: u64, rng: &mut R) -> Admission {
        if self.index.contains_key(&edge) {
            // duplicate of a currently-sampled edge; the stream is assumed
            // simple, so it is not given a second slot
            return Admission::Rejected;
        }
        if t <= self.capacity as u64 {
            self.insert(edge);
            return Admission::Kept;
        }
        if rng.gen_bool(self.capacity as f64 / t as f64) {
            let victim = self.evict_uniform(rng);
            self.insert(edge);
            Admission::Replaced(victim)
        } else {
            Admission::Rejected
        }
    }

    fn insert(&mut self, edge: Edge) {
        debug_assert!(self.edges.len() < self.capacity);
        self.index.insert(edge, self.edges.len());
        self.edges.push(edge);
    }

    fn evict_uniform<R: Rng>(&mut self, rng: &mut R) -> Edge {
        // t > capacity implies a full reservoir
        debug_assert!(!self.edges.is_empty(), "eviction from an empty sample");
        let pos = rng.gen_range(0..self.edges.len());
        let victim = self.edges.swap_remove(pos);
        self.index.remove(&victim);
        if let Some(moved) = self.edges.get(pos) {
            self.index.insert(*moved, pos);
        }
        victim
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains(&self, edge: &Edge) -> bool {
        self.index.contains_key(edge)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter()
    }
}
