use rustc_hash::FxHashMap;

use crate::edge::Edge;

/// Global and per-vertex triangle accumulators.
#[derive(Debug, Clone, Default)]
pub(crate) struct TriangleCounters {
    global: f64,
    local: FxHashMap<u64, f64>,
}

impl TriangleCounters {
    pub(crate) fn global(&self) -> f64 {
        self.global
    }

    pub(crate) fn local(&self, v: u64) -> f64 {
        self.local.get(&v).copied().unwrap_or(0.0)
    }

    pub(crate) fn locals(&self) -> impl Iterator<Item = (u64, f64)> + '_ {
        self.local.iter().map(|(v, c)| (*v, *c))
    }

    /// Adds `weight` per common neighbour to the global counter and to the
    /// local counters of both endpoints and of the common neighbour itself.
    pub(crate) fn credit(&mut self, edge: &Edge, common: &[u64], weight: f64) {
        for &w in common {
            self.global += weight;
            for vertex in [w, edge.u(), edge.v()] {
                *self.local.entry(vertex).or_insert(0.0) += weight;
            }
        }
    }

    /// Unit decrement per common neighbour, mirroring [`credit`]. Counters
    /// that floating error would drive below zero are clamped at zero.
    ///
    /// [`credit`]: Self::credit
    pub(crate) fn debit(&mut self, edge: &Edge, common: &[u64]) {
        for &w in common {
            self.global = step_down(self.global);
            for vertex in [w, edge.u(), edge.v()] {
                let c = self.local.entry(vertex).or_insert(0.0);
                *c = step_down(*c);
            }
        }
    }
}

fn step_down(value: f64) -> f64 {
    let next = value - 1.0;
    if next < 0.0 {
        log::warn!("triangle counter would go negative ({value} - 1), clamping to 0");
        0.0
    } else {
        next
    }
}
