use crate::counters::TriangleCounters;
use crate::edge::Edge;
use crate::graph::SampledGraph;
use crate::Variant;

/// Counter-update hooks invoked by the stream orchestrator.
///
/// Every hook runs against the pre-insertion graph: when common neighbours
/// of the arriving edge are collected, its endpoints must not yet be
/// adjacent.
pub(crate) trait CountingPolicy {
    /// Runs once per arriving edge, before the sampling decision.
    fn on_arrival(
        &self,
        counters: &mut TriangleCounters,
        graph: &SampledGraph,
        edge: &Edge,
        t: u64,
        capacity: usize,
    );

    /// Runs when `edge` won admission to the sample.
    fn on_admit(&self, counters: &mut TriangleCounters, graph: &SampledGraph, edge: &Edge);

    /// Runs when `victim` was evicted to make room, after its removal from
    /// the graph.
    fn on_evict(&self, counters: &mut TriangleCounters, graph: &SampledGraph, victim: &Edge);
}

pub(crate) fn for_variant(variant: Variant) -> &'static dyn CountingPolicy {
    match variant {
        Variant::Base => &BaseCounting,
        Variant::Impr => &ImprCounting,
    }
}

/// Counters move only when the sample itself changes.
struct BaseCounting;

impl CountingPolicy for BaseCounting {
    fn on_arrival(
        &self,
        _counters: &mut TriangleCounters,
        _graph: &SampledGraph,
        _edge: &Edge,
        _t: u64,
        _capacity: usize,
    ) {
    }

    fn on_admit(&self, counters: &mut TriangleCounters, graph: &SampledGraph, edge: &Edge) {
        let common = graph.common_neighbours(edge.u(), edge.v());
        counters.credit(edge, &common, 1.0);
    }

    fn on_evict(&self, counters: &mut TriangleCounters, graph: &SampledGraph, victim: &Edge) {
        let common = graph.common_neighbours(victim.u(), victim.v());
        counters.debit(victim, &common);
    }
}

/// Every arrival contributes with weight [`arrival_weight`]; evictions never
/// roll the counters back.
struct ImprCounting;

impl CountingPolicy for ImprCounting {
    fn on_arrival(
        &self,
        counters: &mut TriangleCounters,
        graph: &SampledGraph,
        edge: &Edge,
        t: u64,
        capacity: usize,
    ) {
        let common = graph.common_neighbours(edge.u(), edge.v());
        if common.is_empty() {
            return;
        }
        counters.credit(edge, &common, arrival_weight(t, capacity));
    }

    fn on_admit(&self, _counters: &mut TriangleCounters, _graph: &SampledGraph, _edge: &Edge) {}

    fn on_evict(&self, _counters: &mut TriangleCounters, _graph: &SampledGraph, _victim: &Edge) {}
}

/// `max(1, (t-1)(t-2) / (M(M-1)))`, non-decreasing in `t` for fixed `M`.
///
/// Computed in floating point: `t` may be below 2, and for `M = 1` the
/// denominator degenerates (that case is unreachable through
/// [`ImprCounting`], since a one-edge graph has no common neighbours).
pub(crate) fn arrival_weight(t: u64, capacity: usize) -> f64 {
    let t = t as f64;
    let m = capacity as f64;
    ((t - 1.0) * (t - 2.0) / (m * (m - 1.0))).max(1.0)
}
