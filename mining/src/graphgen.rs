//! Random simple-graph edge streams for tests, benches and demos.

use rand::Rng;
use rustc_hash::FxHashSet;

use eddy_core::Edge;

/// Uniformly random stream of `n_edges` distinct edges over the vertex ids
/// `0..n_vertices`.
///
/// Panics if fewer than two vertices are given or the requested edge count
/// exceeds `n_vertices * (n_vertices - 1) / 2`.
pub fn random_edge_stream<R: Rng>(n_vertices: u64, n_edges: usize, rng: &mut R) -> Vec<Edge> {
    assert!(n_vertices >= 2, "a simple edge needs two distinct vertices");
    let possible = n_vertices * (n_vertices - 1) / 2;
    assert!(
        n_edges as u64 <= possible,
        "requested {n_edges} edges but only {possible} exist"
    );

    let mut seen = FxHashSet::default();
    let mut stream = Vec::with_capacity(n_edges);
    while stream.len() < n_edges {
        let u = rng.gen_range(0..n_vertices);
        let v = rng.gen_range(0..n_vertices);
        if u == v {
            continue;
        }
        let edge = Edge::new(u, v).expect("endpoints are distinct");
        if seen.insert(edge) {
            stream.push(edge);
        }
    }
    stream
}
