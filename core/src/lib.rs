#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

mod counters;
mod error;
mod policy;
pub mod edge;
pub mod graph;
pub mod reservoir;
pub mod stream;

pub use edge::Edge;
pub use error::GraphError;
pub use graph::SampledGraph;
pub use reservoir::{Admission, EdgeReservoir};
pub use stream::TriangleStream;

/// Selects the counter-update policy of a [`TriangleStream`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Counters move only when the sample itself changes: +1 per common
    /// neighbour on admission, -1 on eviction.
    Base,
    /// Counters take a weighted update on every arrival, admitted or not,
    /// and never decrement on eviction.
    Impr,
}
