use std::fmt::{self, Display};

use crate::error::GraphError;

/// An unordered pair of distinct vertex ids.
///
/// Endpoints are stored smallest-first, so `{u, v}` and `{v, u}` compare and
/// hash identically. Self-loops are unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    u: u64,
    v: u64,
}

impl Edge {
    pub fn new(u: u64, v: u64) -> Result<Self, GraphError> {
        if u == v {
            return Err(GraphError::InvalidEdge { u, v });
        }
        Ok(Edge {
            u: u.min(v),
            v: u.max(v),
        })
    }

    /// The smaller endpoint.
    pub fn u(&self) -> u64 {
        self.u
    }

    /// The larger endpoint.
    pub fn v(&self) -> u64 {
        self.v
    }

    pub fn endpoints(&self) -> (u64, u64) {
        (self.u, self.v)
    }

    pub fn is_incident(&self, vertex: u64) -> bool {
        self.u == vertex || self.v == vertex
    }
}

impl TryFrom<(u64, u64)> for Edge {
    type Error = GraphError;

    fn try_from((u, v): (u64, u64)) -> Result<Self, Self::Error> {
        Edge::new(u, v)
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.u, self.v)
    }
}
