use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    #[error("invalid edge ({u}, {v}): endpoints must differ")]
    InvalidEdge { u: u64, v: u64 },

    #[error("sample capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),
}
