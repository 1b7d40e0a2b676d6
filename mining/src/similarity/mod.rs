//! Near-duplicate detection: k-shingling of documents, MinHash signatures
//! and locality-sensitive hashing over the signature matrix.

pub mod lsh;
pub mod minhash;
pub mod shingling;

pub use lsh::Lsh;
pub use minhash::{signature_similarity, MinHasher};
pub use shingling::{ShingleMode, Shingling};

/// One signature-matrix column: the MinHash sketch of a single document.
pub type Signature = Vec<u64>;
