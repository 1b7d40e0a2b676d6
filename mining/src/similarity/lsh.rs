use std::hash::{Hash, Hasher};

use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet, FxHasher};

use crate::error::MiningError;

use super::minhash::signature_similarity;
use super::Signature;

/// Banding-based candidate search over a MinHash signature matrix.
///
/// Signatures are split into `bands` contiguous row ranges; two documents
/// become candidates when any band hashes them into the same bucket. All
/// columns are expected to come from the same [`MinHasher`] and therefore
/// share a length.
///
/// [`MinHasher`]: super::MinHasher
#[derive(Debug, Clone, Copy)]
pub struct Lsh {
    bands: usize,
}

impl Lsh {
    pub fn new(bands: usize) -> Result<Self, MiningError> {
        if bands == 0 {
            return Err(MiningError::InvalidParameter {
                name: "bands",
                reason: "banding needs at least 1 band",
            });
        }
        Ok(Lsh { bands })
    }

    /// Document pairs colliding in at least one band, deduplicated, smaller
    /// id first, sorted.
    pub fn candidate_pairs(&self, signatures: &[Signature]) -> Vec<(usize, usize)> {
        let Some(first) = signatures.first() else {
            return Vec::new();
        };
        let rows = (first.len() / self.bands).max(1);

        let mut pairs = FxHashSet::default();
        for band in 0..self.bands {
            let start = band * rows;
            if start >= first.len() {
                break;
            }
            let end = (start + rows).min(first.len());

            let mut buckets: FxHashMap<u64, Vec<usize>> = FxHashMap::default();
            for (doc, signature) in signatures.iter().enumerate() {
                buckets
                    .entry(hash_band(&signature[start..end]))
                    .or_default()
                    .push(doc);
            }
            for docs in buckets.values() {
                // bucket members are in ascending doc order already
                for (a, b) in docs.iter().tuple_combinations() {
                    pairs.insert((*a, *b));
                }
            }
        }

        let mut out: Vec<_> = pairs.into_iter().collect();
        out.sort_unstable();
        out
    }

    /// Candidate pairs whose full-signature similarity clears `threshold`,
    /// with the similarity attached.
    pub fn similar_pairs(
        &self,
        signatures: &[Signature],
        threshold: f64,
    ) -> Vec<(usize, usize, f64)> {
        self.candidate_pairs(signatures)
            .into_iter()
            .filter_map(|(a, b)| {
                let s = signature_similarity(&signatures[a], &signatures[b]);
                (s >= threshold).then_some((a, b, s))
            })
            .collect()
    }
}

fn hash_band(rows: &[u64]) -> u64 {
    let mut hasher = FxHasher::default();
    rows.hash(&mut hasher);
    hasher.finish()
}
