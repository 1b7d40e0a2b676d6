use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::error::MiningError;

use super::shingling::Shingling;
use super::Signature;

/// 2^61 - 1, a Mersenne prime comfortably above the shingle space the
/// affine hashes permute.
const MERSENNE_PRIME: u64 = (1 << 61) - 1;

/// A family of `n` random affine hash functions `x -> (a*x + b) mod p`.
///
/// The signature of a shingle set is the componentwise minimum of each
/// function over the set; two signatures agree on a component with
/// probability equal to the sets' Jaccard similarity.
#[derive(Debug, Clone)]
pub struct MinHasher {
    funcs: Vec<(u64, u64)>,
}

impl MinHasher {
    pub fn new(n_hashes: usize) -> Result<Self, MiningError> {
        Self::with_rng(n_hashes, StdRng::from_entropy())
    }

    /// Deterministic family for a caller-supplied generator.
    pub fn with_rng<R: Rng>(n_hashes: usize, mut rng: R) -> Result<Self, MiningError> {
        if n_hashes == 0 {
            return Err(MiningError::InvalidParameter {
                name: "n_hashes",
                reason: "a signature needs at least 1 hash function",
            });
        }
        let funcs = (0..n_hashes)
            .map(|_| (rng.gen_range(1..MERSENNE_PRIME), rng.gen_range(0..MERSENNE_PRIME)))
            .collect();
        Ok(MinHasher { funcs })
    }

    pub fn n_hashes(&self) -> usize {
        self.funcs.len()
    }

    /// Signature-matrix column for one shingle set. An empty set maps every
    /// component to `u64::MAX`.
    pub fn signature(&self, shingles: &FxHashSet<u64>) -> Signature {
        self.funcs
            .iter()
            .map(|&(a, b)| {
                shingles
                    .iter()
                    .map(|&s| affine(a, b, s))
                    .min()
                    .unwrap_or(u64::MAX)
            })
            .collect()
    }

    /// The whole signature matrix, one column per ingested document.
    pub fn signatures(&self, shingling: &Shingling) -> Vec<Signature> {
        let sets: Vec<_> = shingling.iter_shingles().collect();
        sets.into_par_iter().map(|s| self.signature(s)).collect()
    }
}

/// Fraction of components on which the two signature columns agree.
pub fn signature_similarity(a: &Signature, b: &Signature) -> f64 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }
    let agreeing = a.iter().zip(b).filter(|(x, y)| x == y).count();
    agreeing as f64 / a.len() as f64
}

fn affine(a: u64, b: u64, x: u64) -> u64 {
    ((a as u128 * x as u128 + b as u128) % MERSENNE_PRIME as u128) as u64
}
