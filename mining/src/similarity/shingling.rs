use std::hash::{Hash, Hasher};

use regex::Regex;
use rustc_hash::{FxHashSet, FxHasher};

use crate::error::MiningError;

/// Unit the shingle window slides over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShingleMode {
    /// Windows of `k` consecutive characters, lowercased.
    Chars,
    /// Windows of `k` consecutive words.
    Words,
}

/// Builds the hashed k-shingle set of each ingested document.
///
/// Shingles are hashed to `u64`; documents are addressed by their 0-based
/// ingestion order.
#[derive(Debug)]
pub struct Shingling {
    k: usize,
    mode: ShingleMode,
    docs: Vec<FxHashSet<u64>>,
    word_pattern: Regex,
}

impl Shingling {
    pub fn new(k: usize, mode: ShingleMode) -> Result<Self, MiningError> {
        if k == 0 {
            return Err(MiningError::InvalidParameter {
                name: "k",
                reason: "shingle length must be at least 1",
            });
        }
        Ok(Shingling {
            k,
            mode,
            docs: Vec::new(),
            word_pattern: Regex::new(r"[A-Za-z0-9']+").expect("pattern is static"),
        })
    }

    /// Ingests a document and returns its id. A document shorter than `k`
    /// units has an empty shingle set.
    pub fn add_document(&mut self, text: &str) -> usize {
        let shingles = match self.mode {
            ShingleMode::Chars => self.char_shingles(text),
            ShingleMode::Words => self.word_shingles(text),
        };
        self.docs.push(shingles);
        self.docs.len() - 1
    }

    fn char_shingles(&self, text: &str) -> FxHashSet<u64> {
        let chars: Vec<char> = text.to_lowercase().chars().collect();
        if chars.len() < self.k {
            return FxHashSet::default();
        }
        (0..=chars.len() - self.k)
            .map(|i| hash_shingle(&chars[i..i + self.k]))
            .collect()
    }

    fn word_shingles(&self, text: &str) -> FxHashSet<u64> {
        let words: Vec<&str> = self
            .word_pattern
            .find_iter(text)
            .map(|m| m.as_str())
            .collect();
        if words.len() < self.k {
            return FxHashSet::default();
        }
        (0..=words.len() - self.k)
            .map(|i| hash_shingle(&words[i..i + self.k]))
            .collect()
    }

    pub fn doc_count(&self) -> usize {
        self.docs.len()
    }

    pub fn shingles(&self, doc: usize) -> Option<&FxHashSet<u64>> {
        self.docs.get(doc)
    }

    pub fn iter_shingles(&self) -> impl Iterator<Item = &FxHashSet<u64>> + '_ {
        self.docs.iter()
    }

    /// Exact Jaccard similarity between two ingested documents. Two empty
    /// shingle sets compare as 0.0.
    pub fn jaccard(&self, a: usize, b: usize) -> Option<f64> {
        let (sa, sb) = (self.docs.get(a)?, self.docs.get(b)?);
        let intersection = sa.intersection(sb).count();
        let union = sa.len() + sb.len() - intersection;
        if union == 0 {
            return Some(0.0);
        }
        Some(intersection as f64 / union as f64)
    }
}

fn hash_shingle<T: Hash + ?Sized>(shingle: &T) -> u64 {
    let mut hasher = FxHasher::default();
    shingle.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod shingling_tests {
    use super::*;

    #[test]
    fn char_shingles_slide_one_character_at_a_time() {
        let mut sh = Shingling::new(3, ShingleMode::Chars).unwrap();
        let doc = sh.add_document("abcab");

        // abc, bca, cab
        assert_eq!(sh.shingles(doc).unwrap().len(), 3);
    }

    #[test]
    fn char_shingles_are_case_insensitive() {
        let mut sh = Shingling::new(4, ShingleMode::Chars).unwrap();
        let a = sh.add_document("Rust Stream");
        let b = sh.add_document("rust stream");

        assert_eq!(sh.jaccard(a, b), Some(1.0));
    }

    #[test]
    fn word_shingles_ignore_punctuation_between_words() {
        let mut sh = Shingling::new(2, ShingleMode::Words).unwrap();
        let a = sh.add_document("counting triangles, in streams");
        let b = sh.add_document("counting triangles in streams");

        assert_eq!(sh.jaccard(a, b), Some(1.0));
    }

    #[test]
    fn disjoint_documents_have_zero_similarity() {
        let mut sh = Shingling::new(3, ShingleMode::Chars).unwrap();
        let a = sh.add_document("aaaaaa");
        let b = sh.add_document("bbbbbb");

        assert_eq!(sh.jaccard(a, b), Some(0.0));
    }

    #[test]
    fn short_document_yields_an_empty_set() {
        let mut sh = Shingling::new(10, ShingleMode::Chars).unwrap();
        let a = sh.add_document("tiny");
        let b = sh.add_document("small");

        assert!(sh.shingles(a).unwrap().is_empty());
        assert_eq!(sh.jaccard(a, b), Some(0.0));
    }

    #[test]
    fn unknown_document_id_is_none() {
        let sh = Shingling::new(3, ShingleMode::Chars).unwrap();
        assert_eq!(sh.jaccard(0, 1), None);
    }

    #[test]
    fn zero_k_is_rejected() {
        assert!(Shingling::new(0, ShingleMode::Words).is_err());
    }

    #[quickcheck]
    fn jaccard_stays_in_the_unit_interval(a: String, b: String) -> bool {
        let mut sh = Shingling::new(2, ShingleMode::Chars).unwrap();
        let (da, db) = (sh.add_document(&a), sh.add_document(&b));
        let j = sh.jaccard(da, db).unwrap();
        (0.0..=1.0).contains(&j)
    }
}
