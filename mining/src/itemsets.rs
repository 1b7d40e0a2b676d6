//! Apriori frequent-itemset mining over integer-labelled baskets.

use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::MiningError;

pub type Item = u32;
pub type Basket = Vec<Item>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequentItemset {
    /// Items in ascending order.
    pub items: Vec<Item>,
    /// Number of baskets containing every item of the set.
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssociationRule {
    pub antecedent: Vec<Item>,
    pub consequent: Vec<Item>,
    /// Support of antecedent ∪ consequent.
    pub support: usize,
    pub confidence: f64,
}

/// Level-wise frequent-itemset search: candidates of size k are joined from
/// frequent itemsets of size k-1 sharing a prefix, then counted against the
/// baskets and filtered by the support threshold.
#[derive(Debug, Clone, Copy)]
pub struct Apriori {
    min_support: usize,
}

impl Apriori {
    /// `min_support` is an absolute basket count. Fractional thresholds map
    /// to `(fraction * baskets.len()).ceil()` on the caller side.
    pub fn new(min_support: usize) -> Result<Self, MiningError> {
        if min_support == 0 {
            return Err(MiningError::InvalidParameter {
                name: "min_support",
                reason: "a frequent itemset needs support of at least 1",
            });
        }
        Ok(Apriori { min_support })
    }

    /// All frequent itemsets of every size, in discovery order (singletons
    /// first, then pairs, ...).
    pub fn frequent_itemsets(&self, baskets: &[Basket]) -> Vec<FrequentItemset> {
        let basket_sets: Vec<FxHashSet<Item>> = baskets
            .iter()
            .map(|b| b.iter().copied().collect())
            .collect();

        // pass 1: frequent singletons
        let mut singleton_support: FxHashMap<Item, usize> = FxHashMap::default();
        for basket in &basket_sets {
            for &item in basket {
                *singleton_support.entry(item).or_insert(0) += 1;
            }
        }
        let mut frequent: Vec<FrequentItemset> = singleton_support
            .into_iter()
            .filter(|&(_, support)| support >= self.min_support)
            .map(|(item, support)| FrequentItemset {
                items: vec![item],
                support,
            })
            .collect();
        frequent.sort_by(|a, b| a.items.cmp(&b.items));

        // passes k >= 2
        let mut result = frequent.clone();
        while !frequent.is_empty() {
            let candidates = join_candidates(&frequent);
            if candidates.is_empty() {
                break;
            }

            let mut support = vec![0usize; candidates.len()];
            for basket in &basket_sets {
                for (i, candidate) in candidates.iter().enumerate() {
                    if candidate.iter().all(|item| basket.contains(item)) {
                        support[i] += 1;
                    }
                }
            }

            frequent = candidates
                .into_iter()
                .zip(support)
                .filter(|&(_, s)| s >= self.min_support)
                .map(|(items, support)| FrequentItemset { items, support })
                .collect();
            result.extend(frequent.iter().cloned());
        }

        result
    }

    /// Association rules `antecedent -> consequent` over every frequent
    /// itemset of size >= 2, keeping rules whose confidence clears
    /// `min_confidence`.
    pub fn association_rules(
        &self,
        baskets: &[Basket],
        min_confidence: f64,
    ) -> Vec<AssociationRule> {
        let frequent = self.frequent_itemsets(baskets);
        let support_of: FxHashMap<&[Item], usize> = frequent
            .iter()
            .map(|f| (f.items.as_slice(), f.support))
            .collect();

        let mut rules = Vec::new();
        for itemset in &frequent {
            if itemset.items.len() < 2 {
                continue;
            }
            for size in 1..itemset.items.len() {
                for antecedent in itemset.items.iter().copied().combinations(size) {
                    // subsets of a frequent itemset are themselves frequent
                    let Some(&antecedent_support) = support_of.get(antecedent.as_slice()) else {
                        continue;
                    };
                    let confidence = itemset.support as f64 / antecedent_support as f64;
                    if confidence >= min_confidence {
                        let consequent: Vec<Item> = itemset
                            .items
                            .iter()
                            .copied()
                            .filter(|item| !antecedent.contains(item))
                            .collect();
                        rules.push(AssociationRule {
                            antecedent,
                            consequent,
                            support: itemset.support,
                            confidence,
                        });
                    }
                }
            }
        }
        rules
    }
}

/// Joins sorted frequent (k-1)-itemsets sharing all but their last item into
/// k-candidates. Sorted, deduplicated input yields each candidate once.
fn join_candidates(frequent: &[FrequentItemset]) -> Vec<Basket> {
    let mut candidates = Vec::new();
    for (i, a) in frequent.iter().enumerate() {
        let prefix = &a.items[..a.items.len() - 1];
        for b in &frequent[i + 1..] {
            if b.items[..b.items.len() - 1] != *prefix {
                // sorted input: once the prefix changes it never comes back
                break;
            }
            if let (Some(&last_a), Some(&last_b)) = (a.items.last(), b.items.last()) {
                if last_a != last_b {
                    let mut candidate = a.items.clone();
                    candidate.push(last_b);
                    candidates.push(candidate);
                }
            }
        }
    }
    candidates
}
