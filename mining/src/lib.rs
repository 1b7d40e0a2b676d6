#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

pub mod error;
pub mod graphgen;
pub mod itemsets;
pub mod loaders;
pub mod similarity;

pub use error::MiningError;
