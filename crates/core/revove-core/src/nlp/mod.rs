//! Text matching helpers

pub mod similarity;

pub use similarity::{levenshtein, similarity};
