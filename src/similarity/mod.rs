pub mod evaluator;
pub mod types;

pub use evaluator::{build_similarity, compare_names, SimilarityEvaluator};
pub use types::*;

pub const TARGET_SIMILARITY: &str = "similarity";
