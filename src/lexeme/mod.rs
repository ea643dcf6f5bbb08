//! Lexical segmentation of identifier-like strings into words.

pub mod dictionary;
pub mod report;
pub mod segmenter;
pub mod split;
pub mod terms;
pub mod types;

pub use dictionary::{FstDictionary, WordDictionary};
pub use report::{collect_misses, flatten_lexeme};
pub use segmenter::{LexemeParser, SegmenterSettings};
pub use terms::TermTable;
pub use types::*;

pub const TARGET_LEXEME: &str = "lexeme";
