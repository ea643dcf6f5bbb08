use serde::{Deserialize, Serialize};
use std::fmt;

/// How a segment of a lexeme was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Term,
    Dict,
    Correction,
    Miss,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Term => write!(f, "term"),
            SegmentKind::Dict => write!(f, "dict"),
            SegmentKind::Correction => write!(f, "correction"),
            SegmentKind::Miss => write!(f, "miss"),
        }
    }
}

/// One word-length slice of a lexeme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,

    // Source text exactly as it appeared in the lexeme
    pub text: String,

    // Canonical value the text resolved to, absent for misses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapped_value: Option<String>,

    // Ranked (candidate, score) pairs that led to the resolution
    pub distances: Vec<(String, u8)>,
}

impl Segment {
    pub fn term(text: &str, mapped_value: &str, distances: Vec<(String, u8)>) -> Self {
        Segment {
            kind: SegmentKind::Term,
            text: text.to_string(),
            mapped_value: Some(mapped_value.to_string()),
            distances,
        }
    }

    pub fn dict(text: &str, word: &str) -> Self {
        Segment {
            kind: SegmentKind::Dict,
            text: text.to_string(),
            mapped_value: Some(word.to_string()),
            distances: vec![(word.to_string(), 100)],
        }
    }

    pub fn correction(text: &str, word: &str, distances: Vec<(String, u8)>) -> Self {
        Segment {
            kind: SegmentKind::Correction,
            text: text.to_string(),
            mapped_value: Some(word.to_string()),
            distances,
        }
    }

    pub fn miss(text: &str) -> Self {
        Segment {
            kind: SegmentKind::Miss,
            text: text.to_string(),
            mapped_value: None,
            distances: Vec::new(),
        }
    }

    pub fn is_miss(&self) -> bool {
        self.kind == SegmentKind::Miss
    }

    /// Mapped value when resolved, otherwise the verbatim text
    pub fn value(&self) -> &str {
        self.mapped_value.as_deref().unwrap_or(&self.text)
    }
}

/// A structural piece of a lexeme together with its word segments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubLexeme {
    pub text: String,
    pub segments: Vec<Segment>,
}

/// An identifier-like token after structural splitting and segmentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexeme {
    pub original_text: String,
    pub parts: Vec<SubLexeme>,
}

impl Lexeme {
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.parts.iter().flat_map(|part| part.segments.iter())
    }

    pub fn has_misses(&self) -> bool {
        self.segments().any(Segment::is_miss)
    }
}
