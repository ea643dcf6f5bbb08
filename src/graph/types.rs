use serde::Serialize;

use crate::similarity::SimilarityRecord;

/// Why two actors are connected.
///
/// Inferred edges carry the similarity record that justified them, manual
/// links carry a confidence; a manual link on an inferred edge keeps both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentityEdge {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<SimilarityRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl IdentityEdge {
    pub fn inferred(similarity: SimilarityRecord) -> Self {
        IdentityEdge {
            similarity: Some(similarity),
            confidence: None,
        }
    }

    pub fn manual(confidence: f64) -> Self {
        IdentityEdge {
            similarity: None,
            confidence: Some(confidence),
        }
    }

    pub fn is_manual(&self) -> bool {
        self.confidence.is_some()
    }
}

/// One edge as seen from a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeReport {
    pub source: String,
    pub target: String,
    pub edge: IdentityEdge,
}

/// A group of two or more connected actors and the edges inside it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupReport {
    pub actor_ids: Vec<String>,
    pub edges: Vec<EdgeReport>,
}
