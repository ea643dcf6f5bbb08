use thiserror::Error;

/// Misuse of the identity graph API
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("Actor not found in graph: {id}")]
    UnknownActor { id: String },

    #[error("Cannot link actor {id} to itself")]
    SelfLoop { id: String },

    #[error("No edge between {id1} and {id2}")]
    EdgeNotFound { id1: String, id2: String },

    #[error("Confidence value {value} is out of range [0.0, 1.0]")]
    ConfidenceOutOfRange { value: f64 },
}
