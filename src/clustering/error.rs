use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ClusterError {
    #[error("No attribution stats recorded for actor {actor_id}")]
    MissingStats { actor_id: String },

    #[error("Cannot combine an empty cluster")]
    EmptyCluster,
}
