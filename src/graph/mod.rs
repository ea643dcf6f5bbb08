pub mod error;
pub mod store;
pub mod types;

pub use error::GraphError;
pub use store::IdentityGraph;
pub use types::*;

pub const TARGET_GRAPH: &str = "actor_graph";
