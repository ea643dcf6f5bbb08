// Module declarations
pub mod combine;
pub mod components;
pub mod error;
pub mod index;
pub mod types;

pub use combine::combine;
pub use components::connected_components;
pub use error::ClusterError;
pub use index::ClusterIndex;
pub use types::*;

pub const TARGET_CLUSTERING: &str = "clustering";
