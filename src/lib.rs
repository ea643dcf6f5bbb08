pub mod actor;
pub mod clustering;
pub mod environment;
pub mod fuzzy;
pub mod graph;
pub mod lexeme;
pub mod logging;
pub mod similarity;
pub mod util;

pub use actor::{Actor, ActorParser};
pub use clustering::{combine, ActorStats, Cluster, ClusterIndex, CombinedActor};
pub use environment::ResolverConfig;
pub use graph::IdentityGraph;
pub use similarity::{SimilarityEvaluator, SimilarityRecord, SimilaritySettings};
