pub mod email;
pub mod parser;
pub mod roles;
pub mod types;

pub use parser::ActorParser;
pub use roles::RoleTable;
pub use types::*;

pub const TARGET_ACTOR: &str = "actor";
