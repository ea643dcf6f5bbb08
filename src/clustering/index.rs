use std::collections::HashMap;

use super::types::Cluster;
use crate::actor::{actor_id, Actor};

/// Lookup from any member actor id to the primary id of its cluster
#[derive(Debug, Clone, Default)]
pub struct ClusterIndex {
    primaries: HashMap<String, String>,
}

impl ClusterIndex {
    pub fn new(clusters: &[Cluster]) -> Self {
        let primaries = clusters
            .iter()
            .filter_map(|cluster| cluster.primary().map(|primary| (primary, cluster)))
            .flat_map(|(primary, cluster)| {
                cluster
                    .actor_ids()
                    .iter()
                    .map(move |id| (id.clone(), primary.to_string()))
            })
            .collect();
        Self { primaries }
    }

    pub fn primary_of(&self, actor_id: &str) -> Option<&str> {
        self.primaries.get(actor_id).map(String::as_str)
    }

    pub fn primary_of_actor(&self, actor: &Actor) -> Option<&str> {
        self.primary_of(actor.actor_id())
    }

    /// Resolve a recorded name and email to the primary id of its cluster.
    ///
    /// The name must be the actor's display name, so actors whose name was
    /// taken from their email are found through `primary_of_actor`.
    pub fn canonical_id(&self, name: &str, email: &str) -> Option<&str> {
        self.primary_of(&actor_id(name, email))
    }

    pub fn len(&self) -> usize {
        self.primaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primaries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_id() {
        let clusters = vec![
            Cluster::new(vec![
                "john smith <john.smith@example.com>".to_string(),
                "jsmith <jsmith@example.com>".to_string(),
            ]),
            Cluster::new(vec!["jane <jane@example.com>".to_string()]),
        ];
        let index = ClusterIndex::new(&clusters);

        assert_eq!(index.len(), 3);
        assert_eq!(
            index.canonical_id("JSmith", "JSmith@Example.com"),
            Some("john smith <john.smith@example.com>")
        );
        assert_eq!(
            index.canonical_id("Jane", "jane@example.com"),
            Some("jane <jane@example.com>")
        );
        assert_eq!(index.canonical_id("Nobody", "nobody@example.com"), None);
    }
}
