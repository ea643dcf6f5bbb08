use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use super::error::ClusterError;
use super::types::{ActorStats, CombinedActor, Cluster};
use super::TARGET_CLUSTERING;

/// Fold a cluster into one identity.
///
/// The primary member keeps its name and email; every count is summed
/// across the members. Each member must have stats.
pub fn combine(
    cluster: &Cluster,
    stats: &HashMap<String, ActorStats>,
) -> Result<CombinedActor, ClusterError> {
    let primary_id = cluster.primary().ok_or(ClusterError::EmptyCluster)?;
    let primary = lookup(stats, primary_id)?;

    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for id in cluster.actor_ids() {
        for (key, count) in &lookup(stats, id)?.counts {
            *counts.entry(key.clone()).or_default() += count;
        }
    }

    debug!(
        target: TARGET_CLUSTERING,
        "Combined {} actors into {}",
        cluster.len(),
        primary_id
    );

    Ok(CombinedActor {
        primary_id: primary_id.to_string(),
        name: primary.name.clone(),
        email: primary.email.clone(),
        member_ids: cluster.actor_ids().to_vec(),
        counts,
    })
}

fn lookup<'a>(
    stats: &'a HashMap<String, ActorStats>,
    actor_id: &str,
) -> Result<&'a ActorStats, ClusterError> {
    stats.get(actor_id).ok_or_else(|| ClusterError::MissingStats {
        actor_id: actor_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stats(id: &str, name: &str, email: &str, counts: &[(&str, u64)]) -> ActorStats {
        ActorStats {
            actor_id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            counts: counts.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    fn table(entries: Vec<ActorStats>) -> HashMap<String, ActorStats> {
        entries.into_iter().map(|s| (s.actor_id.clone(), s)).collect()
    }

    #[test]
    fn test_combine_sums_counts() {
        let stats = table(vec![
            stats(
                "john smith <john@example.com>",
                "John Smith",
                "john@example.com",
                &[("author_commits", 10), ("committer_commits", 4)],
            ),
            stats(
                "jsmith <jsmith@example.com>",
                "jsmith",
                "jsmith@example.com",
                &[("author_commits", 3), ("reviews", 2)],
            ),
        ]);
        let cluster = Cluster::new(vec![
            "john smith <john@example.com>".to_string(),
            "jsmith <jsmith@example.com>".to_string(),
        ]);

        let combined = combine(&cluster, &stats).unwrap();
        assert_eq!(combined.primary_id, "john smith <john@example.com>");
        assert_eq!(combined.name, "John Smith");
        assert_eq!(combined.email, "john@example.com");
        assert_eq!(combined.member_ids.len(), 2);
        assert_eq!(
            combined.counts,
            BTreeMap::from([
                ("author_commits".to_string(), 13),
                ("committer_commits".to_string(), 4),
                ("reviews".to_string(), 2),
            ])
        );
    }

    #[test]
    fn test_combine_errors() {
        let stats = table(vec![stats("a <a@x.test>", "a", "a@x.test", &[])]);

        assert_eq!(
            combine(&Cluster::new(Vec::new()), &stats),
            Err(ClusterError::EmptyCluster)
        );
        assert_eq!(
            combine(
                &Cluster::new(vec!["a <a@x.test>".to_string(), "b <b@x.test>".to_string()]),
                &stats
            ),
            Err(ClusterError::MissingStats {
                actor_id: "b <b@x.test>".to_string()
            })
        );
    }
}
