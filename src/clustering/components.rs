use std::collections::{HashSet, VecDeque};

use tracing::info;

use super::types::Cluster;
use super::TARGET_CLUSTERING;
use crate::graph::IdentityGraph;

/// Partition every actor in the graph into connected components.
///
/// Any edge merges its endpoints, inferred or manual, however weak.
/// Components come out in the order of their earliest member and members
/// are ordered by insertion, so the result is stable for a given input order.
pub fn connected_components(graph: &IdentityGraph) -> Vec<Cluster> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(graph.len());
    let mut clusters = Vec::new();

    for actor in graph.actors() {
        let start = actor.actor_id();
        if !seen.insert(start) {
            continue;
        }

        let mut members = vec![start];
        let mut queue = VecDeque::from([start]);
        while let Some(id) = queue.pop_front() {
            for neighbor in graph.neighbors(id) {
                if seen.insert(neighbor) {
                    members.push(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }

        members.sort_by_key(|id| graph.insertion_index(id).unwrap_or(usize::MAX));
        clusters.push(Cluster::new(
            members.into_iter().map(str::to_string).collect(),
        ));
    }

    info!(
        target: TARGET_CLUSTERING,
        "Grouped {} actors into {} clusters",
        graph.len(),
        clusters.len()
    );
    clusters
}
