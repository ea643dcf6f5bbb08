use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info};

use super::error::GraphError;
use super::types::{EdgeReport, GroupReport, IdentityEdge};
use super::TARGET_GRAPH;
use crate::actor::Actor;
use crate::clustering::{connected_components, Cluster};
use crate::similarity::SimilarityEvaluator;

/// Undirected graph of actors joined by inferred similarity or manual links.
///
/// Nodes and edges keep insertion order so clustering results are
/// deterministic. The graph is not synchronized; concurrent writers need
/// their own graph or an external lock.
pub struct IdentityGraph {
    evaluator: SimilarityEvaluator,
    nodes: IndexMap<String, Actor>,
    adjacency: IndexMap<String, IndexSet<String>>,
    edges: IndexMap<(String, String), IdentityEdge>,
}

impl Default for IdentityGraph {
    fn default() -> Self {
        Self::new(SimilarityEvaluator::default())
    }
}

impl IdentityGraph {
    pub fn new(evaluator: SimilarityEvaluator) -> Self {
        Self {
            evaluator,
            nodes: IndexMap::new(),
            adjacency: IndexMap::new(),
            edges: IndexMap::new(),
        }
    }

    pub fn evaluator(&self) -> &SimilarityEvaluator {
        &self.evaluator
    }

    /// Insert an actor and, with `link_similar`, connect it to every
    /// existing actor the evaluator considers possibly identical.
    ///
    /// Returns the number of edges created; an already known actor is left
    /// untouched and yields 0.
    pub fn add_actor(&mut self, actor: Actor, link_similar: bool) -> usize {
        let id = actor.actor_id().to_string();
        if self.nodes.contains_key(&id) {
            return 0;
        }

        let similar: Vec<(String, IdentityEdge)> = if link_similar {
            self.nodes
                .values()
                .map(|other| (other.actor_id(), self.evaluator.evaluate(&actor, other)))
                .filter(|(_, similarity)| similarity.possible)
                .map(|(other_id, similarity)| {
                    (other_id.to_string(), IdentityEdge::inferred(similarity))
                })
                .collect()
        } else {
            Vec::new()
        };

        self.nodes.insert(id.clone(), actor);
        self.adjacency.insert(id.clone(), IndexSet::new());

        let linked = similar.len();
        for (other_id, edge) in similar {
            debug!(target: TARGET_GRAPH, "Linking {} ~ {}", id, other_id);
            self.connect(&id, &other_id);
            self.edges.insert(edge_key(&id, &other_id), edge);
        }
        linked
    }

    /// Insert many actors in order, linking each against those before it
    pub fn extend<I>(&mut self, actors: I) -> usize
    where
        I: IntoIterator<Item = Actor>,
    {
        let linked: usize = actors
            .into_iter()
            .map(|actor| self.add_actor(actor, true))
            .sum();
        info!(
            target: TARGET_GRAPH,
            "Identity graph holds {} actors and {} edges ({} inferred in this batch)",
            self.nodes.len(),
            self.edges.len(),
            linked
        );
        linked
    }

    /// Manually assert that two actors are the same identity.
    ///
    /// An existing inferred edge keeps its similarity record and gains the
    /// confidence.
    pub fn link(&mut self, id1: &str, id2: &str, confidence: f64) -> Result<(), GraphError> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(GraphError::ConfidenceOutOfRange { value: confidence });
        }
        self.require_pair(id1, id2)?;

        self.connect(id1, id2);
        self.edges
            .entry(edge_key(id1, id2))
            .and_modify(|edge| edge.confidence = Some(confidence))
            .or_insert_with(|| IdentityEdge::manual(confidence));
        debug!(
            target: TARGET_GRAPH,
            "Manually linked {} ~ {} with confidence {}", id1, id2, confidence
        );
        Ok(())
    }

    /// Remove the edge between two actors, whatever its origin
    pub fn unlink(&mut self, id1: &str, id2: &str) -> Result<IdentityEdge, GraphError> {
        self.require_pair(id1, id2)?;

        let edge = self
            .edges
            .shift_remove(&edge_key(id1, id2))
            .ok_or_else(|| GraphError::EdgeNotFound {
                id1: id1.to_string(),
                id2: id2.to_string(),
            })?;
        if let Some(neighbors) = self.adjacency.get_mut(id1) {
            neighbors.shift_remove(id2);
        }
        if let Some(neighbors) = self.adjacency.get_mut(id2) {
            neighbors.shift_remove(id1);
        }
        debug!(target: TARGET_GRAPH, "Unlinked {} ~ {}", id1, id2);
        Ok(edge)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn actor(&self, id: &str) -> Option<&Actor> {
        self.nodes.get(id)
    }

    /// Actors in insertion order
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.nodes.values()
    }

    /// Position of an actor in insertion order
    pub fn insertion_index(&self, id: &str) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge(&self, id1: &str, id2: &str) -> Option<&IdentityEdge> {
        self.edges.get(&edge_key(id1, id2))
    }

    /// Every edge as `(id1, id2, edge)` in creation order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &IdentityEdge)> {
        self.edges
            .iter()
            .map(|((id1, id2), edge)| (id1.as_str(), id2.as_str(), edge))
    }

    pub fn neighbors(&self, id: &str) -> impl Iterator<Item = &str> {
        self.adjacency
            .get(id)
            .into_iter()
            .flat_map(|neighbors| neighbors.iter().map(String::as_str))
    }

    /// Connected components over inferred and manual edges alike
    pub fn group_similar_actors(&self) -> Vec<Cluster> {
        connected_components(self)
    }

    /// Edges inside every group of two or more actors, for manual review
    pub fn similarity_report(&self) -> Vec<GroupReport> {
        self.group_similar_actors()
            .into_iter()
            .filter(|cluster| cluster.len() > 1)
            .map(|cluster| {
                let edges = self
                    .edges()
                    .filter(|(id1, _, _)| cluster.contains(id1))
                    .map(|(id1, id2, edge)| EdgeReport {
                        source: id1.to_string(),
                        target: id2.to_string(),
                        edge: edge.clone(),
                    })
                    .collect();
                GroupReport {
                    actor_ids: cluster.into_ids(),
                    edges,
                }
            })
            .collect()
    }

    fn require_pair(&self, id1: &str, id2: &str) -> Result<(), GraphError> {
        for id in [id1, id2] {
            if !self.nodes.contains_key(id) {
                return Err(GraphError::UnknownActor { id: id.to_string() });
            }
        }
        if id1 == id2 {
            return Err(GraphError::SelfLoop { id: id1.to_string() });
        }
        Ok(())
    }

    fn connect(&mut self, id1: &str, id2: &str) {
        if let Some(neighbors) = self.adjacency.get_mut(id1) {
            neighbors.insert(id2.to_string());
        }
        if let Some(neighbors) = self.adjacency.get_mut(id2) {
            neighbors.insert(id1.to_string());
        }
    }
}

// Undirected edges are stored once, under their sorted endpoint pair
fn edge_key(id1: &str, id2: &str) -> (String, String) {
    if id1 <= id2 {
        (id1.to_string(), id2.to_string())
    } else {
        (id2.to_string(), id1.to_string())
    }
}
