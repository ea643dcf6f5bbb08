use std::collections::BTreeMap;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::actor::actor_id;

/// One connected component of the identity graph.
///
/// Members are ordered by the time their actor entered the graph; the first
/// member is the primary identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cluster {
    actor_ids: Vec<String>,
}

impl Cluster {
    pub fn new(actor_ids: Vec<String>) -> Self {
        Self { actor_ids }
    }

    pub fn primary(&self) -> Option<&str> {
        self.actor_ids.first().map(String::as_str)
    }

    pub fn actor_ids(&self) -> &[String] {
        &self.actor_ids
    }

    pub fn into_ids(self) -> Vec<String> {
        self.actor_ids
    }

    pub fn contains(&self, actor_id: &str) -> bool {
        self.actor_ids.iter().any(|id| id == actor_id)
    }

    pub fn len(&self) -> usize {
        self.actor_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actor_ids.is_empty()
    }
}

/// Attribution counts gathered for one raw identity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorStats {
    pub actor_id: String,
    pub name: String,
    pub email: String,
    pub counts: BTreeMap<String, u64>,
}

impl ActorStats {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            actor_id: actor_id(name, email),
            name: name.to_string(),
            email: email.to_string(),
            counts: BTreeMap::new(),
        }
    }

    /// Parse one `Name <email>` line, optionally followed by tab separated
    /// `key=count` fields.
    ///
    /// Blank lines and `#` comments yield `None`. A line without angle
    /// brackets is taken as a bare email when it contains `@`, otherwise as
    /// a bare name.
    pub fn parse_line(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut fields = line.split('\t');
        let identity = fields.next().unwrap_or_default().trim();
        let (name, email) = match (identity.rfind('<'), identity.ends_with('>')) {
            (Some(open), true) => (
                identity[..open].trim(),
                identity[open + 1..identity.len() - 1].trim(),
            ),
            _ if identity.contains('@') => ("", identity),
            _ => (identity, ""),
        };

        let mut stats = Self::new(name, email);
        for field in fields.map(str::trim).filter(|f| !f.is_empty()) {
            let (key, value) = field
                .split_once('=')
                .ok_or_else(|| anyhow!("Expected key=count, got '{}'", field))?;
            let count: u64 = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid count in '{}'", field))?;
            *stats.counts.entry(key.trim().to_string()).or_default() += count;
        }
        Ok(Some(stats))
    }

    /// Add another record's counts to this one
    pub fn absorb(&mut self, other: &ActorStats) {
        for (key, count) in &other.counts {
            *self.counts.entry(key.clone()).or_default() += count;
        }
    }
}

/// A cluster folded into a single canonical identity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedActor {
    pub primary_id: String,
    pub name: String,
    pub email: String,
    pub member_ids: Vec<String>,
    pub counts: BTreeMap<String, u64>,
}
