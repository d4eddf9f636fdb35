//! Graph sources: where the traversal engine gets adjacency and attributes.
//!
//! The engine never holds the graph. It asks a [`GraphSource`] for one
//! node's neighborhood at a time and for one batch of attributes per layer.
//! Any backing store (in-memory map, remote database, caching proxy) plugs
//! in by implementing this trait.

mod cached;
mod memory;


pub use cached::CachedSource;
pub use memory::InMemoryGraph;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{NodeId, PersonRecord};

/// Capability consumed by the traversal engine.
///
/// Implementations may fail; the engine turns every failure into an empty
/// answer and keeps going.
#[async_trait]
pub trait GraphSource: Send + Sync {
    /// Short name of the backing store, used in logs.
    fn source_type(&self) -> &'static str;

    /// Returns the distinct neighbors of `id`, in the store's order.
    ///
    /// A node without data yields an empty vector, not an error.
    async fn fetch_neighbors(&self, id: &NodeId) -> Result<Vec<NodeId>>;

    /// Looks up display attributes for a batch of ids in one round trip.
    ///
    /// Ids without a record are absent from the returned map.
    async fn fetch_attributes(&self, ids: &[NodeId]) -> Result<HashMap<NodeId, PersonRecord>>;
}

#[async_trait]
impl<S: GraphSource + ?Sized> GraphSource for &S {
    fn source_type(&self) -> &'static str {
        (**self).source_type()
    }

    async fn fetch_neighbors(&self, id: &NodeId) -> Result<Vec<NodeId>> {
        (**self).fetch_neighbors(id).await
    }

    async fn fetch_attributes(&self, ids: &[NodeId]) -> Result<HashMap<NodeId, PersonRecord>> {
        (**self).fetch_attributes(ids).await
    }
}

#[async_trait]
impl<S: GraphSource + ?Sized> GraphSource for Box<S> {
    fn source_type(&self) -> &'static str {
        (**self).source_type()
    }

    async fn fetch_neighbors(&self, id: &NodeId) -> Result<Vec<NodeId>> {
        (**self).fetch_neighbors(id).await
    }

    async fn fetch_attributes(&self, ids: &[NodeId]) -> Result<HashMap<NodeId, PersonRecord>> {
        (**self).fetch_attributes(ids).await
    }
}

#[async_trait]
impl<S: GraphSource + ?Sized> GraphSource for Arc<S> {
    fn source_type(&self) -> &'static str {
        (**self).source_type()
    }

    async fn fetch_neighbors(&self, id: &NodeId) -> Result<Vec<NodeId>> {
        (**self).fetch_neighbors(id).await
    }

    async fn fetch_attributes(&self, ids: &[NodeId]) -> Result<HashMap<NodeId, PersonRecord>> {
        (**self).fetch_attributes(ids).await
    }
}

/// Which way relation edges are followed when resolving neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Follow `node -> rel -> other` only.
    #[default]
    Outgoing,
    /// Follow `other -> rel -> node` only.
    Incoming,
    /// Follow both, outgoing first.
    Both,
}

impl Direction {
    /// Returns true if outgoing edges are followed.
    #[must_use]
    pub fn includes_outgoing(self) -> bool {
        matches!(self, Self::Outgoing | Self::Both)
    }

    /// Returns true if incoming edges are followed.
    #[must_use]
    pub fn includes_incoming(self) -> bool {
        matches!(self, Self::Incoming | Self::Both)
    }
}

/// Which relations count as "connected" for neighbor resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborPolicy {
    /// Relation labels to follow (empty = all person-to-person relations).
    #[serde(default)]
    pub relations: Vec<String>,
    /// Edge direction to follow.
    #[serde(default)]
    pub direction: Direction,
}

impl Default for NeighborPolicy {
    fn default() -> Self {
        Self {
            relations: Vec::new(),
            direction: Direction::Both,
        }
    }
}

impl NeighborPolicy {
    /// Creates a policy for the given relations and direction.
    #[must_use]
    pub fn new(relations: &[&str], direction: Direction) -> Self {
        Self {
            relations: relations.iter().map(|r| (*r).to_string()).collect(),
            direction,
        }
    }

    /// Mutual connections over `connect`, in either direction.
    #[must_use]
    pub fn mutual_connect() -> Self {
        Self::new(&["connect"], Direction::Both)
    }

    /// Returns true if an edge with `label` is followed.
    #[must_use]
    pub fn follows(&self, label: &str) -> bool {
        self.relations.is_empty() || self.relations.iter().any(|r| r == label)
    }
}
