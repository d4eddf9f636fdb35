//! Memoizing proxy in front of a slow graph source.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;

use crate::error::Result;
use crate::types::{NodeId, PersonRecord};

use super::GraphSource;

/// Caches successful neighbor lookups of an inner source.
///
/// Failed lookups are not cached, so a transient error is retried on the
/// next traversal. Attribute lookups always go to the inner source.
///
/// Entries are never evicted: the cache grows with every distinct node
/// fetched until [`CachedSource::invalidate`] or
/// [`CachedSource::invalidate_all`] is called. Long-running callers should
/// invalidate periodically or after the underlying graph changes.
#[derive(Debug)]
pub struct CachedSource<S> {
    inner: S,
    neighbors: Mutex<HashMap<NodeId, Vec<NodeId>>>,
}

impl<S: GraphSource> CachedSource<S> {
    /// Wraps `inner` with an empty cache.
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            neighbors: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the wrapped source.
    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of cached neighborhoods.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.neighbors.lock().len()
    }

    /// Drops every cached neighborhood.
    pub fn invalidate_all(&self) {
        self.neighbors.lock().clear();
    }

    /// Drops the cached neighborhood of one node.
    pub fn invalidate(&self, id: &NodeId) {
        self.neighbors.lock().remove(id);
    }
}

#[async_trait]
impl<S: GraphSource> GraphSource for CachedSource<S> {
    fn source_type(&self) -> &'static str {
        self.inner.source_type()
    }

    async fn fetch_neighbors(&self, id: &NodeId) -> Result<Vec<NodeId>> {
        let cached = self.neighbors.lock().get(id).cloned();
        if let Some(hit) = cached {
            debug!(node = %id, "neighbor cache hit");
            return Ok(hit);
        }

        let fetched = self.inner.fetch_neighbors(id).await?;
        self.neighbors.lock().insert(id.clone(), fetched.clone());
        Ok(fetched)
    }

    async fn fetch_attributes(&self, ids: &[NodeId]) -> Result<HashMap<NodeId, PersonRecord>> {
        self.inner.fetch_attributes(ids).await
    }
}
