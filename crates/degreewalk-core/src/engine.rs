//! `DegreeEngine`: one source, one configuration, every traversal mode.

use crate::config::EngineConfig;
use crate::degrees::{ranked_degrees, RankedDegrees};
use crate::error::Result;
use crate::layered::{layered_connections, LayeredConnections};
use crate::source::GraphSource;
use crate::traversal::{direct_neighbors, traverse, Traversal};
use crate::types::NodeId;

/// Facade over the traversal modes for a single graph source.
///
/// Holds no per-call state: every method owns its visited set and
/// frontier for the duration of the call, so one engine may serve
/// concurrent traversals.
#[derive(Debug)]
pub struct DegreeEngine<S> {
    source: S,
    config: EngineConfig,
}

impl<S: GraphSource> DegreeEngine<S> {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_config(source, EngineConfig::default())
    }

    /// Creates an engine with the given configuration.
    #[must_use]
    pub fn with_config(source: S, config: EngineConfig) -> Self {
        Self { source, config }
    }

    /// Returns the graph source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Raw BFS with an explicit depth bound.
    pub async fn traverse(&self, start: &NodeId, max_depth: usize) -> Result<Traversal> {
        traverse(&self.source, start, max_depth).await
    }

    /// 1st through 6th degree connections of `start`.
    pub async fn ranked_degrees(&self, start: &NodeId) -> Result<RankedDegrees> {
        ranked_degrees(&self.source, start).await
    }

    /// Layered, enriched connections up to the configured depth.
    pub async fn layered_connections(&self, start: &NodeId) -> Result<LayeredConnections> {
        layered_connections(&self.source, start, &self.config.layered_options()).await
    }

    /// Layered, enriched connections with a one-off depth bound.
    pub async fn layered_connections_with_depth(
        &self,
        start: &NodeId,
        max_depth: usize,
    ) -> Result<LayeredConnections> {
        let options = self.config.layered_options().with_max_depth(max_depth);
        layered_connections(&self.source, start, &options).await
    }

    /// Distinct direct neighbors of `id`.
    pub async fn direct_neighbors(&self, id: &NodeId) -> Result<Vec<NodeId>> {
        direct_neighbors(&self.source, id).await
    }
}
