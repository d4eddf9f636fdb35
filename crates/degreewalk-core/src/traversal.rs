//! Frontier-driven BFS over a [`GraphSource`].
//!
//! One algorithm serves every traversal mode: nodes are expanded in strict
//! FIFO order, neighborhoods are fetched one at a time, and a node is
//! admitted exactly once, at its minimum distance from the start. Ranked
//! and layered modes only shape the [`LayerMap`] this produces.

use rustc_hash::FxHashSet;
use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::source::GraphSource;
use crate::types::NodeId;

/// A node waiting in the frontier for expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Node to expand.
    pub id: NodeId,
    /// Distance from the start.
    pub depth: usize,
    /// Route from the start to `id`, both ends included.
    pub path: Vec<NodeId>,
}

impl FrontierEntry {
    fn root(start: NodeId) -> Self {
        Self {
            path: vec![start.clone()],
            id: start,
            depth: 0,
        }
    }

    fn child(&self, id: NodeId) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(id.clone());
        Self {
            id,
            depth: self.depth + 1,
            path,
        }
    }
}

/// A discovered node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraversalStep {
    /// The node reached.
    pub node_id: NodeId,
    /// Number of hops from the start (always >= 1).
    pub depth: usize,
    /// A shortest route from the start to `node_id`, both ends included.
    pub path: Vec<NodeId>,
}

/// Discovered nodes grouped by exact depth.
///
/// Only depths with at least one node are present. Within a layer, nodes
/// keep discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LayerMap {
    layers: BTreeMap<usize, Vec<TraversalStep>>,
}

impl LayerMap {
    fn record(&mut self, step: TraversalStep) {
        self.layers.entry(step.depth).or_default().push(step);
    }

    /// Non-empty depths, ascending.
    pub fn depths(&self) -> impl Iterator<Item = usize> + '_ {
        self.layers.keys().copied()
    }

    /// Steps discovered at `depth`, empty when the depth is absent.
    #[must_use]
    pub fn layer(&self, depth: usize) -> &[TraversalStep] {
        self.layers.get(&depth).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ids discovered at `depth`, in discovery order.
    #[must_use]
    pub fn ids_at(&self, depth: usize) -> Vec<NodeId> {
        self.layer(depth).iter().map(|s| s.node_id.clone()).collect()
    }

    /// Iterates `(depth, steps)` in ascending depth order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[TraversalStep])> + '_ {
        self.layers.iter().map(|(d, steps)| (*d, steps.as_slice()))
    }

    /// Total number of discovered nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.values().map(Vec::len).sum()
    }

    /// Returns true if nothing was discovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Number of non-empty layers.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Finds the step that discovered `id`.
    #[must_use]
    pub fn step(&self, id: &NodeId) -> Option<&TraversalStep> {
        self.layers
            .values()
            .flat_map(|steps| steps.iter())
            .find(|s| &s.node_id == id)
    }

    /// Distance of `id` from the start, if discovered.
    #[must_use]
    pub fn depth_of(&self, id: &NodeId) -> Option<usize> {
        self.step(id).map(|s| s.depth)
    }

    /// A shortest route from the start to `id`, if discovered.
    #[must_use]
    pub fn path_to(&self, id: &NodeId) -> Option<&[NodeId]> {
        self.step(id).map(|s| s.path.as_slice())
    }

    /// Consumes the map, returning the raw depth-ordered layers.
    #[must_use]
    pub fn into_layers(self) -> BTreeMap<usize, Vec<TraversalStep>> {
        self.layers
    }
}

/// Counters collected while traversing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TraversalStats {
    /// Frontier entries whose neighborhood was fetched.
    pub nodes_expanded: usize,
    /// Neighbor lookups issued.
    pub neighbor_fetches: usize,
    /// Neighbor lookups that failed and were treated as empty.
    pub failed_fetches: usize,
    /// Nodes admitted to the result.
    pub nodes_discovered: usize,
    /// Attribute batches issued (layered mode).
    pub attribute_batches: usize,
    /// Attribute batches that failed and were treated as empty.
    pub failed_attribute_batches: usize,
}

/// Outcome of a traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Traversal {
    /// Start node (never part of `layers`).
    pub start: NodeId,
    /// Depth bound the traversal ran with.
    pub max_depth: usize,
    /// Discovered nodes by depth.
    pub layers: LayerMap,
    /// Counters.
    pub stats: TraversalStats,
}

/// BFS from `start`, discovering nodes up to `max_depth` hops away.
///
/// Entries at `depth >= max_depth` are discarded without expansion, so
/// nodes at exactly `max_depth` are recorded but never fetched. Fetch
/// failures are logged and treated as "no neighbors".
///
/// # Errors
///
/// Returns `Error::InvalidStartId` if `start` is blank. No fetch is issued
/// in that case.
pub async fn traverse<S>(source: &S, start: &NodeId, max_depth: usize) -> Result<Traversal>
where
    S: GraphSource + ?Sized,
{
    ensure_start(start)?;
    info!(
        start = %start,
        max_depth,
        source = source.source_type(),
        "starting BFS"
    );

    let mut stats = TraversalStats::default();
    let mut layers = LayerMap::default();
    let mut visited: FxHashSet<NodeId> = FxHashSet::default();
    let mut frontier: VecDeque<FrontierEntry> = VecDeque::new();

    visited.insert(start.clone());
    frontier.push_back(FrontierEntry::root(start.clone()));

    while let Some(entry) = frontier.pop_front() {
        if entry.depth >= max_depth {
            continue;
        }

        debug!(node = %entry.id, depth = entry.depth, "expanding node");
        stats.nodes_expanded += 1;
        let neighbors = fetch_neighbors_soft(source, &entry.id, &mut stats).await;

        for neighbor in neighbors {
            if !visited.insert(neighbor.clone()) {
                continue;
            }

            let child = entry.child(neighbor);
            debug!(node = %child.id, depth = child.depth, "discovered node");
            stats.nodes_discovered += 1;
            layers.record(TraversalStep {
                node_id: child.id.clone(),
                depth: child.depth,
                path: child.path.clone(),
            });

            if child.depth < max_depth {
                frontier.push_back(child);
            }
        }
    }

    info!(
        start = %start,
        discovered = stats.nodes_discovered,
        layers = layers.layer_count(),
        failed_fetches = stats.failed_fetches,
        "BFS completed"
    );

    Ok(Traversal {
        start: start.clone(),
        max_depth,
        layers,
        stats,
    })
}

/// Single-hop lookup: the distinct neighbors of `id`, without traversal.
///
/// `id` itself is never returned. A failed fetch yields an empty vector.
///
/// # Errors
///
/// Returns `Error::InvalidStartId` if `id` is blank.
pub async fn direct_neighbors<S>(source: &S, id: &NodeId) -> Result<Vec<NodeId>>
where
    S: GraphSource + ?Sized,
{
    ensure_start(id)?;
    let mut stats = TraversalStats::default();
    let mut seen = FxHashSet::default();
    let neighbors = fetch_neighbors_soft(source, id, &mut stats).await;
    Ok(neighbors
        .into_iter()
        .filter(|n| n != id && seen.insert(n.clone()))
        .collect())
}

fn ensure_start(start: &NodeId) -> Result<()> {
    if start.is_blank() {
        return Err(Error::InvalidStartId(
            "start id cannot be empty or whitespace-only".to_string(),
        ));
    }
    Ok(())
}

async fn fetch_neighbors_soft<S>(source: &S, id: &NodeId, stats: &mut TraversalStats) -> Vec<NodeId>
where
    S: GraphSource + ?Sized,
{
    stats.neighbor_fetches += 1;
    match source.fetch_neighbors(id).await {
        Ok(neighbors) => {
            debug!(node = %id, count = neighbors.len(), "fetched neighbors");
            neighbors
        }
        Err(err) => {
            stats.failed_fetches += 1;
            warn!(node = %id, error = %err, "neighbor fetch failed, treating as empty");
            Vec::new()
        }
    }
}
