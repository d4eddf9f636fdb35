//! Layered traversal with per-layer batch enrichment.
//!
//! After the BFS finishes, each non-empty layer is enriched with a single
//! `fetch_attributes` call, so the number of remote calls grows with the
//! number of layers rather than the number of people.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::record_id::RecordId;
use crate::source::GraphSource;
use crate::traversal::{traverse, TraversalStats};
use crate::types::{NodeId, PersonRecord};

/// Default depth bound for layered traversals.
pub const DEFAULT_LAYERED_MAX_DEPTH: usize = 7;
/// Default table a layered start id must belong to.
pub const DEFAULT_RECORD_TABLE: &str = "person";
/// Default prefix of layer keys (`depth_1`, `depth_2`, ...).
pub const DEFAULT_LAYER_PREFIX: &str = "depth_";

/// Knobs of a layered traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayeredOptions {
    /// Depth bound; nodes at this depth are recorded but not expanded.
    pub max_depth: usize,
    /// Table the start record id must belong to.
    pub record_table: String,
    /// Prefix of layer keys.
    pub label_prefix: String,
}

impl Default for LayeredOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_LAYERED_MAX_DEPTH,
            record_table: DEFAULT_RECORD_TABLE.to_string(),
            label_prefix: DEFAULT_LAYER_PREFIX.to_string(),
        }
    }
}

impl LayeredOptions {
    /// Sets the depth bound (builder pattern).
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the required start table (builder pattern).
    #[must_use]
    pub fn with_record_table(mut self, table: &str) -> Self {
        self.record_table = table.to_string();
        self
    }

    /// Key used for the layer at `depth`.
    #[must_use]
    pub fn layer_label(&self, depth: usize) -> String {
        format!("{}{depth}", self.label_prefix)
    }
}

/// Enriched layers keyed by label, in ascending depth order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LayeredConnections {
    /// `depth_N` -> people discovered at depth N, in discovery order.
    pub layers: IndexMap<String, Vec<PersonRecord>>,
    /// Counters from the traversal and enrichment passes.
    #[serde(skip)]
    pub stats: TraversalStats,
}

impl LayeredConnections {
    /// People in the layer labelled `label`.
    #[must_use]
    pub fn layer(&self, label: &str) -> Option<&[PersonRecord]> {
        self.layers.get(label).map(Vec::as_slice)
    }

    /// Layer labels, ascending by depth.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.layers.keys().map(String::as_str)
    }

    /// Total number of people across layers.
    #[must_use]
    pub fn total(&self) -> usize {
        self.layers.values().map(Vec::len).sum()
    }

    /// Returns true if no layer exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Validates that `start` is a record id in `table`.
///
/// # Errors
///
/// Returns `Error::InvalidStartId` when it is not.
pub fn validate_start(start: &NodeId, table: &str) -> Result<RecordId> {
    let record = RecordId::try_from(start).map_err(|e| {
        Error::InvalidStartId(format!(
            "start id must be a record id like '{table}:ishan' ({e})"
        ))
    })?;
    if !record.is_in(table) {
        return Err(Error::InvalidStartId(format!(
            "start id '{start}' must belong to table '{table}'"
        )));
    }
    Ok(record)
}

/// Traverses up to `options.max_depth` hops, then enriches each layer.
///
/// Layers are enriched in ascending depth order, one batch per layer, each
/// batch completing before the next starts. A failed batch leaves its
/// people without attributes. People the source has no record for are
/// still listed, with `name` and `phone` set to `None`.
///
/// # Errors
///
/// Returns `Error::InvalidStartId` if `start` is not a record id in
/// `options.record_table`; nothing is fetched in that case.
pub async fn layered_connections<S>(
    source: &S,
    start: &NodeId,
    options: &LayeredOptions,
) -> Result<LayeredConnections>
where
    S: GraphSource + ?Sized,
{
    validate_start(start, &options.record_table)?;

    let traversal = traverse(source, start, options.max_depth).await?;
    let mut stats = traversal.stats;
    let mut layers = IndexMap::with_capacity(traversal.layers.layer_count());

    for (depth, steps) in traversal.layers.iter() {
        let ids: Vec<NodeId> = steps.iter().map(|s| s.node_id.clone()).collect();
        let mut attributes = fetch_attributes_soft(source, &ids, depth, &mut stats).await;

        let people: Vec<PersonRecord> = ids
            .into_iter()
            .map(|id| {
                attributes
                    .remove(&id)
                    .map(|record| PersonRecord { id: id.clone(), ..record })
                    .unwrap_or_else(|| PersonRecord::bare(id))
            })
            .collect();

        debug!(depth, people = people.len(), "enriched layer");
        layers.insert(options.layer_label(depth), people);
    }

    info!(start = %start, layers = layers.len(), "layered traversal completed");
    Ok(LayeredConnections { layers, stats })
}

async fn fetch_attributes_soft<S>(
    source: &S,
    ids: &[NodeId],
    depth: usize,
    stats: &mut TraversalStats,
) -> HashMap<NodeId, PersonRecord>
where
    S: GraphSource + ?Sized,
{
    stats.attribute_batches += 1;
    match source.fetch_attributes(ids).await {
        Ok(records) => records,
        Err(err) => {
            stats.failed_attribute_batches += 1;
            warn!(depth, batch = ids.len(), error = %err, "attribute batch failed, treating as empty");
            HashMap::new()
        }
    }
}
