//! In-memory graph source.
//!
//! Stores person/device vertices and labelled relations with bidirectional
//! indexing, and answers neighbor and attribute lookups the same way a
//! remote record store would. Used for tests, fixtures embedded by callers,
//! and as the reference implementation of [`GraphSource`].

use async_trait::async_trait;
use rustc_hash::FxHashSet;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::types::{GraphEdge, GraphNode, NodeId, PersonRecord};

use super::{GraphSource, NeighborPolicy};

/// Relation linking a person to an owned device.
pub const DEFAULT_DEVICE_RELATION: &str = "owns";
/// Device property reported as the person's phone.
pub const DEFAULT_DEVICE_FIELD: &str = "model";
/// Person property reported as the display name.
const NAME_FIELD: &str = "name";

/// In-memory graph with bidirectional relation indexing.
///
/// Neighbor order is deterministic: outgoing edges in insertion order,
/// then incoming edges in insertion order, duplicates and self-loops removed.
/// The device relation only feeds enrichment and never yields a neighbor
/// unless the policy names it.
#[derive(Debug)]
pub struct InMemoryGraph {
    /// All nodes indexed by id.
    nodes: HashMap<NodeId, GraphNode>,
    /// All edges indexed by id.
    edges: HashMap<u64, GraphEdge>,
    /// Outgoing edges: source -> edge ids in insertion order.
    outgoing: HashMap<NodeId, Vec<u64>>,
    /// Incoming edges: target -> edge ids in insertion order.
    incoming: HashMap<NodeId, Vec<u64>>,
    /// Next id handed out by [`InMemoryGraph::relate`].
    next_edge_id: u64,
    policy: NeighborPolicy,
    device_relation: String,
    device_field: String,
}

impl Default for InMemoryGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGraph {
    /// Creates an empty graph following every relation in both directions.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(NeighborPolicy::default())
    }

    /// Creates an empty graph with the given neighbor policy.
    #[must_use]
    pub fn with_policy(policy: NeighborPolicy) -> Self {
        Self {
            nodes: HashMap::new(),
            edges: HashMap::new(),
            outgoing: HashMap::new(),
            incoming: HashMap::new(),
            next_edge_id: 1,
            policy,
            device_relation: DEFAULT_DEVICE_RELATION.to_string(),
            device_field: DEFAULT_DEVICE_FIELD.to_string(),
        }
    }

    /// Sets the ownership relation and device property used for enrichment.
    #[must_use]
    pub fn with_device(mut self, relation: &str, field: &str) -> Self {
        self.device_relation = relation.to_string();
        self.device_field = field.to_string();
        self
    }

    /// Returns the neighbor policy.
    #[must_use]
    pub fn policy(&self) -> &NeighborPolicy {
        &self.policy
    }

    // ── Node CRUD ──────────────────────────────────────────────────────

    /// Adds a node to the graph.
    ///
    /// # Errors
    ///
    /// Returns `Error::NodeExists` if a node with the same id already exists.
    pub fn add_node(&mut self, node: GraphNode) -> Result<()> {
        if self.nodes.contains_key(node.id()) {
            return Err(Error::NodeExists(node.id().clone()));
        }
        self.nodes.insert(node.id().clone(), node);
        Ok(())
    }

    /// Gets a node by id.
    #[must_use]
    pub fn get_node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    /// Returns true if a node with the given id exists.
    #[must_use]
    pub fn has_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Returns the total number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Removes a node and all its connected edges (cascade delete).
    pub fn remove_node(&mut self, id: &NodeId) -> Option<GraphNode> {
        let node = self.nodes.remove(id)?;
        let mut edge_ids = self.outgoing.remove(id).unwrap_or_default();
        edge_ids.extend(self.incoming.remove(id).unwrap_or_default());
        for edge_id in edge_ids {
            self.remove_edge(edge_id);
        }
        Some(node)
    }

    // ── Edge CRUD ──────────────────────────────────────────────────────

    /// Adds an edge between two stored nodes.
    ///
    /// # Errors
    ///
    /// Returns `Error::EdgeExists` for a duplicate edge id and
    /// `Error::UnknownNode` if either endpoint is not stored.
    pub fn add_edge(&mut self, edge: GraphEdge) -> Result<()> {
        let id = edge.id();
        if self.edges.contains_key(&id) {
            return Err(Error::EdgeExists(id));
        }
        for endpoint in [edge.source(), edge.target()] {
            if !self.nodes.contains_key(endpoint) {
                return Err(Error::UnknownNode(endpoint.clone()));
            }
        }

        self.outgoing
            .entry(edge.source().clone())
            .or_default()
            .push(id);
        self.incoming
            .entry(edge.target().clone())
            .or_default()
            .push(id);
        self.next_edge_id = self.next_edge_id.max(id.saturating_add(1));
        self.edges.insert(id, edge);
        Ok(())
    }

    /// Adds `source -> label -> target` with an automatically assigned id.
    pub fn relate(&mut self, source: &str, label: &str, target: &str) -> Result<u64> {
        let id = self.next_edge_id;
        self.add_edge(GraphEdge::new(id, source, target, label)?)?;
        Ok(id)
    }

    /// Gets an edge by its id.
    #[must_use]
    pub fn get_edge(&self, id: u64) -> Option<&GraphEdge> {
        self.edges.get(&id)
    }

    /// Gets all outgoing edges from a node, in insertion order.
    #[must_use]
    pub fn get_outgoing(&self, id: &NodeId) -> Vec<&GraphEdge> {
        self.outgoing
            .get(id)
            .map(|ids| ids.iter().filter_map(|e| self.edges.get(e)).collect())
            .unwrap_or_default()
    }

    /// Gets all incoming edges to a node, in insertion order.
    #[must_use]
    pub fn get_incoming(&self, id: &NodeId) -> Vec<&GraphEdge> {
        self.incoming
            .get(id)
            .map(|ids| ids.iter().filter_map(|e| self.edges.get(e)).collect())
            .unwrap_or_default()
    }

    /// Returns the total number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Removes an edge by id, cleaning up both indices.
    pub fn remove_edge(&mut self, edge_id: u64) -> Option<GraphEdge> {
        let edge = self.edges.remove(&edge_id)?;
        if let Some(ids) = self.outgoing.get_mut(edge.source()) {
            ids.retain(|&id| id != edge_id);
        }
        if let Some(ids) = self.incoming.get_mut(edge.target()) {
            ids.retain(|&id| id != edge_id);
        }
        Some(edge)
    }

    // ── Lookups ────────────────────────────────────────────────────────

    /// Resolves the neighbors of `id` under the graph's policy.
    #[must_use]
    pub fn neighbors(&self, id: &NodeId) -> Vec<NodeId> {
        let mut seen = FxHashSet::default();
        let mut result = Vec::new();

        let outgoing = self
            .policy
            .direction
            .includes_outgoing()
            .then(|| self.get_outgoing(id))
            .unwrap_or_default()
            .into_iter()
            .filter(|e| self.connects(e.label()))
            .map(GraphEdge::target);
        let incoming = self
            .policy
            .direction
            .includes_incoming()
            .then(|| self.get_incoming(id))
            .unwrap_or_default()
            .into_iter()
            .filter(|e| self.connects(e.label()))
            .map(GraphEdge::source);

        for other in outgoing.chain(incoming) {
            if other != id && seen.insert(other) {
                result.push(other.clone());
            }
        }
        result
    }

    /// Returns true if edges labelled `label` link two people.
    ///
    /// An empty relation list means every relation except the device one.
    fn connects(&self, label: &str) -> bool {
        if self.policy.relations.is_empty() {
            label != self.device_relation
        } else {
            self.policy.follows(label)
        }
    }

    /// Builds the display record of a stored node.
    #[must_use]
    pub fn person_record(&self, id: &NodeId) -> Option<PersonRecord> {
        let node = self.nodes.get(id)?;
        let phone = self
            .get_outgoing(id)
            .into_iter()
            .filter(|e| e.label() == self.device_relation)
            .find_map(|e| {
                self.nodes
                    .get(e.target())
                    .and_then(|device| device.property_str(&self.device_field))
            });

        Some(PersonRecord {
            id: id.clone(),
            name: node.property_str(NAME_FIELD).map(str::to_string),
            phone: phone.map(str::to_string),
        })
    }
}

#[async_trait]
impl GraphSource for InMemoryGraph {
    fn source_type(&self) -> &'static str {
        "memory"
    }

    async fn fetch_neighbors(&self, id: &NodeId) -> Result<Vec<NodeId>> {
        Ok(self.neighbors(id))
    }

    async fn fetch_attributes(&self, ids: &[NodeId]) -> Result<HashMap<NodeId, PersonRecord>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.person_record(id).map(|r| (id.clone(), r)))
            .collect())
    }
}
