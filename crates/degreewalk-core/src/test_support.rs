//! Scripted graph source shared by unit tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::source::GraphSource;
use crate::types::{NodeId, PersonRecord};

/// Adjacency lists returned verbatim, with optional failures and a call log.
#[derive(Default)]
pub(crate) struct ScriptedSource {
    adjacency: HashMap<NodeId, Vec<NodeId>>,
    records: HashMap<NodeId, PersonRecord>,
    failing: HashSet<NodeId>,
    fail_attributes: bool,
    fetched: Mutex<Vec<NodeId>>,
    batches: Mutex<Vec<Vec<NodeId>>>,
}

impl ScriptedSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds `a <-> b` to both adjacency lists.
    pub(crate) fn undirected(mut self, a: &str, b: &str) -> Self {
        self.push(a, b);
        self.push(b, a);
        self
    }

    /// Adds `a -> b` only.
    pub(crate) fn directed(mut self, a: &str, b: &str) -> Self {
        self.push(a, b);
        self
    }

    /// Sets the exact neighbor list of `node`.
    pub(crate) fn neighbors(mut self, node: &str, neighbors: &[&str]) -> Self {
        self.adjacency.insert(
            NodeId::from(node),
            neighbors.iter().map(|n| NodeId::from(*n)).collect(),
        );
        self
    }

    pub(crate) fn failing(mut self, node: &str) -> Self {
        self.failing.insert(NodeId::from(node));
        self
    }

    pub(crate) fn failing_attributes(mut self) -> Self {
        self.fail_attributes = true;
        self
    }

    pub(crate) fn record(mut self, record: PersonRecord) -> Self {
        self.records.insert(record.id.clone(), record);
        self
    }

    /// Nodes whose neighbors were requested, in call order.
    pub(crate) fn fetched(&self) -> Vec<NodeId> {
        self.fetched.lock().clone()
    }

    /// Attribute batches requested, in call order.
    pub(crate) fn batches(&self) -> Vec<Vec<NodeId>> {
        self.batches.lock().clone()
    }

    fn push(&mut self, from: &str, to: &str) {
        self.adjacency
            .entry(NodeId::from(from))
            .or_default()
            .push(NodeId::from(to));
    }
}

#[async_trait]
impl GraphSource for ScriptedSource {
    fn source_type(&self) -> &'static str {
        "scripted"
    }

    async fn fetch_neighbors(&self, id: &NodeId) -> Result<Vec<NodeId>> {
        self.fetched.lock().push(id.clone());
        if self.failing.contains(id) {
            return Err(Error::Source(format!("lookup of {id} timed out")));
        }
        Ok(self.adjacency.get(id).cloned().unwrap_or_default())
    }

    async fn fetch_attributes(&self, ids: &[NodeId]) -> Result<HashMap<NodeId, PersonRecord>> {
        self.batches.lock().push(ids.to_vec());
        if self.fail_attributes {
            return Err(Error::Source("attribute service unavailable".to_string()));
        }
        Ok(ids
            .iter()
            .filter_map(|id| self.records.get(id).map(|r| (id.clone(), r.clone())))
            .collect())
    }
}

/// `A <-> B, A <-> D, B <-> C, C <-> E`.
pub(crate) fn sample_graph() -> ScriptedSource {
    ScriptedSource::new()
        .undirected("A", "B")
        .undirected("A", "D")
        .undirected("B", "C")
        .undirected("C", "E")
}

/// `n0 -> n1 -> ... -> n{len}` as an undirected chain.
pub(crate) fn chain(len: usize) -> ScriptedSource {
    (0..len).fold(ScriptedSource::new(), |source, i| {
        source.undirected(&format!("n{i}"), &format!("n{}", i + 1))
    })
}

pub(crate) fn ids(raw: &[&str]) -> Vec<NodeId> {
    raw.iter().map(|r| NodeId::from(*r)).collect()
}
