//! Error types for degreewalk-core.

use thiserror::Error;

use crate::types::NodeId;

/// Engine and graph-source error types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The start id handed to a traversal is empty or has the wrong shape.
    #[error("Invalid start id: {0}")]
    InvalidStartId(String),

    /// A string could not be parsed as a `table:key` record id.
    #[error("Invalid record id: {0}")]
    InvalidRecordId(String),

    /// A graph source failed to answer a lookup.
    ///
    /// Traversals never surface this variant; they log it and continue
    /// with an empty answer for the affected node or layer.
    #[error("Graph source error: {0}")]
    Source(String),

    /// A node with the same id is already stored.
    #[error("Node already exists: {0}")]
    NodeExists(NodeId),

    /// An edge with the same id is already stored.
    #[error("Edge already exists: {0}")]
    EdgeExists(u64),

    /// Edge labels must be non-empty.
    #[error("Invalid edge label: {0}")]
    InvalidEdgeLabel(String),

    /// An edge references a node that is not stored.
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for degreewalk operations.
pub type Result<T> = std::result::Result<T, Error>;
