//! Core value types shared by the traversal engine and graph sources.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};

/// Opaque identifier of a graph vertex (a person).
///
/// Only equality and hashing are meaningful; the engine never looks inside.
///
/// # Example
///
/// ```rust
/// use degreewalk_core::NodeId;
///
/// let id = NodeId::from("person:ishan");
/// assert_eq!(id.as_str(), "person:ishan");
/// assert_eq!(id.to_string(), "person:ishan");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Creates a node id from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the id is empty or whitespace-only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Consumes the id, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A person enriched with display attributes by a batched lookup.
///
/// Missing attributes are `None` for every record and are omitted when
/// serialized, so all records share one shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Id of the person.
    pub id: NodeId,
    /// Display name, when the store has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Model of the device the person owns, when any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl PersonRecord {
    /// Creates a record with no attributes.
    #[must_use]
    pub fn bare(id: NodeId) -> Self {
        Self {
            id,
            name: None,
            phone: None,
        }
    }

    /// Sets the display name (builder pattern).
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the device model (builder pattern).
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// A stored vertex of an in-memory graph.
///
/// # Example
///
/// ```rust
/// use degreewalk_core::GraphNode;
/// use serde_json::json;
///
/// let node = GraphNode::new("person:riya", "person").with_property("name", json!("Riya"));
///
/// assert_eq!(node.id().as_str(), "person:riya");
/// assert_eq!(node.label(), "person");
/// assert_eq!(node.property_str("name"), Some("Riya"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphNode {
    id: NodeId,
    label: String,
    #[serde(default)]
    properties: HashMap<String, Value>,
}

impl GraphNode {
    /// Creates a new graph node with the given id and label.
    #[must_use]
    pub fn new(id: impl Into<NodeId>, label: &str) -> Self {
        Self {
            id: id.into(),
            label: label.to_string(),
            properties: HashMap::new(),
        }
    }

    /// Replaces all properties of this node (builder pattern).
    #[must_use]
    pub fn with_properties(mut self, properties: HashMap<String, Value>) -> Self {
        self.properties = properties;
        self
    }

    /// Adds a single property (builder pattern).
    #[must_use]
    pub fn with_property(mut self, name: &str, value: Value) -> Self {
        self.properties.insert(name.to_string(), value);
        self
    }

    /// Returns the node id.
    #[must_use]
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Returns the node label (table or type).
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns all properties of this node.
    #[must_use]
    pub fn properties(&self) -> &HashMap<String, Value> {
        &self.properties
    }

    /// Returns a specific property value, if it exists.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Returns a property only when it holds a string.
    #[must_use]
    pub fn property_str(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(Value::as_str)
    }

    /// Sets a property value.
    pub fn set_property(&mut self, name: &str, value: Value) {
        self.properties.insert(name.to_string(), value);
    }
}

/// A directed, labelled relation between two stored vertices.
///
/// # Example
///
/// ```rust
/// use degreewalk_core::GraphEdge;
///
/// let edge = GraphEdge::new(1, "person:ishan", "person:riya", "knows").unwrap();
/// assert_eq!(edge.source().as_str(), "person:ishan");
/// assert_eq!(edge.target().as_str(), "person:riya");
/// assert_eq!(edge.label(), "knows");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphEdge {
    id: u64,
    source: NodeId,
    target: NodeId,
    label: String,
}

impl GraphEdge {
    /// Creates a new edge with the given id, endpoints, and label.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidEdgeLabel` if the label is empty or whitespace-only.
    pub fn new(
        id: u64,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        label: &str,
    ) -> Result<Self> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidEdgeLabel(
                "Edge label cannot be empty or whitespace-only".to_string(),
            ));
        }
        Ok(Self {
            id,
            source: source.into(),
            target: target.into(),
            label: trimmed.to_string(),
        })
    }

    /// Returns the edge id.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the source node id.
    #[must_use]
    pub fn source(&self) -> &NodeId {
        &self.source
    }

    /// Returns the target node id.
    #[must_use]
    pub fn target(&self) -> &NodeId {
        &self.target
    }

    /// Returns the edge label (relation name).
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}
