//! `table:key` record identifiers used by record-oriented graph stores.
//!
//! Layered traversals require the start id in this shape, and remote
//! sources only ever interpolate ids that parse here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::types::NodeId;

/// A parsed record id such as `person:ishan`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId {
    table: String,
    key: String,
}

impl RecordId {
    /// Builds a record id from its parts, validating both.
    pub fn new(table: &str, key: &str) -> Result<Self> {
        if !is_identifier(table) {
            return Err(Error::InvalidRecordId(format!(
                "table '{table}' must be non-empty and contain only [A-Za-z0-9_]"
            )));
        }
        if !is_identifier(key) {
            return Err(Error::InvalidRecordId(format!(
                "key '{key}' must be non-empty and contain only [A-Za-z0-9_]"
            )));
        }
        Ok(Self {
            table: table.to_string(),
            key: key.to_string(),
        })
    }

    /// Parses `table:key`.
    pub fn parse(raw: &str) -> Result<Self> {
        let (table, key) = raw
            .split_once(':')
            .ok_or_else(|| Error::InvalidRecordId(format!("'{raw}' is not of the form table:key")))?;
        Self::new(table, key)
    }

    /// Returns the table part.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the key part.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns true if the record lives in `table`.
    #[must_use]
    pub fn is_in(&self, table: &str) -> bool {
        self.table == table
    }

    /// Converts into an opaque node id.
    #[must_use]
    pub fn to_node_id(&self) -> NodeId {
        NodeId::from(self.to_string())
    }
}

/// Returns true for non-empty strings made of ASCII alphanumerics and `_`.
#[must_use]
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.table, self.key)
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RecordId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl TryFrom<&NodeId> for RecordId {
    type Error = Error;

    fn try_from(value: &NodeId) -> Result<Self> {
        Self::parse(value.as_str())
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.to_string()
    }
}

impl From<RecordId> for NodeId {
    fn from(id: RecordId) -> Self {
        id.to_node_id()
    }
}
