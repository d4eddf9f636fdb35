//! # degreewalk core
//!
//! Degree-of-connection traversal over social graphs whose edges are not
//! held in memory.
//!
//! The engine asks a [`GraphSource`] for one node's neighborhood at a time,
//! runs a strict FIFO breadth-first search, and admits each node once at its
//! minimum distance from the start. Two result shapes are built on that
//! single traversal:
//!
//! - **Ranked degrees**: six buckets, 1st through 6th degree.
//! - **Layered connections**: `depth_N` layers up to a configurable depth,
//!   each enriched with one batched attribute lookup.
//!
//! Source failures never abort a traversal; the affected node simply
//! contributes no neighbors. Only a malformed start id is an error.
//!
//! ## Quick Start
//!
//! ```rust
//! use degreewalk_core::{DegreeEngine, GraphNode, InMemoryGraph, NodeId};
//!
//! # tokio_test_block_on(async {
//! let mut graph = InMemoryGraph::new();
//! for key in ["a", "b", "c"] {
//!     graph.add_node(GraphNode::new(format!("person:{key}"), "person")).unwrap();
//! }
//! graph.relate("person:a", "knows", "person:b").unwrap();
//! graph.relate("person:b", "knows", "person:c").unwrap();
//!
//! let engine = DegreeEngine::new(graph);
//! let ranked = engine.ranked_degrees(&NodeId::from("person:a")).await.unwrap();
//! assert_eq!(ranked.buckets.first, vec![NodeId::from("person:b")]);
//! assert_eq!(ranked.buckets.second, vec![NodeId::from("person:c")]);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod degrees;
mod engine;
pub mod error;
pub mod layered;
pub mod record_id;
pub mod source;
pub mod traversal;
mod types;

#[cfg(test)]
mod degrees_tests;
#[cfg(test)]
mod test_support;
#[cfg(test)]
mod traversal_tests;

pub use config::EngineConfig;
pub use degrees::{ranked_degrees, Degree, DegreeBuckets, RankedDegrees, RANKED_MAX_DEPTH};
pub use engine::DegreeEngine;
pub use error::{Error, Result};
pub use layered::{layered_connections, LayeredConnections, LayeredOptions};
pub use record_id::RecordId;
pub use source::{CachedSource, Direction, GraphSource, InMemoryGraph, NeighborPolicy};
pub use traversal::{direct_neighbors, traverse, LayerMap, Traversal, TraversalStats, TraversalStep};
pub use types::{GraphEdge, GraphNode, NodeId, PersonRecord};
