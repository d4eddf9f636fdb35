//! # degreewalk-surreal
//!
//! A [`degreewalk_core::GraphSource`] that reads a social graph stored in
//! SurrealDB over its HTTP `/sql` endpoint.
//!
//! Neighbors come from graph paths over the configured relations
//! (`->knows->person` by default); attributes come from one batched
//! `SELECT` per layer, with the first device model reported as `phone`.
//!
//! ```rust,no_run
//! use degreewalk_core::{DegreeEngine, NodeId};
//! use degreewalk_surreal::{SurrealConfig, SurrealSource};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SurrealConfig::load(None)?;
//! let engine = DegreeEngine::new(SurrealSource::new(config)?);
//! let layers = engine.layered_connections(&NodeId::from("person:ishan")).await?;
//! println!("{}", serde_json::to_string_pretty(&layers)?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
mod source;

pub use config::SurrealConfig;
pub use error::{Error, Result};
pub use source::SurrealSource;
