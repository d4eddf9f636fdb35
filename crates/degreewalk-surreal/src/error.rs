//! Error types for the SurrealDB source.

use thiserror::Error;

/// SurrealDB source errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-2xx HTTP status from the server.
    #[error("SurrealDB returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// A statement completed with a non-`OK` status or an unexpected shape.
    #[error("Query error: {0}")]
    Query(String),

    /// An id that cannot be used as a SurrealDB record id.
    #[error("Invalid record id: {0}")]
    InvalidRecordId(String),
}

/// Result type alias for SurrealDB source operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<Error> for degreewalk_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Config(msg) => Self::Config(msg),
            Error::InvalidRecordId(msg) => Self::InvalidRecordId(msg),
            other => Self::Source(format!("surrealdb: {other}")),
        }
    }
}
