//! Connection and schema settings for the SurrealDB source.

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use degreewalk_core::record_id::is_identifier;
use degreewalk_core::{Direction, NeighborPolicy};

use crate::error::{Error, Result};

/// Environment variable prefix (`SURREALDB_URL`, `SURREALDB_NAMESPACE`, ...).
pub const ENV_PREFIX: &str = "SURREALDB_";

/// Settings of a [`crate::SurrealSource`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurrealConfig {
    /// Base URL of the SurrealDB HTTP endpoint.
    pub url: String,
    /// Namespace sent in the `surreal-ns` header.
    pub namespace: String,
    /// Database sent in the `surreal-db` header.
    pub database: String,
    /// Basic auth user.
    pub username: Option<String>,
    /// Basic auth password.
    pub password: Option<String>,
    /// Table holding people.
    pub person_table: String,
    /// Relations followed between people.
    pub relations: Vec<String>,
    /// Direction relations are followed in.
    pub direction: Direction,
    /// Relation from a person to their device.
    pub device_relation: String,
    /// Table holding devices.
    pub device_table: String,
    /// Device field reported as `phone`.
    pub device_field: String,
    /// Per-request timeout, in seconds.
    pub timeout_secs: u64,
}

impl Default for SurrealConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8000".to_string(),
            namespace: "test".to_string(),
            database: "test".to_string(),
            username: None,
            password: None,
            person_table: "person".to_string(),
            relations: vec!["knows".to_string()],
            direction: Direction::Outgoing,
            device_relation: "owns".to_string(),
            device_table: "phone".to_string(),
            device_field: "model".to_string(),
            timeout_secs: 30,
        }
    }
}

impl SurrealConfig {
    /// Creates a config for `url` with the default schema.
    #[must_use]
    pub fn new(url: &str, namespace: &str, database: &str) -> Self {
        Self {
            url: url.to_string(),
            namespace: namespace.to_string(),
            database: database.to_string(),
            ..Self::default()
        }
    }

    /// Sets basic auth credentials (builder pattern).
    #[must_use]
    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.username = Some(username.to_string());
        self.password = Some(password.to_string());
        self
    }

    /// Sets the followed relations and direction (builder pattern).
    #[must_use]
    pub fn with_policy(mut self, policy: &NeighborPolicy) -> Self {
        self.relations.clone_from(&policy.relations);
        self.direction = policy.direction;
        self
    }

    /// Figment with defaults, the optional TOML file and the environment.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Loads and validates the configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: Self = Self::figment(path).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that cannot produce a working query.
    ///
    /// Table, relation and field names end up inside SurrealQL text, so
    /// they must be plain identifiers.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("url", &self.url),
            ("namespace", &self.namespace),
            ("database", &self.database),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{name} cannot be empty")));
            }
        }
        if self.relations.is_empty() {
            return Err(Error::Config("relations cannot be empty".to_string()));
        }

        let identifiers = [
            ("person_table", self.person_table.as_str()),
            ("device_relation", self.device_relation.as_str()),
            ("device_table", self.device_table.as_str()),
            ("device_field", self.device_field.as_str()),
        ];
        let relations = self.relations.iter().map(|r| ("relations", r.as_str()));
        for (name, value) in identifiers.into_iter().chain(relations) {
            if !is_identifier(value) {
                return Err(Error::Config(format!(
                    "{name} '{value}' must contain only [A-Za-z0-9_]"
                )));
            }
        }

        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    /// Request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
