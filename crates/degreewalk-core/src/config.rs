//! Engine configuration.
//!
//! Values are layered with figment: built-in defaults, then an optional
//! TOML file, then `DEGREEWALK_`-prefixed environment variables.

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::layered::{
    LayeredOptions, DEFAULT_LAYERED_MAX_DEPTH, DEFAULT_LAYER_PREFIX, DEFAULT_RECORD_TABLE,
};
use crate::record_id::is_identifier;

/// Environment variable prefix for engine settings.
pub const ENV_PREFIX: &str = "DEGREEWALK_";

/// Upper bound accepted for `layered_max_depth`.
pub const MAX_LAYERED_DEPTH: usize = 64;

/// Settings of a [`crate::DegreeEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Depth bound for layered traversals.
    pub layered_max_depth: usize,
    /// Table a layered start id must belong to.
    pub record_table: String,
    /// Prefix of layer keys in layered results.
    pub layer_label_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layered_max_depth: DEFAULT_LAYERED_MAX_DEPTH,
            record_table: DEFAULT_RECORD_TABLE.to_string(),
            layer_label_prefix: DEFAULT_LAYER_PREFIX.to_string(),
        }
    }
}

impl EngineConfig {
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
    ///
    /// A missing TOML file is not an error; its layer is simply empty.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: Self = Self::figment(path).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.layered_max_depth == 0 || self.layered_max_depth > MAX_LAYERED_DEPTH {
            return Err(Error::Config(format!(
                "layered_max_depth must be between 1 and {MAX_LAYERED_DEPTH}, got {}",
                self.layered_max_depth
            )));
        }
        if !is_identifier(&self.record_table) {
            return Err(Error::Config(format!(
                "record_table '{}' must contain only [A-Za-z0-9_]",
                self.record_table
            )));
        }
        if self.layer_label_prefix.is_empty() {
            return Err(Error::Config(
                "layer_label_prefix cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Layered options derived from this configuration.
    #[must_use]
    pub fn layered_options(&self) -> LayeredOptions {
        LayeredOptions {
            max_depth: self.layered_max_depth,
            record_table: self.record_table.clone(),
            label_prefix: self.layer_label_prefix.clone(),
        }
    }
}
