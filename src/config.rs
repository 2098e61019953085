//! Analysis configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config:
//!
//! ```json
//! {
//!   "max_credited_actors": 3,
//!   "min_release_year": 1980,
//!   "null_model": { "cast_strategy": "configuration", "reattachment": "identity", "seed": 7 }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// How the movie↔actor null model rewires casts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastStrategy {
    /// Bipartite configuration model over both degree sequences.
    #[default]
    Configuration,
    /// Keep each cast size, draw the cast uniformly without replacement.
    UniformRecast,
}

/// How real entities are mapped onto configuration-model nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reattachment {
    /// Real node i takes stub node i; per-node degree preserved exactly.
    #[default]
    Identity,
    /// Real nodes shuffled before pairing; only the degree distribution survives.
    Shuffled,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NullModelConfig {
    pub cast_strategy: CastStrategy,
    pub reattachment: Reattachment,
    /// Fixed RNG seed. `None` draws one from the OS.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Credited actors taken from each record, in billing order.
    pub max_credited_actors: usize,
    /// Movies released before this year are dropped for longitudinal runs.
    pub min_release_year: i32,
    pub null_model: NullModelConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_credited_actors: 3,
            min_release_year: 1980,
            null_model: NullModelConfig::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_credited_actors == 0 {
            return Err(Error::Config("max_credited_actors must be at least 1".into()));
        }
        Ok(())
    }
}
