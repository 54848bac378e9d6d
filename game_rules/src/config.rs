//! Engine configuration loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::mechanics::{LevelScaling, StageTable};

/// Tunables for the resolution engine. Missing keys fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum nesting of equipment sharing before evaluation aborts.
    pub relay_max_depth: usize,
    pub crit_chance: StageTable,
    pub accuracy: StageTable,
    pub attack_scaling: LevelScaling,
    pub defense_scaling: LevelScaling,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            relay_max_depth: 4,
            crit_chance: StageTable::crit_chance(),
            accuracy: StageTable::accuracy(),
            attack_scaling: LevelScaling::default(),
            defense_scaling: LevelScaling::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
