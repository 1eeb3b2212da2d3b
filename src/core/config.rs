//! Match and engine configuration.
//!
//! `DuelConfig` groups every tunable of the crate into one TOML document:
//!
//! ```toml
//! [match]
//! starting_castle = 30
//!
//! [mcts]
//! iterations = 3000
//! exploration_constant = 2.5
//!
//! [simulation]
//! games = 100
//! agent_a = "mcts"
//! agent_b = "rule_based"
//! ```
//!
//! Every field has a default, so any section or key may be omitted.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::{DuelError, Result};
use crate::cards::HAND_SIZE;
use crate::mcts::MCTSConfig;
use crate::simulation::SimulationConfig;

/// Starting position of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub starting_castle: i64,
    pub starting_fence: i64,
    /// Income of each material at the start.
    pub starting_income: i64,
    /// Stock of each material at the start.
    pub starting_stock: i64,
    pub hand_size: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            starting_castle: 30,
            starting_fence: 10,
            starting_income: 2,
            starting_stock: 5,
            hand_size: HAND_SIZE,
        }
    }
}

impl MatchConfig {
    #[must_use]
    pub fn with_castle(mut self, castle: i64) -> Self {
        self.starting_castle = castle;
        self
    }

    #[must_use]
    pub fn with_fence(mut self, fence: i64) -> Self {
        self.starting_fence = fence;
        self
    }

    #[must_use]
    pub fn with_resources(mut self, income: i64, stock: i64) -> Self {
        self.starting_income = income;
        self.starting_stock = stock;
        self
    }

    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.hand_size == 0 {
            return Err(DuelError::config("match.hand_size must be at least 1"));
        }
        if self.starting_castle <= 0 || self.starting_castle >= crate::rules::VICTORY_CASTLE {
            return Err(DuelError::config(format!(
                "match.starting_castle must be in 1..{}",
                crate::rules::VICTORY_CASTLE
            )));
        }
        if self.starting_fence < 0 || self.starting_income < 0 || self.starting_stock < 0 {
            return Err(DuelError::config("match fence and resources must be non-negative"));
        }
        Ok(())
    }
}

/// Complete crate configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelConfig {
    #[serde(rename = "match")]
    pub match_config: MatchConfig,
    pub mcts: MCTSConfig,
    pub simulation: SimulationConfig,
}

impl DuelConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.match_config.validate()?;
        self.mcts.validate()?;
        self.simulation.validate()
    }
}
