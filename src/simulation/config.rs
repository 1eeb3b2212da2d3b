//! Batch simulation settings.

use serde::{Deserialize, Serialize};

use crate::core::{DuelError, Result};

/// How many matches to play, between whom, and how.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Matches per batch.
    pub games: u32,

    /// Base seed; match `i` uses `seed + i`.
    pub seed: u64,

    /// Registry key of the agent driving contender A (moves first).
    pub agent_a: String,

    /// Registry key of the agent driving contender B.
    pub agent_b: String,

    /// Turn cap per match. A match still going at the cap is counted as
    /// unfinished.
    pub max_turns: u32,

    /// Worker threads; 0 lets rayon decide.
    pub threads: usize,

    /// Forward every move to the `tracing` sink.
    pub log_moves: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            games: 10,
            seed: 0,
            agent_a: "random".to_string(),
            agent_b: "rule_based".to_string(),
            max_turns: 1000,
            threads: 0,
            log_moves: false,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_games(mut self, games: u32) -> Self {
        self.games = games;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set both agent keys.
    pub fn with_agents(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.agent_a = a.into();
        self.agent_b = b.into();
        self
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_log_moves(mut self, log_moves: bool) -> Self {
        self.log_moves = log_moves;
        self
    }

    /// Seed of match `index`.
    pub fn game_seed(&self, index: u32) -> u64 {
        self.seed.wrapping_add(u64::from(index))
    }

    pub fn validate(&self) -> Result<()> {
        if self.games == 0 {
            return Err(DuelError::config("simulation.games must be at least 1"));
        }
        if self.max_turns == 0 {
            return Err(DuelError::config("simulation.max_turns must be at least 1"));
        }
        if self.agent_a.trim().is_empty() || self.agent_b.trim().is_empty() {
            return Err(DuelError::config("simulation agents must be named"));
        }
        Ok(())
    }
}
