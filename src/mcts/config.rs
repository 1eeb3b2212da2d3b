//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

use crate::core::{DuelError, Result};

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MCTSConfig {
    /// UCB1 exploration constant (default: 2.5).
    /// Tuned for leaf scores in [-1, 1] summed over a rollout, so it sits
    /// well above the textbook sqrt(2).
    pub exploration_constant: f64,

    /// Select/expand/simulate/backpropagate passes per decision.
    pub iterations: u32,

    /// Maximum rollout length in turns.
    /// 0 scores the selected node directly with the leaf evaluator.
    pub depth_limit: u32,

    /// Random seed for rollout sampling.
    /// Same seed produces deterministic searches.
    pub seed: u64,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            exploration_constant: 2.5,
            iterations: 3000,
            depth_limit: 200,
            seed: 42,
        }
    }
}

impl MCTSConfig {
    /// Create a new config with custom exploration constant.
    #[must_use]
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    #[must_use]
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Create a new config with custom rollout depth.
    #[must_use]
    pub fn with_depth_limit(mut self, depth: u32) -> Self {
        self.depth_limit = depth;
        self
    }

    /// Create a new config with custom seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(DuelError::config(format!(
                "exploration_constant must be a non-negative number, got {}",
                self.exploration_constant
            )));
        }
        if self.iterations == 0 {
            return Err(DuelError::config("iterations must be at least 1"));
        }
        Ok(())
    }
}
