//! MCTS search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one decision.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Total iterations performed.
    pub iterations: u32,

    /// Nodes whose children were generated.
    pub nodes_expanded: u32,

    /// Simulations (rollouts or direct leaf scores) performed.
    pub simulations: u32,

    /// Simulations that started from a finished match.
    pub terminal_hits: u32,

    /// Turns played across all rollouts.
    pub rollout_turns: u64,

    /// Maximum depth reached during search.
    pub max_depth: u16,

    /// Nodes in the tree when the search ended.
    pub tree_nodes: usize,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate iterations per second.
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            f64::from(self.iterations) / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Average rollout length in turns.
    #[must_use]
    pub fn avg_rollout_length(&self) -> f64 {
        let rollouts = self.simulations.saturating_sub(self.terminal_hits);
        if rollouts == 0 {
            0.0
        } else {
            self.rollout_turns as f64 / f64::from(rollouts)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_on_empty_stats() {
        let stats = SearchStats::new();
        assert_eq!(stats.iterations_per_second(), 0.0);
        assert_eq!(stats.avg_rollout_length(), 0.0);
    }

    #[test]
    fn test_rates() {
        let mut stats = SearchStats {
            iterations: 3000,
            time_us: 1_500_000,
            ..SearchStats::default()
        };
        assert_eq!(stats.iterations_per_second(), 2000.0);

        // Terminal hits never roll out.
        stats.simulations = 10;
        stats.terminal_hits = 2;
        stats.rollout_turns = 40;
        assert_eq!(stats.avg_rollout_length(), 5.0);

        stats.terminal_hits = 10;
        assert_eq!(stats.avg_rollout_length(), 0.0);
    }

    #[test]
    fn test_reset_and_json() {
        let mut stats = SearchStats {
            iterations: 7,
            max_depth: 3,
            tree_nodes: 19,
            ..SearchStats::default()
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["tree_nodes"], 19);
        assert_eq!(serde_json::from_value::<SearchStats>(json).unwrap(), stats);

        stats.reset();
        assert_eq!(stats, SearchStats::default());
    }
}
