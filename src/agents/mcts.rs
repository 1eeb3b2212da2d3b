//! Search-backed agent.

use super::{mover, Agent};
use crate::core::{Match, Move, Result};
use crate::mcts::{LeafEvaluator, LearnedEvaluator, MCTSConfig, MCTSSearch, OutcomeEvaluator, SearchStats};
use crate::nn::LinearValue;
use crate::rules::TurnEngine;

/// Runs a fresh [`MCTSSearch`] for every decision.
pub struct MctsAgent<V: LeafEvaluator = OutcomeEvaluator> {
    name: String,
    search: MCTSSearch<TurnEngine, V>,
}

impl MctsAgent<OutcomeEvaluator> {
    /// Outcome-scored search with random rollouts.
    pub fn new(config: MCTSConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            name: "mcts".to_string(),
            search: MCTSSearch::new(TurnEngine, config),
        })
    }
}

impl MctsAgent<LearnedEvaluator<LinearValue>> {
    /// Search that scores leaves with `model` instead of rolling out.
    ///
    /// The depth limit is forced to 0 so every simulation is a single
    /// evaluation of the expanded position.
    pub fn learned(config: MCTSConfig, model: LinearValue) -> Result<Self> {
        let config = config.with_depth_limit(0);
        config.validate()?;
        let evaluator = LearnedEvaluator::new(model)?;
        Ok(Self {
            name: "mcts_learned".to_string(),
            search: MCTSSearch::with_evaluator(TurnEngine, evaluator, config),
        })
    }
}

impl<V: LeafEvaluator> MctsAgent<V> {
    /// Statistics of the last decision.
    pub fn stats(&self) -> &SearchStats {
        self.search.stats()
    }

    pub fn search(&self) -> &MCTSSearch<TurnEngine, V> {
        &self.search
    }
}

impl<V: LeafEvaluator> Agent for MctsAgent<V> {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, m: &Match) -> Result<Move> {
        mover(m)?;
        self.search.choose_move_for(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardRegistry, DeckSpec};
    use crate::core::{ContenderSetup, GameRng, MatchConfig, MatchMode};
    use crate::nn::FEATURE_LEN;
    use crate::rules::RulesEngine;

    fn opening(seed: u64) -> Match {
        let registry = CardRegistry::bundled().unwrap();
        let spec = DeckSpec::bundled_default().unwrap();
        let mut rng = GameRng::new(seed);
        Match::new(
            &MatchConfig::default(),
            MatchMode::CpuOnly,
            ContenderSetup::new("A", registry.load_deck(&spec, &mut rng).unwrap()),
            ContenderSetup::new("B", registry.load_deck(&spec, &mut rng).unwrap()),
            seed,
        )
    }

    #[test]
    fn test_mcts_agent_picks_legal_move() {
        let m = opening(3);
        let config = MCTSConfig::default().with_iterations(60).with_depth_limit(10);
        let mut agent = MctsAgent::new(config).unwrap();

        let mv = agent.choose_move(&m).unwrap();
        assert!(TurnEngine.legal_moves(&m).contains(&mv));
        assert_eq!(agent.stats().iterations, 60);
        assert_eq!(agent.name(), "mcts");
    }

    #[test]
    fn test_learned_agent_forces_depth_zero() {
        let model = LinearValue::new(vec![0.01; FEATURE_LEN], 0.0);
        let config = MCTSConfig::default().with_iterations(40);
        let mut agent = MctsAgent::learned(config, model).unwrap();
        assert_eq!(agent.search().config().depth_limit, 0);

        let m = opening(5);
        let mv = agent.choose_move(&m).unwrap();
        assert!(TurnEngine.legal_moves(&m).contains(&mv));
        assert_eq!(agent.stats().rollout_turns, 0);
    }

    #[test]
    fn test_learned_agent_rejects_wrong_width() {
        let model = LinearValue::new(vec![0.5; 3], 0.0);
        assert!(MctsAgent::learned(MCTSConfig::default(), model).is_err());
    }
}
