//! Core MCTS search algorithm.
//!
//! Every decision builds a fresh [`SearchTree`] rooted at a snapshot of the
//! live match. Both contenders expand with their full legal move lists, so
//! the search sees the whole position, hands and deck order included.
//! Simulation results are always scored from the point of view of the
//! contender to move at the root.

use std::time::Instant;

use tracing::{debug, trace};

use crate::core::{ContenderId, GameRng, Match, Move, Result, Snapshot};
use crate::rules::RulesEngine;

use super::config::MCTSConfig;
use super::evaluator::{leaf_score, outcome_score, LeafEvaluator, OutcomeEvaluator};
use super::node::NodeId;
use super::policy::{RolloutPolicy, SelectionPolicy, Ucb1, WeightedRollout};
use super::stats::SearchStats;
use super::tree::{ChildSummary, SearchTree};

/// Main MCTS search context.
///
/// Generic over the rules engine and the leaf evaluator. Owns the
/// configuration, the rollout RNG and the tree of the last decision.
pub struct MCTSSearch<E: RulesEngine, V: LeafEvaluator = OutcomeEvaluator> {
    /// The game rules engine.
    engine: E,

    /// Scores ongoing positions.
    evaluator: V,

    /// Search configuration.
    config: MCTSConfig,

    /// RNG for rollouts.
    rng: GameRng,

    /// Selection policy.
    selection: Box<dyn SelectionPolicy>,

    /// Rollout move sampling.
    rollout: Box<dyn RolloutPolicy>,

    /// Tree of the last decision.
    tree: Option<SearchTree>,

    /// Search statistics.
    stats: SearchStats,
}

impl<E: RulesEngine> MCTSSearch<E, OutcomeEvaluator> {
    /// Create a search that scores only finished matches.
    pub fn new(engine: E, config: MCTSConfig) -> Self {
        Self::with_evaluator(engine, OutcomeEvaluator, config)
    }
}

impl<E: RulesEngine, V: LeafEvaluator> MCTSSearch<E, V> {
    /// Create a search with a custom leaf evaluator.
    pub fn with_evaluator(engine: E, evaluator: V, config: MCTSConfig) -> Self {
        let rng = GameRng::new(config.seed);

        Self {
            engine,
            evaluator,
            config,
            rng,
            selection: Box::new(Ucb1),
            rollout: Box::new(WeightedRollout::default()),
            tree: None,
            stats: SearchStats::default(),
        }
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom rollout policy.
    pub fn with_rollout<R: RolloutPolicy + 'static>(mut self, rollout: R) -> Self {
        self.rollout = Box::new(rollout);
        self
    }

    /// Choose a move for the contender to move in `root`.
    ///
    /// Runs `config.iterations` select/expand/simulate/backpropagate passes
    /// and returns the edge label of the root child with the best
    /// `(mean score, visits)`. Fails with `EmptyTree` when the root has no
    /// legal moves (finished match or empty hand).
    pub fn choose_move(&mut self, root: &Snapshot) -> Result<Move> {
        let start = Instant::now();
        self.stats.reset();

        let perspective = root.active_id;
        let mut tree = SearchTree::new(root.clone());

        for _ in 0..self.config.iterations {
            self.iteration(&mut tree, perspective)?;
            self.stats.iterations += 1;
        }

        let chosen = tree.best_move();

        self.stats.tree_nodes = tree.len();
        self.stats.time_us = start.elapsed().as_micros() as u64;
        self.tree = Some(tree);

        match &chosen {
            Ok(mv) => debug!(
                contender = %perspective,
                %mv,
                iterations = self.stats.iterations,
                nodes = self.stats.tree_nodes,
                max_depth = self.stats.max_depth,
                time_us = self.stats.time_us,
                "search finished"
            ),
            Err(err) => debug!(contender = %perspective, %err, "search found no move"),
        }
        chosen
    }

    /// Choose a move for the active contender of a live match.
    pub fn choose_move_for(&mut self, m: &Match) -> Result<Move> {
        self.choose_move(&Snapshot::capture(m))
    }

    /// Single MCTS iteration: select, expand, simulate, backpropagate.
    fn iteration(&mut self, tree: &mut SearchTree, perspective: ContenderId) -> Result<()> {
        let leaf = self.select(tree)?;
        let result = self.simulate(tree, leaf, perspective)?;
        self.stats.simulations += 1;
        tree.backpropagate(leaf, result);
        Ok(())
    }

    /// Descend from the root, expanding on the way, until a terminal node, a
    /// childless node or a node visited for the first time.
    fn select(&mut self, tree: &mut SearchTree) -> Result<NodeId> {
        let mut current = tree.root();
        loop {
            if tree.get(current).is_terminal() {
                return Ok(current);
            }
            if !tree.get(current).expanded {
                self.expand(tree, current)?;
            }
            let Some(next) = self.selection.select(tree, current, &self.config) else {
                return Ok(current);
            };
            current = next;
            if tree.get(current).visits == 0 {
                return Ok(current);
            }
        }
    }

    /// Add one child per legal move, each built on a private copy.
    fn expand(&mut self, tree: &mut SearchTree, id: NodeId) -> Result<()> {
        let base = tree.get(id).snapshot.restore()?;
        let moves = self.engine.legal_moves(&base);

        for mv in moves {
            let mut next = base.clone();
            self.engine.apply_move(&mut next, mv)?;
            let child = tree.add_child(id, Snapshot::capture(&next), mv);
            self.stats.max_depth = self.stats.max_depth.max(tree.get(child).depth);
        }

        let node = tree.get_mut(id);
        node.expanded = true;
        trace!(node = %id, children = node.children.len(), "expanded");
        self.stats.nodes_expanded += 1;
        Ok(())
    }

    /// Score a node: its outcome if finished, else a rollout of at most
    /// `depth_limit` turns summing the leaf score after every turn.
    fn simulate(&mut self, tree: &SearchTree, id: NodeId, perspective: ContenderId) -> Result<f64> {
        let node = tree.get(id);

        if let Some(score) = outcome_score(node.snapshot.status, perspective) {
            self.stats.terminal_hits += 1;
            return Ok(score);
        }
        if self.config.depth_limit == 0 {
            return Ok(self.evaluator.evaluate(&node.snapshot, node.mv, perspective));
        }

        let mut m = node.snapshot.restore()?;
        let mut total = 0.0;

        for _ in 0..self.config.depth_limit {
            let moves = self.engine.legal_moves(&m);
            let Some(index) = self.rollout.pick(&moves, &mut self.rng) else {
                break;
            };
            let mv = moves[index];
            self.engine.apply_move(&mut m, mv)?;
            self.stats.rollout_turns += 1;

            total += match (outcome_score(m.status, perspective), self.evaluator.constant_score()) {
                (Some(score), _) => score,
                (None, Some(score)) => score,
                (None, None) => leaf_score(&self.evaluator, &Snapshot::capture(&m), Some(mv), perspective),
            };
            if m.is_over() {
                break;
            }
        }
        Ok(total)
    }

    /// Get search statistics of the last decision.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the tree of the last decision.
    #[must_use]
    pub fn tree(&self) -> Option<&SearchTree> {
        self.tree.as_ref()
    }

    /// Root children of the last decision, in expansion order.
    pub fn root_children(&self) -> Vec<ChildSummary> {
        self.tree
            .as_ref()
            .map(|tree| tree.child_summaries(tree.root()))
            .unwrap_or_default()
    }

    /// Get move visit counts from the root of the last decision.
    pub fn move_visits(&self) -> Vec<(Move, u32)> {
        self.root_children()
            .into_iter()
            .map(|child| (child.mv, child.visits))
            .collect()
    }

    /// Get the engine reference.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Get the evaluator reference.
    pub fn evaluator(&self) -> &V {
        &self.evaluator
    }

    /// Get the configuration.
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }
}
