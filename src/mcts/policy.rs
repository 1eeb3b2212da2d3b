//! MCTS policies for selection and rollouts.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: How to choose which child to descend into (UCB1)
//! - `RolloutPolicy`: How to sample moves during simulation (weighted, uniform)

use crate::core::{GameRng, Move};

use super::config::MCTSConfig;
use super::node::NodeId;
use super::tree::SearchTree;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which child node to explore.
pub trait SelectionPolicy: Send + Sync {
    /// Pick a child of `parent`, or `None` if it has no children.
    fn select(&self, tree: &SearchTree, parent: NodeId, config: &MCTSConfig) -> Option<NodeId>;
}

/// UCB1 value of a child.
///
/// `score / visits + c * sqrt(ln(parent_visits) / visits)`, or `+inf` for an
/// unvisited child.
#[must_use]
pub fn ucb1(score: f64, visits: u32, parent_visits: u32, c: f64) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }
    let n = f64::from(visits);
    let ln_parent = f64::from(parent_visits.max(1)).ln();
    score / n + c * (ln_parent / n).sqrt()
}

/// UCB1 (Upper Confidence Bound) selection policy.
///
/// Balances exploitation (high mean score) with exploration (low visits).
/// The first child in expansion order wins ties.
#[derive(Clone, Debug, Default)]
pub struct Ucb1;

impl SelectionPolicy for Ucb1 {
    fn select(&self, tree: &SearchTree, parent: NodeId, config: &MCTSConfig) -> Option<NodeId> {
        let parent_visits = tree.get(parent).visits;
        let mut best: Option<(NodeId, f64)> = None;

        for &child in &tree.get(parent).children {
            let node = tree.get(child);
            let value = ucb1(node.score, node.visits, parent_visits, config.exploration_constant);
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((child, value));
            }
        }
        best.map(|(id, _)| id)
    }
}

// =============================================================================
// Rollout Policy
// =============================================================================

/// Policy for sampling moves during a rollout.
pub trait RolloutPolicy: Send + Sync {
    /// Index of the move to apply, or `None` if `moves` is empty.
    fn pick(&self, moves: &[Move], rng: &mut GameRng) -> Option<usize>;
}

/// Samples moves in proportion to a play or discard weight.
///
/// The default weights (play 1.0, discard 0.5) bias rollouts toward playing.
#[derive(Clone, Debug)]
pub struct WeightedRollout {
    pub play_weight: f64,
    pub discard_weight: f64,
}

impl Default for WeightedRollout {
    fn default() -> Self {
        Self {
            play_weight: 1.0,
            discard_weight: 0.5,
        }
    }
}

impl WeightedRollout {
    #[must_use]
    pub fn new(play_weight: f64, discard_weight: f64) -> Self {
        Self {
            play_weight,
            discard_weight,
        }
    }
}

impl RolloutPolicy for WeightedRollout {
    fn pick(&self, moves: &[Move], rng: &mut GameRng) -> Option<usize> {
        let weights: Vec<f64> = moves
            .iter()
            .map(|mv| if mv.discard { self.discard_weight } else { self.play_weight })
            .collect();
        rng.pick_weighted(&weights)
    }
}

/// Uniform random rollout.
#[derive(Clone, Debug, Default)]
pub struct UniformRollout;

impl RolloutPolicy for UniformRollout {
    fn pick(&self, moves: &[Move], rng: &mut GameRng) -> Option<usize> {
        if moves.is_empty() {
            None
        } else {
            Some(rng.below(moves.len()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId, Hand, Material};
    use crate::core::{Contender, ContenderId, Match, MatchMode, ResourcePool, Side, Snapshot};

    fn snapshot() -> Snapshot {
        let card = Card::new(CardId::new(Material::Magic, 0), 1, "Spark", "magic +1").unwrap();
        let mut hand = Hand::new(8);
        hand.place(card);
        let a = Contender::new(ContenderId::new(1), "A", 30, 10, ResourcePool::uniform(2, 5))
            .with_hand(hand);
        let b = Contender::new(ContenderId::new(2), "B", 30, 10, ResourcePool::uniform(2, 5));
        Snapshot::capture(&Match::from_parts(MatchMode::CpuOnly, 1, a, b, Side::A, GameRng::new(0)))
    }

    fn mv(i: u16) -> Move {
        Move::play(CardId::new(Material::Magic, i))
    }

    fn make_test_tree() -> (SearchTree, [NodeId; 3]) {
        let mut tree = SearchTree::new(snapshot());
        let root = tree.root();

        // Child 0: high score, many visits
        let c0 = tree.add_child(root, snapshot(), mv(1));
        tree.get_mut(c0).visits = 100;
        tree.get_mut(c0).score = 80.0;

        // Child 1: lower score, fewer visits (should explore)
        let c1 = tree.add_child(root, snapshot(), mv(2));
        tree.get_mut(c1).visits = 10;
        tree.get_mut(c1).score = 7.0;

        // Child 2: unvisited (infinite exploration bonus)
        let c2 = tree.add_child(root, snapshot(), mv(3));

        tree.get_mut(root).visits = 110;
        (tree, [c0, c1, c2])
    }

    #[test]
    fn test_ucb1_selects_unvisited() {
        let (tree, [_, _, c2]) = make_test_tree();
        let selected = Ucb1.select(&tree, tree.root(), &MCTSConfig::default());
        assert_eq!(selected, Some(c2));
    }

    #[test]
    fn test_ucb1_all_visited() {
        let (mut tree, [c0, _, c2]) = make_test_tree();
        let root = tree.root();
        tree.get_mut(c2).visits = 5;
        tree.get_mut(c2).score = 2.0;
        tree.get_mut(root).visits = 115;

        // With C = 2.5 the exploration term favours the least visited child.
        assert_eq!(Ucb1.select(&tree, root, &MCTSConfig::default()), Some(c2));

        // Without exploration the best mean wins.
        let greedy = MCTSConfig::default().with_exploration(0.0);
        assert_eq!(Ucb1.select(&tree, root, &greedy), Some(c0));
    }

    #[test]
    fn test_ucb1_ties_keep_first() {
        let mut tree = SearchTree::new(snapshot());
        let root = tree.root();
        let first = tree.add_child(root, snapshot(), mv(1));
        tree.add_child(root, snapshot(), mv(2));
        assert_eq!(Ucb1.select(&tree, root, &MCTSConfig::default()), Some(first));
    }

    #[test]
    fn test_ucb1_no_children() {
        let tree = SearchTree::new(snapshot());
        assert_eq!(Ucb1.select(&tree, tree.root(), &MCTSConfig::default()), None);
    }

    #[test]
    fn test_ucb1_formula() {
        assert_eq!(ucb1(0.0, 0, 10, 2.5), f64::INFINITY);
        let expected = 0.5 + 2.5 * ((10.0f64).ln() / 4.0).sqrt();
        assert!((ucb1(2.0, 4, 10, 2.5) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_rollout_bias() {
        let moves = [
            Move::play(CardId::new(Material::Magic, 0)),
            Move::discard(CardId::new(Material::Magic, 0)),
        ];
        let policy = WeightedRollout::default();
        let mut rng = GameRng::new(12);
        let mut plays = 0;
        for _ in 0..3000 {
            if policy.pick(&moves, &mut rng) == Some(0) {
                plays += 1;
            }
        }
        // Expected two thirds.
        assert!(plays > 1800 && plays < 2200, "plays = {plays}");
        assert_eq!(policy.pick(&[], &mut rng), None);
    }

    #[test]
    fn test_uniform_rollout() {
        let mut rng = GameRng::new(1);
        assert_eq!(UniformRollout.pick(&[], &mut rng), None);
        let moves = [mv(0), mv(1), mv(2)];
        for _ in 0..20 {
            assert!(UniformRollout.pick(&moves, &mut rng).unwrap() < 3);
        }
    }
}
