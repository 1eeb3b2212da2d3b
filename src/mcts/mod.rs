//! Monte Carlo Tree Search for castle-duel.
//!
//! ## Overview
//!
//! Per decision, the search grows a tree of snapshots from the current
//! position. Key features:
//!
//! - **Snapshot nodes**: every node owns the position reached through its
//!   edge, so expansion and rollouts never touch the live match
//! - **Full enumeration**: both contenders expand every legal move
//! - **UCB1 selection** with a tunable exploration constant
//! - **Weighted rollouts** that favour plays over discards
//! - **Pluggable leaf scoring**: outcome only, or a learned value estimate
//!
//! ## Usage
//!
//! ```rust
//! use castle_duel::cards::{CardRegistry, DeckSpec};
//! use castle_duel::core::{ContenderSetup, GameRng, Match, MatchConfig, MatchMode, Snapshot};
//! use castle_duel::mcts::{MCTSConfig, MCTSSearch};
//! use castle_duel::rules::{RulesEngine, TurnEngine};
//!
//! let registry = CardRegistry::bundled().unwrap();
//! let spec = DeckSpec::bundled_default().unwrap();
//! let mut rng = GameRng::new(1);
//! let m = Match::new(
//!     &MatchConfig::default(),
//!     MatchMode::CpuOnly,
//!     ContenderSetup::new("A", registry.load_deck(&spec, &mut rng).unwrap()),
//!     ContenderSetup::new("B", registry.load_deck(&spec, &mut rng).unwrap()),
//!     1,
//! );
//!
//! let config = MCTSConfig::default().with_iterations(200).with_depth_limit(20);
//! let mut search = MCTSSearch::new(TurnEngine, config);
//! let mv = search.choose_move(&Snapshot::capture(&m)).unwrap();
//! assert!(TurnEngine.legal_moves(&m).contains(&mv));
//!
//! for child in search.root_children() {
//!     println!("{}: {} visits", child.mv, child.visits);
//! }
//! ```
//!
//! ## Custom Policies
//!
//! ```rust,ignore
//! use castle_duel::mcts::{MCTSSearch, UniformRollout};
//!
//! let search = MCTSSearch::new(engine, config)
//!     .with_rollout(UniformRollout);  // No play/discard bias
//! ```

pub mod config;
pub mod evaluator;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::MCTSConfig;
pub use evaluator::{
    leaf_score, outcome_score, LeafEvaluator, LearnedEvaluator, OutcomeEvaluator, DRAW_SCORE,
    LOSS_SCORE, WIN_SCORE,
};
pub use node::{NodeId, SearchNode};
pub use policy::{ucb1, RolloutPolicy, SelectionPolicy, Ucb1, UniformRollout, WeightedRollout};
pub use search::MCTSSearch;
pub use stats::SearchStats;
pub use tree::{ChildSummary, SearchTree, TreeStats};
