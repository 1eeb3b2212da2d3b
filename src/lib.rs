//! # castle-duel
//!
//! Rules engine and Monte Carlo Tree Search player for a two-player castle
//! building card duel.
//!
//! ## Design Principles
//!
//! 1. **Snapshots, not shared state**: search works on owned [`Snapshot`]s
//!    of the live match. Expansions and rollouts never touch the match the
//!    driver holds.
//!
//! 2. **Deterministic by seed**: match setup, deck refills, agents and
//!    rollouts all draw from seeded [`GameRng`]s, so a seed replays a match.
//!
//! 3. **Configuration over constants**: starting position, search budget and
//!    batch settings live in one [`DuelConfig`] loaded from TOML.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: decks are `im::Vector`s, so capturing a
//!   snapshot or cloning a match shares the card lists instead of copying.
//!
//! - **Effect mini-language**: card effects are parsed once into typed
//!   actions and resolved with floor clamping.
//!
//! ## Modules
//!
//! - `core`: contenders, resources, moves, match state, snapshots, RNG, config, errors
//! - `cards`: card definitions, hands, decks and the catalog registry
//! - `effects`: effect parser and resolver
//! - `rules`: turn engine, win evaluation and move telemetry
//! - `mcts`: Monte Carlo Tree Search over snapshots
//! - `nn`: feature projection and learned value estimators
//! - `agents`: move choosers and the agent registry
//! - `simulation`: parallel batches of agent-versus-agent matches

pub mod agents;
pub mod cards;
pub mod core;
pub mod effects;
pub mod mcts;
pub mod nn;
pub mod rules;
pub mod simulation;

// Re-export commonly used types
pub use crate::core::{
    Contender, ContenderId, ContenderSetup, ContenderSnapshot, DuelConfig, DuelError, GameRng,
    GameRngState, Match, MatchConfig, MatchMode, MatchStatus, Move, Resource, ResourcePool,
    Result, Side, Snapshot,
};

pub use crate::cards::{Card, CardId, CardRegistry, Deck, DeckSpec, Hand, Material};

pub use crate::effects::{parse_effect, Effect, EffectAction, EffectResolver, EffectTarget};

pub use crate::rules::{
    evaluate_status, MemoryTelemetry, MoveRecord, RulesEngine, TelemetrySink, TracingTelemetry,
    TurnEngine, VICTORY_CASTLE,
};

pub use crate::mcts::{
    LeafEvaluator, LearnedEvaluator, MCTSConfig, MCTSSearch, NodeId, OutcomeEvaluator,
    RolloutPolicy, SearchStats, SearchTree, SelectionPolicy, TreeStats, Ucb1, WeightedRollout,
};

pub use crate::nn::{FeatureEncoder, LinearValue, ValueEstimator};

pub use crate::agents::{Agent, AgentRegistry, MctsAgent, RandomAgent, RuleBasedAgent};

pub use crate::simulation::{MatchTally, SimulationConfig, Simulator};
