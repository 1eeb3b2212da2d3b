//! Move choosers for artificial contenders.
//!
//! An [`Agent`] looks at a live match and names one move for the active
//! contender. The driver applies it through the turn engine; agents never
//! mutate the match themselves.
//!
//! | Key | Agent |
//! |---|---|
//! | `random` | [`RandomAgent`] |
//! | `rule_based` | [`RuleBasedAgent`] |
//! | `mcts` | [`MctsAgent`] with outcome-only leaf scoring |
//! | `mcts_learned` | [`MctsAgent`] with a [`LinearValue`] leaf evaluator |
//!
//! [`AgentRegistry`] maps these keys to factories.
//!
//! [`LinearValue`]: crate::nn::LinearValue

pub mod mcts;
pub mod random;
pub mod registry;
pub mod rule_based;

use crate::cards::Card;
use crate::core::{Contender, DuelError, Match, Move, Result};

pub use mcts::MctsAgent;
pub use random::RandomAgent;
pub use registry::{AgentContext, AgentFactory, AgentRegistry};
pub use rule_based::RuleBasedAgent;

/// Chooses moves for whichever contender is active.
pub trait Agent {
    /// Registry key or display name.
    fn name(&self) -> &str;

    /// A legal move for the active contender of `m`.
    fn choose_move(&mut self, m: &Match) -> Result<Move>;
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn choose_move(&mut self, m: &Match) -> Result<Move> {
        (**self).choose_move(m)
    }
}

/// Active contender of an ongoing match with at least one card in hand.
fn mover(m: &Match) -> Result<&Contender> {
    if m.is_over() {
        return Err(DuelError::invariant(format!("no move on a finished match ({})", m.status)));
    }
    let me = m.active_contender();
    if me.hand.is_empty() {
        return Err(DuelError::invariant(format!("{} has no card to play or discard", me.id)));
    }
    Ok(me)
}

/// Hand cards the contender can pay for, in slot order.
fn playable(me: &Contender) -> Vec<&Card> {
    me.hand.cards().filter(|c| me.can_afford(c)).collect()
}
