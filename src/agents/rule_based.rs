//! Hand-written priorities.
//!
//! In order:
//!
//! 1. a playable card whose `castle` value lifts the own castle to the
//!    victory threshold;
//! 2. a playable card whose `attack` value covers the opponent's castle plus
//!    fence;
//! 3. when the opponent's incomes are lopsided (one at 4 or more, another at
//!    2 or less), the first playable magic card, but only if it is "Curse";
//! 4. a random playable card;
//! 5. discard the cheapest card.

use super::{mover, playable, Agent};
use crate::cards::Material;
use crate::core::{DuelError, GameRng, Match, Move, Result};
use crate::rules::VICTORY_CASTLE;

/// Name of the card played against a lopsided economy.
pub const CURSE: &str = "Curse";

/// Income at or above which a material counts as the opponent's strength.
const HIGH_INCOME: i64 = 4;
/// Income at or below which a material counts as the opponent's weakness.
const LOW_INCOME: i64 = 2;

#[derive(Clone, Debug)]
pub struct RuleBasedAgent {
    rng: GameRng,
}

impl RuleBasedAgent {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Agent for RuleBasedAgent {
    fn name(&self) -> &str {
        "rule_based"
    }

    fn choose_move(&mut self, m: &Match) -> Result<Move> {
        let me = mover(m)?;
        let opponent = m.other_contender();
        let playable = playable(me);

        let builds_to_victory = playable.iter().find(|c| {
            let value = c.effect_value("castle");
            value > 0 && me.castle_hp + value >= VICTORY_CASTLE
        });
        if let Some(card) = builds_to_victory {
            return Ok(Move::play(card.id));
        }

        let breaks_through = playable.iter().find(|c| {
            let value = c.effect_value("attack");
            value > 0 && value >= opponent.castle_hp + opponent.fence_hp
        });
        if let Some(card) = breaks_through {
            return Ok(Move::play(card.id));
        }

        let incomes = opponent.resources.iter().map(|(_, r)| r.income);
        let (high, low) = incomes.fold((i64::MIN, i64::MAX), |(hi, lo), v| (hi.max(v), lo.min(v)));
        if high >= HIGH_INCOME && low <= LOW_INCOME {
            let first_magic = playable.iter().find(|c| c.material() == Material::Magic);
            if let Some(card) = first_magic.filter(|c| c.name == CURSE) {
                return Ok(Move::play(card.id));
            }
        }

        if !playable.is_empty() {
            let card = playable[self.rng.below(playable.len())];
            return Ok(Move::play(card.id));
        }

        // `mover` guarantees a non-empty hand; ties keep the first slot.
        let cheapest = me
            .hand
            .cards()
            .reduce(|best, c| if c.cost < best.cost { c } else { best });
        match cheapest {
            Some(card) => Ok(Move::discard(card.id)),
            None => Err(DuelError::invariant(format!("{} has no card to discard", me.id))),
        }
    }
}
