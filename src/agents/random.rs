//! Uniformly random agent.

use super::{mover, playable, Agent};
use crate::core::{GameRng, Match, Move, Result};

/// Plays a random affordable card, else discards a random card.
///
/// Picks are by hand slot, so duplicate cards are proportionally likelier.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, m: &Match) -> Result<Move> {
        let me = mover(m)?;

        let playable = playable(me);
        if !playable.is_empty() {
            let card = playable[self.rng.below(playable.len())];
            return Ok(Move::play(card.id));
        }

        let cards: Vec<_> = me.hand.cards().collect();
        let card = cards[self.rng.below(cards.len())];
        Ok(Move::discard(card.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId, Hand, Material};
    use crate::core::{Contender, ContenderId, DuelError, MatchMode, ResourcePool, Side};
    use crate::rules::{RulesEngine, TurnEngine};

    fn duel(cards: &[Card], stock: i64) -> Match {
        let mut hand = Hand::new(8);
        for c in cards {
            hand.place(c.clone());
        }
        let a = Contender::new(ContenderId::new(1), "A", 30, 10, ResourcePool::uniform(2, stock))
            .with_hand(hand.clone());
        let b = Contender::new(ContenderId::new(2), "B", 30, 10, ResourcePool::uniform(2, stock))
            .with_hand(hand);
        Match::from_parts(MatchMode::CpuOnly, 1, a, b, Side::A, GameRng::new(0))
    }

    fn card(index: u16, cost: i64) -> Card {
        Card::new(CardId::new(Material::Weapons, index), cost, "Knight", "attack 3").unwrap()
    }

    #[test]
    fn test_plays_when_possible() {
        let m = duel(&[card(0, 2), card(1, 50), card(2, 3)], 5);
        let mut agent = RandomAgent::new(4);
        for _ in 0..30 {
            let mv = agent.choose_move(&m).unwrap();
            assert!(mv.is_play());
            assert_ne!(mv.card, CardId::new(Material::Weapons, 1));
            assert!(TurnEngine.legal_moves(&m).contains(&mv));
        }
    }

    #[test]
    fn test_discards_when_broke() {
        let m = duel(&[card(0, 9), card(1, 50)], 0);
        let mut agent = RandomAgent::new(4);
        let mv = agent.choose_move(&m).unwrap();
        assert!(mv.discard);
    }

    #[test]
    fn test_empty_hand_is_an_error() {
        let mut m = duel(&[card(0, 1)], 5);
        m.a.hand = Hand::new(8);
        let err = RandomAgent::new(1).choose_move(&m).unwrap_err();
        assert!(matches!(err, DuelError::InvariantViolation(_)));
    }
}
