//! Move representation.
//!
//! A move is a card identity plus a flag: play the card (pay its cost and
//! resolve its effect) or discard it. Moves name cards by [`CardId`], so two
//! copies of the same card in a hand produce one move label.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// A complete game action.
///
/// ```
/// use castle_duel::cards::{CardId, Material};
/// use castle_duel::core::Move;
///
/// let play = Move::play(CardId::new(Material::Weapons, 4));
/// let discard = Move::discard(CardId::new(Material::Weapons, 4));
///
/// assert_ne!(play, discard);
/// assert_eq!(play.to_string(), "play 1:4");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The card being played or discarded.
    pub card: CardId,

    /// `true` to discard, `false` to play.
    pub discard: bool,
}

impl Move {
    /// Play `card`.
    #[must_use]
    pub const fn play(card: CardId) -> Self {
        Self { card, discard: false }
    }

    /// Discard `card`.
    #[must_use]
    pub const fn discard(card: CardId) -> Self {
        Self { card, discard: true }
    }

    #[must_use]
    pub const fn is_play(&self) -> bool {
        !self.discard
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verb = if self.discard { "discard" } else { "play" };
        write!(f, "{} {}", verb, self.card)
    }
}
