//! Flat, fully owned copies of a match.
//!
//! A [`Snapshot`] holds everything needed to rebuild a [`Match`]: both
//! contenders (hp, resources, hand slots, remaining deck and deck template),
//! the turn counter, mode, status, the active contender by stable id and the
//! match RNG position.
//!
//! Decks are held as persistent `im::Vector`s: capturing is O(1) per deck and
//! later changes to either the match or the snapshot never show in the other.
//!
//! ## Round trip
//!
//! `Snapshot::capture(&m).restore()` yields a match that behaves exactly like
//! `m` under any sequence of moves, deck refills included.
//!
//! ```
//! use castle_duel::cards::{CardRegistry, DeckSpec};
//! use castle_duel::core::{ContenderSetup, GameRng, Match, MatchConfig, MatchMode, Snapshot};
//!
//! let registry = CardRegistry::bundled().unwrap();
//! let spec = DeckSpec::bundled_default().unwrap();
//! let mut rng = GameRng::new(3);
//! let deck_a = registry.load_deck(&spec, &mut rng).unwrap();
//! let deck_b = registry.load_deck(&spec, &mut rng).unwrap();
//!
//! let m = Match::new(
//!     &MatchConfig::default(),
//!     MatchMode::CpuOnly,
//!     ContenderSetup::new("A", deck_a),
//!     ContenderSetup::new("B", deck_b),
//!     3,
//! );
//!
//! let snapshot = Snapshot::capture(&m);
//! let bytes = snapshot.to_bytes().unwrap();
//! let restored = Snapshot::from_bytes(&bytes).unwrap().restore().unwrap();
//! assert_eq!(Snapshot::capture(&restored), snapshot);
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};

use super::error::{DuelError, Result};
use super::player::{ContenderId, Side};
use super::resources::ResourcePool;
use super::rng::{GameRng, GameRngState};
use super::state::{Contender, Match, MatchMode, MatchStatus};
use crate::cards::{Card, Deck, Hand};

/// Owned copy of one contender.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContenderSnapshot {
    pub id: ContenderId,
    pub name: String,
    pub castle_hp: i64,
    pub fence_hp: i64,
    pub resources: ResourcePool,
    pub hand: Vec<Option<Card>>,
    /// Remaining draw pile, front first.
    pub deck: Vector<Card>,
    pub deck_template: Vector<Card>,
}

impl ContenderSnapshot {
    fn capture(c: &Contender) -> Self {
        let (deck, deck_template) = c.deck.to_parts();
        Self {
            id: c.id,
            name: c.name.clone(),
            castle_hp: c.castle_hp,
            fence_hp: c.fence_hp,
            resources: c.resources,
            hand: c.hand.slots().to_vec(),
            deck,
            deck_template,
        }
    }

    fn restore(&self) -> Contender {
        Contender::new(
            self.id,
            self.name.clone(),
            self.castle_hp,
            self.fence_hp,
            self.resources,
        )
        .with_hand(Hand::from_slots(self.hand.clone()))
        .with_deck(Deck::from_parts(self.deck.clone(), self.deck_template.clone()))
    }

    /// Cards in hand, in slot order.
    pub fn hand_cards(&self) -> impl Iterator<Item = &Card> {
        self.hand.iter().flatten()
    }
}

/// Owned copy of a whole match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub mode: MatchMode,
    pub turn_count: u32,
    pub status: MatchStatus,
    /// Stable id of the contender to move.
    pub active_id: ContenderId,
    pub a: ContenderSnapshot,
    pub b: ContenderSnapshot,
    pub rng: GameRngState,
}

impl Snapshot {
    /// Deep-copy a match.
    #[must_use]
    pub fn capture(m: &Match) -> Self {
        Self {
            mode: m.mode,
            turn_count: m.turn_count,
            status: m.status,
            active_id: m.active_id(),
            a: ContenderSnapshot::capture(&m.a),
            b: ContenderSnapshot::capture(&m.b),
            rng: m.rng().state(),
        }
    }

    /// Rebuild the match. Fails if `active_id` names neither contender.
    pub fn restore(&self) -> Result<Match> {
        let active = self.side_of(self.active_id).ok_or_else(|| {
            DuelError::invariant(format!("snapshot active id {} matches no contender", self.active_id.raw()))
        })?;

        let mut m = Match::from_parts(
            self.mode,
            self.turn_count,
            self.a.restore(),
            self.b.restore(),
            active,
            GameRng::from_state(&self.rng),
        );
        m.status = self.status;
        Ok(m)
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode bytes produced by [`Snapshot::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    #[must_use]
    pub fn side_of(&self, id: ContenderId) -> Option<Side> {
        if self.a.id == id {
            Some(Side::A)
        } else if self.b.id == id {
            Some(Side::B)
        } else {
            None
        }
    }

    #[must_use]
    pub fn contender(&self, side: Side) -> &ContenderSnapshot {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    /// Contender with the given id.
    #[must_use]
    pub fn by_id(&self, id: ContenderId) -> Option<&ContenderSnapshot> {
        self.side_of(id).map(|side| self.contender(side))
    }

    /// The other contender of `id`.
    #[must_use]
    pub fn opponent_of(&self, id: ContenderId) -> Option<&ContenderSnapshot> {
        self.side_of(id).map(|side| self.contender(side.other()))
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }
}
