//! Match state: contenders, turn order and outcome.
//!
//! ## Contender
//!
//! One side of the duel: castle and fence hp, resources, hand and deck.
//! Every hp mutator floors at 0.
//!
//! ## Match
//!
//! Both contenders plus the turn counter, the active [`Side`], the status and
//! the match RNG that drives deck refills. A `Match` is cheap to clone (decks
//! are persistent vectors), but search code works on [`Snapshot`]s instead.
//!
//! [`Snapshot`]: super::snapshot::Snapshot

use serde::{Deserialize, Serialize};

use super::config::MatchConfig;
use super::player::{ContenderId, Side};
use super::resources::ResourcePool;
use super::rng::GameRng;
use crate::cards::{Card, Deck, Hand};

/// Outcome of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    Ongoing,
    Winner(ContenderId),
    Draw,
}

impl MatchStatus {
    #[must_use]
    pub fn is_over(self) -> bool {
        self != MatchStatus::Ongoing
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Ongoing => f.write_str("ongoing"),
            MatchStatus::Winner(id) => write!(f, "{id} wins"),
            MatchStatus::Draw => f.write_str("draw"),
        }
    }
}

/// Who drives each side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchMode {
    /// Human against an agent.
    #[default]
    SinglePlayer,
    /// Two humans.
    Multiplayer,
    /// Two agents.
    CpuOnly,
}

/// One side of the duel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contender {
    pub id: ContenderId,
    pub name: String,
    pub castle_hp: i64,
    pub fence_hp: i64,
    pub resources: ResourcePool,
    pub hand: Hand,
    pub deck: Deck,
}

impl Contender {
    /// A contender with an empty hand and deck.
    ///
    /// Negative hp is clamped to zero.
    #[must_use]
    pub fn new(
        id: ContenderId,
        name: impl Into<String>,
        castle_hp: i64,
        fence_hp: i64,
        resources: ResourcePool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            castle_hp: castle_hp.max(0),
            fence_hp: fence_hp.max(0),
            resources,
            hand: Hand::default(),
            deck: Deck::empty(),
        }
    }

    #[must_use]
    pub fn with_hand(mut self, hand: Hand) -> Self {
        self.hand = hand;
        self
    }

    #[must_use]
    pub fn with_deck(mut self, deck: Deck) -> Self {
        self.deck = deck;
        self
    }

    /// Take damage: the fence absorbs up to its value, the rest hits the castle.
    pub fn receive_damage(&mut self, damage: i64) {
        let absorbed = self.fence_hp.min(damage);
        self.fence_hp = (self.fence_hp - absorbed).max(0);
        self.castle_hp = (self.castle_hp - (damage - absorbed)).max(0);
    }

    pub fn add_castle(&mut self, delta: i64) {
        self.castle_hp = (self.castle_hp + delta).max(0);
    }

    pub fn add_fence(&mut self, delta: i64) {
        self.fence_hp = (self.fence_hp + delta).max(0);
    }

    /// Whether the stock of the card's material covers its cost.
    #[must_use]
    pub fn can_afford(&self, card: &Card) -> bool {
        self.resources.can_afford(card.material(), card.cost)
    }

    /// Draw one card into the first empty slot. Returns the slot filled.
    pub fn draw(&mut self, rng: &mut GameRng) -> Option<usize> {
        self.hand.first_empty()?;
        let card = self.deck.draw(rng)?;
        self.hand.place(card)
    }

    /// Draw until the hand is full or the deck yields nothing.
    pub fn fill_hand(&mut self, rng: &mut GameRng) {
        while self.draw(rng).is_some() {}
    }
}

/// Name and deck template for one side of a new match.
#[derive(Clone, Debug)]
pub struct ContenderSetup {
    pub name: String,
    pub deck: Vec<Card>,
}

impl ContenderSetup {
    pub fn new(name: impl Into<String>, deck: Vec<Card>) -> Self {
        Self {
            name: name.into(),
            deck,
        }
    }
}

/// A live match.
#[derive(Clone, Debug)]
pub struct Match {
    pub mode: MatchMode,

    /// Turn number (starts at 1).
    pub turn_count: u32,

    /// Contender with id 1.
    pub a: Contender,

    /// Contender with id 2.
    pub b: Contender,

    /// Side to move.
    pub active: Side,

    pub status: MatchStatus,

    rng: GameRng,
}

impl Match {
    /// Set up a fresh match: shuffled decks, full hands, A to move.
    #[must_use]
    pub fn new(
        config: &MatchConfig,
        mode: MatchMode,
        a: ContenderSetup,
        b: ContenderSetup,
        seed: u64,
    ) -> Self {
        let mut rng = GameRng::new(seed);
        let mut make = |id: u8, setup: ContenderSetup| {
            let mut contender = Contender::new(
                ContenderId::new(id),
                setup.name,
                config.starting_castle,
                config.starting_fence,
                ResourcePool::uniform(config.starting_income, config.starting_stock),
            )
            .with_hand(Hand::new(config.hand_size))
            .with_deck(Deck::new(setup.deck, &mut rng));
            contender.fill_hand(&mut rng);
            contender
        };

        let a = make(1, a);
        let b = make(2, b);
        Self::from_parts(mode, 1, a, b, Side::A, rng)
    }

    /// Assemble a match from prepared contenders. Status is computed from
    /// the contenders as given.
    #[must_use]
    pub fn from_parts(
        mode: MatchMode,
        turn_count: u32,
        a: Contender,
        b: Contender,
        active: Side,
        rng: GameRng,
    ) -> Self {
        let mut m = Self {
            mode,
            turn_count: turn_count.max(1),
            a,
            b,
            active,
            status: MatchStatus::Ongoing,
            rng,
        };
        m.status = crate::rules::evaluate_status(&m);
        m
    }

    #[must_use]
    pub fn contender(&self, side: Side) -> &Contender {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    pub fn contender_mut(&mut self, side: Side) -> &mut Contender {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }

    #[must_use]
    pub fn active_contender(&self) -> &Contender {
        self.contender(self.active)
    }

    #[must_use]
    pub fn other_contender(&self) -> &Contender {
        self.contender(self.active.other())
    }

    #[must_use]
    pub fn active_id(&self) -> ContenderId {
        self.active_contender().id
    }

    /// Seat of a contender id, if it plays in this match.
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
    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    /// Split borrow of the contenders and the RNG.
    pub(crate) fn parts_mut(&mut self) -> (&mut Contender, &mut Contender, &mut GameRng) {
        (&mut self.a, &mut self.b, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, Material};

    fn deck(n: u16) -> Vec<Card> {
        (0..n)
            .map(|i| Card::new(CardId::new(Material::Bricks, i), 1, "Wall", "fence +1").unwrap())
            .collect()
    }

    #[test]
    fn test_new_match_defaults() {
        let config = MatchConfig::default();
        let m = Match::new(
            &config,
            MatchMode::CpuOnly,
            ContenderSetup::new("Ann", deck(20)),
            ContenderSetup::new("Bob", deck(20)),
            7,
        );

        assert_eq!(m.turn_count, 1);
        assert_eq!(m.active, Side::A);
        assert_eq!(m.status, MatchStatus::Ongoing);
        assert_eq!(m.a.id, ContenderId::new(1));
        assert_eq!(m.b.id, ContenderId::new(2));
        assert_eq!(m.a.castle_hp, 30);
        assert_eq!(m.a.fence_hp, 10);
        assert_eq!(m.a.hand.len(), 8);
        assert_eq!(m.a.deck.len(), 12);
        assert_eq!(m.b.resources.flatten(), [2, 5, 2, 5, 2, 5]);
    }

    #[test]
    fn test_small_deck_refills_into_hand() {
        let config = MatchConfig::default();
        let m = Match::new(
            &config,
            MatchMode::CpuOnly,
            ContenderSetup::new("Ann", deck(3)),
            ContenderSetup::new("Bob", Vec::new()),
            1,
        );
        // A three-card template keeps refilling until the hand is full.
        assert_eq!(m.a.hand.len(), 8);
        assert!(m.b.hand.is_empty());
    }

    #[test]
    fn test_damage_and_floors() {
        let mut c = Contender::new(ContenderId::new(1), "C", 30, 10, ResourcePool::uniform(2, 5));
        c.receive_damage(12);
        assert_eq!((c.fence_hp, c.castle_hp), (0, 28));
        c.add_castle(-100);
        c.add_fence(-5);
        assert_eq!((c.fence_hp, c.castle_hp), (0, 0));
    }

    #[test]
    fn test_side_lookup() {
        let a = Contender::new(ContenderId::new(1), "A", 30, 10, ResourcePool::uniform(2, 5));
        let b = Contender::new(ContenderId::new(2), "B", 30, 10, ResourcePool::uniform(2, 5));
        let m = Match::from_parts(MatchMode::CpuOnly, 4, a, b, Side::B, GameRng::new(0));

        assert_eq!(m.active_id(), ContenderId::new(2));
        assert_eq!(m.side_of(ContenderId::new(1)), Some(Side::A));
        assert_eq!(m.side_of(ContenderId::new(9)), None);
        // Both hands are empty: the match is drawn on construction.
        assert_eq!(m.status, MatchStatus::Draw);
    }
}
