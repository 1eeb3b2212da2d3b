//! Draw pile with automatic refill.
//!
//! A deck remembers the card list it was built from (its template). Drawing
//! from an empty deck refills it from the template and reshuffles, so a
//! match never runs out of cards unless the template itself is empty.
//!
//! Cards are stored in an `im::Vector` so cloning a live match stays cheap.

use im::Vector;

use super::definition::Card;
use crate::core::GameRng;

/// A contender's draw pile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vector<Card>,
    template: Vector<Card>,
}

impl Deck {
    /// Build a shuffled deck from a template.
    #[must_use]
    pub fn new(template: Vec<Card>, rng: &mut GameRng) -> Self {
        let template: Vector<Card> = template.into_iter().collect();
        let mut deck = Self {
            cards: Vector::new(),
            template,
        };
        deck.refill(rng);
        deck
    }

    /// Rebuild a deck exactly as captured, without shuffling.
    #[must_use]
    pub fn from_parts(cards: impl Into<Vector<Card>>, template: impl Into<Vector<Card>>) -> Self {
        Self {
            cards: cards.into(),
            template: template.into(),
        }
    }

    /// An empty deck with an empty template.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cards: Vector::new(),
            template: Vector::new(),
        }
    }

    /// Draw the front card, refilling from the template first if empty.
    pub fn draw(&mut self, rng: &mut GameRng) -> Option<Card> {
        if self.cards.is_empty() {
            self.refill(rng);
        }
        self.cards.pop_front()
    }

    /// Replace the pile with a fresh shuffled copy of the template.
    pub fn refill(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<Card> = self.template.iter().cloned().collect();
        rng.shuffle(&mut cards);
        self.cards = cards.into_iter().collect();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remaining cards, front first.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn template(&self) -> impl Iterator<Item = &Card> {
        self.template.iter()
    }

    /// `(remaining, template)` as persistent vectors. O(1).
    #[must_use]
    pub fn to_parts(&self) -> (Vector<Card>, Vector<Card>) {
        (self.cards.clone(), self.template.clone())
    }
}
