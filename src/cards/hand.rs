//! Fixed-capacity hand of ordered slots.
//!
//! Slots never move: playing or discarding a card empties its slot, and the
//! next draw fills the first empty slot.

use serde::{Deserialize, Serialize};

use super::definition::{Card, CardId};

/// Default number of hand slots.
pub const HAND_SIZE: usize = 8;

/// A contender's hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    slots: Vec<Option<Card>>,
}

impl Hand {
    /// An empty hand with `capacity` slots.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// Rebuild a hand from explicit slots.
    #[must_use]
    pub fn from_slots(slots: Vec<Option<Card>>) -> Self {
        Self { slots }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn slots(&self) -> &[Option<Card>] {
        &self.slots
    }

    /// Cards currently held, in slot order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.slots.iter().flatten()
    }

    /// Id of each slot's card, `None` for empty slots.
    #[must_use]
    pub fn ids(&self) -> Vec<Option<CardId>> {
        self.slots.iter().map(|s| s.as_ref().map(|c| c.id)).collect()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards().count()
    }

    /// True when every slot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// First slot holding a card with this id.
    #[must_use]
    pub fn find(&self, id: CardId) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.as_ref().is_some_and(|c| c.id == id))
    }

    /// Card in the first slot holding this id.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.find(id).and_then(|i| self.slots[i].as_ref())
    }

    /// Empty a slot, returning its card.
    pub fn take(&mut self, slot: usize) -> Option<Card> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    /// Put a card into the first empty slot. Returns the slot used, or
    /// `None` (and drops the card) when the hand is full.
    pub fn place(&mut self, card: Card) -> Option<usize> {
        let slot = self.first_empty()?;
        self.slots[slot] = Some(card);
        Some(slot)
    }

    #[must_use]
    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new(HAND_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Material;

    fn card(index: u16) -> Card {
        Card::new(CardId::new(Material::Bricks, index), 1, "Brick", "castle +1").unwrap()
    }

    #[test]
    fn test_slots_are_stable() {
        let mut hand = Hand::new(3);
        assert!(hand.is_empty());

        hand.place(card(0));
        hand.place(card(1));
        hand.place(card(2));
        assert_eq!(hand.place(card(3)), None);
        assert_eq!(hand.len(), 3);

        let slot = hand.find(CardId::new(Material::Bricks, 1)).unwrap();
        assert_eq!(slot, 1);
        hand.take(slot);

        assert_eq!(hand.first_empty(), Some(1));
        assert_eq!(hand.place(card(4)), Some(1));
        assert_eq!(
            hand.ids(),
            vec![
                Some(CardId::new(Material::Bricks, 0)),
                Some(CardId::new(Material::Bricks, 4)),
                Some(CardId::new(Material::Bricks, 2)),
            ]
        );
    }

    #[test]
    fn test_find_first_copy() {
        let mut hand = Hand::new(4);
        hand.place(card(5));
        hand.place(card(6));
        hand.place(card(5));
        assert_eq!(hand.find(CardId::new(Material::Bricks, 5)), Some(0));
        assert!(hand.get(CardId::new(Material::Bricks, 9)).is_none());
    }
}
