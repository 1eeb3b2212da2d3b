//! Card registry and deck loading.
//!
//! The `CardRegistry` stores every card of a catalog, keyed by [`CardId`].
//! It is built once (from JSON or by hand) and passed by reference; there is
//! no global card cache.
//!
//! ## Formats
//!
//! Catalog: material index to the ordered list of that material's cards.
//!
//! ```json
//! {"0": [{"cost": 1, "name": "Wall", "effect": "fence +3"}], "1": [], "2": []}
//! ```
//!
//! Deck: card id to number of copies.
//!
//! ```json
//! {"0:0": 2, "1:3": 1}
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use tracing::debug;

use super::definition::{Card, CardId, Material};
use crate::core::{DuelError, GameRng, Result};

const BUNDLED_CATALOG: &str = include_str!("../../data/cards.json");
const BUNDLED_DECK: &str = include_str!("../../data/decks/default_deck.json");

#[derive(Deserialize)]
struct CatalogEntry {
    cost: i64,
    name: String,
    effect: String,
}

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use castle_duel::cards::{Card, CardId, CardRegistry, Material};
///
/// let mut registry = CardRegistry::new();
/// let id = CardId::new(Material::Weapons, 0);
/// registry.register(Card::new(id, 1, "Archer", "attack 2").unwrap()).unwrap();
///
/// assert_eq!(registry.lookup(id).unwrap().name, "Archer");
/// assert!(registry.lookup(CardId::new(Material::Weapons, 1)).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, Card>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog document.
    pub fn from_catalog_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<CatalogEntry>> = serde_json::from_str(json)?;
        let mut registry = Self::new();

        for (key, entries) in raw {
            let material = key
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(Material::from_index)
                .ok_or_else(|| DuelError::config(format!("unknown material '{key}' in catalog")))?;

            for (index, entry) in entries.into_iter().enumerate() {
                let index = u16::try_from(index)
                    .map_err(|_| DuelError::config(format!("too many cards for material {key}")))?;
                let id = CardId::new(material, index);
                let card = Card::new(id, entry.cost, entry.name, entry.effect)
                    .map_err(|e| DuelError::config(format!("card {id}: {e}")))?;
                registry.register(card)?;
            }
        }

        debug!(cards = registry.len(), "loaded card catalog");
        Ok(registry)
    }

    /// Read and parse a catalog file.
    pub fn from_catalog_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_catalog_json(&text)
    }

    /// The catalog shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_catalog_json(BUNDLED_CATALOG)
    }

    /// Register a card. A second card with the same id is rejected.
    pub fn register(&mut self, card: Card) -> Result<()> {
        if self.cards.contains_key(&card.id) {
            return Err(DuelError::config(format!("card {} already registered", card.id)));
        }
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Get a card definition by ID, failing on unknown ids.
    pub fn lookup(&self, id: CardId) -> Result<&Card> {
        self.get(id)
            .ok_or_else(|| DuelError::config(format!("unknown card id {id}")))
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All cards, ordered by id.
    #[must_use]
    pub fn sorted(&self) -> Vec<&Card> {
        let mut cards: Vec<_> = self.cards.values().collect();
        cards.sort_by_key(|c| c.id);
        cards
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Card>
    where
        F: Fn(&Card) -> bool,
    {
        self.cards.values().filter(move |c| predicate(c))
    }

    /// Expand a deck spec into a shuffled card list.
    pub fn load_deck(&self, spec: &DeckSpec, rng: &mut GameRng) -> Result<Vec<Card>> {
        spec.validate()?;
        let mut cards = Vec::with_capacity(spec.total());
        for &(id, count) in spec.entries() {
            let card = self.lookup(id)?;
            cards.extend(std::iter::repeat(card).take(count as usize).cloned());
        }
        rng.shuffle(&mut cards);
        Ok(cards)
    }
}

/// Card counts making up a deck.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeckSpec {
    entries: Vec<(CardId, u32)>,
}

impl DeckSpec {
    /// Build from explicit `(id, copies)` pairs. Repeated ids are merged.
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = (CardId, u32)>) -> Self {
        let mut merged: BTreeMap<CardId, u32> = BTreeMap::new();
        for (id, count) in entries {
            *merged.entry(id).or_default() += count;
        }
        Self {
            entries: merged.into_iter().filter(|&(_, n)| n > 0).collect(),
        }
    }

    /// Parse a deck document.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, u32> = serde_json::from_str(json)?;
        let entries = raw
            .into_iter()
            .map(|(key, count)| Ok((key.parse::<CardId>()?, count)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(entries))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Render as a deck document (`{"material:index": copies}`).
    pub fn to_json(&self) -> Result<String> {
        let raw: BTreeMap<String, u32> = self
            .entries
            .iter()
            .map(|&(id, count)| (id.to_string(), count))
            .collect();
        Ok(serde_json::to_string_pretty(&raw)?)
    }

    /// Write the deck document to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// A playable deck holds at least one card.
    pub fn validate(&self) -> Result<()> {
        if self.total() == 0 {
            return Err(DuelError::config("deck has no cards"));
        }
        Ok(())
    }

    /// The default deck shipped with the crate.
    pub fn bundled_default() -> Result<Self> {
        Self::from_json(BUNDLED_DECK)
    }

    /// `(id, copies)` pairs ordered by id.
    #[must_use]
    pub fn entries(&self) -> &[(CardId, u32)] {
        &self.entries
    }

    /// Total number of cards.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|&(_, n)| n as usize).sum()
    }
}
