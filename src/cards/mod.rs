//! Card system: definitions, hands, decks and the registry.
//!
//! ## Key Types
//!
//! - `Material`: the three resource types a card can cost
//! - `CardId`: stable `material:index` identity
//! - `Card`: immutable card with its effect parsed at construction
//! - `Hand`: fixed slots, never reordered
//! - `Deck`: draw pile that refills from its template
//! - `CardRegistry` / `DeckSpec`: catalog lookup and deck expansion

pub mod deck;
pub mod definition;
pub mod hand;
pub mod registry;

pub use deck::Deck;
pub use definition::{Card, CardId, Material};
pub use hand::{Hand, HAND_SIZE};
pub use registry::{CardRegistry, DeckSpec};
