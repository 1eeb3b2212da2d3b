//! Card definitions - static card data.
//!
//! A `Card` is immutable once built. Its effect text is parsed exactly once,
//! in [`Card::new`], so a catalog with a bad effect fails at load time rather
//! than halfway through a match.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{DuelError, Result};
use crate::effects::{parse_effect, Effect};

/// One of the three resource types. Each card costs stock of its material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Material {
    /// Material 0: builders produce bricks. Mostly defensive cards.
    Bricks,
    /// Material 1: soldiers produce weapons. Mostly attack cards.
    Weapons,
    /// Material 2: mages produce magic. Mostly utility cards.
    Magic,
}

impl Material {
    pub const COUNT: usize = 3;

    pub const ALL: [Material; Material::COUNT] = [Material::Bricks, Material::Weapons, Material::Magic];

    /// Catalog index of this material.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Material::Bricks => 0,
            Material::Weapons => 1,
            Material::Magic => 2,
        }
    }

    /// Material for a catalog index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Material::Bricks => "bricks",
            Material::Weapons => "weapons",
            Material::Magic => "magic",
        };
        f.write_str(name)
    }
}

/// Stable card identity: material plus position in that material's catalog
/// list. Rendered as `"material:index"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId {
    pub material: Material,
    pub index: u16,
}

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(material: Material, index: u16) -> Self {
        Self { material, index }
    }

    /// Dense slot in `0..30`, used by feature projection.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.material.index() * 10 + self.index as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.material.index(), self.index)
    }
}

impl FromStr for CardId {
    type Err = DuelError;

    fn from_str(s: &str) -> Result<Self> {
        let (material, index) = s
            .split_once(':')
            .ok_or_else(|| DuelError::config(format!("card id '{s}' is not 'material:index'")))?;

        let material = material
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(Material::from_index)
            .ok_or_else(|| DuelError::config(format!("card id '{s}' has an unknown material")))?;
        let index = index
            .trim()
            .parse::<u16>()
            .map_err(|_| DuelError::config(format!("card id '{s}' has a bad index")))?;

        Ok(Self::new(material, index))
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use castle_duel::cards::{Card, CardId, Material};
///
/// let wall = Card::new(CardId::new(Material::Bricks, 2), 3, "Wall", "fence +6").unwrap();
/// assert_eq!(wall.material(), Material::Bricks);
/// assert_eq!(wall.effect_value("fence"), 6);
///
/// assert!(Card::new(CardId::new(Material::Bricks, 3), 1, "Bad", "gold +2").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CardRecord")]
pub struct Card {
    /// Stable identity.
    pub id: CardId,

    /// Stock of `id.material` paid to play the card.
    pub cost: i64,

    /// Card name (for display and the rule-based agent).
    pub name: String,

    /// Raw effect text, kept for telemetry and display.
    pub effect: String,

    #[serde(skip_serializing)]
    effects: SmallVec<[Effect; 2]>,
}

/// Stored form of a [`Card`]; the effect text is parsed again on load.
#[derive(Deserialize)]
struct CardRecord {
    id: CardId,
    cost: i64,
    name: String,
    effect: String,
}

impl TryFrom<CardRecord> for Card {
    type Error = DuelError;

    fn try_from(record: CardRecord) -> Result<Self> {
        Card::new(record.id, record.cost, record.name, record.effect)
    }
}

impl Card {
    /// Build a card, parsing its effect text.
    ///
    /// Fails with [`DuelError::Configuration`] on an unknown keyword, a
    /// malformed magnitude or an empty action.
    pub fn new(
        id: CardId,
        cost: i64,
        name: impl Into<String>,
        effect: impl Into<String>,
    ) -> Result<Self> {
        let effect = effect.into();
        let effects = parse_effect(&effect)?;
        Ok(Self {
            id,
            cost,
            name: name.into(),
            effect,
            effects,
        })
    }

    #[must_use]
    pub fn material(&self) -> Material {
        self.id.material
    }

    /// Parsed effect actions, in text order.
    #[must_use]
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Signed value of the first action whose tokens include `keyword`,
    /// or 0 when no action mentions it.
    #[must_use]
    pub fn effect_value(&self, keyword: &str) -> i64 {
        self.effect
            .split(';')
            .zip(self.effects.iter())
            .find(|(action, _)| action.split_whitespace().any(|t| t == keyword))
            .map_or(0, |(_, effect)| effect.value())
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] ({} {}): {}", self.name, self.id, self.cost, self.material(), self.effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_display_and_parse() {
        let id = CardId::new(Material::Magic, 7);
        assert_eq!(id.to_string(), "2:7");
        assert_eq!("2:7".parse::<CardId>().unwrap(), id);
        assert_eq!(id.slot(), 27);
    }

    #[test]
    fn test_card_id_parse_errors() {
        assert!("27".parse::<CardId>().is_err());
        assert!("3:1".parse::<CardId>().is_err());
        assert!("1:x".parse::<CardId>().is_err());
    }

    #[test]
    fn test_material_index() {
        for (i, m) in Material::ALL.iter().enumerate() {
            assert_eq!(m.index(), i);
            assert_eq!(Material::from_index(i), Some(*m));
        }
        assert_eq!(Material::from_index(3), None);
    }

    #[test]
    fn test_effect_value() {
        let card = Card::new(
            CardId::new(Material::Weapons, 0),
            4,
            "Raid",
            "attack 8; castle -2",
        )
        .unwrap();

        assert_eq!(card.effects().len(), 2);
        assert_eq!(card.effect_value("attack"), 8);
        assert_eq!(card.effect_value("castle"), -2);
        assert_eq!(card.effect_value("fence"), 0);
    }

    #[test]
    fn test_unknown_keyword_rejected() {
        let err = Card::new(CardId::new(Material::Magic, 0), 1, "Gold", "gold +3").unwrap_err();
        assert!(matches!(err, DuelError::Configuration(_)));
    }

    #[test]
    fn test_serialization() {
        let card = Card::new(CardId::new(Material::Bricks, 1), 2, "Wall", "fence +3").unwrap();
        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
        assert_eq!(back.effects(), card.effects());
    }

    #[test]
    fn test_deserialize_reparses_effect_text() {
        let json = r#"{"id":{"material":"Bricks","index":1},"cost":2,"name":"Wall","effect":"castle +4; fence +1"}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.effects().len(), 2);
        assert_eq!(card.effect_value("castle"), 4);

        let tampered = json.replace("castle +4", "gold +4");
        assert!(serde_json::from_str::<Card>(&tampered).is_err());
    }
}
