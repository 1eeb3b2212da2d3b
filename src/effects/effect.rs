//! Effect definitions and the effect mini-language parser.
//!
//! Card effects are written as text: actions separated by `;`, each action a
//! whitespace-separated phrase ending in a signed magnitude.
//!
//! ```text
//! attack 6
//! enemy stacks -4
//! castle +8; fence +4
//! ```
//!
//! The phrase decides two things:
//!
//! - **Target**: the opponent if it mentions `enemy` or `attack`, otherwise
//!   the acting contender.
//! - **Action**: the first keyword that matches, in priority order `attack`,
//!   `castle`, `fence`, `stacks`, `all`, `transfer`, then the resource names
//!   (`builders`/`bricks`, `soldiers`/`weapons`, `mages`/`magic`).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Material;
use crate::core::{DuelError, ResourceSlot, Result};

/// Who an effect action applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTarget {
    /// The contender playing the card.
    Actor,
    /// The other contender.
    Opponent,
}

/// What an effect action does, with its signed magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectAction {
    /// Damage: the fence absorbs up to its value, the rest hits the castle.
    Attack(i64),
    /// Castle hp += v, floored at 0.
    AdjustCastle(i64),
    /// Fence hp += v, floored at 0.
    AdjustFence(i64),
    /// Every stock += v, floored at 0.
    AdjustStacks(i64),
    /// Both hp += v (floor 0), every income and stock += v (floor 1).
    AdjustAll(i64),
    /// Move up to v of each stock from the target to the other contender.
    Transfer(i64),
    /// One income or stock += v, floored at 0.
    AdjustResource {
        material: Material,
        slot: ResourceSlot,
        value: i64,
    },
}

/// One parsed action of a card effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Effect {
    pub target: EffectTarget,
    pub action: EffectAction,
}

impl Effect {
    /// Signed magnitude of the action.
    #[must_use]
    pub fn value(&self) -> i64 {
        match self.action {
            EffectAction::Attack(v)
            | EffectAction::AdjustCastle(v)
            | EffectAction::AdjustFence(v)
            | EffectAction::AdjustStacks(v)
            | EffectAction::AdjustAll(v)
            | EffectAction::Transfer(v) => v,
            EffectAction::AdjustResource { value, .. } => value,
        }
    }
}

/// Resource-name table: `(name, material, slot)`.
const RESOURCE_NAMES: [(&str, Material, ResourceSlot); 6] = [
    ("builders", Material::Bricks, ResourceSlot::Income),
    ("bricks", Material::Bricks, ResourceSlot::Stock),
    ("soldiers", Material::Weapons, ResourceSlot::Income),
    ("weapons", Material::Weapons, ResourceSlot::Stock),
    ("mages", Material::Magic, ResourceSlot::Income),
    ("magic", Material::Magic, ResourceSlot::Stock),
];

/// Look up a resource name such as `"soldiers"`.
#[must_use]
pub fn resource_by_name(name: &str) -> Option<(Material, ResourceSlot)> {
    RESOURCE_NAMES
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|&(_, m, s)| (m, s))
}

/// Parse a full effect string into its actions.
pub fn parse_effect(text: &str) -> Result<SmallVec<[Effect; 2]>> {
    text.split(';').map(parse_action).collect()
}

fn parse_action(action: &str) -> Result<Effect> {
    let tokens: SmallVec<[&str; 4]> = action.split_whitespace().collect();
    let (raw_value, phrase) = tokens
        .split_last()
        .ok_or_else(|| DuelError::config("empty effect action"))?;

    let value = raw_value
        .parse::<i64>()
        .map_err(|_| DuelError::config(format!("bad magnitude '{raw_value}' in '{}'", action.trim())))?;

    let has = |kw: &str| phrase.contains(&kw);

    let target = if has("enemy") || has("attack") {
        EffectTarget::Opponent
    } else {
        EffectTarget::Actor
    };

    let action = if has("attack") {
        EffectAction::Attack(value)
    } else if has("castle") {
        EffectAction::AdjustCastle(value)
    } else if has("fence") {
        EffectAction::AdjustFence(value)
    } else if has("stacks") {
        EffectAction::AdjustStacks(value)
    } else if has("all") {
        EffectAction::AdjustAll(value)
    } else if has("transfer") {
        EffectAction::Transfer(value)
    } else {
        let (material, slot) = phrase
            .iter()
            .find_map(|t| resource_by_name(t))
            .ok_or_else(|| DuelError::config(format!("unknown effect keyword in '{}'", action.trim())))?;
        EffectAction::AdjustResource { material, slot, value }
    };

    Ok(Effect { target, action })
}
