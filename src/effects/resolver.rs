//! Effect resolution - applying parsed effects to contenders.
//!
//! The resolver only touches hp and resources. Hands, decks and costs are
//! the turn engine's business.

use tracing::trace;

use super::effect::{Effect, EffectAction, EffectTarget};
use crate::cards::Material;
use crate::core::{Contender, ResourceSlot};

/// Resolves effects on a pair of contenders.
pub struct EffectResolver;

impl EffectResolver {
    /// Apply every action of a card, in order, for `actor` against
    /// `opponent`.
    pub fn resolve_all(effects: &[Effect], actor: &mut Contender, opponent: &mut Contender) {
        for effect in effects {
            Self::resolve(effect, actor, opponent);
        }
    }

    /// Apply one action.
    pub fn resolve(effect: &Effect, actor: &mut Contender, opponent: &mut Contender) {
        let (target, other) = match effect.target {
            EffectTarget::Actor => (actor, opponent),
            EffectTarget::Opponent => (opponent, actor),
        };
        trace!(target = %target.id, action = ?effect.action, "resolving effect");

        match effect.action {
            EffectAction::Attack(v) => target.receive_damage(v),
            EffectAction::AdjustCastle(v) => target.add_castle(v),
            EffectAction::AdjustFence(v) => target.add_fence(v),
            EffectAction::AdjustStacks(v) => target.resources.adjust_stacks(v),
            EffectAction::AdjustAll(v) => {
                target.add_castle(v);
                target.add_fence(v);
                target.resources.adjust_all(v);
            }
            EffectAction::Transfer(v) => {
                for m in Material::ALL {
                    let moved = target.resources.take(m, v);
                    other.resources.adjust(m, ResourceSlot::Stock, moved, 0);
                }
            }
            EffectAction::AdjustResource { material, slot, value } => {
                target.resources.adjust(material, slot, value, 0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ContenderId, ResourcePool};
    use crate::effects::parse_effect;

    fn contender(id: u8) -> Contender {
        Contender::new(ContenderId::new(id), format!("P{id}"), 30, 10, ResourcePool::uniform(2, 5))
    }

    fn apply(text: &str, a: &mut Contender, b: &mut Contender) {
        let effects = parse_effect(text).unwrap();
        EffectResolver::resolve_all(&effects, a, b);
    }

    #[test]
    fn test_attack_hits_fence_first() {
        let (mut a, mut b) = (contender(1), contender(2));
        apply("attack 6", &mut a, &mut b);
        assert_eq!((b.fence_hp, b.castle_hp), (4, 30));

        apply("attack 9", &mut a, &mut b);
        assert_eq!((b.fence_hp, b.castle_hp), (0, 25));

        apply("attack 99", &mut a, &mut b);
        assert_eq!((b.fence_hp, b.castle_hp), (0, 0));
        assert_eq!(a.castle_hp, 30);
    }

    #[test]
    fn test_self_and_enemy_targets() {
        let (mut a, mut b) = (contender(1), contender(2));
        apply("castle +8; fence +4", &mut a, &mut b);
        assert_eq!((a.castle_hp, a.fence_hp), (38, 14));

        apply("enemy castle -50", &mut a, &mut b);
        assert_eq!(b.castle_hp, 0);
        assert_eq!(b.fence_hp, 10);
    }

    #[test]
    fn test_all_floors() {
        let (mut a, mut b) = (contender(1), contender(2));
        apply("enemy all -10", &mut a, &mut b);
        assert_eq!(b.castle_hp, 20);
        assert_eq!(b.fence_hp, 0);
        for (_, r) in b.resources.iter() {
            assert_eq!((r.income, r.stock), (1, 1));
        }
    }

    #[test]
    fn test_transfer_is_bounded() {
        let (mut a, mut b) = (contender(1), contender(2));
        b.resources.adjust_stacks(-3);
        apply("enemy transfer 5", &mut a, &mut b);
        assert_eq!(b.resources.flatten(), [2, 0, 2, 0, 2, 0]);
        assert_eq!(a.resources.flatten(), [2, 7, 2, 7, 2, 7]);
    }

    #[test]
    fn test_resource_floor() {
        let (mut a, mut b) = (contender(1), contender(2));
        apply("enemy magic -9; builders +1", &mut a, &mut b);
        assert_eq!(b.resources.stock(Material::Magic), 0);
        assert_eq!(a.resources.income(Material::Bricks), 3);
    }
}
