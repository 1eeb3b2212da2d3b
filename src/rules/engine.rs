//! The turn engine: legal moves, move application and win detection.
//!
//! A turn is one move by the active contender:
//!
//! 1. the move is checked (match ongoing, card in hand, cost payable);
//! 2. a played card resolves its effect and its cost is paid;
//! 3. the card leaves its slot and a replacement is drawn into the first
//!    empty slot (the deck refills from its template when empty);
//! 4. the *other* contender's stock grows by its income;
//! 5. the status is re-evaluated and a [`MoveRecord`] is taken;
//! 6. if the match goes on, the turn passes and `turn_count` increments.
//!
//! The engine sits behind the [`RulesEngine`] trait so the search engine is
//! generic over the rules it drives.

use tracing::trace;

use super::telemetry::MoveRecord;
use crate::core::{DuelError, Match, MatchStatus, Move, Result, Side, Snapshot};
use crate::effects::EffectResolver;

/// Castle hp that wins the match.
pub const VICTORY_CASTLE: i64 = 100;

/// Status of a match from its contenders, checked in fixed order:
/// both castles down, both castles built, A built, B built, A down, B down,
/// both hands empty.
#[must_use]
pub fn evaluate_status(m: &Match) -> MatchStatus {
    let (a, b) = (&m.a, &m.b);

    if a.castle_hp <= 0 && b.castle_hp <= 0 {
        MatchStatus::Draw
    } else if a.castle_hp >= VICTORY_CASTLE && b.castle_hp >= VICTORY_CASTLE {
        MatchStatus::Draw
    } else if a.castle_hp >= VICTORY_CASTLE {
        MatchStatus::Winner(a.id)
    } else if b.castle_hp >= VICTORY_CASTLE {
        MatchStatus::Winner(b.id)
    } else if a.castle_hp <= 0 {
        MatchStatus::Winner(b.id)
    } else if b.castle_hp <= 0 {
        MatchStatus::Winner(a.id)
    } else if a.hand.is_empty() && b.hand.is_empty() {
        MatchStatus::Draw
    } else {
        MatchStatus::Ongoing
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_moves`: empty for a finished match or an empty hand
/// - `apply_move`: must be deterministic given the match RNG, so searches
///   and replays agree with live play
pub trait RulesEngine: Send + Sync {
    /// Moves available to the active contender.
    fn legal_moves(&self, m: &Match) -> Vec<Move>;

    /// Play or discard one card for the active contender.
    fn apply_move(&self, m: &mut Match, mv: Move) -> Result<MoveRecord>;

    /// Current outcome of the match.
    fn status(&self, m: &Match) -> MatchStatus {
        evaluate_status(m)
    }

    // === Snapshot helpers ===

    /// Apply a move to a private copy of a captured match and capture the
    /// result.
    fn advance(&self, snapshot: &Snapshot, mv: Move) -> Result<Snapshot> {
        let mut m = snapshot.restore()?;
        self.apply_move(&mut m, mv)?;
        Ok(Snapshot::capture(&m))
    }
}

/// The castle duel rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct TurnEngine;

impl TurnEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RulesEngine for TurnEngine {
    fn legal_moves(&self, m: &Match) -> Vec<Move> {
        if m.is_over() {
            return Vec::new();
        }

        let active = m.active_contender();
        let mut moves: Vec<Move> = Vec::with_capacity(2 * active.hand.capacity());

        for card in active.hand.cards().filter(|c| active.can_afford(c)) {
            let mv = Move::play(card.id);
            if !moves.contains(&mv) {
                moves.push(mv);
            }
        }
        for card in active.hand.cards() {
            let mv = Move::discard(card.id);
            if !moves.contains(&mv) {
                moves.push(mv);
            }
        }
        moves
    }

    fn apply_move(&self, m: &mut Match, mv: Move) -> Result<MoveRecord> {
        if m.is_over() {
            return Err(DuelError::invariant(format!("{mv} on a finished match ({})", m.status)));
        }

        let side = m.active;
        let actor = m.contender(side);
        let slot = actor
            .hand
            .find(mv.card)
            .ok_or_else(|| DuelError::invariant(format!("card {} is not in {}'s hand", mv.card, actor.id)))?;

        if mv.is_play() {
            if let Some(card) = actor.hand.slots()[slot].as_ref() {
                if !actor.can_afford(card) {
                    return Err(DuelError::invariant(format!(
                        "{} cannot afford {} ({} {} needed, {} held)",
                        actor.id,
                        card.name,
                        card.cost,
                        card.material(),
                        actor.resources.stock(card.material())
                    )));
                }
            }
        }

        let (a, b, rng) = m.parts_mut();
        let (actor, other) = match side {
            Side::A => (a, b),
            Side::B => (b, a),
        };

        let card = actor
            .hand
            .take(slot)
            .ok_or_else(|| DuelError::invariant(format!("hand slot {slot} emptied during {mv}")))?;
        if mv.is_play() {
            EffectResolver::resolve_all(card.effects(), actor, other);
            actor.resources.spend(card.material(), card.cost);
        }
        actor.draw(rng);
        other.resources.replenish();

        m.status = evaluate_status(m);

        let (actor, other) = (m.contender(side), m.contender(side.other()));
        let record = MoveRecord {
            turn_count: m.turn_count,
            active_id: actor.id,
            other_id: other.id,
            active_castle_hp: actor.castle_hp,
            active_fence_hp: actor.fence_hp,
            active_resources: actor.resources,
            active_hand_ids: actor.hand.ids(),
            other_castle_hp: other.castle_hp,
            other_fence_hp: other.fence_hp,
            other_resources: other.resources,
            card_played: mv.card,
            was_discarded: mv.discard,
            status: m.status,
        };
        trace!(turn = m.turn_count, actor = %record.active_id, %mv, status = %m.status, "turn resolved");

        if !m.is_over() {
            m.active = side.other();
            m.turn_count += 1;
        }
        Ok(record)
    }
}
