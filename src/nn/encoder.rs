//! Feature projection of duel positions.
//!
//! Positions are encoded from the point of view of the contender to move, as
//! a flat vector of [`FEATURE_LEN`] values:
//!
//! | Offset | Len | Feature |
//! |---|---|---|
//! | 0 | 1 | turn / 60 |
//! | 1 | 1 | own castle / 100 |
//! | 2 | 1 | ln(1 + own fence) |
//! | 3 | 30 | own hand, count per card slot |
//! | 33 | 1 | opponent castle / 100 |
//! | 34 | 1 | ln(1 + opponent fence) |
//! | 35 | 6 | own income / 5 and stock / 40, per material |
//! | 41 | 6 | opponent income / 5 and stock / 40, per material |
//! | 47 | 30 | one-hot of the card moved |
//! | 77 | 1 | 1 if the move was a discard |
//!
//! Card slots are `material * 10 + index`; ids outside the 30 slots are
//! left out of the histogram and the one-hot.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{Move, ResourcePool, Snapshot};
use crate::nn::traits::EncodedState;
use crate::rules::MoveRecord;

/// Card slots covered by the hand histogram and the move one-hot.
pub const CARD_SLOTS: usize = 30;

/// Length of an encoded position.
pub const FEATURE_LEN: usize = 3 + CARD_SLOTS + 2 + 12 + CARD_SLOTS + 1;

/// Scales used to normalize raw values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureEncoder {
    pub turn_scale: f32,
    pub castle_scale: f32,
    pub income_scale: f32,
    pub stock_scale: f32,
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self {
            turn_scale: 60.0,
            castle_scale: 100.0,
            income_scale: 5.0,
            stock_scale: 40.0,
        }
    }
}

/// Raw inputs of one projection.
struct Position {
    turn: u32,
    castle: i64,
    fence: i64,
    hand: Vec<CardId>,
    opponent_castle: i64,
    opponent_fence: i64,
    resources: ResourcePool,
    opponent_resources: ResourcePool,
    mv: Option<Move>,
}

impl FeatureEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of features produced.
    #[must_use]
    pub fn len(&self) -> usize {
        FEATURE_LEN
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Encode a snapshot and the move that led to it, from the point of view
    /// of the contender to move.
    #[must_use]
    pub fn encode(&self, snapshot: &Snapshot, mv: Option<Move>) -> EncodedState {
        let (me, them) = match snapshot.side_of(snapshot.active_id) {
            Some(side) => (snapshot.contender(side), snapshot.contender(side.other())),
            None => (&snapshot.a, &snapshot.b),
        };

        self.project(&Position {
            turn: snapshot.turn_count,
            castle: me.castle_hp,
            fence: me.fence_hp,
            hand: me.hand_cards().map(|c| c.id).collect(),
            opponent_castle: them.castle_hp,
            opponent_fence: them.fence_hp,
            resources: me.resources,
            opponent_resources: them.resources,
            mv,
        })
    }

    /// Encode a telemetry record from the point of view of the mover.
    #[must_use]
    pub fn encode_record(&self, record: &MoveRecord) -> EncodedState {
        self.project(&Position {
            turn: record.turn_count,
            castle: record.active_castle_hp,
            fence: record.active_fence_hp,
            hand: record.active_hand_ids.iter().flatten().copied().collect(),
            opponent_castle: record.other_castle_hp,
            opponent_fence: record.other_fence_hp,
            resources: record.active_resources,
            opponent_resources: record.other_resources,
            mv: Some(record.played_move()),
        })
    }

    fn project(&self, p: &Position) -> EncodedState {
        let mut tensor = Vec::with_capacity(FEATURE_LEN);

        tensor.push(p.turn as f32 / self.turn_scale);
        tensor.push(p.castle as f32 / self.castle_scale);
        tensor.push((p.fence.max(0) as f32).ln_1p());

        let mut hand = [0.0f32; CARD_SLOTS];
        for id in &p.hand {
            if let Some(count) = hand.get_mut(id.slot()) {
                *count += 1.0;
            }
        }
        tensor.extend_from_slice(&hand);

        tensor.push(p.opponent_castle as f32 / self.castle_scale);
        tensor.push((p.opponent_fence.max(0) as f32).ln_1p());

        self.push_resources(&mut tensor, &p.resources);
        self.push_resources(&mut tensor, &p.opponent_resources);

        let mut played = [0.0f32; CARD_SLOTS];
        if let Some(mv) = p.mv {
            if let Some(hot) = played.get_mut(mv.card.slot()) {
                *hot = 1.0;
            }
        }
        tensor.extend_from_slice(&played);
        tensor.push(if p.mv.map_or(false, |mv| mv.discard) { 1.0 } else { 0.0 });

        EncodedState::new(tensor, vec![FEATURE_LEN])
    }

    fn push_resources(&self, tensor: &mut Vec<f32>, pool: &ResourcePool) {
        for (i, value) in pool.flatten().iter().enumerate() {
            let scale = if i % 2 == 0 { self.income_scale } else { self.stock_scale };
            tensor.push(*value as f32 / scale);
        }
    }
}
