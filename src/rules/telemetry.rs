//! Per-move telemetry.
//!
//! Every successful `apply_move` yields a [`MoveRecord`]: the state of both
//! contenders right after the move resolved, before the turn passes. Drivers
//! forward records to a [`TelemetrySink`]. Writing them to files is left to
//! the embedding application.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::CardId;
use crate::core::{ContenderId, MatchStatus, Move, ResourcePool};

/// State of one move, taken before the active side hands over.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub turn_count: u32,
    pub active_id: ContenderId,
    pub other_id: ContenderId,
    pub active_castle_hp: i64,
    pub active_fence_hp: i64,
    pub active_resources: ResourcePool,
    /// Slot contents after the replacement draw.
    pub active_hand_ids: Vec<Option<CardId>>,
    pub other_castle_hp: i64,
    pub other_fence_hp: i64,
    pub other_resources: ResourcePool,
    pub card_played: CardId,
    pub was_discarded: bool,
    pub status: MatchStatus,
}

impl MoveRecord {
    /// The move this record describes.
    #[must_use]
    pub fn played_move(&self) -> Move {
        Move {
            card: self.card_played,
            discard: self.was_discarded,
        }
    }
}

/// Receiver of move records.
pub trait TelemetrySink {
    fn record(&mut self, record: &MoveRecord);
}

/// Keeps every record in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryTelemetry {
    pub records: Vec<MoveRecord>,
}

impl MemoryTelemetry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TelemetrySink for MemoryTelemetry {
    fn record(&mut self, record: &MoveRecord) {
        self.records.push(record.clone());
    }
}

/// Emits each record as a `tracing` event.
///
/// Moves are logged at `debug`, finished matches at `info`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingTelemetry;

impl TelemetrySink for TracingTelemetry {
    fn record(&mut self, record: &MoveRecord) {
        debug!(
            turn = record.turn_count,
            active = %record.active_id,
            card = %record.card_played,
            discarded = record.was_discarded,
            active_castle = record.active_castle_hp,
            active_fence = record.active_fence_hp,
            other_castle = record.other_castle_hp,
            other_fence = record.other_fence_hp,
            "move applied"
        );
        if record.status.is_over() {
            info!(turn = record.turn_count, status = %record.status, "match finished");
        }
    }
}

/// Discards every record.
impl TelemetrySink for () {
    fn record(&mut self, _record: &MoveRecord) {}
}
