//! Contender identification.
//!
//! ## ContenderId
//!
//! Stable identifier of a contender. Match status and snapshots refer to
//! contenders by id, so the id must survive capture/restore unchanged.
//!
//! ## Side
//!
//! Which of the two seats of a match (A or B). The active contender of a match
//! is a `Side`, never a second copy of the contender.

use serde::{Deserialize, Serialize};

/// Stable contender identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContenderId(pub u8);

impl ContenderId {
    /// Create a new contender ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw id.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for ContenderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Contender {}", self.0)
    }
}

/// Seat of a contender within a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// The other seat.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}
