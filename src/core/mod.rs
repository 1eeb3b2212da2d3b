//! Core types: contenders, resources, moves, match state, snapshots, RNG,
//! configuration and errors.
//!
//! Everything a turn needs lives here; the rules that drive a turn live in
//! [`crate::rules`].

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod resources;
pub mod rng;
pub mod snapshot;
pub mod state;

pub use action::Move;
pub use config::{DuelConfig, MatchConfig};
pub use error::{DuelError, Result};
pub use player::{ContenderId, Side};
pub use resources::{Resource, ResourcePool, ResourceSlot};
pub use rng::{GameRng, GameRngState};
pub use snapshot::{ContenderSnapshot, Snapshot};
pub use state::{Contender, ContenderSetup, Match, MatchMode, MatchStatus};
