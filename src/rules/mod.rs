//! Turn engine and telemetry.
//!
//! `RulesEngine` is the seam between the rules and everything that drives
//! them (agents, the search engine, the batch simulator). `TurnEngine` is
//! the castle duel implementation.

pub mod engine;
pub mod telemetry;

pub use engine::{evaluate_status, RulesEngine, TurnEngine, VICTORY_CASTLE};
pub use telemetry::{MemoryTelemetry, MoveRecord, TelemetrySink, TracingTelemetry};
