//! Batch simulation of agent-versus-agent matches.
//!
//! ```rust
//! use castle_duel::core::DuelConfig;
//! use castle_duel::simulation::{SimulationConfig, Simulator};
//!
//! let config = DuelConfig {
//!     simulation: SimulationConfig::new().with_games(4).with_agents("random", "rule_based"),
//!     ..DuelConfig::default()
//! };
//! let tally = Simulator::bundled(config).unwrap().run().unwrap();
//! assert_eq!(tally.games, 4);
//! println!("{tally}");
//! ```

pub mod config;
pub mod runner;
pub mod tally;

pub use config::SimulationConfig;
pub use runner::Simulator;
pub use tally::{MatchReport, MatchTally};
