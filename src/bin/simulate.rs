//! duel-sim - batch simulator for castle-duel agents.
//!
//! Plays N matches between two registered agents on a rayon pool and prints
//! a win/loss/draw summary from contender A's point of view.
//!
//! ```text
//! duel-sim --games 200 --agent-a mcts --agent-b rule_based --iterations 500
//! RUST_LOG=castle_duel=debug duel-sim --config duel.toml --log-moves
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use castle_duel::agents::AgentRegistry;
use castle_duel::cards::{CardRegistry, DeckSpec};
use castle_duel::core::DuelConfig;
use castle_duel::nn::LinearValue;
use castle_duel::simulation::Simulator;

#[derive(Parser, Debug)]
#[command(name = "duel-sim", about = "Simulate castle-duel matches between agents")]
struct Args {
    /// TOML config; command-line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of matches to play
    #[arg(short = 'n', long)]
    games: Option<u32>,

    /// Agent driving contender A (moves first)
    #[arg(long)]
    agent_a: Option<String>,

    /// Agent driving contender B
    #[arg(long)]
    agent_b: Option<String>,

    /// Base seed; match i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// MCTS iterations per decision
    #[arg(long)]
    iterations: Option<u32>,

    /// Worker threads (0 = one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Card catalog JSON (defaults to the bundled catalog)
    #[arg(long)]
    cards: Option<PathBuf>,

    /// Deck JSON for contender A (defaults to the bundled deck)
    #[arg(long)]
    deck_a: Option<PathBuf>,

    /// Deck JSON for contender B (defaults to contender A's deck)
    #[arg(long)]
    deck_b: Option<PathBuf>,

    /// Linear value weights for the mcts_learned agent
    #[arg(long)]
    value_model: Option<PathBuf>,

    /// Log every move at debug level
    #[arg(long)]
    log_moves: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

impl Args {
    fn duel_config(&self) -> Result<DuelConfig> {
        let mut config = match &self.config {
            Some(path) => DuelConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
            None => DuelConfig::default(),
        };

        let sim = &mut config.simulation;
        if let Some(games) = self.games {
            sim.games = games;
        }
        if let Some(agent) = &self.agent_a {
            sim.agent_a = agent.clone();
        }
        if let Some(agent) = &self.agent_b {
            sim.agent_b = agent.clone();
        }
        if let Some(seed) = self.seed {
            sim.seed = seed;
        }
        if let Some(threads) = self.threads {
            sim.threads = threads;
        }
        sim.log_moves |= self.log_moves;
        if let Some(iterations) = self.iterations {
            config.mcts.iterations = iterations;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = args.duel_config()?;

    let cards = match &args.cards {
        Some(path) => CardRegistry::from_catalog_file(path).with_context(|| format!("loading {}", path.display()))?,
        None => CardRegistry::bundled()?,
    };
    let deck_a = match &args.deck_a {
        Some(path) => DeckSpec::from_file(path).with_context(|| format!("loading {}", path.display()))?,
        None => DeckSpec::bundled_default()?,
    };
    let deck_b = match &args.deck_b {
        Some(path) => DeckSpec::from_file(path).with_context(|| format!("loading {}", path.display()))?,
        None => deck_a.clone(),
    };

    info!(
        games = config.simulation.games,
        agent_a = %config.simulation.agent_a,
        agent_b = %config.simulation.agent_b,
        cards = cards.len(),
        "starting simulation"
    );

    let mut simulator = Simulator::new(config, cards, AgentRegistry::with_builtin(), deck_a)?.with_deck_b(deck_b);
    if let Some(path) = &args.value_model {
        let model = LinearValue::from_file(path).with_context(|| format!("loading {}", path.display()))?;
        simulator = simulator.with_value_model(model);
    }

    let tally = simulator.run()?;
    println!("{tally}");
    Ok(())
}
