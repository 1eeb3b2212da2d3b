//! Match driver and parallel batch runner.
//!
//! Each match is independent: it builds its own decks, agents and `Match`
//! from shared read-only inputs, so a batch maps cleanly onto a rayon pool
//! and the per-match tallies are simply summed.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use super::tally::{MatchReport, MatchTally};
use crate::agents::{Agent, AgentContext, AgentRegistry};
use crate::cards::{CardRegistry, DeckSpec};
use crate::core::{
    ContenderSetup, DuelConfig, DuelError, GameRng, Match, MatchMode, MatchStatus, Result, Side,
};
use crate::nn::LinearValue;
use crate::rules::{RulesEngine, TelemetrySink, TracingTelemetry, TurnEngine};

/// Plays batches of agent-versus-agent matches.
pub struct Simulator {
    config: DuelConfig,
    cards: CardRegistry,
    agents: AgentRegistry,
    deck_a: DeckSpec,
    deck_b: DeckSpec,
    value_model: Option<LinearValue>,
}

impl Simulator {
    /// Both sides use `deck`.
    pub fn new(config: DuelConfig, cards: CardRegistry, agents: AgentRegistry, deck: DeckSpec) -> Result<Self> {
        config.validate()?;
        deck.validate()?;
        Ok(Self {
            config,
            cards,
            agents,
            deck_a: deck.clone(),
            deck_b: deck,
            value_model: None,
        })
    }

    /// Bundled catalog, default deck and the built-in agents.
    pub fn bundled(config: DuelConfig) -> Result<Self> {
        Self::new(
            config,
            CardRegistry::bundled()?,
            AgentRegistry::with_builtin(),
            DeckSpec::bundled_default()?,
        )
    }

    /// Give contender B a different deck.
    pub fn with_deck_b(mut self, deck: DeckSpec) -> Self {
        self.deck_b = deck;
        self
    }

    pub fn with_deck_a(mut self, deck: DeckSpec) -> Self {
        self.deck_a = deck;
        self
    }

    /// Weights handed to `mcts_learned` agents.
    pub fn with_value_model(mut self, model: LinearValue) -> Self {
        self.value_model = Some(model);
        self
    }

    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    /// Both deck templates must hold cards; a contender with an empty hand
    /// has no legal move.
    fn validate_decks(&self) -> Result<()> {
        self.deck_a.validate()?;
        self.deck_b.validate()
    }

    fn agent(&self, name: &str, seed: u64) -> Result<Box<dyn Agent + Send>> {
        let mut ctx = AgentContext::new(seed).with_mcts(self.config.mcts.clone());
        ctx.value_model = self.value_model.clone();
        self.agents.create(name, &ctx)
    }

    /// Play match `index` of the batch to the end or the turn cap.
    pub fn play_match(&self, index: u32, sink: &mut dyn TelemetrySink) -> Result<MatchReport> {
        let sim = &self.config.simulation;
        let seed = sim.game_seed(index);

        let mut rng = GameRng::new(seed);
        let deck_a = self.cards.load_deck(&self.deck_a, &mut rng)?;
        let deck_b = self.cards.load_deck(&self.deck_b, &mut rng)?;
        let mut m = Match::new(
            &self.config.match_config,
            MatchMode::CpuOnly,
            ContenderSetup::new(format!("{} (A)", sim.agent_a), deck_a),
            ContenderSetup::new(format!("{} (B)", sim.agent_b), deck_b),
            seed,
        );

        // Forks leave the match stream untouched.
        let mut agent_a = self.agent(&sim.agent_a, rng.fork().seed())?;
        let mut agent_b = self.agent(&sim.agent_b, rng.fork().seed())?;
        let engine = TurnEngine;

        while !m.is_over() && m.turn_count <= sim.max_turns {
            let agent = match m.active {
                Side::A => &mut agent_a,
                Side::B => &mut agent_b,
            };
            let mv = agent.choose_move(&m)?;
            let record = engine.apply_move(&mut m, mv)?;
            sink.record(&record);
        }

        let winner = match m.status {
            MatchStatus::Winner(id) => m.side_of(id),
            _ => None,
        };
        debug!(index, seed, status = %m.status, turns = m.turn_count, "match finished");

        Ok(MatchReport {
            seed,
            status: m.status,
            winner,
            turns: m.turn_count,
        })
    }

    /// Play the whole batch in parallel and sum the results.
    ///
    /// The first failing match aborts the batch.
    pub fn run(&self) -> Result<MatchTally> {
        self.validate_decks()?;
        let sim = &self.config.simulation;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(sim.threads)
            .build()
            .map_err(|e| DuelError::config(format!("cannot start worker pool: {e}")))?;

        let start = Instant::now();
        let tally = pool.install(|| {
            (0..sim.games)
                .into_par_iter()
                .map(|index| -> Result<MatchTally> {
                    let report = if sim.log_moves {
                        self.play_match(index, &mut TracingTelemetry)
                    } else {
                        self.play_match(index, &mut ())
                    }?;
                    Ok(MatchTally::from_report(&report))
                })
                .try_reduce(MatchTally::default, |a, b| Ok(a + b))
        })?;

        info!(
            games = tally.games,
            agent_a = %sim.agent_a,
            agent_b = %sim.agent_b,
            wins = tally.wins,
            losses = tally.losses,
            draws = tally.draws,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "batch finished"
        );
        Ok(tally)
    }

    /// Play the batch on the calling thread, in index order.
    pub fn run_sequential(&self, sink: &mut dyn TelemetrySink) -> Result<MatchTally> {
        self.validate_decks()?;
        let mut tally = MatchTally::default();
        for index in 0..self.config.simulation.games {
            tally.record(&self.play_match(index, sink)?);
        }
        Ok(tally)
    }
}
