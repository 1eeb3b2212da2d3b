//! Agent factories keyed by name.

use std::collections::BTreeMap;

use super::{Agent, MctsAgent, RandomAgent, RuleBasedAgent};
use crate::core::{DuelError, Result};
use crate::mcts::MCTSConfig;
use crate::nn::LinearValue;

/// Inputs every factory may draw on.
#[derive(Clone, Debug, Default)]
pub struct AgentContext {
    /// Seed for the agent's own randomness.
    pub seed: u64,
    pub mcts: MCTSConfig,
    /// Weights for `mcts_learned`.
    pub value_model: Option<LinearValue>,
}

impl AgentContext {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_mcts(mut self, mcts: MCTSConfig) -> Self {
        self.mcts = mcts;
        self
    }

    #[must_use]
    pub fn with_value_model(mut self, model: LinearValue) -> Self {
        self.value_model = Some(model);
        self
    }
}

/// Builds an agent from a context.
pub type AgentFactory = Box<dyn Fn(&AgentContext) -> Result<Box<dyn Agent + Send>> + Send + Sync>;

/// Name to factory map.
#[derive(Default)]
pub struct AgentRegistry {
    factories: BTreeMap<String, AgentFactory>,
}

impl AgentRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with `random`, `rule_based`, `mcts` and `mcts_learned`.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register("random", |ctx| Ok(Box::new(RandomAgent::new(ctx.seed))));
        registry.register("rule_based", |ctx| Ok(Box::new(RuleBasedAgent::new(ctx.seed))));
        registry.register("mcts", |ctx| {
            let config = ctx.mcts.clone().with_seed(ctx.seed);
            Ok(Box::new(MctsAgent::new(config)?))
        });
        registry.register("mcts_learned", |ctx| {
            let model = ctx
                .value_model
                .clone()
                .ok_or_else(|| DuelError::config("mcts_learned needs a value model"))?;
            let config = ctx.mcts.clone().with_seed(ctx.seed);
            Ok(Box::new(MctsAgent::learned(config, model)?))
        });
        registry
    }

    /// Add or replace a factory.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&AgentContext) -> Result<Box<dyn Agent + Send>> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered keys, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Build the agent registered under `name`.
    pub fn create(&self, name: &str, ctx: &AgentContext) -> Result<Box<dyn Agent + Send>> {
        let factory = self.factories.get(name).ok_or_else(|| {
            let known: Vec<&str> = self.names().collect();
            DuelError::config(format!("unknown agent '{name}' (known: {})", known.join(", ")))
        })?;
        factory(ctx)
    }
}

impl std::fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.factories.keys()).finish()
    }
}
