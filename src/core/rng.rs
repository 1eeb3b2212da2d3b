//! Deterministic random number generation for decks, rollouts and agents.
//!
//! ## Key Features
//!
//! - **Deterministic**: same seed, same shuffles and same rollouts
//! - **Forkable**: derive independent streams for search and worker tasks
//! - **Checkpointable**: `state()` / `from_state()` let a snapshot carry the
//!   exact RNG position of a match, so a restored match reshuffles its decks
//!   exactly like the original would
//!
//! ```
//! use castle_duel::core::GameRng;
//!
//! let mut rng = GameRng::new(7);
//! let saved = rng.state();
//! let first = rng.below(100);
//!
//! let mut restored = GameRng::from_state(&saved);
//! assert_eq!(restored.below(100), first);
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Forkable ChaCha8 RNG.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Derive an independent stream.
    ///
    /// Each call yields a different, reproducible child stream. The parent's
    /// own sequence is not advanced.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        Self::new(
            self.seed
                .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15)),
        )
    }

    /// Seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `0..n`. `n` must be non-zero.
    pub fn below(&mut self, n: usize) -> usize {
        self.inner.gen_range(0..n)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Pick an index with probability proportional to its weight.
    ///
    /// Returns `None` for an empty slice or when all weights are zero.
    pub fn pick_weighted(&mut self, weights: &[f64]) -> Option<usize> {
        let total: f64 = weights.iter().sum();
        if weights.is_empty() || total <= 0.0 {
            return None;
        }

        let mut threshold = self.inner.gen::<f64>() * total;
        for (i, &w) in weights.iter().enumerate() {
            threshold -= w;
            if threshold < 0.0 {
                return Some(i);
            }
        }

        // Rounding left a sliver past the end: take the last weighted entry.
        weights.iter().rposition(|&w| w > 0.0)
    }

    /// Capture the current position for a snapshot.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Rebuild an RNG at a captured position.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable RNG position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha8 word position.
    pub word_pos: u128,
    pub fork_counter: u64,
}
