//! Random number generation for the island
//!
//! Every random event in a turn (loot draw, hidden treasure trial, pirate
//! relocation) goes through the [`RandomSource`] capability so callers can
//! swap the seeded generator for a scripted one.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of the two kinds of randomness the turn engine needs.
pub trait RandomSource {
    /// Uniform index in `0..len`.
    ///
    /// Callers never pass `len == 0`; implementations return 0 if they do.
    fn pick(&mut self, len: usize) -> usize;

    /// Bernoulli trial succeeding with the given probability.
    ///
    /// Probabilities at or below 0 never succeed, at or above 1 always do.
    fn chance(&mut self, probability: f64) -> bool;
}

/// Game random number generator
///
/// Wraps ChaCha8Rng so a whole session can be replayed from its seed.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns 0..n-1, or 0 if n is 0.
    pub fn rn2(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for GameRng {
    fn pick(&mut self, len: usize) -> usize {
        self.rn2(len)
    }

    fn chance(&mut self, probability: f64) -> bool {
        if probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        self.rng.gen_bool(probability)
    }
}

/// Replays a fixed script of outcomes.
///
/// Picks and trials are consumed in the order the engine asks for them.
/// Once a queue runs dry, picks return 0 and trials fail. Scripted picks
/// larger than the requested range are clamped to its last index.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    picks: VecDeque<usize>,
    chances: VecDeque<bool>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the indices returned by successive [`RandomSource::pick`] calls.
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    /// Queue the outcomes of successive [`RandomSource::chance`] calls.
    pub fn with_chances(mut self, chances: impl IntoIterator<Item = bool>) -> Self {
        self.chances.extend(chances);
        self
    }

    /// True once every scripted outcome has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.picks.is_empty() && self.chances.is_empty()
    }
}

impl RandomSource for ScriptedRng {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.picks.pop_front().unwrap_or(0).min(len - 1)
    }

    fn chance(&mut self, probability: f64) -> bool {
        if probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        self.chances.pop_front().unwrap_or(false)
    }
}
