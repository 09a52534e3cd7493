//! Injectable random source for behavior decisions, stress rolls and warnings.
//!
//! Every random branch in the simulation goes through [`RandomSource`] so a
//! session can run on a seeded ChaCha stream and tests can script exact rolls.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform rolls.
pub trait RandomSource {
    /// Uniform value in `[0.0, 1.0)`.
    fn roll(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize;

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.roll() < p
    }
}

impl RandomSource for ChaCha8Rng {
    fn roll(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Create a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Create an RNG seeded from OS entropy.
pub fn entropy_rng() -> ChaCha8Rng {
    ChaCha8Rng::from_entropy()
}

/// Replays a fixed list of rolls, then repeats the last one.
///
/// `pick` maps the next roll onto `0..len`, so a roll of `0.5` with six
/// candidates picks index 3.
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    rolls: Vec<f64>,
    cursor: usize,
}

impl ScriptedRolls {
    pub fn new(rolls: impl Into<Vec<f64>>) -> Self {
        Self {
            rolls: rolls.into(),
            cursor: 0,
        }
    }

    /// A source that always rolls `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of rolls consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRolls {
    fn roll(&mut self) -> f64 {
        let value = self
            .rolls
            .get(self.cursor)
            .or_else(|| self.rolls.last())
            .copied()
            .unwrap_or(0.999);
        self.cursor += 1;
        value
    }

    fn pick(&mut self, len: usize) -> usize {
        ((self.roll() * len as f64) as usize).min(len.saturating_sub(1))
    }
}
