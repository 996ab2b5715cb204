//! Per-request random walk with independent min/max bands.

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Upper bound (exclusive) of the starting position.
pub const INITIAL_RANGE: f64 = 100.0;
/// Largest absolute single-step change of the position.
pub const MAX_STEP: f64 = 0.5;
/// Random part of a band half-width.
pub const BAND_SPREAD: f64 = 1.8;
/// Fixed part of a band half-width, so a band never collapses onto the value.
pub const BAND_FLOOR: f64 = 0.01;

/// One step of the walk: the new position and its bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

/// Unbounded one-dimensional random walk.
///
/// Each instance owns its generator, so walks served to different clients
/// never share random state.
#[derive(Debug)]
pub struct RandomWalk {
    position: f64,
    rng: StdRng,
}

impl RandomWalk {
    /// Start a walk seeded from the thread-local entropy source.
    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_rng(&mut rand::rng()))
    }

    /// Start a reproducible walk.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: StdRng) -> Self {
        let position = rng.random::<f64>() * INITIAL_RANGE;
        Self { position, rng }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Move the walk by a delta drawn from `[-MAX_STEP, MAX_STEP)` and draw
    /// fresh band offsets around the new position.
    pub fn step(&mut self) -> Sample {
        self.position += self.rng.random_range(-MAX_STEP..MAX_STEP);

        let lower = self.band_offset();
        let upper = self.band_offset();
        Sample {
            value: self.position,
            min: self.position - lower,
            max: self.position + upper,
        }
    }

    fn band_offset(&mut self) -> f64 {
        self.rng.random::<f64>() * BAND_SPREAD + BAND_FLOOR
    }
}
