//! Die sources
//!
//! Every die the evaluator rolls is drawn from a [`DieSource`]. Production
//! code uses [`RngDice`] over a `rand` generator; tests and replays use
//! [`ScriptedDice`].

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Produces one uniform integer in `[1, faces]` per call
pub trait DieSource {
    fn roll(&mut self, faces: u32) -> u32;
}

impl<S: DieSource + ?Sized> DieSource for &mut S {
    fn roll(&mut self, faces: u32) -> u32 {
        (**self).roll(faces)
    }
}

/// Die source backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct RngDice<R> {
    rng: R,
}

impl<R: Rng> RngDice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDice<ThreadRng> {
    /// Thread-local generator
    pub fn thread() -> Self {
        Self::new(rand::rng())
    }
}

impl RngDice<StdRng> {
    /// Reproducible generator for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DieSource for RngDice<R> {
    fn roll(&mut self, faces: u32) -> u32 {
        self.rng.random_range(1..=faces)
    }
}

/// Die source replaying a fixed sequence of results
///
/// Values are clamped into `[1, faces]` for the die being rolled. Once the
/// script runs out every further die shows its maximum face.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    values: VecDeque<u32>,
}

impl ScriptedDice {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Number of scripted values not yet consumed
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl DieSource for ScriptedDice {
    fn roll(&mut self, faces: u32) -> u32 {
        self.values
            .pop_front()
            .map(|v| v.clamp(1, faces))
            .unwrap_or(faces)
    }
}
