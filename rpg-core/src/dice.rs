//! Dice and random selection.
//!
//! Every random draw in the engine goes through the [`Dice`] trait so that
//! callers can inject a seeded or scripted source. Production code wires
//! [`RngDice`] over a `rand` generator.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Source of random draws.
///
/// Only [`Dice::range`] is required; the other helpers are expressed in terms
/// of it so scripted implementations see every draw in order.
pub trait Dice {
    /// Uniform integer in `[min, max]`. Returns `min` when `max <= min`.
    fn range(&mut self, min: i32, max: i32) -> i32;

    /// Roll one die with `sides` faces.
    fn roll(&mut self, sides: u32) -> i32 {
        self.range(1, sides.max(1) as i32)
    }

    fn d20(&mut self) -> i32 {
        self.roll(20)
    }

    /// Uniformly pick an index into a collection of `len` items.
    fn choose_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.range(0, len as i32 - 1) as usize)
    }

    /// Pick an index with probability proportional to its weight.
    ///
    /// Returns `None` when there are no weights or they sum to zero.
    fn weighted_index(&mut self, weights: &[u32]) -> Option<usize> {
        let total: u64 = weights.iter().map(|w| *w as u64).sum();
        if total == 0 {
            return None;
        }
        let total = total.min(i32::MAX as u64) as i32;
        let mut pick = self.range(1, total) as u64;
        for (index, weight) in weights.iter().enumerate() {
            let weight = *weight as u64;
            if pick <= weight {
                return Some(index);
            }
            pick -= weight;
        }
        weights.iter().rposition(|w| *w > 0)
    }
}

/// [`Dice`] backed by a `rand` generator.
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
    /// Dice over the thread-local generator.
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RngDice<StdRng> {
    /// Reproducible dice for replays and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Dice for RngDice<R> {
    fn range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}
