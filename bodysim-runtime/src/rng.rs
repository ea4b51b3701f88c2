// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use rand::{distributions::WeightedIndex, prelude::Distribution, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of randomness.
///
/// Every draw a generator makes goes through this trait. The simulation
/// holds no other source of non-determinism, so a run is fully defined by
/// its input profile and the entropy stream.
pub trait Entropy {
    /// Uniform draw in `[low, high)`. Returns `low` when the range is empty.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Bernoulli draw, true with the given probability.
    fn chance(&mut self, probability: f64) -> bool;

    /// Uniform integer draw in `[low, high]`.
    fn range(&mut self, low: u32, high: u32) -> u32;

    /// Index drawn proportionally to `weights`.
    fn weighted(&mut self, weights: &[f64]) -> usize;
}

/// Seeded entropy source.
///
/// Backed by ChaCha8 so the stream for a given seed is stable across
/// platforms and releases.
#[derive(Clone, Debug)]
pub struct SeededSource {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededSource {
    /// Construct the source from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed this source was constructed with.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Entropy for SeededSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..high)
    }

    fn chance(&mut self, probability: f64) -> bool {
        if probability <= 0.0 {
            false
        } else if probability >= 1.0 {
            true
        } else {
            self.rng.gen_bool(probability)
        }
    }

    fn range(&mut self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    fn weighted(&mut self, weights: &[f64]) -> usize {
        WeightedIndex::<f64>::new(weights)
            .map(|dist| dist.sample(&mut self.rng))
            .unwrap_or(0)
    }
}

/// Entropy replaying a fixed list of unit draws.
///
/// Every call consumes exactly one value in `[0, 1)` and maps it onto the
/// requested distribution, which lets tests compute a tick by hand.
#[cfg(test)]
pub(crate) struct ScriptedSource(std::collections::VecDeque<f64>);

#[cfg(test)]
impl ScriptedSource {
    pub(crate) fn new(draws: &[f64]) -> Self {
        Self(draws.iter().copied().collect())
    }

    pub(crate) fn remaining(&self) -> usize {
        self.0.len()
    }

    fn next(&mut self) -> f64 {
        self.0.pop_front().expect("scripted entropy exhausted")
    }
}

#[cfg(test)]
impl Entropy for ScriptedSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + self.next() * (high - low)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.next() < probability
    }

    fn range(&mut self, low: u32, high: u32) -> u32 {
        let span = (high - low + 1) as f64;
        (low + (self.next() * span) as u32).min(high)
    }

    fn weighted(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        let mut point = self.next() * total;
        for (index, weight) in weights.iter().enumerate() {
            if point < *weight {
                return index;
            }
            point -= weight;
        }
        weights.len() - 1
    }
}
