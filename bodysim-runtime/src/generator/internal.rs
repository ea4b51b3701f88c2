// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use crate::{config::InternalTempConfig, core::SimulationState, rng::Entropy};

/// Cabin temperature generator.
///
/// Slow random walk: most ticks leave the temperature as is, occasionally
/// it drifts by a small offset.
#[derive(Clone)]
pub struct InternalTempGenerator {
    config: InternalTempConfig,
}

impl InternalTempGenerator {
    pub fn new(config: InternalTempConfig) -> Self {
        Self { config }
    }

    /// Advance one tick and return the cabin temperature in whole degrees.
    pub fn advance(&self, state: &mut SimulationState, entropy: &mut impl Entropy) -> f64 {
        if entropy.chance(self.config.change_probability) {
            let offset = entropy.uniform(-self.config.max_step, self.config.max_step);
            state.internal_temp =
                (state.internal_temp + offset).clamp(self.config.min, self.config.max);
        }

        state.internal_temp.round()
    }
}
