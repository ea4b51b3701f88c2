// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use crate::{
    config::{ComfortConfig, TiltConfig},
    core::{is_discomfort, round1, SimulationState},
    rng::Entropy,
};

/// Chassis tilt generator.
///
/// Random walk while moving. A stopped vehicle holds the last moving tilt,
/// unless the discomfort condition holds, in which case a low tilt is
/// nudged upward and a high tilt jitters.
#[derive(Clone)]
pub struct TiltGenerator {
    config: TiltConfig,
    comfort: ComfortConfig,
}

impl TiltGenerator {
    pub fn new(config: TiltConfig, comfort: ComfortConfig) -> Self {
        Self { config, comfort }
    }

    /// Advance one tick and return the tilt rounded to one decimal.
    pub fn advance(
        &self,
        speed: f64,
        internal_temp: f64,
        external_temp: f64,
        engine_temp: f64,
        state: &mut SimulationState,
        entropy: &mut impl Entropy,
    ) -> f64 {
        if speed > 0.0 {
            let change = entropy.uniform(-self.config.max_change, self.config.max_change);

            state.tilt_angle = (state.tilt_angle + change).clamp(0.0, self.config.max);
            state.last_moving_tilt = state.tilt_angle;
        } else {
            if is_discomfort(&self.comfort, internal_temp, external_temp, engine_temp) {
                let hold = state.last_moving_tilt;

                let value = if hold <= self.config.nudge_threshold {
                    (hold + entropy.uniform(self.config.nudge_min, self.config.nudge_max))
                        .min(self.config.nudge_cap)
                } else {
                    hold + entropy.uniform(-self.config.jitter, self.config.jitter)
                };

                state.last_moving_tilt = value.clamp(0.0, self.config.max);
            }

            state.tilt_angle = state.last_moving_tilt;
        }

        round1(state.tilt_angle)
    }
}
