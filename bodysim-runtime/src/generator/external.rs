// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use crate::{config::ExternalTempConfig, core::SimulationState, rng::Entropy};

/// Diurnal temperature bias at the given time of the cycle.
pub fn diurnal_bias(time_seconds: f64, amplitude: f64, period: f64) -> f64 {
    amplitude * (2.0 * std::f64::consts::PI * time_seconds / period).sin()
}

/// Ambient temperature generator.
///
/// Occasionally jumps to a new value around the base temperature, biased
/// by the time of day.
#[derive(Clone)]
pub struct ExternalTempGenerator {
    config: ExternalTempConfig,
}

impl ExternalTempGenerator {
    pub fn new(config: ExternalTempConfig) -> Self {
        Self { config }
    }

    /// Advance one tick and return the ambient temperature in whole degrees.
    pub fn advance(
        &self,
        state: &mut SimulationState,
        time_seconds: f64,
        entropy: &mut impl Entropy,
    ) -> f64 {
        let bias = diurnal_bias(
            time_seconds,
            self.config.diurnal_amplitude,
            self.config.diurnal_period,
        );

        if entropy.chance(self.config.change_probability) {
            let noise = entropy.uniform(-self.config.noise, self.config.noise);
            state.external_temp =
                (self.config.base + bias + noise).clamp(self.config.min, self.config.max);
        }

        state.external_temp.round()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::SimConfig,
        rng::{ScriptedSource, SeededSource},
    };

    fn state_at(external_temp: f64) -> SimulationState {
        let mut state = SimulationState::seed(&SimConfig::default(), &mut SeededSource::new(0));
        state.external_temp = external_temp;
        state
    }

    #[test]
    fn diurnal_cycle() {
        assert_eq!(diurnal_bias(0.0, 2.0, 86_400.0), 0.0);
        assert!((diurnal_bias(21_600.0, 2.0, 86_400.0) - 2.0).abs() < 1e-9);
        assert!((diurnal_bias(64_800.0, 2.0, 86_400.0) + 2.0).abs() < 1e-9);
    }

    #[test]
    fn unchanged_without_draw() {
        let generator = ExternalTempGenerator::new(ExternalTempConfig::default());
        let mut state = state_at(29.6);

        let value = generator.advance(&mut state, 100.0, &mut ScriptedSource::new(&[0.9]));

        assert_eq!(value, 30.0);
        assert_eq!(state.external_temp, 29.6);
    }

    #[test]
    fn new_target_follows_time_of_day() {
        let generator = ExternalTempGenerator::new(ExternalTempConfig::default());

        let mut state = state_at(27.0);
        generator.advance(&mut state, 21_600.0, &mut ScriptedSource::new(&[0.0, 0.5]));
        assert!((state.external_temp - 30.0).abs() < 1e-9);

        let mut state = state_at(27.0);
        let value = generator.advance(&mut state, 64_800.0, &mut ScriptedSource::new(&[0.0, 0.0]));
        assert_eq!(state.external_temp, 26.0);
        assert_eq!(value, 26.0);
    }

    #[test]
    fn walk_stays_in_range() {
        let config = ExternalTempConfig {
            change_probability: 1.0,
            diurnal_amplitude: 10.0,
            ..Default::default()
        };
        let generator = ExternalTempGenerator::new(config.clone());
        let mut entropy = SeededSource::new(11);
        let mut state = state_at(28.0);

        for tick in 0..5_000 {
            generator.advance(&mut state, tick as f64 * 60.0, &mut entropy);
            assert!(state.external_temp >= config.min && state.external_temp <= config.max);
        }
    }
}
