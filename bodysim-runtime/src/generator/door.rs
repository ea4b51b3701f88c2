// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use crate::{
    config::{ComfortConfig, DoorConfig},
    core::{is_discomfort, SimulationState},
    rng::Entropy,
};

/// Door state generator.
///
/// Doors are closed while moving. While stopped the door state persists
/// and toggles at random, more often when the discomfort condition holds.
#[derive(Clone)]
pub struct DoorStateGenerator {
    config: DoorConfig,
    comfort: ComfortConfig,
}

impl DoorStateGenerator {
    pub fn new(config: DoorConfig, comfort: ComfortConfig) -> Self {
        Self { config, comfort }
    }

    /// Toggle probability for the given channel readings.
    pub fn toggle_probability(
        &self,
        internal_temp: f64,
        external_temp: f64,
        engine_temp: f64,
    ) -> f64 {
        if is_discomfort(&self.comfort, internal_temp, external_temp, engine_temp) {
            self.config.toggle_probability_discomfort
        } else {
            self.config.toggle_probability
        }
    }

    /// Advance one tick and return whether any door is open.
    pub fn advance(
        &self,
        speed: f64,
        internal_temp: f64,
        external_temp: f64,
        prior_engine_temp: f64,
        state: &mut SimulationState,
        entropy: &mut impl Entropy,
    ) -> bool {
        if speed > 0.0 {
            state.door_open = false;
            return false;
        }

        let probability = self.toggle_probability(internal_temp, external_temp, prior_engine_temp);
        if entropy.chance(probability) {
            state.door_open = !state.door_open;
            trace!(
                "Door {}",
                if state.door_open { "opened" } else { "closed" }
            );
        }

        state.door_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::SimConfig,
        rng::{ScriptedSource, SeededSource},
    };

    fn generator() -> DoorStateGenerator {
        DoorStateGenerator::new(DoorConfig::default(), ComfortConfig::default())
    }

    fn state_at(door_open: bool) -> SimulationState {
        let mut state = SimulationState::seed(&SimConfig::default(), &mut SeededSource::new(0));
        state.door_open = door_open;
        state
    }

    #[test]
    fn closed_while_moving() {
        let generator = generator();
        let mut state = state_at(true);
        let mut entropy = ScriptedSource::new(&[]);

        assert!(!generator.advance(10.0, 22.0, 20.0, 60.0, &mut state, &mut entropy));
        assert!(!state.door_open);
    }

    #[test]
    fn discomfort_raises_toggle_probability() {
        let generator = generator();

        assert_eq!(generator.toggle_probability(22.0, 20.0, 60.0), 0.1);
        assert_eq!(generator.toggle_probability(22.0, 20.0, 110.0), 0.1);
        assert_eq!(generator.toggle_probability(22.0, 20.0, 90.0), 0.02);
        assert_eq!(generator.toggle_probability(22.0, 28.0, 60.0), 0.02);
    }

    #[test]
    fn toggle_under_discomfort() {
        let generator = generator();
        let mut state = state_at(false);

        // 0.05 toggles under discomfort but not otherwise.
        let mut entropy = ScriptedSource::new(&[0.05]);
        assert!(generator.advance(0.0, 22.0, 20.0, 60.0, &mut state, &mut entropy));
        assert!(state.door_open);

        let mut entropy = ScriptedSource::new(&[0.05]);
        assert!(generator.advance(0.0, 22.0, 20.0, 90.0, &mut state, &mut entropy));
        assert!(state.door_open);

        let mut entropy = ScriptedSource::new(&[0.05]);
        assert!(!generator.advance(0.0, 22.0, 20.0, 60.0, &mut state, &mut entropy));
        assert!(!state.door_open);
    }

    #[test]
    fn persists_without_toggle() {
        let generator = generator();
        let mut state = state_at(true);

        for _ in 0..10 {
            let mut entropy = ScriptedSource::new(&[0.5]);
            assert!(generator.advance(0.0, 22.0, 28.0, 90.0, &mut state, &mut entropy));
        }
    }
}
