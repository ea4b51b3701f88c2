// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use crate::{config::SimConfig, rng::Entropy};

/// Engine temperature episode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EngineMode {
    /// Engine follows its operating target.
    #[default]
    Normal,
    /// Engine target is driven outside the normal band for the remaining ticks.
    Abnormal { remaining: u32 },
}

impl EngineMode {
    /// Consume one tick of the episode.
    pub fn tick(self) -> Self {
        match self {
            EngineMode::Abnormal { remaining } if remaining > 1 => EngineMode::Abnormal {
                remaining: remaining - 1,
            },
            _ => EngineMode::Normal,
        }
    }
}

/// Simulation state carried from one tick to the next.
///
/// Owned by the driver. Generators mutate only the fields that belong to
/// their channel.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationState {
    /// Cabin temperature.
    pub internal_temp: f64,
    /// Ambient temperature.
    pub external_temp: f64,
    /// Engine coolant temperature.
    pub engine_temp: f64,
    /// Chassis tilt.
    pub tilt_angle: f64,
    /// Tilt held while the vehicle is stopped.
    pub last_moving_tilt: f64,
    /// Any door open. Only changes while stopped.
    pub door_open: bool,
    /// Engine temperature episode.
    pub engine_mode: EngineMode,
    /// Whether the previous tick was stopped.
    pub was_stopped: bool,
}

impl SimulationState {
    /// Construct the initial state.
    ///
    /// Cabin and ambient temperature are drawn from their ranges, the engine
    /// starts at ambient temperature and everything else starts at rest.
    pub fn seed(config: &SimConfig, entropy: &mut impl Entropy) -> Self {
        let internal_temp = entropy.uniform(config.internal.min, config.internal.max);
        let external_temp = entropy.uniform(config.external.min, config.external.max);

        Self {
            internal_temp,
            external_temp,
            engine_temp: external_temp,
            tilt_angle: 0.0,
            last_moving_tilt: 0.0,
            door_open: false,
            engine_mode: EngineMode::Normal,
            was_stopped: false,
        }
    }

    #[inline]
    pub fn is_abnormal(&self) -> bool {
        matches!(self.engine_mode, EngineMode::Abnormal { .. })
    }

    /// Ticks left in the abnormal episode, zero when normal.
    pub fn abnormal_remaining(&self) -> u32 {
        match self.engine_mode {
            EngineMode::Abnormal { remaining } => remaining,
            EngineMode::Normal => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededSource;

    #[test]
    fn episode_countdown() {
        let mut mode = EngineMode::Abnormal { remaining: 3 };

        mode = mode.tick();
        assert_eq!(mode, EngineMode::Abnormal { remaining: 2 });
        mode = mode.tick();
        assert_eq!(mode, EngineMode::Abnormal { remaining: 1 });
        mode = mode.tick();
        assert_eq!(mode, EngineMode::Normal);
        assert_eq!(mode.tick(), EngineMode::Normal);
    }

    #[test]
    fn seed_within_ranges() {
        let config = SimConfig::default();

        for seed in 0..50 {
            let state = SimulationState::seed(&config, &mut SeededSource::new(seed));

            assert!(state.internal_temp >= config.internal.min);
            assert!(state.internal_temp <= config.internal.max);
            assert!(state.external_temp >= config.external.min);
            assert!(state.external_temp <= config.external.max);
            assert_eq!(state.engine_temp, state.external_temp);
            assert_eq!(state.tilt_angle, 0.0);
            assert!(!state.door_open);
            assert!(!state.is_abnormal());
            assert_eq!(state.abnormal_remaining(), 0);
        }
    }
}
