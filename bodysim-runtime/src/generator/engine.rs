// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use crate::{
    config::EngineTempConfig,
    core::{round1, EngineMode, SimulationState},
    rng::Entropy,
};

/// Overheat versus undercool excursion weights.
const EXCURSION_WEIGHTS: [f64; 2] = [0.5, 0.5];

/// Temperature the engine is pulled toward during one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Approach {
    pub target: f64,
    pub factor: f64,
}

impl Approach {
    /// Temperature step from `current` toward the target.
    #[inline]
    pub fn step(&self, current: f64, noise: f64) -> f64 {
        (self.target - current) * self.factor + noise
    }
}

/// Engine coolant temperature generator.
///
/// Bounded random walk toward a target that depends on speed and door
/// state. While idling with the doors closed the engine can enter an
/// abnormal episode in which the target is pushed outside the normal band
/// for a number of ticks.
#[derive(Clone)]
pub struct EngineTempGenerator {
    config: EngineTempConfig,
}

impl EngineTempGenerator {
    pub fn new(config: EngineTempConfig) -> Self {
        Self { config }
    }

    /// Operating target while moving at `speed`.
    pub fn moving_target(&self, speed: f64) -> f64 {
        let mut target = self.config.moving_target;
        if speed < self.config.low_speed_threshold {
            target += self.config.low_speed_offset;
        } else if speed > self.config.high_speed_threshold {
            target += self.config.high_speed_offset;
        }
        target
    }

    /// Apply the forced cooldown above the threshold when triggered.
    pub fn cooldown(&self, value: f64, triggered: bool) -> f64 {
        if triggered {
            value - self.config.cooldown_drop
        } else {
            value
        }
    }

    /// Advance one tick and return the engine temperature rounded to one decimal.
    ///
    /// `ambient` is the ambient reading the target is derived from. The
    /// result is always clipped against the ambient temperature held in
    /// `state`.
    pub fn advance(
        &self,
        speed: f64,
        door_open: bool,
        ambient: f64,
        state: &mut SimulationState,
        entropy: &mut impl Entropy,
    ) -> f64 {
        let approach = if speed > 0.0 {
            if state.is_abnormal() {
                debug!(
                    "Abnormal engine episode interrupted by motion with {} ticks remaining",
                    state.abnormal_remaining()
                );
            }
            state.engine_mode = EngineMode::Normal;

            Approach {
                target: self.moving_target(speed),
                factor: self.config.moving_factor,
            }
        } else if door_open {
            let noise = self.config.door_open_noise;

            Approach {
                target: ambient + entropy.uniform(-noise, noise),
                factor: self.config.door_open_factor,
            }
        } else {
            self.idle_approach(ambient, state, entropy)
        };

        let noise = entropy.uniform(-self.config.step_noise, self.config.step_noise);
        let mut value = state.engine_temp + approach.step(state.engine_temp, noise);

        if value > self.config.cooldown_threshold {
            let triggered = entropy.chance(self.config.cooldown_probability);
            if triggered {
                trace!("Forced engine cooldown at {:.1}°C", value);
            }
            value = self.cooldown(value, triggered);
        }

        // Holds against both the exact and the emitted whole-degree ambient.
        let floor =
            state.external_temp.max(state.external_temp.round()) - self.config.ambient_margin;
        state.engine_temp = value.max(floor).min(self.config.ceiling);

        round1(state.engine_temp)
    }

    /// Idle target with the doors closed, running the abnormal episode.
    fn idle_approach(
        &self,
        ambient: f64,
        state: &mut SimulationState,
        entropy: &mut impl Entropy,
    ) -> Approach {
        if state.engine_mode == EngineMode::Normal
            && entropy.chance(self.config.abnormal_probability)
        {
            let remaining =
                entropy.range(self.config.abnormal_min_ticks, self.config.abnormal_max_ticks);

            debug!("Abnormal engine episode started for {} ticks", remaining);

            state.engine_mode = EngineMode::Abnormal { remaining };
        }

        let target = match state.engine_mode {
            EngineMode::Abnormal { .. } => {
                let target = if entropy.weighted(&EXCURSION_WEIGHTS) == 0 {
                    entropy.uniform(self.config.abnormal_high_min, self.config.abnormal_high_max)
                } else {
                    entropy.uniform(ambient - self.config.ambient_margin, ambient)
                };

                state.engine_mode = state.engine_mode.tick();
                if state.engine_mode == EngineMode::Normal {
                    debug!("Abnormal engine episode ended");
                }

                target
            }
            EngineMode::Normal => {
                self.config.idle_target
                    + entropy.uniform(-self.config.idle_noise, self.config.idle_noise)
            }
        };

        Approach {
            target,
            factor: self.config.idle_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::SimConfig,
        rng::{ScriptedSource, SeededSource},
    };

    fn state_at(engine_temp: f64, external_temp: f64) -> SimulationState {
        let mut state = SimulationState::seed(&SimConfig::default(), &mut SeededSource::new(0));
        state.engine_temp = engine_temp;
        state.external_temp = external_temp;
        state
    }

    fn generator() -> EngineTempGenerator {
        EngineTempGenerator::new(EngineTempConfig::default())
    }

    #[test]
    fn speed_dependent_target() {
        let generator = generator();

        assert_eq!(generator.moving_target(10.0), 92.5);
        assert_eq!(generator.moving_target(30.0), 90.0);
        assert_eq!(generator.moving_target(100.0), 90.0);
        assert_eq!(generator.moving_target(120.0), 88.5);
    }

    #[test]
    fn moving_tick_by_hand() {
        let generator = generator();
        let mut state = state_at(80.0, 28.0);

        // Step noise draw of 0.6 maps to +0.5.
        let mut entropy = ScriptedSource::new(&[0.6]);
        let value = generator.advance(50.0, false, 28.0, &mut state, &mut entropy);

        let expected = 80.0 + (90.0 - 80.0) * 0.1 + 0.5;
        assert!((state.engine_temp - expected).abs() < 1e-9);
        assert_eq!(value, 81.5);
        assert_eq!(entropy.remaining(), 0);
    }

    #[test]
    fn moving_exits_abnormal_episode() {
        let generator = generator();
        let mut state = state_at(100.0, 28.0);
        state.engine_mode = EngineMode::Abnormal { remaining: 12 };

        generator.advance(60.0, false, 28.0, &mut state, &mut ScriptedSource::new(&[0.5]));

        assert!(!state.is_abnormal());
        assert_eq!(state.abnormal_remaining(), 0);
    }

    #[test]
    fn door_open_approaches_ambient() {
        let generator = generator();
        let mut state = state_at(60.0, 28.0);

        // Target noise 0.5 maps to 0.0, step noise 0.5 maps to 0.0.
        let mut entropy = ScriptedSource::new(&[0.5, 0.5]);
        let value = generator.advance(0.0, true, 28.0, &mut state, &mut entropy);

        assert!((state.engine_temp - (60.0 + (28.0 - 60.0) * 0.2)).abs() < 1e-9);
        assert_eq!(value, 53.6);
    }

    #[test]
    fn normal_idle_tick() {
        let generator = generator();
        let mut state = state_at(70.0, 28.0);

        // No episode, idle noise 0.0, step noise 0.0.
        let mut entropy = ScriptedSource::new(&[0.5, 0.5, 0.5]);
        generator.advance(0.0, false, 28.0, &mut state, &mut entropy);

        assert!((state.engine_temp - 71.5).abs() < 1e-9);
        assert!(!state.is_abnormal());
        assert_eq!(entropy.remaining(), 0);
    }

    #[test]
    fn abnormal_episode_lifecycle() {
        let generator = generator();
        let mut state = state_at(90.0, 28.0);

        // Enter (0.0 < 0.02), duration 10 ticks, pick high band, target 110, step noise 0.
        let mut entropy = ScriptedSource::new(&[0.0, 0.0, 0.1, 0.999_999, 0.5]);
        generator.advance(0.0, false, 28.0, &mut state, &mut entropy);

        assert_eq!(state.engine_mode, EngineMode::Abnormal { remaining: 9 });
        assert!(state.engine_temp > 91.9 && state.engine_temp < 92.1);

        // Pick low band, target at ambient, step noise 0.
        for remaining in (0..9).rev() {
            let mut entropy = ScriptedSource::new(&[0.9, 0.999_999, 0.5]);
            generator.advance(0.0, false, 28.0, &mut state, &mut entropy);

            assert_eq!(state.abnormal_remaining(), remaining);
            assert_eq!(state.is_abnormal(), remaining > 0);
            assert_eq!(entropy.remaining(), 0);
        }

        assert_eq!(state.engine_mode, EngineMode::Normal);
    }

    #[test]
    fn door_open_pauses_episode() {
        let generator = generator();
        let mut state = state_at(100.0, 28.0);
        state.engine_mode = EngineMode::Abnormal { remaining: 5 };

        generator.advance(0.0, true, 28.0, &mut state, &mut ScriptedSource::new(&[0.5, 0.5]));

        assert_eq!(state.engine_mode, EngineMode::Abnormal { remaining: 5 });
    }

    #[test]
    fn forced_cooldown_boundary() {
        let generator = generator();

        // Step noise near +2.5 pushes the engine past the threshold.
        let mut state = state_at(105.01, 28.0);
        let mut entropy = ScriptedSource::new(&[0.999, 0.0]);
        let value = generator.advance(50.0, false, 28.0, &mut state, &mut entropy);

        assert!(state.engine_temp < 105.01);
        assert!(value < 105.01);
        assert_eq!(entropy.remaining(), 0);

        let mut state = state_at(105.01, 28.0);
        let mut entropy = ScriptedSource::new(&[0.999, 0.9]);
        generator.advance(50.0, false, 28.0, &mut state, &mut entropy);

        assert!(state.engine_temp > 105.0);
        assert!(state.engine_temp >= 28.0 - 5.0 && state.engine_temp <= 110.0);
    }

    #[test]
    fn cooldown_draw_only_above_threshold() {
        let generator = generator();
        let mut state = state_at(80.0, 28.0);
        let mut entropy = ScriptedSource::new(&[0.999]);

        generator.advance(50.0, false, 28.0, &mut state, &mut entropy);

        assert_eq!(entropy.remaining(), 0);
        assert_eq!(generator.cooldown(106.0, true), 101.0);
        assert_eq!(generator.cooldown(106.0, false), 106.0);
    }

    #[test]
    fn clipped_to_ambient_floor() {
        let generator = generator();
        let mut state = state_at(24.0, 30.0);

        // Low band target below ambient, strongest negative step noise.
        let mut entropy = ScriptedSource::new(&[0.0, 0.0, 0.9, 0.0, 0.0]);
        generator.advance(0.0, false, 30.0, &mut state, &mut entropy);

        assert_eq!(state.engine_temp, 25.0);
    }

    #[test]
    fn clipped_to_rounded_ambient_floor() {
        let generator = generator();
        let mut state = state_at(24.0, 28.6);

        // Ambient reads 29 in the fixture, so the engine may not drop below 24.
        let mut entropy = ScriptedSource::new(&[0.0, 0.0, 0.9, 0.0, 0.0]);
        let value = generator.advance(0.0, false, 28.6, &mut state, &mut entropy);

        assert_eq!(state.engine_temp, 24.0);
        assert_eq!(value, 24.0);
        assert!(value >= 28.6_f64.round() - 5.0);
    }

    #[test]
    fn walk_respects_bounds() {
        let config = EngineTempConfig {
            abnormal_probability: 0.2,
            ..Default::default()
        };
        let generator = EngineTempGenerator::new(config);
        let mut entropy = SeededSource::new(99);
        let mut state = state_at(28.0, 28.0);

        for tick in 0..20_000 {
            let speed = match (tick / 50) % 4 {
                0 => 0.0,
                1 => 20.0,
                2 => 0.0,
                _ => 120.0,
            };
            let door_open = tick % 7 == 0 && speed == 0.0;

            generator.advance(speed, door_open, 28.0, &mut state, &mut entropy);

            assert!(state.engine_temp >= state.external_temp - 5.0);
            assert!(state.engine_temp <= 110.0);
            if speed > 0.0 {
                assert!(!state.is_abnormal());
            }
        }
    }
}
