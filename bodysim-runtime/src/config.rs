// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use std::path::Path;

use serde::Deserialize;

use crate::runtime::{Error, Result};

/// Cabin temperature generator configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct InternalTempConfig {
    /// Lower cabin temperature bound in degrees Celsius.
    pub min: f64,
    /// Upper cabin temperature bound in degrees Celsius.
    pub max: f64,
    /// Probability of a temperature change per tick.
    pub change_probability: f64,
    /// Largest perturbation applied on a change.
    pub max_step: f64,
}

impl Default for InternalTempConfig {
    fn default() -> Self {
        Self {
            min: 21.0,
            max: 24.0,
            change_probability: 0.01,
            max_step: 0.5,
        }
    }
}

/// Ambient temperature generator configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ExternalTempConfig {
    /// Lower ambient temperature bound in degrees Celsius.
    pub min: f64,
    /// Upper ambient temperature bound in degrees Celsius.
    pub max: f64,
    /// Probability of a temperature change per tick.
    pub change_probability: f64,
    /// Ambient temperature the diurnal cycle swings around.
    pub base: f64,
    /// Amplitude of the diurnal cycle.
    pub diurnal_amplitude: f64,
    /// Period of the diurnal cycle in seconds.
    pub diurnal_period: f64,
    /// Largest noise added to a new ambient value.
    pub noise: f64,
}

impl Default for ExternalTempConfig {
    fn default() -> Self {
        Self {
            min: 26.0,
            max: 31.0,
            change_probability: 0.01,
            base: 28.0,
            diurnal_amplitude: 2.0,
            diurnal_period: 86_400.0,
            noise: 1.0,
        }
    }
}

/// Engine coolant temperature generator configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineTempConfig {
    /// Operating temperature while driving.
    pub moving_target: f64,
    /// Below this speed the engine runs warmer.
    pub low_speed_threshold: f64,
    /// Target offset below the low speed threshold.
    pub low_speed_offset: f64,
    /// Above this speed the engine runs cooler.
    pub high_speed_threshold: f64,
    /// Target offset above the high speed threshold.
    pub high_speed_offset: f64,
    /// Approach factor while moving.
    pub moving_factor: f64,
    /// Approach factor while idle with the doors closed.
    pub idle_factor: f64,
    /// Approach factor while idle with a door open.
    pub door_open_factor: f64,
    /// Largest random component of a step.
    pub step_noise: f64,
    /// Largest offset of the ambient target with a door open.
    pub door_open_noise: f64,
    /// Idle operating temperature.
    pub idle_target: f64,
    /// Largest offset of the idle target.
    pub idle_noise: f64,
    /// Probability of an abnormal episode starting on an idle tick.
    pub abnormal_probability: f64,
    /// Shortest abnormal episode in ticks.
    pub abnormal_min_ticks: u32,
    /// Longest abnormal episode in ticks.
    pub abnormal_max_ticks: u32,
    /// Lower bound of the overheating target.
    pub abnormal_high_min: f64,
    /// Upper bound of the overheating target.
    pub abnormal_high_max: f64,
    /// The engine never drops more than this below ambient.
    pub ambient_margin: f64,
    /// Absolute engine temperature ceiling.
    pub ceiling: f64,
    /// Above this temperature the cooling system may kick in.
    pub cooldown_threshold: f64,
    /// Probability the cooling system kicks in.
    pub cooldown_probability: f64,
    /// Temperature drop of a forced cooldown.
    pub cooldown_drop: f64,
}

impl Default for EngineTempConfig {
    fn default() -> Self {
        Self {
            moving_target: 90.0,
            low_speed_threshold: 30.0,
            low_speed_offset: 2.5,
            high_speed_threshold: 100.0,
            high_speed_offset: -1.5,
            moving_factor: 0.1,
            idle_factor: 0.1,
            door_open_factor: 0.2,
            step_noise: 2.5,
            door_open_noise: 2.0,
            idle_target: 85.0,
            idle_noise: 3.0,
            abnormal_probability: 0.02,
            abnormal_min_ticks: 10,
            abnormal_max_ticks: 30,
            abnormal_high_min: 105.0,
            abnormal_high_max: 110.0,
            ambient_margin: 5.0,
            ceiling: 110.0,
            cooldown_threshold: 105.0,
            cooldown_probability: 0.3,
            cooldown_drop: 5.0,
        }
    }
}

/// Comfort band shared by the door and tilt generators.
///
/// Mirrors the thresholds the stop-start unit applies to the same channels.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ComfortConfig {
    /// Climate control set point.
    pub temp_set: f64,
    /// Allowed cabin temperature above the set point.
    pub max_temp_diff: f64,
    /// Lower bound of the normal engine temperature band.
    pub engine_min: f64,
    /// Upper bound of the normal engine temperature band.
    pub engine_max: f64,
}

impl Default for ComfortConfig {
    fn default() -> Self {
        Self {
            temp_set: 23.0,
            max_temp_diff: 5.0,
            engine_min: 70.0,
            engine_max: 105.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DoorConfig {
    /// Toggle probability while the discomfort condition holds.
    pub toggle_probability_discomfort: f64,
    /// Toggle probability otherwise.
    pub toggle_probability: f64,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            toggle_probability_discomfort: 0.1,
            toggle_probability: 0.02,
        }
    }
}

/// Chassis tilt generator configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TiltConfig {
    /// Largest tilt change per tick while moving, in degrees.
    pub max_change: f64,
    /// Upper tilt bound in degrees.
    pub max: f64,
    /// Below or at this angle a stopped vehicle is nudged upward.
    pub nudge_threshold: f64,
    /// Smallest upward nudge.
    pub nudge_min: f64,
    /// Largest upward nudge.
    pub nudge_max: f64,
    /// A nudge never lifts the tilt above this angle.
    pub nudge_cap: f64,
    /// Largest jitter above the nudge threshold.
    pub jitter: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_change: 1.5,
            max: 20.0,
            nudge_threshold: 5.0,
            nudge_min: 0.3,
            nudge_max: 0.7,
            nudge_cap: 5.1,
            jitter: 0.5,
        }
    }
}

/// Speed profile table layout.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    /// Header of the time column.
    pub time_column: String,
    /// Header of the speed column.
    pub speed_column: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            time_column: "Time (seconds)".to_owned(),
            speed_column: "Speed (km/h)".to_owned(),
        }
    }
}

/// Simulation configuration.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Entropy seed. The same seed and profile always yield the same fixture.
    pub seed: u64,
    pub internal: InternalTempConfig,
    pub external: ExternalTempConfig,
    pub engine: EngineTempConfig,
    pub comfort: ComfortConfig,
    pub door: DoorConfig,
    pub tilt: TiltConfig,
    pub profile: ProfileConfig,
}

impl SimConfig {
    /// Parse configuration from TOML. Omitted keys keep their default.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read configuration from file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        Self::from_toml(&content)
    }

    /// Read configuration from the first file that exists.
    ///
    /// If none of the files exist the default configuration is returned.
    pub fn try_from_file<P: AsRef<Path>>(paths: Vec<P>) -> Result<Self> {
        for path in paths {
            let path = path.as_ref();
            if path.exists() {
                debug!("Reading configuration from {}", path.display());
                return Self::from_file(path);
            }
        }

        debug!("No configuration file found, using defaults");

        Ok(Self::default())
    }

    /// Validate the configuration.
    ///
    /// Runs once before the first tick. A configuration that passes keeps
    /// every channel bound satisfiable for the whole run.
    pub fn validate(&self) -> Result {
        let internal = &self.internal;
        check_range("internal", internal.min, internal.max)?;
        check_probability("internal.change_probability", internal.change_probability)?;
        check_magnitude("internal.max_step", internal.max_step)?;

        let external = &self.external;
        check_range("external", external.min, external.max)?;
        check_probability("external.change_probability", external.change_probability)?;
        check_finite("external.base", external.base)?;
        check_magnitude("external.diurnal_amplitude", external.diurnal_amplitude)?;
        check_magnitude("external.noise", external.noise)?;
        if !(external.diurnal_period.is_finite() && external.diurnal_period > 0.0) {
            return Err(Error::Config(
                "external.diurnal_period must be positive".to_owned(),
            ));
        }

        let engine = &self.engine;
        for (name, value) in [
            ("engine.moving_target", engine.moving_target),
            ("engine.low_speed_offset", engine.low_speed_offset),
            ("engine.high_speed_offset", engine.high_speed_offset),
            ("engine.idle_target", engine.idle_target),
            ("engine.cooldown_threshold", engine.cooldown_threshold),
        ] {
            check_finite(name, value)?;
        }
        for (name, value) in [
            ("engine.low_speed_threshold", engine.low_speed_threshold),
            ("engine.high_speed_threshold", engine.high_speed_threshold),
            ("engine.moving_factor", engine.moving_factor),
            ("engine.idle_factor", engine.idle_factor),
            ("engine.door_open_factor", engine.door_open_factor),
            ("engine.step_noise", engine.step_noise),
            ("engine.door_open_noise", engine.door_open_noise),
            ("engine.idle_noise", engine.idle_noise),
            ("engine.ambient_margin", engine.ambient_margin),
            ("engine.cooldown_drop", engine.cooldown_drop),
        ] {
            check_magnitude(name, value)?;
        }
        check_probability("engine.abnormal_probability", engine.abnormal_probability)?;
        check_probability("engine.cooldown_probability", engine.cooldown_probability)?;
        check_range(
            "engine.abnormal_high",
            engine.abnormal_high_min,
            engine.abnormal_high_max,
        )?;
        if engine.abnormal_min_ticks == 0 || engine.abnormal_min_ticks > engine.abnormal_max_ticks
        {
            return Err(Error::Config(format!(
                "engine abnormal duration {}..={} is empty",
                engine.abnormal_min_ticks, engine.abnormal_max_ticks
            )));
        }
        check_finite("engine.ceiling", engine.ceiling)?;
        if external.max - engine.ambient_margin > engine.ceiling {
            return Err(Error::Config(format!(
                "engine.ceiling {} is below the ambient floor {}",
                engine.ceiling,
                external.max - engine.ambient_margin
            )));
        }

        let comfort = &self.comfort;
        check_finite("comfort.temp_set", comfort.temp_set)?;
        check_magnitude("comfort.max_temp_diff", comfort.max_temp_diff)?;
        check_range("comfort.engine", comfort.engine_min, comfort.engine_max)?;

        check_probability(
            "door.toggle_probability_discomfort",
            self.door.toggle_probability_discomfort,
        )?;
        check_probability("door.toggle_probability", self.door.toggle_probability)?;

        let tilt = &self.tilt;
        check_range("tilt", 0.0, tilt.max)?;
        check_magnitude("tilt.max_change", tilt.max_change)?;
        check_magnitude("tilt.nudge_threshold", tilt.nudge_threshold)?;
        check_range("tilt.nudge", tilt.nudge_min, tilt.nudge_max)?;
        check_magnitude("tilt.nudge_min", tilt.nudge_min)?;
        check_magnitude("tilt.nudge_cap", tilt.nudge_cap)?;
        check_magnitude("tilt.jitter", tilt.jitter)?;

        Ok(())
    }
}

impl std::fmt::Display for SimConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Seed: {} Internal: [{}, {}] External: [{}, {}] Tilt max: {}",
            self.seed,
            self.internal.min,
            self.internal.max,
            self.external.min,
            self.external.max,
            self.tilt.max
        )
    }
}

fn check_finite(name: &str, value: f64) -> Result {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::Config(format!("{} must be finite", name)))
    }
}

fn check_magnitude(name: &str, value: f64) -> Result {
    check_finite(name, value)?;
    if value < 0.0 {
        return Err(Error::Config(format!("{} must not be negative", name)));
    }
    Ok(())
}

fn check_probability(name: &str, value: f64) -> Result {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "{} must be a probability, got {}",
            name, value
        )))
    }
}

fn check_range(name: &str, min: f64, max: f64) -> Result {
    check_finite(name, min)?;
    check_finite(name, max)?;
    if min > max {
        return Err(Error::Config(format!(
            "{} range [{}, {}] is inverted",
            name, min, max
        )));
    }
    Ok(())
}
