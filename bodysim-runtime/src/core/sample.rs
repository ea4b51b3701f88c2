// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

/// One tick of the speed profile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProfileSample {
    /// Time in seconds.
    pub time: f64,
    /// Vehicle speed in km/h.
    pub speed: f64,
}

impl ProfileSample {
    pub fn new(time: f64, speed: f64) -> Self {
        Self { time, speed }
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.speed > 0.0
    }
}

/// Sensor channels for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleRow {
    /// Time in seconds.
    pub time: f64,
    /// Vehicle speed in km/h.
    pub speed: f64,
    /// Cabin temperature, whole degrees Celsius.
    pub internal_temp: f64,
    /// Ambient temperature, whole degrees Celsius.
    pub external_temp: f64,
    /// Engine coolant temperature in degrees Celsius, one decimal.
    pub engine_temp: f64,
    /// Any door open.
    pub door_open: bool,
    /// Chassis tilt in degrees, one decimal.
    pub tilt_angle: f64,
}

impl std::fmt::Display for SampleRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Time: {}s Speed: {}km/h Internal: {}°C External: {}°C Engine: {}°C Door: {} Tilt: {}°",
            self.time,
            self.speed,
            self.internal_temp,
            self.external_temp,
            self.engine_temp,
            if self.door_open { "open" } else { "closed" },
            self.tilt_angle
        )
    }
}
