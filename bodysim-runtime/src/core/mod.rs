// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

pub use self::sample::{ProfileSample, SampleRow};
pub use self::state::{EngineMode, SimulationState};
pub use self::summary::RunSummary;

mod sample;
mod state;
mod summary;

use crate::config::ComfortConfig;

/// Discomfort condition.
///
/// Cabin and ambient temperature sit inside the comfort band while the
/// engine temperature is outside its normal operating band.
pub fn is_discomfort(
    comfort: &ComfortConfig,
    internal_temp: f64,
    external_temp: f64,
    engine_temp: f64,
) -> bool {
    internal_temp <= comfort.temp_set + comfort.max_temp_diff
        && external_temp <= comfort.temp_set
        && (engine_temp < comfort.engine_min || engine_temp > comfort.engine_max)
}

/// Round to one decimal.
#[inline]
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
