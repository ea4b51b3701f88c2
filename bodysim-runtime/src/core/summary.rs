// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use super::SampleRow;

/// Run statistics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    /// Total number of ticks.
    pub ticks: usize,
    /// Number of moving to stopped transitions.
    pub stop_events: usize,
    /// Number of ticks with a door open.
    pub door_open_ticks: usize,
    /// Number of ticks in an abnormal engine episode.
    pub abnormal_ticks: usize,
    /// Highest engine temperature seen.
    pub peak_engine_temp: Option<f64>,
}

impl RunSummary {
    /// Account for an emitted row.
    pub fn record(&mut self, row: &SampleRow, abnormal: bool, stop_event: bool) {
        self.ticks += 1;
        if stop_event {
            self.stop_events += 1;
        }
        if row.door_open {
            self.door_open_ticks += 1;
        }
        if abnormal {
            self.abnormal_ticks += 1;
        }
        self.peak_engine_temp = Some(
            self.peak_engine_temp
                .map_or(row.engine_temp, |peak| peak.max(row.engine_temp)),
        );
    }

    /// Share of ticks with a door open, in percentage.
    pub fn door_open_rate(&self) -> f64 {
        if self.ticks > 0 {
            (self.door_open_ticks as f64 / self.ticks as f64) * 100.0
        } else {
            0.0
        }
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ticks: {} Stops: {} Door open: {:.1}% Abnormal engine ticks: {}",
            self.ticks,
            self.stop_events,
            self.door_open_rate(),
            self.abnormal_ticks
        )?;
        if let Some(peak) = self.peak_engine_temp {
            write!(f, " Peak engine: {}°C", peak)?;
        }
        Ok(())
    }
}
