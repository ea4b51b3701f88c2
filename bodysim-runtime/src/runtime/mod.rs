// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

mod error;

pub use self::error::Error;

pub type Result<T = ()> = std::result::Result<T, error::Error>;

use crate::{
    config::SimConfig,
    core::{round1, ProfileSample, RunSummary, SampleRow, SimulationState},
    generator::{
        DoorStateGenerator, EngineTempGenerator, ExternalTempGenerator, InternalTempGenerator,
        TiltGenerator,
    },
    rng::{Entropy, SeededSource},
};

/// Simulation driver.
///
/// The driver owns the simulation state and the entropy source and is the
/// only caller of the generators. Each tick runs the generators in a fixed
/// order:
///
/// 1. cabin and ambient temperature, independent of each other;
/// 2. door state, from the speed, this tick's cabin temperature and the
///    previous tick's ambient and engine readings;
/// 3. engine temperature, from the speed, the previous tick's ambient
///    reading and the door state of step 2;
/// 4. tilt, from the speed and this tick's cabin, ambient and engine
///    readings.
///
/// The first tick only advances the temperatures and emits the initial
/// engine, door and tilt values.
///
/// A driver covers exactly one run; construct a new driver per profile.
#[derive(Clone)]
pub struct Driver<E = SeededSource> {
    entropy: E,
    state: SimulationState,
    internal: InternalTempGenerator,
    external: ExternalTempGenerator,
    door: DoorStateGenerator,
    engine: EngineTempGenerator,
    tilt: TiltGenerator,
    previous: Option<SampleRow>,
    summary: RunSummary,
}

impl Driver<SeededSource> {
    /// Construct a driver seeded from the configuration.
    pub fn new(config: SimConfig) -> Result<Self> {
        let entropy = SeededSource::new(config.seed);

        debug!("Entropy seed: {}", entropy.seed());

        Self::with_entropy(config, entropy)
    }
}

impl<E: Entropy> Driver<E> {
    /// Construct a driver drawing from the given entropy source.
    ///
    /// The configuration is validated before the initial state is drawn.
    pub fn with_entropy(config: SimConfig, mut entropy: E) -> Result<Self> {
        config.validate()?;

        trace!("{}", config);

        let state = SimulationState::seed(&config, &mut entropy);

        debug!(
            "Initial state: internal {:.2}°C external {:.2}°C",
            state.internal_temp, state.external_temp
        );

        Ok(Self {
            entropy,
            state,
            internal: InternalTempGenerator::new(config.internal),
            external: ExternalTempGenerator::new(config.external),
            door: DoorStateGenerator::new(config.door, config.comfort.clone()),
            engine: EngineTempGenerator::new(config.engine),
            tilt: TiltGenerator::new(config.tilt, config.comfort),
            previous: None,
            summary: RunSummary::default(),
        })
    }

    /// Current simulation state.
    #[inline]
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Statistics of the ticks run so far.
    #[inline]
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Run a complete speed profile.
    ///
    /// Produces one row per input sample. The first invalid sample aborts
    /// the run.
    pub fn run<I>(&mut self, samples: I) -> Result<Vec<SampleRow>>
    where
        I: IntoIterator<Item = ProfileSample>,
    {
        let samples = samples.into_iter();
        let mut rows = Vec::with_capacity(samples.size_hint().0);

        for sample in samples {
            rows.push(self.step(sample)?);
        }

        debug!("{}", self.summary);

        Ok(rows)
    }

    /// Advance the simulation by one tick.
    pub fn step(&mut self, sample: ProfileSample) -> Result<SampleRow> {
        self.check_sample(&sample)?;

        let ProfileSample { time, speed } = sample;

        let internal_temp = self.internal.advance(&mut self.state, &mut self.entropy);
        let external_temp = self.external.advance(&mut self.state, time, &mut self.entropy);

        let row = match self.previous {
            None => {
                // Engine starts cold, at ambient temperature.
                self.state.engine_temp = self.state.external_temp;

                SampleRow {
                    time,
                    speed,
                    internal_temp,
                    external_temp,
                    engine_temp: round1(self.state.engine_temp),
                    door_open: self.state.door_open,
                    tilt_angle: round1(self.state.tilt_angle),
                }
            }
            Some(previous) => {
                let door_open = self.door.advance(
                    speed,
                    internal_temp,
                    previous.external_temp,
                    previous.engine_temp,
                    &mut self.state,
                    &mut self.entropy,
                );
                let engine_temp = self.engine.advance(
                    speed,
                    door_open,
                    previous.external_temp,
                    &mut self.state,
                    &mut self.entropy,
                );
                let tilt_angle = self.tilt.advance(
                    speed,
                    internal_temp,
                    external_temp,
                    engine_temp,
                    &mut self.state,
                    &mut self.entropy,
                );

                SampleRow {
                    time,
                    speed,
                    internal_temp,
                    external_temp,
                    engine_temp,
                    door_open,
                    tilt_angle,
                }
            }
        };

        let stopped = !sample.is_moving();
        let stop_event = self.previous.is_some() && stopped && !self.state.was_stopped;
        if self.previous.is_some() && stopped != self.state.was_stopped {
            debug!(
                "Vehicle {} at {}s",
                if stopped { "stopped" } else { "moving" },
                time
            );
        }
        self.state.was_stopped = stopped;

        self.summary
            .record(&row, self.state.is_abnormal(), stop_event);

        trace!("{}", row);

        self.previous = Some(row);

        Ok(row)
    }

    fn check_sample(&self, sample: &ProfileSample) -> Result {
        let row = self.summary.ticks;

        if !sample.time.is_finite() {
            return Err(Error::invalid_row(row, "time is not a number"));
        }
        if !sample.speed.is_finite() {
            return Err(Error::invalid_row(row, "speed is not a number"));
        }
        if sample.speed < 0.0 {
            return Err(Error::invalid_row(
                row,
                format!("negative speed {}", sample.speed),
            ));
        }
        if let Some(previous) = &self.previous {
            if sample.time < previous.time {
                return Err(Error::invalid_row(
                    row,
                    format!("time {} precedes {}", sample.time, previous.time),
                ));
            }
        }

        Ok(())
    }
}
