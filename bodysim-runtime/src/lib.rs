// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

/// The `bodysim` library generates synthetic body control sensor data.
///
/// A speed profile drives five coupled channel generators: cabin
/// temperature, ambient temperature, engine temperature, door state and
/// chassis tilt. The resulting fixture dataset exercises the stop-start
/// control unit under realistic operating conditions.
///
/// The `runtime` module provides the `Driver` that owns the simulation
/// state and advances the generators tick by tick, and the `Error` enum.
/// The `profile` and `fixture` modules read speed profiles and write
/// fixture datasets as CSV tables. The library exports the `config` module
/// and re-exports the `rand` crate.
pub mod core;
pub mod fixture;
pub mod generator;
pub mod profile;
pub mod rng;
pub mod runtime;

#[macro_use]
extern crate log;

mod config;

pub use self::config::*;

pub use rand;

pub use self::runtime::Driver;
pub use self::runtime::Error;

/// Bodysim runtime module containing various constants.
pub mod consts {
    /// Bodysim runtime version.
    ///
    /// # Example
    ///
    /// ```
    /// use bodysim::consts::VERSION;
    ///
    /// println!("Bodysim runtime version: {}", VERSION);
    /// ```
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Default configuration file name, looked up in the working directory.
    pub const DEFAULT_CONFIG_FILE: &str = "bodysim.toml";
}
