// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

//! Channel generators.
//!
//! Each generator advances one sensor channel by a single tick. Generators
//! hold only their configuration; all carried state lives in
//! [`SimulationState`](crate::core::SimulationState) and all randomness is
//! drawn from the [`Entropy`](crate::rng::Entropy) passed in by the driver.

pub use self::door::DoorStateGenerator;
pub use self::engine::EngineTempGenerator;
pub use self::external::ExternalTempGenerator;
pub use self::internal::InternalTempGenerator;
pub use self::tilt::TiltGenerator;

mod door;
mod engine;
mod external;
mod internal;
mod tilt;
