use std::path::PathBuf;

use bodysim::SimConfig;

#[derive(Clone, Debug)]
pub struct GenConfig {
    /// Speed profile.
    pub input: PathBuf,
    /// Fixture output, stdout if unset.
    pub output: Option<PathBuf>,
    /// Simulation configuration.
    pub sim: SimConfig,
}
