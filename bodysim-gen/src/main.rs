// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use std::path::PathBuf;

use clap::{Parser, ValueHint};

mod config;

#[derive(Parser)]
#[command(author = "Copyright (C) 2024 Laixer Equipment B.V.")]
#[command(version, propagate_version = true)]
#[command(about = "Body control sensor fixture generator", long_about = None)]
struct Args {
    /// Speed profile CSV file.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,
    /// Fixture output file.
    #[arg(short, long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,
    /// Configuration file.
    #[arg(short, long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,
    /// Entropy seed, overrides the configuration.
    #[arg(long, conflicts_with = "random_seed")]
    seed: Option<u64>,
    /// Draw a fresh entropy seed.
    #[arg(long)]
    random_seed: bool,
    /// Test configuration and exit.
    #[arg(short, long)]
    test: bool,
    /// Level of verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut log_config = simplelog::ConfigBuilder::new();
    log_config.set_time_offset_to_local().ok();
    log_config.set_time_format_rfc2822();
    log_config.set_target_level(log::LevelFilter::Off);
    log_config.set_location_level(log::LevelFilter::Off);

    let log_level = match args.verbose {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    simplelog::TermLogger::init(
        log_level,
        log_config.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    log::debug!("Bodysim runtime version: {}", bodysim::consts::VERSION);

    let mut sim = match &args.config {
        Some(path) => bodysim::SimConfig::from_file(path)?,
        None => {
            let local_config = std::env::current_dir()?.join(bodysim::consts::DEFAULT_CONFIG_FILE);
            bodysim::SimConfig::try_from_file(vec![local_config])?
        }
    };

    if let Some(seed) = args.seed {
        sim.seed = seed;
    } else if args.random_seed {
        sim.seed = rand::random();
    }

    sim.validate()?;

    if args.test {
        println!("Configuration is valid");
        return Ok(());
    }

    let config = config::GenConfig {
        input: args.input,
        output: args.output,
        sim,
    };

    log::trace!("{:#?}", config);

    run(&config)
}

fn run(config: &config::GenConfig) -> anyhow::Result<()> {
    use bodysim::fixture::FixtureWriter;
    use bodysim::profile::ProfileReader;

    log::info!("Using seed {}", config.sim.seed);

    let samples = ProfileReader::new(&config.sim.profile).read_path(&config.input)?;

    log::info!(
        "Loaded {} samples from {}",
        samples.len(),
        config.input.display()
    );

    let mut driver = bodysim::Driver::new(config.sim.clone())?;
    let rows = driver.run(samples)?;

    match &config.output {
        Some(path) => {
            FixtureWriter::from_path(path)?.write_all(&rows)?;
            log::info!("Wrote {} rows to {}", rows.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            FixtureWriter::new(stdout.lock())?.write_all(&rows)?;
        }
    }

    log::info!("{}", driver.summary());

    Ok(())
}
