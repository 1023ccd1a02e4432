//! Command-line configuration for the `moon-earth-sun` binary.

use crate::body::Body;
use crate::error::{Error, Result};
use crate::scenario;
use crate::simulation::{SampleSelector, Simulation};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

pub const DEFAULT_OUTPUT: &str = "output.dat";
pub const DEFAULT_STEP_SIZE: f64 = 1.0;
/// One year in seconds.
pub const DEFAULT_SECONDS: f64 = 31_536_000.0;
pub const DEFAULT_STEPS_PER_SAMPLE: u64 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Earth, Moon and Sun.
    MoonEarthSun,
    /// Sun and Earth only.
    SunEarth,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Moon, Earth and Sun under Newtonian gravity", long_about = None)]
pub struct Args {
    /// File the sampled positions are written to.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Length of one step in seconds.
    #[arg(short, long, default_value_t = DEFAULT_STEP_SIZE, value_parser = positive_f64)]
    pub step_size: f64,

    /// Simulated duration in seconds.
    #[arg(short = 't', long = "time", default_value_t = DEFAULT_SECONDS, value_parser = positive_f64)]
    pub seconds: f64,

    /// Steps between two samples.
    #[arg(short = 'm', long, default_value_t = DEFAULT_STEPS_PER_SAMPLE,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub steps_per_sample: u64,

    /// Built-in initial conditions.
    #[arg(long, value_enum, default_value_t = Preset::MoonEarthSun)]
    pub scenario: Preset,

    /// JSON scenario file; overrides --scenario.
    #[arg(long)]
    pub bodies: Option<PathBuf>,

    /// Index of the first sampled body.
    #[arg(long, default_value_t = 1)]
    pub sample_a: usize,

    /// Index of the second sampled body.
    #[arg(long, default_value_t = 0)]
    pub sample_b: usize,

    /// Hide the progress bar.
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

fn positive_f64(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("{value} is not greater than zero"))
    }
}

impl Args {
    /// Steps needed to cover the requested duration, rounding up.
    pub fn total_steps(&self) -> Result<u64> {
        let steps = (self.seconds / self.step_size).ceil();
        // u64::MAX as f64 rounds up to 2^64, which is already out of range
        if !(steps < u64::MAX as f64) {
            return Err(Error::TooManySteps {
                seconds: self.seconds,
                step_size: self.step_size,
            });
        }
        Ok(steps as u64)
    }

    pub fn simulation(&self) -> Result<Simulation> {
        Ok(
            Simulation::new(self.step_size, self.total_steps()?, self.steps_per_sample)
                .with_selector(SampleSelector::new(self.sample_a, self.sample_b))
                .with_progress(!self.no_progress),
        )
    }

    pub fn initial_bodies(&self) -> Result<Vec<Body>> {
        match &self.bodies {
            Some(path) => scenario::load_scenario(path),
            None => Ok(match self.scenario {
                Preset::MoonEarthSun => scenario::moon_earth_sun(),
                Preset::SunEarth => scenario::sun_earth(),
            }),
        }
    }
}
