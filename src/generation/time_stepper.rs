//! Number of simulation time steps for a scenario

use rand::Rng;

use super::config::TimeStepSpec;
use super::distribution::Distribution;
use super::error::{GenerateError, Result};
use super::generator::Strategy;

/// Registered time step strategies
#[derive(Debug, Clone)]
pub enum TimeStepper {
    Random(Distribution),
}

impl TimeStepper {
    pub fn from_spec(spec: &TimeStepSpec) -> Result<Self> {
        match spec {
            TimeStepSpec::Random(dist) => Ok(TimeStepper::Random(Distribution::from_spec(dist)?)),
        }
    }

    /// Draw a positive step count
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<u64> {
        let drawn = match self {
            TimeStepper::Random(dist) => dist.sample(rng).as_i64(),
        };
        u64::try_from(drawn)
            .ok()
            .filter(|steps| *steps > 0)
            .ok_or_else(|| {
                GenerateError::SamplingPrecondition(format!(
                    "time step count must be positive, drew {drawn}"
                ))
            })
    }
}

impl Strategy for TimeStepper {}
