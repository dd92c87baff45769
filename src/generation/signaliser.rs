//! Signal phase assignment
//!
//! Every junction gets one phase per distinct direction among its
//! connections, in a random order.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::config::{GaussSignalSpec, SignalSpec};
use super::distribution::{Distribution, DistributionSpec};
use super::error::{GenerateError, Result};
use super::generator::Strategy;
use super::road_network::RoadNetwork;
use super::types::{CardinalDirection, SignalPhase};

/// Registered signal strategies
#[derive(Debug, Clone)]
pub enum Signaliser {
    Gauss(GaussSignaliser),
}

impl Signaliser {
    pub fn from_spec(spec: &SignalSpec) -> Result<Self> {
        match spec {
            SignalSpec::Gauss(spec) => Ok(Signaliser::Gauss(GaussSignaliser::new(*spec)?)),
        }
    }

    pub fn assign<R: Rng + ?Sized>(&self, network: &mut RoadNetwork, rng: &mut R) -> Result<()> {
        match self {
            Signaliser::Gauss(signaliser) => signaliser.assign(network, rng),
        }
    }
}

impl Strategy for Signaliser {}

/// Phase durations drawn from a clamped normal distribution
#[derive(Debug, Clone)]
pub struct GaussSignaliser {
    duration: Distribution,
}

impl GaussSignaliser {
    pub fn new(spec: GaussSignalSpec) -> Result<Self> {
        let duration = Distribution::from_spec(&DistributionSpec::Gauss {
            mu: spec.mu,
            sigma: spec.sigma,
            min: spec.min,
            max: spec.max,
        })?;
        Ok(Self { duration })
    }

    pub fn assign<R: Rng + ?Sized>(&self, network: &mut RoadNetwork, rng: &mut R) -> Result<()> {
        for junction in network.junctions_mut() {
            let mut directions: Vec<CardinalDirection> = junction
                .connections
                .iter()
                .map(|conn| conn.direction)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            directions.shuffle(rng);

            let mut signals = Vec::with_capacity(directions.len());
            for direction in directions {
                let drawn = self.duration.sample(rng).as_i64();
                let duration = u32::try_from(drawn).map_err(|_| {
                    GenerateError::SamplingPrecondition(format!(
                        "signal duration {} for junction {} is out of range",
                        drawn, junction.id.0
                    ))
                })?;
                signals.push(SignalPhase {
                    direction,
                    duration,
                });
            }
            junction.signals = signals;
        }
        Ok(())
    }
}
