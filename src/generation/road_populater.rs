//! Lane counts and speed limits for every road

use rand::Rng;

use super::config::{RandomRoadSpec, RoadSpec};
use super::distribution::Distribution;
use super::error::{GenerateError, Result};
use super::generator::Strategy;
use super::road_network::RoadNetwork;

/// Registered road strategies
#[derive(Debug, Clone)]
pub enum RoadPopulater {
    Random(RandomRoadPopulater),
}

impl RoadPopulater {
    pub fn from_spec(spec: &RoadSpec) -> Result<Self> {
        match spec {
            RoadSpec::Random(spec) => Ok(RoadPopulater::Random(RandomRoadPopulater::new(spec)?)),
        }
    }

    pub fn populate<R: Rng + ?Sized>(&self, network: &mut RoadNetwork, rng: &mut R) -> Result<()> {
        match self {
            RoadPopulater::Random(populater) => populater.populate(network, rng),
        }
    }
}

impl Strategy for RoadPopulater {}

/// Independent lane and limit draws per road
#[derive(Debug, Clone)]
pub struct RandomRoadPopulater {
    lanes: Distribution,
    limit: Distribution,
}

impl RandomRoadPopulater {
    pub fn new(spec: &RandomRoadSpec) -> Result<Self> {
        Ok(Self {
            lanes: Distribution::from_spec(&spec.lanes)?,
            limit: Distribution::from_spec(&spec.limit)?,
        })
    }

    pub fn populate<R: Rng + ?Sized>(&self, network: &mut RoadNetwork, rng: &mut R) -> Result<()> {
        for road in network.roads_mut() {
            let drawn = self.lanes.sample(rng).as_i64();
            let lanes = u32::try_from(drawn)
                .ok()
                .filter(|lanes| *lanes >= 1)
                .ok_or_else(|| {
                    GenerateError::SamplingPrecondition(format!(
                        "road {} drew {} lanes, at least one is required",
                        road.id.0, drawn
                    ))
                })?;
            road.lanes = lanes;
            road.speed_limit = self.limit.sample(rng);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::config::CompleteGridSpec;
    use crate::generation::distribution::{DistributionSpec, Scalar};
    use crate::generation::gridder::CompleteGridder;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn grid() -> RoadNetwork {
        CompleteGridder::new(CompleteGridSpec {
            width: 3,
            height: 3,
            spacing: 1,
        })
        .unwrap()
        .generate()
        .unwrap()
    }

    fn populater(lanes: DistributionSpec, limit: DistributionSpec) -> RandomRoadPopulater {
        RandomRoadPopulater::new(&RandomRoadSpec { lanes, limit }).unwrap()
    }

    #[test]
    fn test_every_road_is_populated() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut network = grid();
        populater(
            DistributionSpec::UniformInt {
                min: 1,
                max: 4,
                step: 1,
            },
            DistributionSpec::Static {
                value: Scalar::Int(50),
            },
        )
        .populate(&mut network, &mut rng)
        .unwrap();

        for road in network.roads() {
            assert!((1..4).contains(&road.lanes));
            assert_eq!(road.speed_limit, Scalar::Int(50));
        }
    }

    #[test]
    fn test_fractional_lanes_are_truncated() {
        let mut rng = ChaCha8Rng::seed_from_u64(22);
        let mut network = grid();
        populater(
            DistributionSpec::Static {
                value: Scalar::Float(2.8),
            },
            DistributionSpec::Uniform {
                min: 30.0,
                max: 60.0,
            },
        )
        .populate(&mut network, &mut rng)
        .unwrap();

        assert!(network.roads().all(|road| road.lanes == 2));
        assert!(network
            .roads()
            .all(|road| (30.0..60.0).contains(&road.speed_limit.as_f64())));
    }

    #[test]
    fn test_zero_lanes_are_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let mut network = grid();
        let err = populater(
            DistributionSpec::Static {
                value: Scalar::Int(0),
            },
            DistributionSpec::Static {
                value: Scalar::Int(50),
            },
        )
        .populate(&mut network, &mut rng)
        .unwrap_err();
        assert!(matches!(err, GenerateError::SamplingPrecondition(_)));
    }
}
