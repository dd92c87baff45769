//! Vehicle population
//!
//! Produces the cars with their driver-model parameters and turn routes.
//! Placement on the network is left to the positioner.

use log::warn;
use rand::seq::IndexedRandom;
use rand::Rng;

use super::config::{CarSpec, RandomCarSpec};
use super::distribution::Distribution;
use super::error::Result;
use super::generator::Strategy;
use super::types::{Car, CarId, TurnDirection};

/// Registered car strategies
#[derive(Debug, Clone)]
pub enum CarGenerator {
    Random(RandomCarGenerator),
}

impl CarGenerator {
    pub fn from_spec(spec: &CarSpec) -> Result<Self> {
        match spec {
            CarSpec::Random(spec) => Ok(CarGenerator::Random(RandomCarGenerator::new(spec)?)),
        }
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Car> {
        match self {
            CarGenerator::Random(generator) => generator.generate(rng),
        }
    }
}

impl Strategy for CarGenerator {}

/// Every parameter drawn independently from its own distribution
#[derive(Debug, Clone)]
pub struct RandomCarGenerator {
    number: Distribution,
    target_velocity: Distribution,
    max_acceleration: Distribution,
    target_deceleration: Distribution,
    min_distance: Distribution,
    target_headway: Distribution,
    politeness: Distribution,
    route_length: Distribution,
}

impl RandomCarGenerator {
    pub fn new(spec: &RandomCarSpec) -> Result<Self> {
        Ok(Self {
            number: Distribution::from_spec(&spec.number)?,
            target_velocity: Distribution::from_spec(&spec.target_velocity)?,
            max_acceleration: Distribution::from_spec(&spec.max_acceleration)?,
            target_deceleration: Distribution::from_spec(&spec.target_deceleration)?,
            min_distance: Distribution::from_spec(&spec.min_distance)?,
            target_headway: Distribution::from_spec(&spec.target_headway)?,
            politeness: Distribution::from_spec(&spec.politeness)?,
            route_length: Distribution::from_spec(&spec.route_length)?,
        })
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Car> {
        let count = self.number.sample(rng).as_i64().max(0) as usize;
        if count == 0 {
            warn!("Car count drew zero; the scenario will have no cars");
        }

        (0..count).map(|id| self.generate_car(CarId(id), rng)).collect()
    }

    fn generate_car<R: Rng + ?Sized>(&self, id: CarId, rng: &mut R) -> Car {
        Car {
            id,
            target_velocity: self.target_velocity.sample(rng),
            max_acceleration: self.max_acceleration.sample(rng),
            target_deceleration: self.target_deceleration.sample(rng),
            min_distance: self.min_distance.sample(rng),
            target_headway: self.target_headway.sample(rng),
            politeness: self.politeness.sample(rng),
            route: self.generate_route(rng),
            position: None,
        }
    }

    fn generate_route<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<TurnDirection> {
        let length = self.route_length.sample(rng).as_i64().max(0) as usize;
        (0..length)
            .filter_map(|_| TurnDirection::ALL.choose(rng).copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::distribution::{DistributionSpec, Scalar};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    fn fixed(value: f64) -> DistributionSpec {
        DistributionSpec::Static {
            value: Scalar::Float(value),
        }
    }

    fn count(value: i64) -> DistributionSpec {
        DistributionSpec::Static {
            value: Scalar::Int(value),
        }
    }

    fn spec(number: DistributionSpec, route_length: DistributionSpec) -> RandomCarSpec {
        RandomCarSpec {
            number,
            target_velocity: fixed(13.9),
            max_acceleration: fixed(1.0),
            target_deceleration: fixed(1.5),
            min_distance: fixed(2.0),
            target_headway: fixed(1.2),
            politeness: fixed(0.3),
            route_length,
        }
    }

    #[test]
    fn test_static_count_yields_sequential_ids() {
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let generator = RandomCarGenerator::new(&spec(count(5), count(0))).unwrap();
        let cars = generator.generate(&mut rng);

        let ids: Vec<_> = cars.iter().map(|car| car.id).collect();
        assert_eq!(ids, (0..5).map(CarId).collect::<Vec<_>>());
        for car in &cars {
            assert_eq!(car.target_velocity, Scalar::Float(13.9));
            assert_eq!(car.politeness, Scalar::Float(0.3));
            assert!(car.route.is_empty());
            assert!(car.position.is_none());
        }
    }

    #[test]
    fn test_negative_count_yields_no_cars() {
        let mut rng = ChaCha8Rng::seed_from_u64(32);
        let generator = RandomCarGenerator::new(&spec(count(-3), count(2))).unwrap();
        assert!(generator.generate(&mut rng).is_empty());
    }

    #[test]
    fn test_routes_cover_all_turns_evenly() {
        let mut rng = ChaCha8Rng::seed_from_u64(33);
        let generator = RandomCarGenerator::new(&spec(count(40), count(100))).unwrap();
        let cars = generator.generate(&mut rng);

        let mut histogram: HashMap<TurnDirection, usize> = HashMap::new();
        for car in &cars {
            assert_eq!(car.route.len(), 100);
            for turn in &car.route {
                *histogram.entry(*turn).or_default() += 1;
            }
        }

        // 4000 draws, 1000 expected per turn
        for turn in TurnDirection::ALL {
            let seen = histogram.get(&turn).copied().unwrap_or_default();
            assert!((850..1150).contains(&seen), "{:?} drawn {} times", turn, seen);
        }
    }
}
