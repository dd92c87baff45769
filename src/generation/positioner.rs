//! Density-weighted placement of cars on the road network
//!
//! A single uniform draw over the cumulative road weights picks both the road
//! and, through the remainder inside that road's weight band, the driving
//! direction, lane and distance along the road.

use log::debug;
use rand::Rng;

use super::config::{DensityModel, PositionSpec};
use super::error::{GenerateError, Result};
use super::generator::Strategy;
use super::road_network::RoadNetwork;
use super::types::{Car, CarPosition, DrivingDirection, Road, RoadId};

impl DensityModel {
    /// Placement weight of a single road
    pub fn weight(self, road: &Road) -> f64 {
        match self {
            DensityModel::RoadCount => 1.0,
            DensityModel::LaneCount => road.lanes as f64,
            DensityModel::RoadLength => road.length(),
            DensityModel::LaneLength => road.lanes as f64 * road.length(),
        }
    }
}

/// Registered placement strategies
#[derive(Debug, Clone)]
pub enum Positioner {
    Random(RandomPositioner),
}

impl Positioner {
    pub fn from_spec(spec: &PositionSpec) -> Result<Self> {
        match spec {
            PositionSpec::Random(spec) => Ok(Positioner::Random(RandomPositioner::new(spec.density_model))),
        }
    }

    pub fn place<R: Rng + ?Sized>(
        &self,
        cars: &mut [Car],
        network: &RoadNetwork,
        rng: &mut R,
    ) -> Result<()> {
        match self {
            Positioner::Random(positioner) => positioner.place(cars, network, rng),
        }
    }
}

impl Strategy for Positioner {}

/// Cumulative road weights in road id order
#[derive(Debug, Clone)]
pub struct CumulativeWeights {
    cumulative: Vec<f64>,
}

impl CumulativeWeights {
    pub fn build(network: &RoadNetwork, model: DensityModel) -> Result<Self> {
        if network.road_count() == 0 {
            return Err(GenerateError::SamplingPrecondition(
                "cannot place cars on a network without roads".to_string(),
            ));
        }

        let mut total = 0.0;
        let mut cumulative = Vec::with_capacity(network.road_count());
        for road in network.roads() {
            if road.lanes == 0 {
                return Err(GenerateError::SamplingPrecondition(format!(
                    "road {} has no lanes to place cars on",
                    road.id.0
                )));
            }
            total += model.weight(road);
            cumulative.push(total);
        }

        if !(total > 0.0 && total.is_finite()) {
            return Err(GenerateError::SamplingPrecondition(format!(
                "total placement weight must be positive, got {total}"
            )));
        }

        Ok(Self { cumulative })
    }

    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or_default()
    }

    /// Index of the first road whose cumulative weight exceeds `u`, with the
    /// cumulative weight before it
    pub fn locate(&self, u: f64) -> (usize, f64) {
        let index = self
            .cumulative
            .partition_point(|weight| *weight <= u)
            .min(self.cumulative.len() - 1);
        let base = if index > 0 {
            self.cumulative[index - 1]
        } else {
            0.0
        };
        (index, base)
    }

    fn band(&self, index: usize, base: f64) -> f64 {
        self.cumulative[index] - base
    }
}

/// Samples positions proportionally to a [`DensityModel`]
#[derive(Debug, Clone, Copy)]
pub struct RandomPositioner {
    density_model: DensityModel,
}

impl RandomPositioner {
    pub fn new(density_model: DensityModel) -> Self {
        Self { density_model }
    }

    pub fn place<R: Rng + ?Sized>(
        &self,
        cars: &mut [Car],
        network: &RoadNetwork,
        rng: &mut R,
    ) -> Result<()> {
        let weights = CumulativeWeights::build(network, self.density_model)?;
        let total = weights.total();
        debug!(
            "Placing {} cars by {:?}, total weight {:.3}",
            cars.len(),
            self.density_model,
            total
        );

        for car in cars.iter_mut() {
            let unit: f64 = rng.random();
            let u = total * unit;
            car.position = Some(self.position_for(&weights, network, u)?);
        }
        Ok(())
    }

    /// Map a point `u` in `[0, total)` to a position on the network
    pub fn position_for(
        &self,
        weights: &CumulativeWeights,
        network: &RoadNetwork,
        u: f64,
    ) -> Result<CarPosition> {
        let (index, base) = weights.locate(u);
        let road = network.road(RoadId(index)).ok_or_else(|| {
            GenerateError::SamplingPrecondition(format!("road {index} not found"))
        })?;

        let lanes = road.lanes as f64;
        // In [0, 2 * lanes): both directions, every lane
        let s = 2.0 * lanes * (u - base) / weights.band(index, base);
        let slot = (s.floor().max(0.0) as u32).min(2 * road.lanes - 1);

        let direction = if slot / road.lanes == 0 {
            DrivingDirection::Dir1
        } else {
            DrivingDirection::Dir2
        };
        let lane = slot % road.lanes;
        let fractional = (s - s.floor()).clamp(0.0, 1.0);

        Ok(CarPosition {
            road: road.id,
            direction,
            lane,
            distance: road.length() * fractional,
        })
    }
}
