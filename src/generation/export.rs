//! Serialised form of a generated scenario
//!
//! The records here are the external schema read by the simulator. Entity
//! references become ids and a car's driving direction becomes a
//! `from`/`to` junction pair.

use std::io::Write;

use serde::Serialize;

use super::distribution::Scalar;
use super::error::{GenerateError, Result};
use super::generator::Scenario;
use super::types::{CardinalDirection, Car, Junction, Road, TurnDirection};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioRecord {
    pub time_steps: u64,
    pub junctions: Vec<JunctionRecord>,
    pub roads: Vec<RoadRecord>,
    pub cars: Vec<CarRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalRecord {
    pub dir: CardinalDirection,
    pub time: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JunctionRecord {
    pub id: usize,
    pub x: i64,
    pub y: i64,
    pub signals: Vec<SignalRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadRecord {
    pub junction1: usize,
    pub junction2: usize,
    pub lanes: u32,
    pub limit: Scalar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartRecord {
    pub from: usize,
    pub to: usize,
    pub lane: u32,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarRecord {
    pub id: usize,
    pub target_velocity: Scalar,
    pub max_acceleration: Scalar,
    pub target_deceleration: Scalar,
    pub min_distance: Scalar,
    pub target_headway: Scalar,
    pub politeness: Scalar,
    pub start: StartRecord,
    pub route: Vec<TurnDirection>,
}

impl From<&Junction> for JunctionRecord {
    fn from(junction: &Junction) -> Self {
        Self {
            id: junction.id.0,
            x: junction.position.x,
            y: junction.position.y,
            signals: junction
                .signals
                .iter()
                .map(|phase| SignalRecord {
                    dir: phase.direction,
                    time: phase.duration,
                })
                .collect(),
        }
    }
}

impl From<&Road> for RoadRecord {
    fn from(road: &Road) -> Self {
        Self {
            junction1: road.junction1.0,
            junction2: road.junction2.0,
            lanes: road.lanes,
            limit: road.speed_limit,
        }
    }
}

impl ScenarioRecord {
    /// Fails if a car was never placed on a road
    pub fn from_scenario(scenario: &Scenario) -> Result<Self> {
        let cars = scenario
            .cars
            .iter()
            .map(|car| car_record(car, scenario))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            time_steps: scenario.time_steps,
            junctions: scenario.network.junctions().map(JunctionRecord::from).collect(),
            roads: scenario.network.roads().map(RoadRecord::from).collect(),
            cars,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        Ok(serde_json::to_writer(writer, self)?)
    }
}

fn car_record(car: &Car, scenario: &Scenario) -> Result<CarRecord> {
    let position = car.position.ok_or_else(|| {
        GenerateError::SamplingPrecondition(format!("car {} has no start position", car.id.0))
    })?;
    let road = scenario.network.road(position.road).ok_or_else(|| {
        GenerateError::SamplingPrecondition(format!(
            "car {} starts on unknown road {}",
            car.id.0, position.road.0
        ))
    })?;
    let (from, to) = road.endpoints(position.direction);

    Ok(CarRecord {
        id: car.id.0,
        target_velocity: car.target_velocity,
        max_acceleration: car.max_acceleration,
        target_deceleration: car.target_deceleration,
        min_distance: car.min_distance,
        target_headway: car.target_headway,
        politeness: car.politeness,
        start: StartRecord {
            from: from.0,
            to: to.0,
            lane: position.lane,
            distance: position.distance,
        },
        route: car.route.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::road_network::RoadNetwork;
    use crate::generation::types::{
        CarId, CarPosition, Coordinate, DrivingDirection, RoadId, SignalPhase,
    };
    use serde_json::json;

    fn scenario(direction: DrivingDirection) -> Scenario {
        let a = Coordinate::new(0, 0);
        let b = Coordinate::new(0, 1);
        let mut network = RoadNetwork::from_coordinates(&[a, b], &[(a, b)]).unwrap();
        for road in network.roads_mut() {
            road.lanes = 2;
            road.speed_limit = Scalar::Int(13);
        }
        for junction in network.junctions_mut() {
            let direction = junction.connections[0].direction;
            junction.signals = vec![SignalPhase {
                direction,
                duration: 25,
            }];
        }

        Scenario {
            time_steps: 300,
            network,
            cars: vec![Car {
                id: CarId(0),
                target_velocity: Scalar::Int(14),
                max_acceleration: Scalar::Float(1.5),
                target_deceleration: Scalar::Float(2.0),
                min_distance: Scalar::Float(2.5),
                target_headway: Scalar::Float(1.25),
                politeness: Scalar::Float(0.5),
                route: vec![TurnDirection::Left, TurnDirection::UTurn, TurnDirection::Right],
                position: Some(CarPosition {
                    road: RoadId(0),
                    direction,
                    lane: 1,
                    distance: 42.5,
                }),
            }],
        }
    }

    #[test]
    fn test_exports_schema() {
        let record = ScenarioRecord::from_scenario(&scenario(DrivingDirection::Dir1)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "time_steps": 300,
                "junctions": [
                    {"id": 0, "x": 0, "y": 0, "signals": [{"dir": 2, "time": 25}]},
                    {"id": 1, "x": 0, "y": 1, "signals": [{"dir": 0, "time": 25}]}
                ],
                "roads": [
                    {"junction1": 0, "junction2": 1, "lanes": 2, "limit": 13}
                ],
                "cars": [{
                    "id": 0,
                    "target_velocity": 14,
                    "max_acceleration": 1.5,
                    "target_deceleration": 2.0,
                    "min_distance": 2.5,
                    "target_headway": 1.25,
                    "politeness": 0.5,
                    "start": {"from": 0, "to": 1, "lane": 1, "distance": 42.5},
                    "route": [1, 0, 3]
                }]
            })
        );
    }

    #[test]
    fn test_second_direction_reverses_endpoints() {
        let record = ScenarioRecord::from_scenario(&scenario(DrivingDirection::Dir2)).unwrap();
        assert_eq!(record.cars[0].start.from, 1);
        assert_eq!(record.cars[0].start.to, 0);
    }

    #[test]
    fn test_unplaced_car_is_rejected() {
        let mut unplaced = scenario(DrivingDirection::Dir1);
        unplaced.cars[0].position = None;
        assert!(ScenarioRecord::from_scenario(&unplaced).is_err());
    }
}
