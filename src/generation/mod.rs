//! Scenario generation pipeline
//!
//! This module turns a declarative [`GeneratorConfig`] into a populated road
//! network with signal phases and placed cars, ready to be serialised for the
//! simulator. Every stage draws from an RNG handle supplied by the caller.

mod car_generator;
mod config;
mod distribution;
mod error;
mod export;
mod generator;
mod gridder;
mod positioner;
mod road_network;
mod road_populater;
mod signaliser;
mod time_stepper;
mod types;

pub use car_generator::{CarGenerator, RandomCarGenerator};
pub use config::{
    CarSpec, CompleteGridSpec, DensityModel, GaussSignalSpec, GeneratorConfig, GridSpec,
    PositionSpec, RandomCarSpec, RandomPositionSpec, RandomRoadSpec, RoadSpec, SignalSpec,
    TimeStepSpec,
};
pub use distribution::{Clamp, Distribution, DistributionSpec, Scalar};
pub use error::{GenerateError, Result};
pub use export::{CarRecord, JunctionRecord, RoadRecord, ScenarioRecord, SignalRecord, StartRecord};
pub use generator::{Generator, Scenario, Strategy};
pub use gridder::{CompleteGridder, Gridder};
pub use positioner::{CumulativeWeights, Positioner, RandomPositioner};
pub use road_network::RoadNetwork;
pub use road_populater::{RandomRoadPopulater, RoadPopulater};
pub use signaliser::{GaussSignaliser, Signaliser};
pub use time_stepper::TimeStepper;
pub use types::{
    direction_from_coordinates, CardinalDirection, Car, CarId, CarPosition, Connection, Coordinate,
    DrivingDirection, Junction, JunctionId, Road, RoadId, SignalPhase, TurnDirection,
    ROAD_UNIT_LENGTH,
};
