//! Core types for scenario generation
//!
//! Identifiers, the closed direction enumerations and the entities that make
//! up a generated scenario graph.

use serde::{Serialize, Serializer};

use super::distribution::Scalar;

/// Scale factor between grid units and road length
pub const ROAD_UNIT_LENGTH: f64 = 100.0;

/// A wrapper type for junction IDs (also the junction's node index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JunctionId(pub usize);

/// A wrapper type for road IDs (also the road's edge index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoadId(pub usize);

/// A wrapper type for car IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CarId(pub usize);

/// Integer grid coordinate. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub x: i64,
    pub y: i64,
}

impl Coordinate {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Coordinate) -> f64 {
        let dx = (i128::from(self.x) - i128::from(other.x)) as f64;
        let dy = (i128::from(self.y) - i128::from(other.y)) as f64;
        dx.hypot(dy)
    }

    /// Cardinal direction of `other` as seen from `self`
    pub fn direction_to(&self, other: &Coordinate) -> CardinalDirection {
        direction_from_coordinates(*self, *other)
    }
}

/// Compass direction of a neighbour or signal phase around a junction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CardinalDirection {
    /// Towards smaller `y`
    North,
    /// Towards larger `x`
    East,
    /// Towards larger `y`
    South,
    /// Towards smaller `x`
    West,
}

impl CardinalDirection {
    /// Integer code used in exported scenarios
    pub fn code(self) -> u8 {
        match self {
            CardinalDirection::North => 0,
            CardinalDirection::East => 1,
            CardinalDirection::South => 2,
            CardinalDirection::West => 3,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            CardinalDirection::North => CardinalDirection::South,
            CardinalDirection::East => CardinalDirection::West,
            CardinalDirection::South => CardinalDirection::North,
            CardinalDirection::West => CardinalDirection::East,
        }
    }
}

impl Serialize for CardinalDirection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// A turn decision taken at a junction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnDirection {
    UTurn,
    Left,
    Straight,
    Right,
}

impl TurnDirection {
    pub const ALL: [TurnDirection; 4] = [
        TurnDirection::UTurn,
        TurnDirection::Left,
        TurnDirection::Straight,
        TurnDirection::Right,
    ];

    pub fn code(self) -> u8 {
        match self {
            TurnDirection::UTurn => 0,
            TurnDirection::Left => 1,
            TurnDirection::Straight => 2,
            TurnDirection::Right => 3,
        }
    }
}

impl Serialize for TurnDirection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Which way a car travels along its road
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrivingDirection {
    /// From `junction1` towards `junction2`
    Dir1,
    /// From `junction2` towards `junction1`
    Dir2,
}

impl DrivingDirection {
    pub fn code(self) -> u8 {
        match self {
            DrivingDirection::Dir1 => 1,
            DrivingDirection::Dir2 => 2,
        }
    }
}

/// Classify `other` into one of four sectors around `origin`.
///
/// Input coordinates have `y` growing downwards; the offset is flipped before
/// classification. Sector boundaries are decided by magnitude comparison, so
/// exact diagonals fall to NORTH/SOUTH and `dy == 0` with `dx == 0` is NORTH.
pub fn direction_from_coordinates(origin: Coordinate, other: Coordinate) -> CardinalDirection {
    let dx = i128::from(other.x) - i128::from(origin.x);
    let dy = i128::from(origin.y) - i128::from(other.y);

    if dx >= 0 {
        if dy.abs() < dx {
            CardinalDirection::East
        } else if dy >= 0 {
            CardinalDirection::North
        } else {
            CardinalDirection::South
        }
    } else if dy.abs() < -dx {
        CardinalDirection::West
    } else if dy >= 0 {
        CardinalDirection::North
    } else {
        CardinalDirection::South
    }
}

/// One phase of a junction's signal cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalPhase {
    pub direction: CardinalDirection,
    pub duration: u32,
}

/// A junction's record of one adjacent road
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub road: RoadId,
    pub neighbour: JunctionId,
    /// Direction of `neighbour` relative to the owning junction
    pub direction: CardinalDirection,
}

/// A node of the road network
#[derive(Debug, Clone, PartialEq)]
pub struct Junction {
    pub id: JunctionId,
    pub position: Coordinate,
    pub signals: Vec<SignalPhase>,
    pub connections: Vec<Connection>,
}

impl Junction {
    pub fn new(id: JunctionId, position: Coordinate) -> Self {
        Self {
            id,
            position,
            signals: Vec::new(),
            connections: Vec::new(),
        }
    }

    /// Record a road towards `neighbour`, classifying its direction
    pub fn connect(&mut self, road: RoadId, neighbour: JunctionId, neighbour_position: Coordinate) {
        self.connections.push(Connection {
            road,
            neighbour,
            direction: self.position.direction_to(&neighbour_position),
        });
    }
}

/// An undirected road between two distinct junctions
#[derive(Debug, Clone, PartialEq)]
pub struct Road {
    pub id: RoadId,
    pub junction1: JunctionId,
    pub junction2: JunctionId,
    /// Number of lanes per driving direction; 0 until populated
    pub lanes: u32,
    /// Speed limit as drawn; 0 until populated
    pub speed_limit: Scalar,
    length: f64,
}

impl Road {
    pub fn new(
        id: RoadId,
        junction1: JunctionId,
        junction2: JunctionId,
        start_pos: &Coordinate,
        end_pos: &Coordinate,
    ) -> Self {
        Self {
            id,
            junction1,
            junction2,
            lanes: 0,
            speed_limit: Scalar::Int(0),
            length: ROAD_UNIT_LENGTH * start_pos.distance(end_pos),
        }
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Junctions a car leaves from and heads to when driving `direction`
    pub fn endpoints(&self, direction: DrivingDirection) -> (JunctionId, JunctionId) {
        match direction {
            DrivingDirection::Dir1 => (self.junction1, self.junction2),
            DrivingDirection::Dir2 => (self.junction2, self.junction1),
        }
    }
}

/// Where a car starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarPosition {
    pub road: RoadId,
    pub direction: DrivingDirection,
    pub lane: u32,
    /// Distance along the road in `[0, length)`
    pub distance: f64,
}

/// A vehicle with its driver-model parameters, kept as drawn
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub id: CarId,
    pub target_velocity: Scalar,
    pub max_acceleration: Scalar,
    pub target_deceleration: Scalar,
    pub min_distance: Scalar,
    pub target_headway: Scalar,
    pub politeness: Scalar,
    pub route: Vec<TurnDirection>,
    /// Assigned by the positioner
    pub position: Option<CarPosition>,
}
