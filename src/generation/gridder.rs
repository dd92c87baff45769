//! Grid layout strategies
//!
//! A gridder lays out junction coordinates and the coordinate pairs to
//! connect, then hands both to [`RoadNetwork::from_coordinates`].

use std::collections::HashSet;

use log::debug;

use super::config::{CompleteGridSpec, GridSpec};
use super::error::{GenerateError, Result};
use super::generator::Strategy;
use super::road_network::RoadNetwork;
use super::types::Coordinate;

/// Registered grid strategies
#[derive(Debug, Clone)]
pub enum Gridder {
    Complete(CompleteGridder),
}

impl Gridder {
    pub fn from_spec(spec: &GridSpec) -> Result<Self> {
        match spec {
            GridSpec::Complete(spec) => Ok(Gridder::Complete(CompleteGridder::new(*spec)?)),
        }
    }

    pub fn generate(&mut self) -> Result<RoadNetwork> {
        match self {
            Gridder::Complete(gridder) => gridder.generate(),
        }
    }
}

impl Strategy for Gridder {
    fn reset(&mut self) {
        match self {
            Gridder::Complete(gridder) => gridder.reset(),
        }
    }
}

/// Coordinates and deduplicated edges recorded while laying out a grid
#[derive(Debug, Clone, Default)]
struct GridRecords {
    coordinates: Vec<Coordinate>,
    edges: Vec<(Coordinate, Coordinate)>,
    seen: HashSet<(Coordinate, Coordinate)>,
}

impl GridRecords {
    fn clear(&mut self) {
        self.coordinates.clear();
        self.edges.clear();
        self.seen.clear();
    }

    /// Record an undirected edge unless the same pair is already present
    fn connect(&mut self, a: Coordinate, b: Coordinate) {
        let key = if a <= b { (a, b) } else { (b, a) };
        if self.seen.insert(key) {
            self.edges.push((a, b));
        }
    }
}

/// Every point of a `width` × `height` lattice, joined to its right and lower
/// neighbours
#[derive(Debug, Clone)]
pub struct CompleteGridder {
    width: i64,
    height: i64,
    spacing: i64,
    records: GridRecords,
}

impl CompleteGridder {
    pub fn new(spec: CompleteGridSpec) -> Result<Self> {
        if spec.spacing <= 0 {
            return Err(GenerateError::Config(format!(
                "grid spacing must be positive, got {}",
                spec.spacing
            )));
        }
        Ok(Self {
            width: spec.width,
            height: spec.height,
            spacing: spec.spacing,
            records: GridRecords::default(),
        })
    }

    pub fn generate(&mut self) -> Result<RoadNetwork> {
        self.records.clear();
        self.lay_out();

        if self.records.coordinates.is_empty() {
            return Err(GenerateError::SamplingPrecondition(format!(
                "a {}x{} grid has no junctions",
                self.width, self.height
            )));
        }

        debug!(
            "Complete grid {}x{} (spacing {}): {} junctions, {} roads",
            self.width,
            self.height,
            self.spacing,
            self.records.coordinates.len(),
            self.records.edges.len()
        );

        RoadNetwork::from_coordinates(&self.records.coordinates, &self.records.edges)
    }

    fn lay_out(&mut self) {
        let step = self.spacing as usize;
        for x in (0..self.width.max(0)).step_by(step) {
            for y in (0..self.height.max(0)).step_by(step) {
                self.records.coordinates.push(Coordinate::new(x, y));
            }
        }

        for i in 0..self.records.coordinates.len() {
            let here = self.records.coordinates[i];
            // Past i64::MAX is past the grid edge too
            let x_other = here.x.checked_add(self.spacing).filter(|x| *x < self.width);
            let y_other = here.y.checked_add(self.spacing).filter(|y| *y < self.height);

            if let Some(x_other) = x_other {
                self.records.connect(here, Coordinate::new(x_other, here.y));
            }
            if let Some(y_other) = y_other {
                self.records.connect(here, Coordinate::new(here.x, y_other));
            }
        }
    }

    fn reset(&mut self) {
        self.records.clear();
    }
}
