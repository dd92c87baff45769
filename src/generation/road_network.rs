//! Road network graph
//!
//! Junctions and roads live in an undirected petgraph graph. Node indices are
//! junction ids and edge indices are road ids, so both are assigned in
//! insertion order and never change for the lifetime of a network.

use std::collections::HashMap;

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};

use super::error::{GenerateError, Result};
use super::types::{Coordinate, Junction, JunctionId, Road, RoadId};

/// A fully wired scenario topology
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    graph: UnGraph<Junction, Road>,
}

impl RoadNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build junctions and roads from raw coordinates and coordinate pairs.
    ///
    /// Junction ids follow the order of `coordinates`, road ids the order of
    /// `edges`. Every road appends a connection to both of its junctions,
    /// `junction1` first.
    pub fn from_coordinates(
        coordinates: &[Coordinate],
        edges: &[(Coordinate, Coordinate)],
    ) -> Result<Self> {
        let mut network = Self::new();
        let mut lookup: HashMap<Coordinate, JunctionId> = HashMap::with_capacity(coordinates.len());

        for &coordinate in coordinates {
            if lookup.contains_key(&coordinate) {
                return Err(GenerateError::Config(format!(
                    "duplicate junction at ({}, {})",
                    coordinate.x, coordinate.y
                )));
            }
            let id = network.add_junction(coordinate);
            lookup.insert(coordinate, id);
        }

        for (a, b) in edges {
            let junction1 = *lookup.get(a).ok_or_else(|| {
                GenerateError::Config(format!("road endpoint ({}, {}) is not a junction", a.x, a.y))
            })?;
            let junction2 = *lookup.get(b).ok_or_else(|| {
                GenerateError::Config(format!("road endpoint ({}, {}) is not a junction", b.x, b.y))
            })?;
            network.add_road(junction1, junction2)?;
        }

        Ok(network)
    }

    /// Adds a junction and returns its id
    pub fn add_junction(&mut self, position: Coordinate) -> JunctionId {
        let id = JunctionId(self.graph.node_count());
        let node = self.graph.add_node(Junction::new(id, position));
        debug_assert_eq!(node.index(), id.0);
        id
    }

    /// Adds a road between two distinct, not yet connected junctions and
    /// wires the reciprocal connections
    pub fn add_road(&mut self, junction1: JunctionId, junction2: JunctionId) -> Result<RoadId> {
        if junction1 == junction2 {
            return Err(GenerateError::SamplingPrecondition(format!(
                "road would connect junction {} to itself",
                junction1.0
            )));
        }

        let pos1 = self.position_of(junction1)?;
        let pos2 = self.position_of(junction2)?;

        if self.find_road_between(junction1, junction2).is_some() {
            return Err(GenerateError::SamplingPrecondition(format!(
                "junctions {} and {} are already connected",
                junction1.0, junction2.0
            )));
        }

        let id = RoadId(self.graph.edge_count());
        let road = Road::new(id, junction1, junction2, &pos1, &pos2);
        let edge = self
            .graph
            .add_edge(NodeIndex::new(junction1.0), NodeIndex::new(junction2.0), road);
        debug_assert_eq!(edge.index(), id.0);

        self.graph[NodeIndex::new(junction1.0)].connect(id, junction2, pos2);
        self.graph[NodeIndex::new(junction2.0)].connect(id, junction1, pos1);

        Ok(id)
    }

    fn position_of(&self, id: JunctionId) -> Result<Coordinate> {
        self.junction(id)
            .map(|junction| junction.position)
            .ok_or_else(|| GenerateError::Config(format!("junction {} not found", id.0)))
    }

    pub fn junction(&self, id: JunctionId) -> Option<&Junction> {
        self.graph.node_weight(NodeIndex::new(id.0))
    }

    pub fn road(&self, id: RoadId) -> Option<&Road> {
        self.graph.edge_weight(EdgeIndex::new(id.0))
    }

    /// Finds the road connecting two junctions, in either order
    pub fn find_road_between(&self, a: JunctionId, b: JunctionId) -> Option<RoadId> {
        self.graph
            .find_edge(NodeIndex::new(a.0), NodeIndex::new(b.0))
            .map(|edge| RoadId(edge.index()))
    }

    /// Junctions in id order
    pub fn junctions(&self) -> impl Iterator<Item = &Junction> {
        self.graph.node_weights()
    }

    pub fn junctions_mut(&mut self) -> impl Iterator<Item = &mut Junction> {
        self.graph.node_weights_mut()
    }

    /// Roads in id order
    pub fn roads(&self) -> impl Iterator<Item = &Road> {
        self.graph.edge_weights()
    }

    pub fn roads_mut(&mut self) -> impl Iterator<Item = &mut Road> {
        self.graph.edge_weights_mut()
    }

    pub fn junction_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn road_count(&self) -> usize {
        self.graph.edge_count()
    }
}
