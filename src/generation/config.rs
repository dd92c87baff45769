//! Generator configuration
//!
//! Each pipeline stage is selected by a `{kind, spec}` record. The `kind`
//! string picks one of the registered strategies below; anything else is
//! rejected while parsing.

use std::io::Read;

use serde::{Deserialize, Serialize};

use super::distribution::DistributionSpec;
use super::error::Result;

/// Full configuration of one generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub time_step: TimeStepSpec,
    pub grid: GridSpec,
    pub signal: SignalSpec,
    pub road: RoadSpec,
    pub car: CarSpec,
    pub position: PositionSpec,
}

impl GeneratorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "spec", rename_all = "snake_case")]
pub enum TimeStepSpec {
    /// The spec is the distribution record itself
    Random(DistributionSpec),
}

fn default_spacing() -> i64 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteGridSpec {
    pub width: i64,
    pub height: i64,
    #[serde(default = "default_spacing")]
    pub spacing: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "spec", rename_all = "snake_case")]
pub enum GridSpec {
    Complete(CompleteGridSpec),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussSignalSpec {
    pub mu: f64,
    pub sigma: f64,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "spec", rename_all = "snake_case")]
pub enum SignalSpec {
    Gauss(GaussSignalSpec),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomRoadSpec {
    pub lanes: DistributionSpec,
    pub limit: DistributionSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "spec", rename_all = "snake_case")]
pub enum RoadSpec {
    Random(RandomRoadSpec),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomCarSpec {
    pub number: DistributionSpec,
    pub target_velocity: DistributionSpec,
    pub max_acceleration: DistributionSpec,
    pub target_deceleration: DistributionSpec,
    pub min_distance: DistributionSpec,
    pub target_headway: DistributionSpec,
    pub politeness: DistributionSpec,
    pub route_length: DistributionSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "spec", rename_all = "snake_case")]
pub enum CarSpec {
    Random(RandomCarSpec),
}

/// Weighting used to bias which road a car is placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DensityModel {
    RoadCount,
    LaneCount,
    RoadLength,
    LaneLength,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomPositionSpec {
    pub density_model: DensityModel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "spec", rename_all = "snake_case")]
pub enum PositionSpec {
    Random(RandomPositionSpec),
}
