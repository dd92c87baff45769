//! Scalar samplers built from `{kind, spec}` configuration records.
//!
//! Every sampler draws from the RNG handle passed to [`Distribution::sample`];
//! no sampler keeps a generator of its own, so a fixed seed and a fixed call
//! order reproduce the same values.

use rand::Rng;
use rand_distr::{Distribution as _, Normal};
use serde::{Deserialize, Serialize};

use super::error::{GenerateError, Result};

/// A sampled number, keeping the numeric type its distribution produces
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
}

impl Scalar {
    pub fn as_f64(self) -> f64 {
        match self {
            Scalar::Int(value) => value as f64,
            Scalar::Float(value) => value,
        }
    }

    /// Integer coercion, truncating toward zero
    pub fn as_i64(self) -> i64 {
        match self {
            Scalar::Int(value) => value,
            Scalar::Float(value) => value.trunc() as i64,
        }
    }
}

fn default_step() -> i64 {
    1
}

/// Declarative distribution record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "spec", rename_all = "lowercase")]
pub enum DistributionSpec {
    Gauss {
        mu: f64,
        sigma: f64,
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    Uniform {
        min: f64,
        max: f64,
    },
    #[serde(rename = "gaussint")]
    GaussInt {
        mu: f64,
        sigma: f64,
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    #[serde(rename = "uniformint")]
    UniformInt {
        min: i64,
        max: i64,
        #[serde(default = "default_step")]
        step: i64,
    },
    Static {
        value: Scalar,
    },
}

/// Post-hoc saturation to an optional closed interval.
///
/// Out-of-range draws are moved onto the bound rather than redrawn, so the
/// bounds collect the tail mass of the underlying distribution.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Clamp {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Clamp {
    pub fn apply(&self, value: f64) -> f64 {
        if let Some(min) = self.min {
            if value < min {
                return min;
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return max;
            }
        }
        value
    }
}

/// A ready-to-sample scalar distribution
#[derive(Debug, Clone)]
pub enum Distribution {
    Gauss { normal: Normal<f64>, clamp: Clamp },
    Uniform { min: f64, max: f64 },
    GaussInt { normal: Normal<f64>, clamp: Clamp },
    UniformInt { min: i64, step: i64, count: u64 },
    Static(Scalar),
}

fn normal(mu: f64, sigma: f64) -> Result<Normal<f64>> {
    if !mu.is_finite() || !sigma.is_finite() || sigma < 0.0 {
        return Err(GenerateError::Config(format!(
            "normal distribution needs finite mu and sigma >= 0, got mu={mu}, sigma={sigma}"
        )));
    }
    Normal::new(mu, sigma).map_err(|err| GenerateError::Config(err.to_string()))
}

impl Distribution {
    pub fn from_spec(spec: &DistributionSpec) -> Result<Self> {
        match *spec {
            DistributionSpec::Gauss { mu, sigma, min, max } => Ok(Distribution::Gauss {
                normal: normal(mu, sigma)?,
                clamp: Clamp { min, max },
            }),
            DistributionSpec::Uniform { min, max } => {
                if !min.is_finite() || !max.is_finite() {
                    return Err(GenerateError::Config(format!(
                        "uniform bounds must be finite, got [{min}, {max}]"
                    )));
                }
                Ok(Distribution::Uniform { min, max })
            }
            DistributionSpec::GaussInt { mu, sigma, min, max } => Ok(Distribution::GaussInt {
                normal: normal(mu, sigma)?,
                clamp: Clamp { min, max },
            }),
            DistributionSpec::UniformInt { min, max, step } => {
                let count = stepped_count(min, max, step)?;
                Ok(Distribution::UniformInt { min, step, count })
            }
            DistributionSpec::Static { value } => Ok(Distribution::Static(value)),
        }
    }

    /// Draw one value. Clamping happens before the type coercion.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Scalar {
        match self {
            Distribution::Gauss { normal, clamp } => Scalar::Float(clamp.apply(normal.sample(rng))),
            Distribution::Uniform { min, max } => {
                let unit: f64 = rng.random();
                Scalar::Float(min + (max - min) * unit)
            }
            Distribution::GaussInt { normal, clamp } => {
                let rounded = normal.sample(rng).round_ties_even();
                Scalar::Int(clamp.apply(rounded).trunc() as i64)
            }
            Distribution::UniformInt { min, step, count } => {
                // Within [min, max) by construction of `count`
                let index = i128::from(rng.random_range(0..*count));
                Scalar::Int((i128::from(*min) + index * i128::from(*step)) as i64)
            }
            Distribution::Static(value) => *value,
        }
    }
}

/// Number of values in the half-open stepped range `[min, max)`
fn stepped_count(min: i64, max: i64, step: i64) -> Result<u64> {
    if step == 0 {
        return Err(GenerateError::Config(
            "uniformint step must not be zero".to_string(),
        ));
    }

    let (span, stride) = if step > 0 {
        (max as i128 - min as i128, step as i128)
    } else {
        (min as i128 - max as i128, -(step as i128))
    };
    let count = (span + stride - 1).div_euclid(stride);

    if count <= 0 {
        return Err(GenerateError::Config(format!(
            "uniformint range [{min}, {max}) with step {step} is empty"
        )));
    }
    u64::try_from(count).map_err(|err| GenerateError::Config(err.to_string()))
}
