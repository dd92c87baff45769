//! Traffic Scenario Generator Library
//!
//! Builds randomized road networks, signal plans and vehicle populations from
//! a declarative configuration and serialises them as simulator input.

pub mod generation;
pub mod output;
pub mod seed;
