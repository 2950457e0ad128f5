//! Per-integrator configuration records.
//!
//! A plain, `Deserialize`-able record a host program can load from JSON
//! and hand to a `simulate_*` entry point. Loading the file itself is out
//! of this crate's scope.

use serde::Deserialize;

/// Configuration for [`crate::integrate::simulate_brownian`].
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BrownianConfig {
    pub temperature: f64,
    pub timestep: f64,
    /// Target RMS displacement per step; `0.0` disables adaptive stepping.
    pub spacestep: f64,
    pub steps: u64,
    pub seed: u64,
}

/// Configuration for [`crate::integrate::simulate_langevin`].
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LangevinConfig {
    pub temperature: f64,
    pub timestep: f64,
    pub steps: u64,
    pub seed: u64,
}

/// Configuration for [`crate::integrate::simulate_newtonian`].
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct NewtonianConfig {
    pub timestep: f64,
    pub steps: u64,
}

pub(crate) fn require_finite(value: f64, field: &'static str) -> Result<(), crate::error::MdError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(crate::error::MdError::NonFiniteConfig { field })
    }
}
