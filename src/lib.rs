//! A small molecular dynamics engine: particles, pluggable force fields
//! built from composable potentials, a Verlet-shelled spatial neighbor
//! search, and three time integrators (Brownian, Langevin, Newtonian).
//!
//! ```no_run
//! use micromd::forcefield::PointSourceForcefield;
//! use micromd::integrate::{simulate_newtonian, NewtonianConfig};
//! use micromd::potential::Harmonic;
//! use micromd::system::{ParticleData, System};
//! use micromd::vector::Point3;
//!
//! let mut system = System::new();
//! system.add_particle(ParticleData {
//!     position: Point3::new(1.0, 0.0, 0.0),
//!     ..Default::default()
//! });
//! system.add_forcefield(PointSourceForcefield::new(Point3::origin(), Harmonic { k: 1.0 }));
//!
//! let config = NewtonianConfig { timestep: 0.01, steps: 100 };
//! simulate_newtonian(&mut system, &config, None).unwrap();
//! ```

pub mod attribute;
pub mod bx;
pub mod config;
pub mod error;
pub mod forcefield;
pub mod grid;
pub mod integrate;
pub mod neighbor_list;
pub mod potential;
pub mod rng;
pub mod system;
pub mod vector;

pub use bx::Bx;
pub use config::{BrownianConfig, LangevinConfig, NewtonianConfig};
pub use error::MdError;
pub use rng::Engine;
pub use system::System;
