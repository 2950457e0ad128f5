//! Force field catalog: strategies that traverse particles and invoke
//! potentials. Every force field implements [`ForceField`]; `System`
//! aggregates zero or more of them into a sum that fans out energy queries
//! and adds their force contributions.

mod bonded;
mod brute;
mod composite;
mod inter_subsystem;
mod neighbor;
mod point_source;
mod sequential;
mod surface;

pub use bonded::{BondedPairwiseForcefield, BondedTriplewiseForcefield};
pub use brute::BruteForcePairwiseForcefield;
pub use composite::Composite;
pub use inter_subsystem::{InterSubsystemNeighborPairForcefield, InterSubsystemPairForcefield};
pub use neighbor::NeighborPairwiseForcefield;
pub use point_source::PointSourceForcefield;
pub use sequential::{SequentialPairwiseForcefield, SequentialTriplewiseForcefield};
pub use surface::{EllipsoidSurfaceForcefield, PlaneSurfaceForcefield, SphereSurfaceForcefield};

use crate::system::System;
use crate::vector::Vector3;

/// `energy(system) → scalar` and `accumulate_force(system, out)`.
/// `accumulate_force` ADDS to `out`; it never overwrites. Newton's third
/// law is enforced pair-by-pair wherever this trait is implemented over a
/// pairwise or triple potential.
pub trait ForceField {
    fn energy(&self, system: &System) -> f64;
    fn accumulate_force(&self, system: &System, out: &mut [Vector3]);
}
