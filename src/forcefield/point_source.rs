use super::ForceField;
use crate::potential::PairwisePotential;
use crate::system::System;
use crate::vector::{Point3, Vector3};

/// Evaluates `potential` on `positionᵢ - source` for every particle
/// independently — a fixed point in space exerting a radial field, rather
/// than a pairwise interaction between particles.
pub struct PointSourceForcefield<P> {
    source: Point3,
    potential: P,
}

impl<P: PairwisePotential> PointSourceForcefield<P> {
    pub fn new(source: Point3, potential: P) -> Self {
        PointSourceForcefield { source, potential }
    }
}

impl<P: PairwisePotential> ForceField for PointSourceForcefield<P> {
    fn energy(&self, system: &System) -> f64 {
        system
            .view_positions()
            .iter()
            .map(|p| self.potential.energy(&(p - self.source)))
            .sum()
    }

    fn accumulate_force(&self, system: &System, out: &mut [Vector3]) {
        for (i, p) in system.view_positions().iter().enumerate() {
            out[i] += self.potential.force(&(p - self.source));
        }
    }
}
