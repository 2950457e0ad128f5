use super::ForceField;
use crate::potential::PairwisePotential;
use crate::system::System;
use crate::vector::Vector3;

/// For every `i < j`, adds `potential`'s energy/force on `positions[i] -
/// positions[j]`. O(N²).
pub struct BruteForcePairwiseForcefield<P> {
    potential: P,
}

impl<P: PairwisePotential> BruteForcePairwiseForcefield<P> {
    pub fn new(potential: P) -> Self {
        BruteForcePairwiseForcefield { potential }
    }
}

impl<P: PairwisePotential> ForceField for BruteForcePairwiseForcefield<P> {
    fn energy(&self, system: &System) -> f64 {
        let positions = system.view_positions();
        let mut total = 0.0;
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let r = positions[i] - positions[j];
                total += self.potential.energy(&r);
            }
        }
        total
    }

    fn accumulate_force(&self, system: &System, out: &mut [Vector3]) {
        let positions = system.view_positions();
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let r = positions[i] - positions[j];
                let f = self.potential.force(&r);
                out[i] += f;
                out[j] -= f;
            }
        }
    }
}
