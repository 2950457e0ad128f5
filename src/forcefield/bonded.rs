use super::ForceField;
use crate::potential::{PairwisePotential, TriplePotential};
use crate::system::System;
use crate::vector::Vector3;
use std::cell::RefCell;

/// Evaluates `potential` only over an explicit, user-maintained list of
/// pairs. The list is held behind a `RefCell` so a force field registered
/// via `System::add_forcefield_rc` can still grow its bond list after
/// registration.
pub struct BondedPairwiseForcefield<P> {
    potential: P,
    pairs: RefCell<Vec<(usize, usize)>>,
}

impl<P: PairwisePotential> BondedPairwiseForcefield<P> {
    pub fn new(potential: P) -> Self {
        BondedPairwiseForcefield {
            potential,
            pairs: RefCell::new(Vec::new()),
        }
    }

    pub fn add_bonded_pair(&self, i: usize, j: usize) {
        self.pairs.borrow_mut().push((i, j));
    }

    /// Adds every adjacent pair `(k, k+1)` in `[start, end)`.
    pub fn add_bonded_range(&self, start: usize, end: usize) {
        let mut pairs = self.pairs.borrow_mut();
        for k in start..end {
            pairs.push((k, k + 1));
        }
    }
}

impl<P: PairwisePotential> ForceField for BondedPairwiseForcefield<P> {
    fn energy(&self, system: &System) -> f64 {
        let positions = system.view_positions();
        self.pairs
            .borrow()
            .iter()
            .map(|&(i, j)| self.potential.energy(&(positions[i] - positions[j])))
            .sum()
    }

    fn accumulate_force(&self, system: &System, out: &mut [Vector3]) {
        let positions = system.view_positions();
        for &(i, j) in self.pairs.borrow().iter() {
            let r = positions[i] - positions[j];
            let f = self.potential.force(&r);
            out[i] += f;
            out[j] -= f;
        }
    }
}

/// Evaluates a triple potential only over an explicit, user-maintained
/// list of triples `(i, j, k)`.
pub struct BondedTriplewiseForcefield<P> {
    potential: P,
    triples: RefCell<Vec<(usize, usize, usize)>>,
}

impl<P: TriplePotential> BondedTriplewiseForcefield<P> {
    pub fn new(potential: P) -> Self {
        BondedTriplewiseForcefield {
            potential,
            triples: RefCell::new(Vec::new()),
        }
    }

    pub fn add_bonded_triple(&self, i: usize, j: usize, k: usize) {
        self.triples.borrow_mut().push((i, j, k));
    }

    /// Adds every adjacent triple `(k, k+1, k+2)` in `[start, end)`.
    pub fn add_bonded_range(&self, start: usize, end: usize) {
        let mut triples = self.triples.borrow_mut();
        for k in start..end {
            triples.push((k, k + 1, k + 2));
        }
    }
}

impl<P: TriplePotential> ForceField for BondedTriplewiseForcefield<P> {
    fn energy(&self, system: &System) -> f64 {
        let positions = system.view_positions();
        self.triples
            .borrow()
            .iter()
            .map(|&(i, j, k)| {
                let rij = positions[i] - positions[j];
                let rjk = positions[j] - positions[k];
                self.potential.energy(&rij, &rjk)
            })
            .sum()
    }

    fn accumulate_force(&self, system: &System, out: &mut [Vector3]) {
        let positions = system.view_positions();
        for &(i, j, k) in self.triples.borrow().iter() {
            let rij = positions[i] - positions[j];
            let rjk = positions[j] - positions[k];
            let (fi, fj, fk) = self.potential.forces(&rij, &rjk);
            out[i] += fi;
            out[j] += fj;
            out[k] += fk;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::potential::Spring;
    use crate::system::ParticleData;
    use crate::vector::Point3;

    #[test]
    fn bonded_range_covers_adjacent_pairs() {
        let mut system = System::new();
        for i in 0..4 {
            system.add_particle(ParticleData {
                position: Point3::new(i as f64, 0.0, 0.0),
                ..Default::default()
            });
        }
        let ff = BondedPairwiseForcefield::new(Spring { k: 1.0, b: 1.0 });
        ff.add_bonded_range(0, 3);
        assert_eq!(ff.pairs.borrow().len(), 3);
        // equilibrium separation already satisfied, so energy is zero
        assert_eq!(ff.energy(&system), 0.0);
    }
}
