use super::ForceField;
use crate::potential::{PairwisePotential, TriplePotential};
use crate::system::System;
use crate::vector::Vector3;
use std::cell::RefCell;

/// Evaluates `potential` over every consecutive pair `(k, k+1)` for `k` in
/// each registered inclusive segment `[first, last]`.
pub struct SequentialPairwiseForcefield<P> {
    potential: P,
    segments: RefCell<Vec<(usize, usize)>>,
}

impl<P: PairwisePotential> SequentialPairwiseForcefield<P> {
    pub fn new(potential: P) -> Self {
        SequentialPairwiseForcefield {
            potential,
            segments: RefCell::new(Vec::new()),
        }
    }

    pub fn add_segment(&self, first: usize, last: usize) {
        self.segments.borrow_mut().push((first, last));
    }

    fn for_each_pair(&self, mut f: impl FnMut(usize, usize)) {
        for &(first, last) in self.segments.borrow().iter() {
            for k in first..last {
                f(k, k + 1);
            }
        }
    }
}

impl<P: PairwisePotential> ForceField for SequentialPairwiseForcefield<P> {
    fn energy(&self, system: &System) -> f64 {
        let positions = system.view_positions();
        let mut total = 0.0;
        self.for_each_pair(|i, j| total += self.potential.energy(&(positions[i] - positions[j])));
        total
    }

    fn accumulate_force(&self, system: &System, out: &mut [Vector3]) {
        let positions = system.view_positions();
        let forces: Vec<(usize, usize, Vector3)> = {
            let mut collected = Vec::new();
            self.for_each_pair(|i, j| {
                let r = positions[i] - positions[j];
                collected.push((i, j, self.potential.force(&r)));
            });
            collected
        };
        for (i, j, f) in forces {
            out[i] += f;
            out[j] -= f;
        }
    }
}

/// Evaluates a triple potential over every consecutive triple `(k, k+1,
/// k+2)` for `k` in each registered inclusive segment `[first, last]`.
pub struct SequentialTriplewiseForcefield<P> {
    potential: P,
    segments: RefCell<Vec<(usize, usize)>>,
}

impl<P: TriplePotential> SequentialTriplewiseForcefield<P> {
    pub fn new(potential: P) -> Self {
        SequentialTriplewiseForcefield {
            potential,
            segments: RefCell::new(Vec::new()),
        }
    }

    pub fn add_segment(&self, first: usize, last: usize) {
        self.segments.borrow_mut().push((first, last));
    }

    fn for_each_triple(&self, mut f: impl FnMut(usize, usize, usize)) {
        for &(first, last) in self.segments.borrow().iter() {
            for k in first..last {
                f(k, k + 1, k + 2);
            }
        }
    }
}

impl<P: TriplePotential> ForceField for SequentialTriplewiseForcefield<P> {
    fn energy(&self, system: &System) -> f64 {
        let positions = system.view_positions();
        let mut total = 0.0;
        self.for_each_triple(|i, j, k| {
            let rij = positions[i] - positions[j];
            let rjk = positions[j] - positions[k];
            total += self.potential.energy(&rij, &rjk);
        });
        total
    }

    fn accumulate_force(&self, system: &System, out: &mut [Vector3]) {
        let positions = system.view_positions();
        let mut contributions = Vec::new();
        self.for_each_triple(|i, j, k| {
            let rij = positions[i] - positions[j];
            let rjk = positions[j] - positions[k];
            contributions.push((i, j, k, self.potential.forces(&rij, &rjk)));
        });
        for (i, j, k, (fi, fj, fk)) in contributions {
            out[i] += fi;
            out[j] += fj;
            out[k] += fk;
        }
    }
}
