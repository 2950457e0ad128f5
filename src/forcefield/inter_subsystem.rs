use super::ForceField;
use crate::bx::{approx_eq_scalar, Bx};
use crate::grid::SpatialGrid;
use crate::potential::PairwisePotential;
use crate::system::System;
use crate::vector::{Point3, Vector3};
use std::cell::RefCell;

const VERLET_FACTOR: f64 = 1.5;

/// Two disjoint (or overlapping, in which case self-pairs are undefined)
/// index sets, "key" and "query". On rebuild the key set is hashed into a
/// grid; every query
/// particle reports hits via `grid.query`. Cache validation mirrors the
/// single-subsystem neighbor list but checks displacement of both sets.
pub struct InterSubsystemNeighborPairForcefield<P> {
    potential: P,
    dcut: f64,
    bx: Bx,
    key: Vec<usize>,
    query: Vec<usize>,
    cache: RefCell<Option<Cache>>,
}

struct Cache {
    bx: Bx,
    dcut: f64,
    verlet_radius: f64,
    key_positions: Vec<Point3>,
    query_positions: Vec<Point3>,
    /// `(key global index, query global index)` pairs.
    pairs: Vec<(usize, usize)>,
}

impl<P: PairwisePotential> InterSubsystemNeighborPairForcefield<P> {
    pub fn new(potential: P, dcut: f64, bx: Bx, key: Vec<usize>, query: Vec<usize>) -> Self {
        InterSubsystemNeighborPairForcefield {
            potential,
            dcut,
            bx,
            key,
            query,
            cache: RefCell::new(None),
        }
    }

    fn refresh(&self, positions: &[Point3]) {
        let key_positions: Vec<Point3> = self.key.iter().map(|&i| positions[i]).collect();
        let query_positions: Vec<Point3> = self.query.iter().map(|&i| positions[i]).collect();

        let needs_rebuild = {
            let cache = self.cache.borrow();
            match &*cache {
                None => true,
                Some(c) => {
                    if !c.bx.approx_eq(&self.bx) || !approx_eq_scalar(c.dcut, self.dcut) {
                        true
                    } else if c.key_positions.len() != key_positions.len()
                        || c.query_positions.len() != query_positions.len()
                    {
                        true
                    } else {
                        let skin = (c.verlet_radius - self.dcut) / 2.0;
                        if skin <= 0.0 {
                            true
                        } else {
                            let moved = |old: &[Point3], new: &[Point3]| {
                                old.iter()
                                    .zip(new.iter())
                                    .any(|(o, n)| self.bx.shortest_displacement(n, o).norm() > skin)
                            };
                            moved(&c.key_positions, &key_positions) || moved(&c.query_positions, &query_positions)
                        }
                    }
                }
            }
        };

        if needs_rebuild {
            let verlet_radius = VERLET_FACTOR * self.dcut;
            let grid = SpatialGrid::build(&key_positions, &self.bx, verlet_radius);
            let mut pairs = Vec::new();
            for (local_query, &global_query) in self.query.iter().enumerate() {
                let mut hits = Vec::new();
                grid.query(&query_positions[local_query], self.dcut, &mut hits);
                for local_key in hits {
                    pairs.push((self.key[local_key], global_query));
                }
            }
            *self.cache.borrow_mut() = Some(Cache {
                bx: self.bx,
                dcut: self.dcut,
                verlet_radius,
                key_positions,
                query_positions,
                pairs,
            });
        }
    }
}

impl<P: PairwisePotential> ForceField for InterSubsystemNeighborPairForcefield<P> {
    fn energy(&self, system: &System) -> f64 {
        self.refresh(system.view_positions());
        let positions = system.view_positions();
        self.cache
            .borrow()
            .as_ref()
            .unwrap()
            .pairs
            .iter()
            .map(|&(k, q)| self.potential.energy(&(positions[k] - positions[q])))
            .sum()
    }

    fn accumulate_force(&self, system: &System, out: &mut [Vector3]) {
        self.refresh(system.view_positions());
        let positions = system.view_positions();
        for &(k, q) in &self.cache.borrow().as_ref().unwrap().pairs {
            let r = positions[k] - positions[q];
            let f = self.potential.force(&r);
            out[k] += f;
            out[q] -= f;
        }
    }
}

/// Brute-force (non-grid-accelerated) variant of the same key/query
/// interaction pattern: every key particle is paired against every query
/// particle, with no cutoff — the brute-force counterpart to the
/// neighbor-accelerated form above, useful when |key| and |query| are
/// small enough that grid bookkeeping costs more than it saves.
pub struct InterSubsystemPairForcefield<P> {
    potential: P,
    key: Vec<usize>,
    query: Vec<usize>,
}

impl<P: PairwisePotential> InterSubsystemPairForcefield<P> {
    pub fn new(potential: P, key: Vec<usize>, query: Vec<usize>) -> Self {
        InterSubsystemPairForcefield { potential, key, query }
    }
}

impl<P: PairwisePotential> ForceField for InterSubsystemPairForcefield<P> {
    fn energy(&self, system: &System) -> f64 {
        let positions = system.view_positions();
        let mut total = 0.0;
        for &k in &self.key {
            for &q in &self.query {
                total += self.potential.energy(&(positions[k] - positions[q]));
            }
        }
        total
    }

    fn accumulate_force(&self, system: &System, out: &mut [Vector3]) {
        let positions = system.view_positions();
        for &k in &self.key {
            for &q in &self.query {
                let r = positions[k] - positions[q];
                let f = self.potential.force(&r);
                out[k] += f;
                out[q] -= f;
            }
        }
    }
}
