//! Cached pair list with a Verlet shell, so the spatial grid need not be
//! rebuilt on every integrator step.

use crate::bx::{approx_eq_scalar, Bx};
use crate::grid::SpatialGrid;
use crate::vector::Point3;

const VERLET_FACTOR: f64 = 1.5;

struct Cache {
    bx: Bx,
    dcut: f64,
    verlet_radius: f64,
    positions: Vec<Point3>,
    pairs: Vec<(usize, usize)>,
}

/// Caches the last emitted pair set and the positions it was built from.
/// `update` decides whether the cache is still valid or must be rebuilt;
/// between rebuilds the stored pairs are reused verbatim, which may
/// include pairs whose current separation exceeds `dcut` (force fields
/// tolerate this, since the potential they consult is zero outside its
/// support).
#[derive(Default)]
pub struct NeighborList {
    cache: Option<Cache>,
}

impl NeighborList {
    pub fn new() -> Self {
        NeighborList { cache: None }
    }

    /// Read-only, forward-iterable view of the cached pairs.
    pub fn pairs(&self) -> &[(usize, usize)] {
        match &self.cache {
            Some(c) => &c.pairs,
            None => &[],
        }
    }

    /// Ensures the cache reflects `points` (optionally restricted to
    /// `subset`, translated back to the original indices in the emitted
    /// pairs) under cutoff `dcut` and box `bx`. Returns whether a rebuild
    /// occurred.
    pub fn update(&mut self, points: &[Point3], dcut: f64, bx: &Bx, subset: Option<&[usize]>) -> bool {
        let local_points: Vec<Point3> = match subset {
            Some(idxs) => idxs.iter().map(|&i| points[i]).collect(),
            None => points.to_vec(),
        };

        let needs_rebuild = self.needs_rebuild(&local_points, dcut, bx);
        if needs_rebuild {
            self.rebuild(&local_points, dcut, bx, subset);
        }
        needs_rebuild
    }

    fn needs_rebuild(&self, local_points: &[Point3], dcut: f64, bx: &Bx) -> bool {
        let cache = match &self.cache {
            None => return true,
            Some(c) => c,
        };
        if !cache.bx.approx_eq(bx) || !approx_eq_scalar(cache.dcut, dcut) {
            return true;
        }
        if cache.positions.len() != local_points.len() {
            return true;
        }
        let skin = (cache.verlet_radius - dcut) / 2.0;
        if skin <= 0.0 {
            return true;
        }
        cache
            .positions
            .iter()
            .zip(local_points.iter())
            .any(|(old, new)| bx.shortest_displacement(new, old).norm() > skin)
    }

    fn rebuild(&mut self, local_points: &[Point3], dcut: f64, bx: &Bx, subset: Option<&[usize]>) {
        let verlet_radius = VERLET_FACTOR * dcut;
        let grid = SpatialGrid::build(local_points, bx, verlet_radius);
        let mut local_pairs = Vec::new();
        grid.search(dcut, &mut local_pairs);

        let pairs = match subset {
            Some(idxs) => local_pairs
                .into_iter()
                .map(|(a, b)| {
                    let (ga, gb) = (idxs[a], idxs[b]);
                    (ga.min(gb), ga.max(gb))
                })
                .collect(),
            None => local_pairs,
        };

        self.cache = Some(Cache {
            bx: *bx,
            dcut,
            verlet_radius,
            positions: local_points.to_vec(),
            pairs,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_cache_forces_first_rebuild() {
        let mut nl = NeighborList::new();
        let points = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.1, 0.0, 0.0)];
        let bx = Bx::open(points.len());
        assert!(nl.update(&points, 0.3, &bx, None));
        assert_eq!(nl.pairs(), &[(0, 1)]);
    }

    #[test]
    fn small_motion_within_skin_does_not_rebuild() {
        let mut nl = NeighborList::new();
        let mut points = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.1, 0.0, 0.0)];
        let bx = Bx::open(points.len());
        assert!(nl.update(&points, 0.3, &bx, None));

        points[0].x += 1e-4;
        assert!(!nl.update(&points, 0.3, &bx, None));
    }

    #[test]
    fn large_motion_beyond_skin_rebuilds() {
        let mut nl = NeighborList::new();
        let mut points = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.1, 0.0, 0.0)];
        let bx = Bx::open(points.len());
        assert!(nl.update(&points, 0.3, &bx, None));

        points[0].x += 1.0;
        assert!(nl.update(&points, 0.3, &bx, None));
    }

    #[test]
    fn subset_translates_indices() {
        let mut nl = NeighborList::new();
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(5.0, 5.0, 5.0),
            Point3::new(0.05, 0.0, 0.0),
        ];
        let bx = Bx::open(points.len());
        let subset = [0usize, 2usize];
        nl.update(&points, 0.3, &bx, Some(&subset));
        assert_eq!(nl.pairs(), &[(0, 2)]);
    }
}
