//! Uniform spatial hashing: bucket layout and bucket adjacency.
//!
//! Open boxes hash bin coordinates through a linear hash function into a
//! table of size `M`; periodic and xy-periodic boxes instead use a dense
//! 2-D (x, y) bin layout with z collapsed. Both
//! schemes are unified behind [`SpatialGrid`]: bucket membership is keyed
//! by a `storage id`, and adjacency ("complete": all 27/9 adjoining bins;
//! "directed": the subset with `storage id >= self`) is derived from the
//! raw integer bin coordinate(s) that map into a given storage id, which
//! may be more than one under hash collisions in the open-box case.

use crate::bx::Bx;
use crate::vector::Point3;
use std::collections::{BTreeSet, HashMap, HashSet};

const OPEN_BIN_OFFSET: i64 = 1 << 20;
// Large, mutually decorrelated coefficients commonly used for spatial
// hashing; extended to i64 at use so the products don't wrap.
const HASH_A: i64 = 73_856_093;
const HASH_B: i64 = 19_349_663;
const HASH_C: i64 = 83_492_791;

type BinCoord = (i64, i64, i64);

#[derive(Clone, Copy)]
enum Scheme {
    OpenHash { modulus: i64 },
    Planar { nx: i64, ny: i64 },
}

fn open_modulus(particle_count: usize) -> i64 {
    let n = particle_count.max(1) as i64;
    ((2 * n) / 11).max(1) | 1
}

fn bin_count(period: f64, spacing: f64) -> i64 {
    ((period / spacing).floor() as i64).max(1)
}

pub struct SpatialGrid {
    spacing: f64,
    bx: Bx,
    scheme: Scheme,
    points: Vec<Point3>,
    buckets: HashMap<i64, Vec<usize>>,
    bucket_raw_bins: HashMap<i64, Vec<BinCoord>>,
}

impl SpatialGrid {
    /// Bins `points` into buckets of edge `spacing` under box `bx`.
    pub fn build(points: &[Point3], bx: &Bx, spacing: f64) -> Self {
        let scheme = match bx {
            Bx::Open(_) => Scheme::OpenHash {
                modulus: open_modulus(points.len()),
            },
            Bx::Periodic(b) => Scheme::Planar {
                nx: bin_count(b.period.x, spacing),
                ny: bin_count(b.period.y, spacing),
            },
            Bx::XyPeriodic(b) => Scheme::Planar {
                nx: bin_count(b.period_x, spacing),
                ny: bin_count(b.period_y, spacing),
            },
        };

        let mut buckets: HashMap<i64, Vec<usize>> = HashMap::new();
        let mut raw_bins: HashMap<i64, HashSet<BinCoord>> = HashMap::new();

        for (i, p) in points.iter().enumerate() {
            let bin = Self::raw_bin(p, scheme, spacing);
            let id = Self::storage_id(bin, scheme);
            buckets.entry(id).or_default().push(i);
            raw_bins.entry(id).or_default().insert(bin);
        }

        let bucket_raw_bins = raw_bins
            .into_iter()
            .map(|(id, bins)| (id, bins.into_iter().collect()))
            .collect();

        SpatialGrid {
            spacing,
            bx: *bx,
            scheme,
            points: points.to_vec(),
            buckets,
            bucket_raw_bins,
        }
    }

    fn raw_bin(p: &Point3, scheme: Scheme, spacing: f64) -> BinCoord {
        match scheme {
            Scheme::OpenHash { .. } => (
                (p.x / spacing).floor() as i64 + OPEN_BIN_OFFSET,
                (p.y / spacing).floor() as i64 + OPEN_BIN_OFFSET,
                (p.z / spacing).floor() as i64 + OPEN_BIN_OFFSET,
            ),
            Scheme::Planar { nx, ny } => (
                ((p.x / spacing).floor() as i64).rem_euclid(nx.max(1)),
                ((p.y / spacing).floor() as i64).rem_euclid(ny.max(1)),
                0,
            ),
        }
    }

    fn storage_id(bin: BinCoord, scheme: Scheme) -> i64 {
        match scheme {
            Scheme::OpenHash { modulus } => {
                let (ix, iy, iz) = bin;
                let h = HASH_A
                    .wrapping_mul(ix)
                    .wrapping_add(HASH_B.wrapping_mul(iy))
                    .wrapping_add(HASH_C.wrapping_mul(iz));
                h.rem_euclid(modulus)
            }
            Scheme::Planar { nx, ny: _ } => {
                let (ix, iy, _) = bin;
                ix + nx * iy
            }
        }
    }

    /// The 27 (open) or 9 (planar) bin coordinates adjoining `bin`,
    /// including itself, mapped to storage ids.
    fn offset_ids(&self, bin: BinCoord) -> BTreeSet<i64> {
        let (ix, iy, iz) = bin;
        let mut ids = BTreeSet::new();
        match self.scheme {
            Scheme::OpenHash { .. } => {
                for dx in -1..=1 {
                    for dy in -1..=1 {
                        for dz in -1..=1 {
                            let neighbor = (ix + dx, iy + dy, iz + dz);
                            ids.insert(Self::storage_id(neighbor, self.scheme));
                        }
                    }
                }
            }
            Scheme::Planar { nx, ny } => {
                for dx in -1..=1 {
                    for dy in -1..=1 {
                        let neighbor = ((ix + dx).rem_euclid(nx.max(1)), (iy + dy).rem_euclid(ny.max(1)), 0);
                        ids.insert(Self::storage_id(neighbor, self.scheme));
                    }
                }
            }
        }
        ids
    }

    /// Complete adjacency of an occupied bucket: union of `offset_ids`
    /// over every raw bin coordinate that collided into this storage id.
    fn complete_neighbors_of_bucket(&self, id: i64) -> BTreeSet<i64> {
        let mut ids = BTreeSet::new();
        if let Some(bins) = self.bucket_raw_bins.get(&id) {
            for &bin in bins {
                ids.extend(self.offset_ids(bin));
            }
        }
        ids
    }

    /// All index pairs `(i, j)`, `i < j`, with `‖shortest_displacement‖² ≤
    /// cutoff²`. May include pairs with a larger separation than `cutoff`
    /// as an artifact of bucket-level (not pairwise) membership (Verlet
    /// false positives are tolerated by callers).
    pub fn search(&self, cutoff: f64, out: &mut Vec<(usize, usize)>) {
        let cutoff2 = cutoff * cutoff;
        for (&id, members) in &self.buckets {
            let directed: Vec<i64> = self
                .complete_neighbors_of_bucket(id)
                .into_iter()
                .filter(|&t| t >= id)
                .collect();
            for &other_id in &directed {
                if other_id == id {
                    for a in 0..members.len() {
                        for b in (a + 1)..members.len() {
                            self.emit_if_within(members[a], members[b], cutoff2, out);
                        }
                    }
                } else if let Some(other_members) = self.buckets.get(&other_id) {
                    for &a in members {
                        for &b in other_members {
                            self.emit_if_within(a, b, cutoff2, out);
                        }
                    }
                }
            }
        }
    }

    fn emit_if_within(&self, i: usize, j: usize, cutoff2: f64, out: &mut Vec<(usize, usize)>) {
        let d = self.bx.shortest_displacement(&self.points[i], &self.points[j]);
        if d.norm_squared() <= cutoff2 {
            out.push((i.min(j), i.max(j)));
        }
    }

    /// Member indices within `cutoff` of an arbitrary `point` (need not be
    /// one of the grid's own points).
    pub fn query(&self, point: &Point3, cutoff: f64, out: &mut Vec<usize>) {
        let cutoff2 = cutoff * cutoff;
        let bin = Self::raw_bin(point, self.scheme, self.spacing);
        for id in self.offset_ids(bin) {
            if let Some(members) = self.buckets.get(&id) {
                for &m in members {
                    let d = self.bx.shortest_displacement(&self.points[m], point);
                    if d.norm_squared() <= cutoff2 {
                        out.push(m);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector3;

    fn brute_force_pairs(points: &[Point3], bx: &Bx, cutoff: f64) -> BTreeSet<(usize, usize)> {
        let mut out = BTreeSet::new();
        let cutoff2 = cutoff * cutoff;
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let d = bx.shortest_displacement(&points[i], &points[j]);
                if d.norm_squared() <= cutoff2 {
                    out.insert((i, j));
                }
            }
        }
        out
    }

    #[test]
    fn open_box_search_matches_brute_force() {
        let mut points = Vec::new();
        let mut x = 0.0;
        for i in 0..40 {
            points.push(Point3::new(x, (i % 5) as f64 * 0.1, (i % 3) as f64 * 0.1));
            x += 0.05;
        }
        let bx = Bx::open(points.len());
        let grid = SpatialGrid::build(&points, &bx, 0.3);
        let mut pairs = Vec::new();
        grid.search(0.3, &mut pairs);
        let found: BTreeSet<_> = pairs.into_iter().collect();
        let expected = brute_force_pairs(&points, &bx, 0.3);
        assert!(expected.is_subset(&found), "no false negatives allowed");
    }

    #[test]
    fn periodic_box_search_matches_brute_force() {
        let mut points = Vec::new();
        let mut seed = 1u64;
        for _ in 0..200 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            let fx = ((seed >> 11) as f64 / (1u64 << 53) as f64) * 0.9;
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            let fy = ((seed >> 11) as f64 / (1u64 << 53) as f64) * 1.0;
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            let fz = ((seed >> 11) as f64 / (1u64 << 53) as f64) * 1.1;
            points.push(Point3::new(fx, fy, fz));
        }
        let bx = Bx::periodic(Vector3::new(0.9, 1.0, 1.1), points.len());
        let grid = SpatialGrid::build(&points, &bx, 0.3);
        let mut pairs = Vec::new();
        grid.search(0.3, &mut pairs);
        let found: BTreeSet<_> = pairs.into_iter().collect();
        let expected = brute_force_pairs(&points, &bx, 0.3);
        assert!(expected.is_subset(&found), "no false negatives allowed");
        for &(i, j) in &found {
            assert_ne!(i, j);
        }
    }

    #[test]
    fn query_finds_nearby_points() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.05, 0.0, 0.0),
            Point3::new(5.0, 5.0, 5.0),
        ];
        let bx = Bx::open(points.len());
        let grid = SpatialGrid::build(&points, &bx, 0.3);
        let mut out = Vec::new();
        grid.query(&Point3::new(0.0, 0.0, 0.0), 0.3, &mut out);
        out.sort_unstable();
        assert_eq!(out, vec![0, 1]);
    }
}
