use super::ForceField;
use crate::potential::PairwisePotential;
use crate::system::System;
use crate::vector::{normalize, project, Point3, Vector3};
use std::cell::Cell;

/// A plane defined by a reference point and unit normal. Particles on the
/// negative side of the normal (`r·n < 0`) feel `inward`; the rest feel
/// `outward`. Also maintains a reaction-force statistic: the (sign
/// negated) sum of the applied force's component along `n`, refreshed on
/// every `accumulate_force` call.
pub struct PlaneSurfaceForcefield<Pin, Pout> {
    reference: Point3,
    normal: Vector3,
    inward: Pin,
    outward: Pout,
    reaction_force: Cell<f64>,
}

impl<Pin: PairwisePotential, Pout: PairwisePotential> PlaneSurfaceForcefield<Pin, Pout> {
    pub fn new(reference: Point3, normal: Vector3, inward: Pin, outward: Pout) -> Self {
        PlaneSurfaceForcefield {
            reference,
            normal: normalize(&normal),
            inward,
            outward,
            reaction_force: Cell::new(0.0),
        }
    }

    pub fn reaction_force(&self) -> f64 {
        self.reaction_force.get()
    }

    fn projected(&self, p: &Point3) -> Vector3 {
        project(&(p - self.reference), &self.normal)
    }
}

impl<Pin: PairwisePotential, Pout: PairwisePotential> ForceField for PlaneSurfaceForcefield<Pin, Pout> {
    fn energy(&self, system: &System) -> f64 {
        system
            .view_positions()
            .iter()
            .map(|p| {
                let r = self.projected(p);
                if r.dot(&self.normal) < 0.0 {
                    self.inward.energy(&r)
                } else {
                    self.outward.energy(&r)
                }
            })
            .sum()
    }

    fn accumulate_force(&self, system: &System, out: &mut [Vector3]) {
        let mut reaction = 0.0;
        for (i, p) in system.view_positions().iter().enumerate() {
            let r = self.projected(p);
            let f = if r.dot(&self.normal) < 0.0 {
                self.inward.force(&r)
            } else {
                self.outward.force(&r)
            };
            out[i] += f;
            let n_norm = self.normal.norm();
            if n_norm != 0.0 {
                reaction -= f.dot(&self.normal) / n_norm;
            }
        }
        self.reaction_force.set(reaction);
    }
}

/// A sphere with center `c` and radius `R`. `r = p - c`; the signed
/// surface displacement is `s = r - (R/‖r‖)·r`. Particles with `‖r‖ < R`
/// feel `inward`; the rest feel `outward`. Degenerate at `r = 0`, which is
/// skipped (zero contribution). Also maintains `reaction_force`.
pub struct SphereSurfaceForcefield<Pin, Pout> {
    center: Point3,
    radius: f64,
    inward: Pin,
    outward: Pout,
    reaction_force: Cell<f64>,
}

impl<Pin: PairwisePotential, Pout: PairwisePotential> SphereSurfaceForcefield<Pin, Pout> {
    pub fn new(center: Point3, radius: f64, inward: Pin, outward: Pout) -> Self {
        SphereSurfaceForcefield {
            center,
            radius,
            inward,
            outward,
            reaction_force: Cell::new(0.0),
        }
    }

    pub fn reaction_force(&self) -> f64 {
        self.reaction_force.get()
    }

    fn displacement(&self, p: &Point3) -> Option<(Vector3, Vector3)> {
        let r = p - self.center;
        let norm = r.norm();
        if norm == 0.0 {
            None
        } else {
            Some((r, r - (self.radius / norm) * r))
        }
    }
}

impl<Pin: PairwisePotential, Pout: PairwisePotential> ForceField for SphereSurfaceForcefield<Pin, Pout> {
    fn energy(&self, system: &System) -> f64 {
        system
            .view_positions()
            .iter()
            .filter_map(|p| self.displacement(p))
            .map(|(r, s)| {
                if r.norm() < self.radius {
                    self.inward.energy(&s)
                } else {
                    self.outward.energy(&s)
                }
            })
            .sum()
    }

    fn accumulate_force(&self, system: &System, out: &mut [Vector3]) {
        let mut reaction = 0.0;
        for (i, p) in system.view_positions().iter().enumerate() {
            let Some((r, s)) = self.displacement(p) else {
                continue;
            };
            let norm = r.norm();
            let basic = if norm < self.radius {
                self.inward.force(&s)
            } else {
                self.outward.force(&s)
            };
            let f_iso = project(&basic, &r);
            let f = basic + (self.radius / norm) * (f_iso - basic);
            out[i] += f;
            reaction -= f.dot(&r) / norm;
        }
        self.reaction_force.set(reaction);
    }
}

/// An ellipsoid with center `c` and semi-axes `(a, b, c)`. The basic
/// force from `potential` is evaluated on the implicit-surface
/// displacement `delta`, then corrected for the ellipsoid's anisotropy:
/// `F + (F − proj_delta F) ⊙ strain`, where `strain` is the local
/// curvature scaling derived from `Q = diag(1/a², 1/b², 1/c²)`.
pub struct EllipsoidSurfaceForcefield<Pin, Pout> {
    center: Point3,
    semi_axes: Vector3,
    inward: Pin,
    outward: Pout,
}

struct EllipsoidEval {
    delta: Vector3,
    strain: Vector3,
    implicit: f64,
}

impl<Pin: PairwisePotential, Pout: PairwisePotential> EllipsoidSurfaceForcefield<Pin, Pout> {
    pub fn new(center: Point3, semi_axes: Vector3, inward: Pin, outward: Pout) -> Self {
        EllipsoidSurfaceForcefield {
            center,
            semi_axes,
            inward,
            outward,
        }
    }

    fn eval(&self, p: &Point3) -> Option<EllipsoidEval> {
        let radial = p - self.center;
        let q = Vector3::new(
            1.0 / (self.semi_axes.x * self.semi_axes.x),
            1.0 / (self.semi_axes.y * self.semi_axes.y),
            1.0 / (self.semi_axes.z * self.semi_axes.z),
        );
        let dual = radial.component_mul(&q);
        let dual_norm2 = dual.norm_squared();
        if dual_norm2 == 0.0 {
            return None;
        }
        let implicit = dual.dot(&radial) - 1.0;
        let scale = implicit / (2.0 * dual_norm2);
        let delta = scale * dual;
        let strain = scale * q;
        Some(EllipsoidEval { delta, strain, implicit })
    }
}

impl<Pin: PairwisePotential, Pout: PairwisePotential> ForceField for EllipsoidSurfaceForcefield<Pin, Pout> {
    fn energy(&self, system: &System) -> f64 {
        system
            .view_positions()
            .iter()
            .filter_map(|p| self.eval(p))
            .map(|ev| {
                if ev.implicit < 0.0 {
                    self.inward.energy(&ev.delta)
                } else {
                    self.outward.energy(&ev.delta)
                }
            })
            .sum()
    }

    fn accumulate_force(&self, system: &System, out: &mut [Vector3]) {
        for (i, p) in system.view_positions().iter().enumerate() {
            let Some(ev) = self.eval(p) else { continue };
            let basic_force = if ev.implicit < 0.0 {
                self.inward.force(&ev.delta)
            } else {
                self.outward.force(&ev.delta)
            };
            let iso = project(&basic_force, &ev.delta);
            let aniso = basic_force - iso;
            let force = basic_force + aniso.component_mul(&ev.strain);
            out[i] += force;
        }
    }
}
