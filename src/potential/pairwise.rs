use super::PairwisePotential;
use crate::vector::Vector3;

/// `u = e`, `F = 0`.
#[derive(Debug, Clone, Copy)]
pub struct Constant {
    pub e: f64,
}

impl PairwisePotential for Constant {
    fn energy(&self, _r: &Vector3) -> f64 {
        self.e
    }

    fn force(&self, _r: &Vector3) -> Vector3 {
        Vector3::zeros()
    }
}

/// `u = ½K‖r‖²`, `F = -K r`.
#[derive(Debug, Clone, Copy)]
pub struct Harmonic {
    pub k: f64,
}

impl PairwisePotential for Harmonic {
    fn energy(&self, r: &Vector3) -> f64 {
        0.5 * self.k * r.norm_squared()
    }

    fn force(&self, r: &Vector3) -> Vector3 {
        -self.k * r
    }
}

/// `u = ½K(‖r‖-b)²`; `F = K(b/‖r‖ - 1)·r`, zero when `‖r‖ = 0`.
#[derive(Debug, Clone, Copy)]
pub struct Spring {
    pub k: f64,
    pub b: f64,
}

impl PairwisePotential for Spring {
    fn energy(&self, r: &Vector3) -> f64 {
        let norm = r.norm();
        0.5 * self.k * (norm - self.b).powi(2)
    }

    fn force(&self, r: &Vector3) -> Vector3 {
        let norm = r.norm();
        if norm == 0.0 {
            Vector3::zeros()
        } else {
            self.k * (self.b / norm - 1.0) * r
        }
    }
}

/// `spring(K, b)` with one-sided support: zero for `‖r‖ ≤ b`.
#[derive(Debug, Clone, Copy)]
pub struct Semispring {
    pub k: f64,
    pub b: f64,
}

impl PairwisePotential for Semispring {
    fn energy(&self, r: &Vector3) -> f64 {
        let norm = r.norm();
        if norm <= self.b {
            0.0
        } else {
            0.5 * self.k * (norm - self.b).powi(2)
        }
    }

    fn force(&self, r: &Vector3) -> Vector3 {
        let norm = r.norm();
        if norm <= self.b || norm == 0.0 {
            Vector3::zeros()
        } else {
            self.k * (self.b / norm - 1.0) * r
        }
    }
}

fn lj_energy(eps: f64, sigma: f64, r: f64) -> f64 {
    let sr6 = (sigma / r).powi(6);
    4.0 * eps * (sr6 * sr6 - sr6)
}

fn lj_force(eps: f64, sigma: f64, r_vec: &Vector3) -> Vector3 {
    let r2 = r_vec.norm_squared();
    let sr6 = (sigma * sigma / r2).powi(3);
    let scalar = 24.0 * eps * (2.0 * sr6 * sr6 - sr6) / r2;
    scalar * r_vec
}

/// `u = 4ε((σ/r)¹²-(σ/r)⁶)`, the standard Lennard-Jones potential.
#[derive(Debug, Clone, Copy)]
pub struct LennardJones {
    pub eps: f64,
    pub sigma: f64,
}

impl PairwisePotential for LennardJones {
    fn energy(&self, r: &Vector3) -> f64 {
        lj_energy(self.eps, self.sigma, r.norm())
    }

    fn force(&self, r: &Vector3) -> Vector3 {
        lj_force(self.eps, self.sigma, r)
    }
}

fn wca_cutoff(sigma: f64) -> f64 {
    sigma * 2f64.powf(1.0 / 6.0)
}

/// Purely repulsive Lennard-Jones truncated and shifted at its minimum
/// (the Weeks-Chandler-Andersen construction).
#[derive(Debug, Clone, Copy)]
pub struct Wca {
    pub eps: f64,
    pub sigma: f64,
}

impl PairwisePotential for Wca {
    fn energy(&self, r: &Vector3) -> f64 {
        let norm = r.norm();
        if norm >= wca_cutoff(self.sigma) {
            0.0
        } else {
            lj_energy(self.eps, self.sigma, norm) + self.eps
        }
    }

    fn force(&self, r: &Vector3) -> Vector3 {
        if r.norm() >= wca_cutoff(self.sigma) {
            Vector3::zeros()
        } else {
            lj_force(self.eps, self.sigma, r)
        }
    }
}

fn soft_reff6(r2: f64, sigma: f64, k: f64) -> f64 {
    let r6 = r2 * r2 * r2;
    r6 + k * sigma.powi(6)
}

/// Lennard-Jones regularized so it is finite at the origin: the usual
/// `r⁶` term is replaced by `r⁶ + k·σ⁶`.
#[derive(Debug, Clone, Copy)]
pub struct SoftLennardJones {
    pub eps: f64,
    pub sigma: f64,
    pub k: f64,
}

impl SoftLennardJones {
    fn energy_and_dudx(&self, r2: f64) -> (f64, f64) {
        let x = soft_reff6(r2, self.sigma, self.k);
        let sigma6 = self.sigma.powi(6);
        let sigma12 = sigma6 * sigma6;
        let u = 4.0 * self.eps * (sigma12 / (x * x) - sigma6 / x);
        let dudx = 4.0 * self.eps * (-2.0 * sigma12 / (x * x * x) + sigma6 / (x * x));
        (u, dudx)
    }
}

impl PairwisePotential for SoftLennardJones {
    fn energy(&self, r: &Vector3) -> f64 {
        self.energy_and_dudx(r.norm_squared()).0
    }

    fn force(&self, r: &Vector3) -> Vector3 {
        let r2 = r.norm_squared();
        let (_, dudx) = self.energy_and_dudx(r2);
        let dudr2 = dudx * 3.0 * r2 * r2;
        -2.0 * dudr2 * r
    }
}

/// `SoftLennardJones` truncated and shifted at its repulsive cutoff, the
/// soft-core analog of [`Wca`].
#[derive(Debug, Clone, Copy)]
pub struct SoftWca {
    pub eps: f64,
    pub sigma: f64,
    pub k: f64,
}

impl SoftWca {
    fn inner(&self) -> SoftLennardJones {
        SoftLennardJones {
            eps: self.eps,
            sigma: self.sigma,
            k: self.k,
        }
    }

    fn within_cutoff(&self, r2: f64) -> bool {
        soft_reff6(r2, self.sigma, self.k) <= 2.0 * self.sigma.powi(6)
    }
}

impl PairwisePotential for SoftWca {
    fn energy(&self, r: &Vector3) -> f64 {
        let r2 = r.norm_squared();
        if self.within_cutoff(r2) {
            self.inner().energy(r) + self.eps
        } else {
            0.0
        }
    }

    fn force(&self, r: &Vector3) -> Vector3 {
        if self.within_cutoff(r.norm_squared()) {
            self.inner().force(r)
        } else {
            Vector3::zeros()
        }
    }
}

/// `u = e(1-(‖r‖/s)^P)^Q` inside `‖r‖<s`, zero outside. `P≥2`, `Q≥1`.
#[derive(Debug, Clone, Copy)]
pub struct Softcore<const P: i32, const Q: i32> {
    pub e: f64,
    pub s: f64,
}

impl<const P: i32, const Q: i32> Softcore<P, Q> {
    fn base(norm: f64, s: f64) -> f64 {
        1.0 - (norm / s).powi(P)
    }
}

impl<const P: i32, const Q: i32> PairwisePotential for Softcore<P, Q> {
    fn energy(&self, r: &Vector3) -> f64 {
        let norm = r.norm();
        if norm >= self.s {
            0.0
        } else {
            self.e * Self::base(norm, self.s).powi(Q)
        }
    }

    fn force(&self, r: &Vector3) -> Vector3 {
        let norm = r.norm();
        if norm >= self.s || norm == 0.0 {
            Vector3::zeros()
        } else {
            let base = Self::base(norm, self.s);
            // du/dr = e·Q·base^(Q-1)·(-P/s·(r/s)^(P-1))
            let dudr = -self.e * (Q as f64) * base.powi(Q - 1) * (P as f64) / self.s * (norm / self.s).powi(P - 1);
            -dudr / norm * r
        }
    }
}

/// Same family as [`Softcore`] with `overlap_energy`/`cutoff_distance`
/// field naming instead of `e`/`s`.
#[derive(Debug, Clone, Copy)]
pub struct PolyBell<const P: i32, const Q: i32> {
    pub overlap_energy: f64,
    pub cutoff_distance: f64,
}

impl<const P: i32, const Q: i32> PairwisePotential for PolyBell<P, Q> {
    fn energy(&self, r: &Vector3) -> f64 {
        Softcore::<P, Q> {
            e: self.overlap_energy,
            s: self.cutoff_distance,
        }
        .energy(r)
    }

    fn force(&self, r: &Vector3) -> Vector3 {
        Softcore::<P, Q> {
            e: self.overlap_energy,
            s: self.cutoff_distance,
        }
        .force(r)
    }
}

/// `u = e(1-(‖r‖/s)²)^N` for `‖r‖ < s`, zero outside; `N ≥ 1`. A bounded,
/// finite-range repulsion, not the unbounded inverse power law the name
/// might suggest.
#[derive(Debug, Clone, Copy)]
pub struct PowerLaw<const N: i32> {
    pub e: f64,
    pub s: f64,
}

impl<const N: i32> PairwisePotential for PowerLaw<N> {
    fn energy(&self, r: &Vector3) -> f64 {
        let k2 = 1.0 / (self.s * self.s);
        let g = 1.0 - k2 * r.norm_squared();
        if g < 0.0 {
            0.0
        } else {
            self.e * g.powi(N)
        }
    }

    fn force(&self, r: &Vector3) -> Vector3 {
        let k2 = 1.0 / (self.s * self.s);
        let g = 1.0 - k2 * r.norm_squared();
        if g < 0.0 {
            Vector3::zeros()
        } else {
            (N as f64) * self.e * k2 * g.powi(N - 1) * r
        }
    }
}

/// `u = -e/(1+(‖r‖/s)^P)`, a bounded long-range attractive well.
#[derive(Debug, Clone, Copy)]
pub struct Softwell<const P: i32> {
    pub e: f64,
    pub s: f64,
}

impl<const P: i32> PairwisePotential for Softwell<P> {
    fn energy(&self, r: &Vector3) -> f64 {
        -self.e / (1.0 + (r.norm() / self.s).powi(P))
    }

    fn force(&self, r: &Vector3) -> Vector3 {
        let norm = r.norm();
        if norm == 0.0 {
            return Vector3::zeros();
        }
        let denom = 1.0 + (norm / self.s).powi(P);
        let dudr = self.e * (P as f64) * (norm / self.s).powi(P - 1) / self.s / (denom * denom);
        -dudr / norm * r
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn constant_has_zero_force() {
        let c = Constant { e: 3.0 };
        assert_eq!(c.energy(&Vector3::new(1.0, 2.0, 3.0)), 3.0);
        assert_eq!(c.force(&Vector3::new(1.0, 2.0, 3.0)), Vector3::zeros());
    }

    #[test]
    fn harmonic_matches_formula() {
        let h = Harmonic { k: 2.0 };
        let r = Vector3::new(1.0, 0.0, 0.0);
        assert_abs_diff_eq!(h.energy(&r), 1.0);
        assert_eq!(h.force(&r), Vector3::new(-2.0, 0.0, 0.0));
    }

    #[test]
    fn spring_zero_at_zero_length() {
        let s = Spring { k: 1.0, b: 1.0 };
        assert_eq!(s.force(&Vector3::zeros()), Vector3::zeros());
    }

    #[test]
    fn semispring_is_zero_within_support() {
        let s = Semispring { k: 1.0, b: 1.0 };
        let r = Vector3::new(0.5, 0.0, 0.0);
        assert_eq!(s.energy(&r), 0.0);
        assert_eq!(s.force(&r), Vector3::zeros());
    }

    #[test]
    fn wca_is_zero_beyond_cutoff() {
        let w = Wca { eps: 1.0, sigma: 1.0 };
        let r = Vector3::new(10.0, 0.0, 0.0);
        assert_eq!(w.energy(&r), 0.0);
        assert_eq!(w.force(&r), Vector3::zeros());
    }

    #[test]
    fn softcore_is_zero_beyond_cutoff() {
        let sc = Softcore::<2, 1> { e: 1.0, s: 1.0 };
        let r = Vector3::new(2.0, 0.0, 0.0);
        assert_eq!(sc.energy(&r), 0.0);
        assert_eq!(sc.force(&r), Vector3::zeros());
    }

    #[test]
    fn force_is_numerically_consistent_with_energy_gradient() {
        let h = Harmonic { k: 3.0 };
        let r = Vector3::new(0.3, -0.2, 0.1);
        let hstep = 1e-5;
        for axis in 0..3 {
            let mut plus = r;
            let mut minus = r;
            plus[axis] += hstep;
            minus[axis] -= hstep;
            let numeric = -(h.energy(&plus) - h.energy(&minus)) / (2.0 * hstep);
            assert_abs_diff_eq!(h.force(&r)[axis], numeric, epsilon = 1e-6);
        }
    }
}
