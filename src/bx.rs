//! Boundary conditions: open, fully periodic, and xy-periodic boxes.
//!
//! Each variant also carries hint fields used solely for spatial-hash
//! sizing, not for the displacement computation itself.

use crate::vector::{Point3, Vector3};

const APPROX_EPSILON: f64 = 1e-6;

fn round_half_to_even(x: f64) -> f64 {
    x.round_ties_even()
}

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= epsilon * scale
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenBox {
    pub particle_count_hint: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodicBox {
    pub period: Vector3,
    pub particle_count_hint: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XyPeriodicBox {
    pub period_x: f64,
    pub period_y: f64,
    pub particle_count_hint: usize,
    pub z_span_hint: f64,
}

#[derive(Debug, Clone, Copy)]
pub enum Bx {
    Open(OpenBox),
    Periodic(PeriodicBox),
    XyPeriodic(XyPeriodicBox),
}

impl Bx {
    pub fn open(particle_count_hint: usize) -> Self {
        Bx::Open(OpenBox { particle_count_hint })
    }

    pub fn periodic(period: Vector3, particle_count_hint: usize) -> Self {
        Bx::Periodic(PeriodicBox {
            period,
            particle_count_hint,
        })
    }

    pub fn xy_periodic(period_x: f64, period_y: f64, particle_count_hint: usize, z_span_hint: f64) -> Self {
        Bx::XyPeriodic(XyPeriodicBox {
            period_x,
            period_y,
            particle_count_hint,
            z_span_hint,
        })
    }

    /// `p - q`, wrapped through the box's periodicity so the result is the
    /// shortest displacement vector representing that separation.
    pub fn shortest_displacement(&self, p: &Point3, q: &Point3) -> Vector3 {
        let raw = p - q;
        match self {
            Bx::Open(_) => raw,
            Bx::Periodic(b) => Vector3::new(
                wrap_axis(raw.x, b.period.x),
                wrap_axis(raw.y, b.period.y),
                wrap_axis(raw.z, b.period.z),
            ),
            Bx::XyPeriodic(b) => Vector3::new(
                wrap_axis(raw.x, b.period_x),
                wrap_axis(raw.y, b.period_y),
                raw.z,
            ),
        }
    }

    pub fn particle_count_hint(&self) -> usize {
        match self {
            Bx::Open(b) => b.particle_count_hint,
            Bx::Periodic(b) => b.particle_count_hint,
            Bx::XyPeriodic(b) => b.particle_count_hint,
        }
    }

    /// Approximate equality at a fixed relative epsilon, used by the
    /// neighbor list to decide whether box geometry changed since the
    /// last rebuild.
    pub fn approx_eq(&self, other: &Bx) -> bool {
        match (self, other) {
            (Bx::Open(_), Bx::Open(_)) => true,
            (Bx::Periodic(a), Bx::Periodic(b)) => {
                approx_eq(a.period.x, b.period.x, APPROX_EPSILON)
                    && approx_eq(a.period.y, b.period.y, APPROX_EPSILON)
                    && approx_eq(a.period.z, b.period.z, APPROX_EPSILON)
            }
            (Bx::XyPeriodic(a), Bx::XyPeriodic(b)) => {
                approx_eq(a.period_x, b.period_x, APPROX_EPSILON)
                    && approx_eq(a.period_y, b.period_y, APPROX_EPSILON)
            }
            _ => false,
        }
    }
}

fn wrap_axis(x: f64, period: f64) -> f64 {
    x - round_half_to_even(x / period) * period
}

/// Approximate equality of two scalars at the same fixed epsilon
/// (used by the neighbor list for `dcut` comparisons too).
pub fn approx_eq_scalar(a: f64, b: f64) -> bool {
    approx_eq(a, b, APPROX_EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_box_is_plain_subtraction() {
        let b = Bx::open(0);
        let p = Point3::new(1.0, 2.0, 3.0);
        let q = Point3::new(0.0, 0.0, 0.0);
        assert_eq!(b.shortest_displacement(&p, &q), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn periodic_displacement_is_bounded() {
        let b = Bx::periodic(Vector3::new(1.0, 1.0, 1.0), 0);
        for i in 0..200 {
            let x = -5.0 + i as f64 * 0.05;
            let p = Point3::new(x, 0.0, 0.0);
            let q = Point3::new(0.0, 0.0, 0.0);
            let dx = b.shortest_displacement(&p, &q).x;
            assert!(dx.abs() <= 0.5 + 1e-12, "|{dx}| should be <= P/2");
        }
    }

    #[test]
    fn xy_periodic_passes_z_through() {
        let b = Bx::xy_periodic(1.0, 1.0, 0, 0.0);
        let p = Point3::new(0.9, 0.9, 7.5);
        let q = Point3::new(0.0, 0.0, 0.0);
        let d = b.shortest_displacement(&p, &q);
        assert_eq!(d.z, 7.5);
        assert!(d.x.abs() <= 0.5 + 1e-12);
    }
}
