use super::TriplePotential;
use crate::vector::Vector3;

/// `u = E(1 - (rij·rjk)/(‖rij‖‖rjk‖))`; the three-body force is the
/// analytical gradient, zero when either vector vanishes.
#[derive(Debug, Clone, Copy)]
pub struct CosineBending {
    pub e: f64,
}

impl TriplePotential for CosineBending {
    fn energy(&self, rij: &Vector3, rjk: &Vector3) -> f64 {
        let na = rij.norm();
        let nb = rjk.norm();
        if na == 0.0 || nb == 0.0 {
            return 0.0;
        }
        self.e * (1.0 - rij.dot(rjk) / (na * nb))
    }

    fn forces(&self, rij: &Vector3, rjk: &Vector3) -> (Vector3, Vector3, Vector3) {
        let na = rij.norm();
        let nb = rjk.norm();
        if na == 0.0 || nb == 0.0 {
            return (Vector3::zeros(), Vector3::zeros(), Vector3::zeros());
        }
        let c = rij.dot(rjk) / (na * nb);
        let g_a = rjk / (na * nb) - c * rij / (na * na);
        let g_b = rij / (na * nb) - c * rjk / (nb * nb);

        let fi = self.e * g_a;
        let fk = -self.e * g_b;
        let fj = -fi - fk;
        (fi, fj, fk)
    }
}
