//! Potential catalog: scalar/vector functions of a separation vector, plus
//! the combinators (`sum`, `diff`, `scaled`, `cutoff`, ...) that compose
//! them. Most formulas below are pinned exactly so tests can check values;
//! the long-range/softcore families are implemented to their stated
//! qualitative contract only, since no exact reference values are given.

mod combinators;
mod pairwise;
mod triple;

pub use combinators::{cutoff, diff, negate, scaled, sum, wrapped, Cutoff, Diff, Negate, Scaled, Sum, Wrapped};
pub use pairwise::{
    Constant, Harmonic, LennardJones, PolyBell, PowerLaw, Semispring, SoftLennardJones, Softcore, SoftWca,
    Softwell, Spring, Wca,
};
pub use triple::CosineBending;

use crate::vector::Vector3;

/// `u(r) → scalar`, `F(r) → vector`, with `F(r) = -∇u(r)`. Field
/// potentials (§4.7) share this exact contract, applied to a displacement
/// from a reference geometry rather than a particle pair.
pub trait PairwisePotential {
    fn energy(&self, r: &Vector3) -> f64;
    fn force(&self, r: &Vector3) -> Vector3;
}

/// Takes two displacement vectors `rij, rjk` and returns the three forces
/// on `i, j, k`, summing to zero.
pub trait TriplePotential {
    fn energy(&self, rij: &Vector3, rjk: &Vector3) -> f64;
    fn forces(&self, rij: &Vector3, rjk: &Vector3) -> (Vector3, Vector3, Vector3);
}
