//! Random engine.
//!
//! A 64-bit engine with period ≥ 2⁶⁴, seedable from a single `u64` or a
//! seed sequence, with a standard-normal sampler. Statistical equivalence
//! is all that's required, not bit-exact reproduction of any particular
//! generator, so this wraps `rand::rngs::StdRng` (period 2^128) paired
//! with `statrs::distribution::Normal`.

use crate::error::MdError;
use crate::vector::Vector3;
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use statrs::distribution::Normal;

/// Thin wrapper so call sites don't reach for `rand`/`statrs` directly.
pub struct Engine {
    rng: StdRng,
    standard_normal: Normal,
}

impl Engine {
    pub fn seed_from_u64(seed: u64) -> Self {
        Engine {
            rng: StdRng::seed_from_u64(seed),
            standard_normal: Normal::new(0.0, 1.0).expect("standard normal is always valid"),
        }
    }

    /// Seeds from a sequence of `u64`s, folding them into a single seed the
    /// way `std::seed_seq`-consuming code typically does. Any mixing
    /// function suffices since bit-exact reproduction is not required.
    pub fn from_seed_sequence(seeds: &[u64]) -> Result<Self, MdError> {
        let mixed = seeds
            .iter()
            .fold(0u64, |acc, &s| acc.wrapping_mul(6364136223846793005).wrapping_add(s));
        if seeds.is_empty() {
            return Err(MdError::EmptySeedSequence);
        }
        Ok(Self::seed_from_u64(mixed))
    }

    /// One standard-normal variate.
    pub fn sample_normal(&mut self) -> f64 {
        self.standard_normal.sample(&mut self.rng)
    }

    /// Three independent standard normals as a vector, as consumed by the
    /// Brownian and Langevin integrators.
    pub fn sample_normal3(&mut self) -> Vector3 {
        Vector3::new(
            self.sample_normal(),
            self.sample_normal(),
            self.sample_normal(),
        )
    }

    /// Sample from `Uniform(0, 1)`. No integrator in this crate consumes
    /// it; exposed for host programs that need generic uniform noise from
    /// the same engine.
    pub fn sample_uniform01(&mut self) -> f64 {
        use rand::Rng;
        self.rng.gen::<f64>()
    }
}
