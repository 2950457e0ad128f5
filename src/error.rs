//! Crate error type.
//!
//! Programming errors (mismatched buffer sizes, unregistered attributes,
//! negative semi-axes, zero-mass Langevin particles) are not represented
//! here; they fail fast via `panic!`/`assert!` at the call site. `MdError`
//! covers only the small surface of caller-supplied-data problems that a
//! host program can reasonably recover from.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MdError {
    #[error("non-finite value in simulation configuration: {field}")]
    NonFiniteConfig { field: &'static str },

    #[error("seed sequence must be non-empty")]
    EmptySeedSequence,
}
