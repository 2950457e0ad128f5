//! Time integrators. Each one drives a [`crate::system::System`] for a
//! configured number of steps, maintaining its own scratch force buffer
//! and optionally invoking a step callback with the **1-based** step
//! index after each step completes.
//!
//! This is deliberately uniform across all three integrators, even though
//! a 0-based counter would also have been a defensible choice for the
//! Brownian and Newtonian cases.

mod brownian;
mod langevin;
mod newtonian;

pub use brownian::simulate_brownian;
pub use langevin::{simulate_langevin, Friction};
pub use newtonian::simulate_newtonian;
