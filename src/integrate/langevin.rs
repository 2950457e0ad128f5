use crate::attribute::AttributeTag;
use crate::config::{require_finite, LangevinConfig};
use crate::error::MdError;
use crate::rng::Engine;
use crate::system::System;
use crate::vector::Vector3;

/// Per-particle friction coefficient. Defaults to `0.0` (no damping) for
/// particles that never had it set explicitly.
pub struct Friction;

impl AttributeTag for Friction {
    type Value = f64;

    fn default_value() -> f64 {
        0.0
    }
}

/// Underdamped Langevin dynamics via the full B-A-O-A-B splitting.
/// Requires every particle's mass to be nonzero; a zero mass is a caller
/// programming error, not a recoverable one, and panics.
///
/// `callback`, if given, is invoked with the 1-based step index after
/// each step completes.
pub fn simulate_langevin(
    system: &mut System,
    config: &LangevinConfig,
    engine: &mut Engine,
    mut callback: Option<&mut dyn FnMut(u64, &System)>,
) -> Result<(), MdError> {
    require_finite(config.temperature, "temperature")?;
    require_finite(config.timestep, "timestep")?;

    system.add_attribute::<Friction>();

    let n = system.particle_count();
    assert!(
        system.view_masses().iter().all(|&m| m != 0.0),
        "Langevin dynamics requires every particle to have nonzero mass"
    );

    let half_dt = 0.5 * config.timestep;
    let mut force = vec![Vector3::zeros(); n];
    system.accumulate_force(&mut force);

    for step in 1..=config.steps {
        {
            let masses = system.view_masses().to_vec();
            let velocities = system.view_velocities_mut();
            for i in 0..n {
                velocities[i] += (half_dt / masses[i]) * force[i];
            }
        }

        {
            let velocities = system.view_velocities().to_vec();
            let positions = system.view_positions_mut();
            for i in 0..n {
                positions[i] += half_dt * velocities[i];
            }
        }

        {
            let masses = system.view_masses().to_vec();
            let frictions = system.view::<Friction>().to_vec();
            let velocities = system.view_velocities_mut();
            for i in 0..n {
                let gamma = (-frictions[i] * config.timestep).exp();
                let sigma = (config.temperature * (1.0 - gamma * gamma) / masses[i]).max(0.0).sqrt();
                velocities[i] = gamma * velocities[i] + sigma * engine.sample_normal3();
            }
        }

        {
            let velocities = system.view_velocities().to_vec();
            let positions = system.view_positions_mut();
            for i in 0..n {
                positions[i] += half_dt * velocities[i];
            }
        }

        force.iter_mut().for_each(|f| *f = Vector3::zeros());
        system.accumulate_force(&mut force);

        {
            let masses = system.view_masses().to_vec();
            let velocities = system.view_velocities_mut();
            for i in 0..n {
                velocities[i] += (half_dt / masses[i]) * force[i];
            }
        }

        if let Some(cb) = callback.as_deref_mut() {
            cb(step, system);
        }
    }

    Ok(())
}
