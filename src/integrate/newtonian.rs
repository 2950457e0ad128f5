use crate::config::{require_finite, NewtonianConfig};
use crate::error::MdError;
use crate::system::System;
use crate::vector::Vector3;

/// Velocity-Verlet Newtonian dynamics. The force used for the first
/// half-kick is zero on the very first step
/// (no prior force has been computed yet), then carried over from the
/// previous step's recomputation thereafter.
///
/// `callback`, if given, is invoked with the 1-based step index after
/// each step completes.
pub fn simulate_newtonian(
    system: &mut System,
    config: &NewtonianConfig,
    mut callback: Option<&mut dyn FnMut(u64, &System)>,
) -> Result<(), MdError> {
    require_finite(config.timestep, "timestep")?;

    let n = system.particle_count();
    let mut force = vec![Vector3::zeros(); n];

    for step in 1..=config.steps {
        {
            let masses = system.view_masses().to_vec();
            let velocities = system.view_velocities_mut();
            for i in 0..n {
                velocities[i] += (config.timestep / (2.0 * masses[i])) * force[i];
            }
        }

        {
            let velocities = system.view_velocities().to_vec();
            let positions = system.view_positions_mut();
            for i in 0..n {
                positions[i] += config.timestep * velocities[i];
            }
        }

        force.iter_mut().for_each(|f| *f = Vector3::zeros());
        system.accumulate_force(&mut force);

        {
            let masses = system.view_masses().to_vec();
            let velocities = system.view_velocities_mut();
            for i in 0..n {
                velocities[i] += (config.timestep / (2.0 * masses[i])) * force[i];
            }
        }

        if let Some(cb) = callback.as_deref_mut() {
            cb(step, system);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forcefield::PointSourceForcefield;
    use crate::potential::Harmonic;
    use crate::system::ParticleData;
    use crate::vector::Point3;
    use approx::assert_relative_eq;

    #[test]
    fn harmonic_oscillator_conserves_energy() {
        let mut system = System::new();
        system.add_particle(ParticleData {
            position: Point3::new(1.0, 0.0, 0.0),
            ..Default::default()
        });
        system.add_forcefield(PointSourceForcefield::new(Point3::origin(), Harmonic { k: 4.0 }));

        let config = NewtonianConfig {
            timestep: 0.001,
            steps: 2000,
        };
        let e0 = system.compute_energy();
        simulate_newtonian(&mut system, &config, None).unwrap();
        let e1 = system.compute_energy();
        assert_relative_eq!(e0, e1, epsilon = 1e-3);
    }

    #[test]
    fn callback_receives_one_based_step_index() {
        let mut system = System::new();
        system.add_particle(ParticleData::default());
        let config = NewtonianConfig {
            timestep: 0.01,
            steps: 3,
        };
        let mut seen = Vec::new();
        let mut cb = |step: u64, _: &System| seen.push(step);
        simulate_newtonian(&mut system, &config, Some(&mut cb)).unwrap();
        assert_eq!(seen, vec![1, 2, 3]);
    }
}
